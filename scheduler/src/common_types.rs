use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A point on the simulated timeline, in time units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(usize);

impl Timestamp {
    /// Creates a new Timestamp object
    ///
    /// * `time` - inital value of the Timestamp
    pub const fn new(time: usize) -> Timestamp {
        Timestamp(time)
    }

    pub const fn get(&self) -> usize {
        self.0
    }

    /// `self + units`, or `None` if the result does not fit in a `usize`
    pub fn checked_add(&self, units: usize) -> Option<Timestamp> {
        self.0.checked_add(units).map(Timestamp)
    }

    /// Returns the number of time units elapsed from `earlier` to `self`
    ///
    /// Saturates at zero if `earlier` is actually later.
    pub fn since(&self, earlier: Timestamp) -> usize {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<usize> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: usize) -> Self::Output {
        Timestamp::new(self.0 + rhs)
    }
}

impl From<usize> for Timestamp {
    fn from(time: usize) -> Self {
        Timestamp::new(time)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

//! Typed failures of the simulator and the address translator.

use thiserror::Error;

/// Errors raised while building or running a scheduling simulation.
///
/// All of them are detected before the simulation mutates any state,
/// so a failed call leaves the caller's inputs untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A process was described with malformed fields.
    #[error("invalid process `{name}`: {reason}")]
    InvalidProcessSpec { name: String, reason: String },

    /// The process set or the policy parameters cannot be simulated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A modification event is malformed or cannot be applied.
    #[error("invalid modification of `{target}`: {reason}")]
    InvalidModification { target: String, reason: String },
}

/// Errors raised by the paging arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagingError {
    /// A size or count parameter was zero.
    #[error("invalid size: {what} must be positive")]
    InvalidSize { what: &'static str },

    /// The computed address does not fit in 64 bits.
    #[error("address overflow: {0}")]
    AddressOverflow(String),
}

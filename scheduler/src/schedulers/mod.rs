//! The scheduling policies.

use std::num::NonZeroUsize;

use crate::scheduler::SchedulingDecision;

mod batch;
pub use batch::{FirstComeFirstServed, ShortestJobFirst, ShortestRemainingTimeNext};

mod round_robin;
pub use round_robin::RoundRobinScheduler;

fn run_for(process: usize, units: usize) -> SchedulingDecision {
    match NonZeroUsize::new(units) {
        Some(units) => SchedulingDecision::Run { process, units },
        None => SchedulingDecision::Idle,
    }
}

/// Removes the ready process with the smallest `key` and returns its
/// position; equal keys go to the earliest position in the input list
fn take_min<K: Ord>(ready: &mut Vec<usize>, key: impl Fn(usize) -> K) -> Option<usize> {
    let slot = ready
        .iter()
        .enumerate()
        .min_by_key(|&(_, &process)| (key(process), process))
        .map(|(slot, _)| slot)?;

    Some(ready.swap_remove(slot))
}

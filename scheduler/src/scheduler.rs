use std::num::NonZeroUsize;

use crate::scheduler_info::SchedulerInfo;

/// What the scheduler wants the CPU to do next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// Run the process at position `process` of the run for at most `units`
    Run { process: usize, units: NonZeroUsize },
    /// No process is ready
    Idle,
}

/// A scheduling policy
///
/// The simulation owns the processes and the clock. The scheduler only keeps
/// the positions of the ready processes and picks one of them whenever the
/// CPU becomes free.
pub trait Scheduler {
    /// Short name of the policy, used in logs and reports
    fn name(&self) -> &'static str;

    /// Notifies the scheduler that a process became `Ready`
    ///
    /// Called in order for new arrivals, processes reopened by a
    /// modification, and processes whose run was cut short.
    ///
    /// * `process` - position of the process in the run
    fn enqueue(&mut self, process: usize);

    /// Picks the next process to run
    ///
    /// * `info` - read-only view of the simulation at the current time
    fn next(&mut self, info: &SchedulerInfo<'_>) -> SchedulingDecision;

    /// Whether back-to-back runs of the same process are reported as a
    /// single interval
    fn merges_consecutive_runs(&self) -> bool {
        false
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn enqueue(&mut self, process: usize) {
        (**self).enqueue(process)
    }

    fn next(&mut self, info: &SchedulerInfo<'_>) -> SchedulingDecision {
        (**self).next(info)
    }

    fn merges_consecutive_runs(&self) -> bool {
        (**self).merges_consecutive_runs()
    }
}

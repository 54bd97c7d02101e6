use std::collections::VecDeque;
use std::num::NonZeroUsize;

use super::run_for;
use crate::scheduler::{Scheduler, SchedulingDecision};
use crate::scheduler_info::SchedulerInfo;

/// Round robin over a FIFO ready queue
///
/// Each dispatch pops the front of the queue and runs it for at most one
/// quanta. The simulation re-enqueues a preempted process only after the
/// processes that arrived during its slice.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    ready: VecDeque<usize>,
    quanta: NonZeroUsize,
}

impl RoundRobinScheduler {
    /// * `timeslice` - the time quanta that a process can run before it is preempted
    pub fn new(timeslice: NonZeroUsize) -> RoundRobinScheduler {
        RoundRobinScheduler {
            ready: VecDeque::new(),
            quanta: timeslice,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn enqueue(&mut self, process: usize) {
        self.ready.push_back(process);
    }

    fn next(&mut self, info: &SchedulerInfo<'_>) -> SchedulingDecision {
        match self.ready.pop_front() {
            Some(i) => {
                let remaining = info.process(i).remaining_execution();
                run_for(i, remaining.min(self.quanta.get()))
            }
            None => SchedulingDecision::Idle,
        }
    }
}

//! Non-interactive policies: FCFS, SJF and SRTN.
//!
//! All three keep the positions of the ready processes in a plain vector and
//! scan it at every decision point. Ties on the policy key fall back to the
//! arrival time and then to the position in the input list.

use log::debug;

use super::{run_for, take_min};
use crate::scheduler::{Scheduler, SchedulingDecision};
use crate::scheduler_info::SchedulerInfo;

/// First come, first served. Non-preemptive.
#[derive(Debug, Default)]
pub struct FirstComeFirstServed {
    ready: Vec<usize>,
}

impl FirstComeFirstServed {
    pub fn new() -> FirstComeFirstServed {
        FirstComeFirstServed::default()
    }
}

impl Scheduler for FirstComeFirstServed {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn enqueue(&mut self, process: usize) {
        self.ready.push(process);
    }

    fn next(&mut self, info: &SchedulerInfo<'_>) -> SchedulingDecision {
        match take_min(&mut self.ready, |i| info.process(i).arrival_time()) {
            Some(i) => run_for(i, info.process(i).remaining_execution()),
            None => SchedulingDecision::Idle,
        }
    }
}

/// Shortest job first. Non-preemptive: once picked, a process runs to
/// completion whatever arrives meanwhile.
#[derive(Debug, Default)]
pub struct ShortestJobFirst {
    ready: Vec<usize>,
}

impl ShortestJobFirst {
    pub fn new() -> ShortestJobFirst {
        ShortestJobFirst::default()
    }
}

impl Scheduler for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn enqueue(&mut self, process: usize) {
        self.ready.push(process);
    }

    fn next(&mut self, info: &SchedulerInfo<'_>) -> SchedulingDecision {
        let picked = take_min(&mut self.ready, |i| {
            let proc = info.process(i);
            (proc.total_execution(), proc.arrival_time())
        });

        match picked {
            Some(i) => run_for(i, info.process(i).remaining_execution()),
            None => SchedulingDecision::Idle,
        }
    }
}

/// Shortest remaining time next. Preemptive.
///
/// The selection is re-evaluated at every time unit. Between two events
/// (an arrival or a modification) the remaining time of the running process
/// only shrinks, so it is run straight up to the next event and the choice
/// is revisited there.
#[derive(Debug, Default)]
pub struct ShortestRemainingTimeNext {
    ready: Vec<usize>,
}

impl ShortestRemainingTimeNext {
    pub fn new() -> ShortestRemainingTimeNext {
        ShortestRemainingTimeNext::default()
    }
}

impl Scheduler for ShortestRemainingTimeNext {
    fn name(&self) -> &'static str {
        "SRTN"
    }

    fn enqueue(&mut self, process: usize) {
        self.ready.push(process);
    }

    fn next(&mut self, info: &SchedulerInfo<'_>) -> SchedulingDecision {
        let picked = take_min(&mut self.ready, |i| {
            let proc = info.process(i);
            (proc.remaining_execution(), proc.arrival_time())
        });

        let Some(i) = picked else {
            return SchedulingDecision::Idle;
        };

        let remaining = info.process(i).remaining_execution();
        let units = match info.time_to_next_event() {
            Some(until_event) if until_event > 0 && until_event < remaining => {
                debug!(
                    "{} may be preempted at {}",
                    info.process(i).name(),
                    info.now() + until_event
                );
                until_event
            }
            _ => remaining,
        };

        run_for(i, units)
    }

    fn merges_consecutive_runs(&self) -> bool {
        true
    }
}

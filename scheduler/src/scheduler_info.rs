use crate::common_types::Timestamp;
use crate::process::Process;

/// The state of a simulation, as seen by a scheduler at a decision point
pub struct SchedulerInfo<'a> {
    now: Timestamp,
    processes: &'a [Process],
    next_event: Option<Timestamp>,
}

impl<'a> SchedulerInfo<'a> {
    /// * `now` - current simulated time
    /// * `processes` - every process of the run, in input order
    /// * `next_event` - earliest future arrival or modification
    pub fn new(now: Timestamp, processes: &'a [Process], next_event: Option<Timestamp>) -> Self {
        SchedulerInfo {
            now,
            processes,
            next_event,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn process(&self, index: usize) -> &'a Process {
        &self.processes[index]
    }

    /// Time units left until a process may become ready, if anything is pending
    pub fn time_to_next_event(&self) -> Option<usize> {
        self.next_event.map(|event| event.since(self.now))
    }
}

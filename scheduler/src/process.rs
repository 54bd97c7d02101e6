use log::trace;

use crate::common_types::Timestamp;
use crate::error::SchedulerError;
use crate::execution_table::IDLE_LABEL;

/// The lifecycle of a simulated process
///
/// ```text
/// Pending -> Ready -> Running -> Completed
///              ^         |           |
///              +---------+-----------+
///         (preempted)   (reopened by a modification)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// Not arrived yet
    Pending,
    /// Arrived and waiting for the CPU
    Ready,
    /// Currently holding the CPU
    Running,
    /// No execution left
    Completed,
}

/// A process taking part in one simulation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    name: String,
    arrival_time: Timestamp,
    total_execution: usize,
    remaining_execution: usize,
    state: ProcessState,
    completion_time: Option<Timestamp>,
}

impl Process {
    /// Creates a new process, in the `Pending` state
    ///
    /// * `name` - identifier of the process, unique within a run
    /// * `arrival_time` - time unit when the process becomes eligible to run
    /// * `total_execution` - time units of work the process needs
    pub fn new(
        name: impl Into<String>,
        arrival_time: usize,
        total_execution: usize,
    ) -> Result<Process, SchedulerError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(SchedulerError::InvalidProcessSpec {
                name,
                reason: "name must not be empty".to_string(),
            });
        }

        if name == IDLE_LABEL {
            return Err(SchedulerError::InvalidProcessSpec {
                name,
                reason: format!("`{}` is reserved for idle intervals", IDLE_LABEL),
            });
        }

        if total_execution == 0 {
            return Err(SchedulerError::InvalidProcessSpec {
                name,
                reason: "total execution must be positive".to_string(),
            });
        }

        if arrival_time.checked_add(total_execution).is_none() {
            return Err(SchedulerError::InvalidProcessSpec {
                name,
                reason: "arrival time plus execution overflows".to_string(),
            });
        }

        Ok(Process {
            name,
            arrival_time: Timestamp::new(arrival_time),
            total_execution,
            remaining_execution: total_execution,
            state: ProcessState::Pending,
            completion_time: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    pub fn total_execution(&self) -> usize {
        self.total_execution
    }

    pub fn remaining_execution(&self) -> usize {
        self.remaining_execution
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_execution == 0
    }

    /// Time when the process last ran out of execution, if it has
    pub fn completion_time(&self) -> Option<Timestamp> {
        self.completion_time
    }

    pub fn turnaround_time(&self) -> Option<usize> {
        self.completion_time
            .map(|completion| completion.since(self.arrival_time))
    }

    pub fn waiting_time(&self) -> Option<usize> {
        self.turnaround_time()
            .map(|turnaround| turnaround.saturating_sub(self.total_execution))
    }

    /// Moves an arrived process from `Pending` to `Ready`
    pub(crate) fn admit(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Pending);
        trace!("{} arrived at {}", self.name, self.arrival_time);
        self.state = ProcessState::Ready;
    }

    /// Hands the CPU to a `Ready` process
    pub(crate) fn dispatch(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Ready);
        self.state = ProcessState::Running;
    }

    /// Takes the CPU away from a `Running` process that still has work left
    pub(crate) fn preempt(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Running);
        debug_assert!(!self.is_complete());
        self.state = ProcessState::Ready;
    }

    /// Executes the process for at most `units` time units, starting at `now`
    ///
    /// Returns the units actually consumed, which is smaller than `units` when
    /// less execution remains. When the remaining execution reaches zero the
    /// process becomes `Completed` at `now` plus the consumed units.
    ///
    /// * `units` - requested execution time
    /// * `now` - time when this run starts
    pub fn run(&mut self, units: usize, now: Timestamp) -> usize {
        let consumed = units.min(self.remaining_execution);
        self.remaining_execution -= consumed;

        if self.remaining_execution == 0 && self.state != ProcessState::Completed {
            self.state = ProcessState::Completed;
            self.completion_time = Some(now + consumed);
        }

        consumed
    }

    /// Adds `delta` units of work to the process
    ///
    /// A completed process is reopened: it becomes `Ready` again and its
    /// completion time is cleared until it finishes the added work.
    ///
    /// * `delta` - extra execution units, must be positive
    pub fn apply_modification(&mut self, delta: usize) -> Result<(), SchedulerError> {
        self.check_modification(delta)?;
        self.add_work(delta);
        Ok(())
    }

    /// Rejects a `delta` that is zero or would overflow the total execution
    pub(crate) fn check_modification(&self, delta: usize) -> Result<(), SchedulerError> {
        let invalid = |reason: &str| SchedulerError::InvalidModification {
            target: self.name.clone(),
            reason: reason.to_string(),
        };

        if delta == 0 {
            return Err(invalid("delta must be positive"));
        }

        if self.total_execution.checked_add(delta).is_none() {
            return Err(invalid("delta overflows the total execution"));
        }

        Ok(())
    }

    /// Adds an already checked `delta`, reopening a completed process
    pub(crate) fn add_work(&mut self, delta: usize) {
        self.total_execution += delta;
        self.remaining_execution += delta;

        if self.state == ProcessState::Completed {
            self.state = ProcessState::Ready;
            self.completion_time = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_specs() {
        assert!(matches!(
            Process::new("", 0, 3),
            Err(SchedulerError::InvalidProcessSpec { .. })
        ));
        assert!(matches!(
            Process::new("A", 0, 0),
            Err(SchedulerError::InvalidProcessSpec { .. })
        ));
    }

    #[test]
    fn run_consumes_at_most_what_is_left() {
        let mut proc = Process::new("A", 0, 5).unwrap();
        proc.admit();
        proc.dispatch();

        assert_eq!(proc.run(3, Timestamp::new(0)), 3);
        assert_eq!(proc.remaining_execution(), 2);
        assert!(!proc.is_complete());

        assert_eq!(proc.run(4, Timestamp::new(3)), 2);
        assert!(proc.is_complete());
        assert_eq!(proc.state(), ProcessState::Completed);
        assert_eq!(proc.completion_time(), Some(Timestamp::new(5)));
        assert_eq!(proc.turnaround_time(), Some(5));
        assert_eq!(proc.waiting_time(), Some(0));
    }

    #[test]
    fn modification_reopens_completed_process() {
        let mut proc = Process::new("A", 2, 1).unwrap();
        proc.admit();
        proc.dispatch();
        proc.run(1, Timestamp::new(2));
        assert_eq!(proc.completion_time(), Some(Timestamp::new(3)));

        proc.apply_modification(4).unwrap();

        assert_eq!(proc.state(), ProcessState::Ready);
        assert_eq!(proc.total_execution(), 5);
        assert_eq!(proc.remaining_execution(), 4);
        assert_eq!(proc.completion_time(), None);
    }

    #[test]
    fn idle_label_is_reserved() {
        assert!(matches!(
            Process::new(IDLE_LABEL, 0, 1),
            Err(SchedulerError::InvalidProcessSpec { .. })
        ));
        assert!(Process::new("idler", 0, 1).is_ok());
    }

    #[test]
    fn rejects_arrival_that_overflows_the_timeline() {
        assert!(matches!(
            Process::new("A", usize::MAX, 1),
            Err(SchedulerError::InvalidProcessSpec { .. })
        ));
        assert!(Process::new("A", usize::MAX - 1, 1).is_ok());
    }

    #[test]
    fn overflowing_delta_leaves_the_process_untouched() {
        let mut proc = Process::new("A", 0, 2).unwrap();
        assert!(matches!(
            proc.apply_modification(usize::MAX),
            Err(SchedulerError::InvalidModification { .. })
        ));
        assert_eq!(proc.total_execution(), 2);
        assert_eq!(proc.remaining_execution(), 2);
    }

    #[test]
    fn zero_delta_is_rejected() {
        let mut proc = Process::new("A", 0, 1).unwrap();
        assert!(matches!(
            proc.apply_modification(0),
            Err(SchedulerError::InvalidModification { .. })
        ));
        assert_eq!(proc.total_execution(), 1);
    }
}

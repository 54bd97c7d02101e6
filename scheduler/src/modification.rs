use serde::{Deserialize, Serialize};

use crate::common_types::Timestamp;
use crate::error::SchedulerError;
use crate::process::Process;

/// Extra work injected into a process while an interactive simulation runs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    /// Name of the process receiving the work
    pub target: String,
    /// Simulated time when the change happens
    pub time_of_change: Timestamp,
    /// Execution units added to the target
    pub delta: usize,
}

impl Modification {
    pub fn new(target: impl Into<String>, time_of_change: usize, delta: usize) -> Modification {
        Modification {
            target: target.into(),
            time_of_change: Timestamp::new(time_of_change),
            delta,
        }
    }

    /// Checks the event against the processes of the run and returns the
    /// position of its target
    pub(crate) fn resolve(&self, processes: &[Process]) -> Result<usize, SchedulerError> {
        let invalid = |reason: String| SchedulerError::InvalidModification {
            target: self.target.clone(),
            reason,
        };

        let index = processes
            .iter()
            .position(|proc| proc.name() == self.target)
            .ok_or_else(|| invalid("no such process".to_string()))?;

        processes[index].check_modification(self.delta)?;

        let arrival = processes[index].arrival_time();
        if self.time_of_change < arrival {
            return Err(invalid(format!(
                "change at {} happens before the process arrives at {}",
                self.time_of_change, arrival
            )));
        }

        Ok(index)
    }
}

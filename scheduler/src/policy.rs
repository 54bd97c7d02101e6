use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::execution_table::ExecutionTable;
use crate::modification::Modification;
use crate::process::Process;
use crate::scheduler::Scheduler;
use crate::schedulers::{
    FirstComeFirstServed, RoundRobinScheduler, ShortestJobFirst, ShortestRemainingTimeNext,
};
use crate::simulation::Simulation;

/// The scheduling policies, each with its own parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Policy {
    #[serde(alias = "fcfs")]
    FirstComeFirstServed,
    #[serde(alias = "sjf")]
    ShortestJobFirst,
    #[serde(alias = "srtn")]
    ShortestRemainingTimeNext,
    #[serde(alias = "rr")]
    RoundRobin {
        time_slice: NonZeroUsize,
        #[serde(default)]
        modifications: Vec<Modification>,
    },
}

impl Policy {
    pub fn round_robin(time_slice: NonZeroUsize) -> Policy {
        Policy::RoundRobin {
            time_slice,
            modifications: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::FirstComeFirstServed => "FCFS",
            Policy::ShortestJobFirst => "SJF",
            Policy::ShortestRemainingTimeNext => "SRTN",
            Policy::RoundRobin { .. } => "RR",
        }
    }

    /// Workload changes applied during the run; only interactive policies carry them
    pub fn modifications(&self) -> &[Modification] {
        match self {
            Policy::RoundRobin { modifications, .. } => modifications,
            _ => &[],
        }
    }

    /// A fresh scheduler implementing this policy
    pub fn scheduler(&self) -> Box<dyn Scheduler + Send> {
        match self {
            Policy::FirstComeFirstServed => Box::new(FirstComeFirstServed::new()),
            Policy::ShortestJobFirst => Box::new(ShortestJobFirst::new()),
            Policy::ShortestRemainingTimeNext => Box::new(ShortestRemainingTimeNext::new()),
            Policy::RoundRobin { time_slice, .. } => {
                Box::new(RoundRobinScheduler::new(*time_slice))
            }
        }
    }
}

/// Runs `processes` under `policy` and returns the resulting timeline
///
/// * `processes` - freshly created processes, in input order; ties between
///                 otherwise equal processes go to the earlier one
/// * `policy` - the scheduling policy and its parameters
pub fn simulate(processes: Vec<Process>, policy: &Policy) -> Result<ExecutionTable, SchedulerError> {
    Simulation::new(policy.scheduler(), processes, policy.modifications())?.run()
}

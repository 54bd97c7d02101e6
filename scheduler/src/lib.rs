//! A CPU scheduling simulator.
//!
//! This library computes, for a set of processes and a scheduling policy,
//! the full execution timeline and the per-process metrics derived from it.
//! It also provides the paging arithmetic used to translate logical
//! addresses into physical ones.
//!
//! ```
//! use cpusim::{simulate, Policy, Process};
//!
//! let processes = vec![
//!     Process::new("A", 1, 5).unwrap(),
//!     Process::new("B", 2, 6).unwrap(),
//!     Process::new("C", 3, 8).unwrap(),
//! ];
//!
//! let table = simulate(processes, &Policy::FirstComeFirstServed).unwrap();
//! assert_eq!(table.execution_string(), "(A, 1, 6), (B, 6, 12), (C, 12, 20)");
//! ```
//!
//! Every simulation owns its inputs and shares nothing with other runs, so
//! independent simulations can run on separate threads.

use std::num::NonZeroUsize;

mod common_types;
pub use crate::common_types::Timestamp;

mod error;
pub use crate::error::{PagingError, SchedulerError};

mod process;
pub use crate::process::{Process, ProcessState};

mod modification;
pub use crate::modification::Modification;

mod execution_table;
pub use crate::execution_table::{
    ExecutionTable, Interval, ProcessMetrics, ProcessRecord, Slot, IDLE_LABEL,
};

mod scheduler;
pub use crate::scheduler::{Scheduler, SchedulingDecision};

mod scheduler_info;
pub use crate::scheduler_info::SchedulerInfo;

mod schedulers;
pub use schedulers::{
    FirstComeFirstServed, RoundRobinScheduler, ShortestJobFirst, ShortestRemainingTimeNext,
};

mod simulation;
pub use crate::simulation::{Simulation, Step};

mod policy;
pub use crate::policy::{simulate, Policy};

pub mod paging;

/// Returns a structure that implements the `Scheduler` trait with a first come, first served policy
pub fn fcfs() -> impl Scheduler {
    FirstComeFirstServed::new()
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive
/// shortest job first policy
pub fn sjf() -> impl Scheduler {
    ShortestJobFirst::new()
}

/// Returns a structure that implements the `Scheduler` trait with a shortest remaining
/// time next policy
pub fn srtn() -> impl Scheduler {
    ShortestRemainingTimeNext::new()
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
pub fn round_robin(timeslice: NonZeroUsize) -> impl Scheduler {
    RoundRobinScheduler::new(timeslice)
}

#[cfg(test)]
mod tests;

//! The driving loop shared by every policy.
//!
//! A [Simulation] owns the processes, the clock and the execution table of
//! one run. At every decision point it asks its [Scheduler] what to do, runs
//! the chosen process, and then settles the boundary it stopped at, in this
//! order:
//!
//! 1. processes that arrived by now are admitted (arrival time, then input order),
//! 2. modification events due by now are applied; completed targets are reopened,
//! 3. the process that was just cut short goes back to the scheduler.
//!
//! Round robin relies on that order to place newcomers ahead of the process
//! whose slice expired.

use std::collections::HashSet;

use log::debug;

use crate::common_types::Timestamp;
use crate::error::SchedulerError;
use crate::execution_table::{ExecutionTable, Slot};
use crate::modification::Modification;
use crate::process::{Process, ProcessState};
use crate::scheduler::{Scheduler, SchedulingDecision};
use crate::scheduler_info::SchedulerInfo;

/// Outcome of a single [Simulation::step]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The process at position `process` held the CPU from `start` to `end`
    Ran {
        process: usize,
        start: Timestamp,
        end: Timestamp,
    },
    /// Nothing was ready; the CPU idled until the next arrival or modification
    Idled { start: Timestamp, end: Timestamp },
    /// Nothing is ready and nothing else will happen
    Finished,
}

#[derive(Clone, Copy, Debug)]
struct PendingChange {
    time: Timestamp,
    target: usize,
    delta: usize,
}

pub struct Simulation<S: Scheduler> {
    scheduler: S,
    processes: Vec<Process>,
    /// Positions of the processes, by arrival time then input order
    arrivals: Vec<usize>,
    next_arrival: usize,
    changes: Vec<PendingChange>,
    next_change: usize,
    now: Timestamp,
    table: ExecutionTable,
}

impl<S: Scheduler> Simulation<S> {
    /// Validates the inputs and prepares a run
    ///
    /// The clock starts at the earliest arrival, with every process that
    /// arrives then already handed to the scheduler.
    ///
    /// * `scheduler` - the policy driving the run
    /// * `processes` - freshly created processes, in input order
    /// * `modifications` - workload changes to apply while the run goes on
    pub fn new(
        scheduler: S,
        processes: Vec<Process>,
        modifications: &[Modification],
    ) -> Result<Simulation<S>, SchedulerError> {
        validate_processes(&processes)?;

        let mut changes = modifications
            .iter()
            .map(|modification| {
                modification.resolve(&processes).map(|target| PendingChange {
                    time: modification.time_of_change,
                    target,
                    delta: modification.delta,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        changes.sort_by_key(|change| change.time);
        check_horizon(&processes, &changes)?;

        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&i| (processes[i].arrival_time(), i));

        let now = processes[arrivals[0]].arrival_time();

        debug!(
            "{}: simulating {} processes from t={}",
            scheduler.name(),
            processes.len(),
            now
        );

        let mut simulation = Simulation {
            scheduler,
            processes,
            arrivals,
            next_arrival: 0,
            changes,
            next_change: 0,
            now,
            table: ExecutionTable::new(),
        };
        simulation.settle(None);

        Ok(simulation)
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// The timeline recorded so far
    pub fn table(&self) -> &ExecutionTable {
        &self.table
    }

    pub fn is_finished(&self) -> bool {
        self.processes.iter().all(Process::is_complete) && self.next_event().is_none()
    }

    /// Performs exactly one scheduling decision at the current time
    pub fn step(&mut self) -> Step {
        let info = SchedulerInfo::new(self.now, &self.processes, self.next_event());

        match self.scheduler.next(&info) {
            SchedulingDecision::Run { process, units } => {
                let start = self.now;
                let proc = &mut self.processes[process];

                proc.dispatch();
                let consumed = proc.run(units.get(), start);
                let end = start + consumed;

                debug!(
                    "{}: {} runs {}..{} ({} left)",
                    self.scheduler.name(),
                    proc.name(),
                    start,
                    end,
                    proc.remaining_execution()
                );

                let slot = Slot::Process(proc.name().to_string());
                if self.scheduler.merges_consecutive_runs() {
                    self.table.extend(slot, start, end);
                } else {
                    self.table.push(slot, start, end);
                }

                self.now = end;
                self.settle(Some(process));

                Step::Ran {
                    process,
                    start,
                    end,
                }
            }
            SchedulingDecision::Idle => match self.next_event() {
                Some(until) => {
                    let start = self.now;
                    debug!("{}: idle {}..{}", self.scheduler.name(), start, until);

                    self.table.push(Slot::Idle, start, until);
                    self.now = until;
                    self.settle(None);

                    Step::Idled { start, end: until }
                }
                None => Step::Finished,
            },
        }
    }

    /// Steps until nothing is left to do and returns the execution table
    pub fn run(mut self) -> Result<ExecutionTable, SchedulerError> {
        while self.step() != Step::Finished {}

        if let Some(proc) = self.processes.iter().find(|proc| !proc.is_complete()) {
            return Err(SchedulerError::InvalidInput(format!(
                "{} stopped with `{}` unfinished",
                self.scheduler.name(),
                proc.name()
            )));
        }

        self.table.set_processes(&self.processes);
        Ok(self.table)
    }

    fn pending_arrival(&self) -> Option<Timestamp> {
        self.arrivals
            .get(self.next_arrival)
            .map(|&i| self.processes[i].arrival_time())
    }

    fn pending_change(&self) -> Option<Timestamp> {
        self.changes.get(self.next_change).map(|change| change.time)
    }

    /// Earliest future time when something becomes ready
    fn next_event(&self) -> Option<Timestamp> {
        match (self.pending_arrival(), self.pending_change()) {
            (Some(arrival), Some(change)) => Some(arrival.min(change)),
            (arrival, change) => arrival.or(change),
        }
    }

    /// Brings the run up to date with `now`
    ///
    /// * `interrupted` - the process that just held the CPU, if any
    fn settle(&mut self, interrupted: Option<usize>) {
        while let Some(&i) = self.arrivals.get(self.next_arrival) {
            if self.processes[i].arrival_time() > self.now {
                break;
            }

            self.processes[i].admit();
            self.scheduler.enqueue(i);
            self.next_arrival += 1;
        }

        while let Some(&change) = self.changes.get(self.next_change) {
            if change.time > self.now {
                break;
            }
            self.next_change += 1;

            let proc = &mut self.processes[change.target];
            let reopened = proc.state() == ProcessState::Completed;

            proc.add_work(change.delta);
            debug!(
                "{}: {} gets {} more units at {}",
                self.scheduler.name(),
                proc.name(),
                change.delta,
                self.now
            );

            if reopened {
                self.scheduler.enqueue(change.target);
            }
        }

        if let Some(i) = interrupted {
            let proc = &mut self.processes[i];
            if proc.state() == ProcessState::Running {
                proc.preempt();
                self.scheduler.enqueue(i);
            }
        }
    }
}

/// Every timestamp of the run stays below the last event plus all the work
/// there is to do; that bound has to fit in a `usize`
fn check_horizon(processes: &[Process], changes: &[PendingChange]) -> Result<(), SchedulerError> {
    let last_event = processes
        .iter()
        .map(Process::arrival_time)
        .chain(changes.iter().map(|change| change.time))
        .max()
        .unwrap_or_default();

    let work = processes
        .iter()
        .map(Process::total_execution)
        .chain(changes.iter().map(|change| change.delta))
        .try_fold(0usize, usize::checked_add);

    match work.and_then(|work| last_event.checked_add(work)) {
        Some(_) => Ok(()),
        None => Err(SchedulerError::InvalidInput(
            "the simulated timeline does not fit in a usize".to_string(),
        )),
    }
}

fn validate_processes(processes: &[Process]) -> Result<(), SchedulerError> {
    if processes.is_empty() {
        return Err(SchedulerError::InvalidInput(
            "at least one process is required".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for proc in processes {
        if !names.insert(proc.name()) {
            return Err(SchedulerError::InvalidInput(format!(
                "process name `{}` is used more than once",
                proc.name()
            )));
        }

        if proc.state() != ProcessState::Pending
            || proc.remaining_execution() != proc.total_execution()
        {
            return Err(SchedulerError::InvalidInput(format!(
                "process `{}` has already been run",
                proc.name()
            )));
        }
    }

    Ok(())
}

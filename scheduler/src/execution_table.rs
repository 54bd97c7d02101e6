//! The Gantt-style timeline produced by every scheduler.
//!
//! An [ExecutionTable] is an ordered, gap-free sequence of [Interval]s plus
//! the static facts about each process of the run. Per-process metrics are
//! derived from the intervals on demand, so the table stays the single
//! source of truth for what happened during the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common_types::Timestamp;
use crate::process::Process;

/// Label used for idle intervals in textual renderings
pub const IDLE_LABEL: &str = "idle";

/// Who holds the CPU during an interval
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Idle,
    Process(String),
}

impl Slot {
    pub fn label(&self) -> &str {
        match self {
            Slot::Idle => IDLE_LABEL,
            Slot::Process(name) => name,
        }
    }

    pub fn process_name(&self) -> Option<&str> {
        match self {
            Slot::Idle => None,
            Slot::Process(name) => Some(name),
        }
    }
}

/// One contiguous stretch of CPU time, `start < end`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub slot: Slot,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval {
    pub fn duration(&self) -> usize {
        self.end.since(self.start)
    }
}

/// Static facts about a process, captured when the simulation ends
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub name: String,
    pub arrival_time: Timestamp,
    /// Final value, including the work added by modifications
    pub total_execution: usize,
}

impl From<&Process> for ProcessRecord {
    fn from(proc: &Process) -> Self {
        ProcessRecord {
            name: proc.name().to_string(),
            arrival_time: proc.arrival_time(),
            total_execution: proc.total_execution(),
        }
    }
}

/// Derived timings of a finished process
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub name: String,
    pub arrival_time: Timestamp,
    pub total_execution: usize,
    pub completion_time: Timestamp,
    pub turnaround_time: usize,
    pub waiting_time: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTable {
    intervals: Vec<Interval>,
    processes: Vec<ProcessRecord>,
}

impl ExecutionTable {
    pub fn new() -> ExecutionTable {
        ExecutionTable::default()
    }

    /// Appends an interval at the end of the timeline
    ///
    /// Empty intervals are ignored. The interval must start where the last
    /// one ended.
    ///
    /// * `slot` - who holds the CPU
    /// * `start` - first time unit of the interval
    /// * `end` - time unit right after the interval
    pub fn push(&mut self, slot: Slot, start: Timestamp, end: Timestamp) {
        if start >= end {
            return;
        }

        debug_assert!(
            self.end().map_or(true, |last| last == start),
            "interval {}..{} leaves a gap or overlaps",
            start,
            end
        );

        self.intervals.push(Interval { slot, start, end });
    }

    /// Like [ExecutionTable::push], but grows the last interval instead when
    /// it belongs to the same slot and ends at `start`
    pub fn extend(&mut self, slot: Slot, start: Timestamp, end: Timestamp) {
        if let Some(last) = self.intervals.last_mut() {
            if last.slot == slot && last.end == start && start < end {
                last.end = end;
                return;
            }
        }

        self.push(slot, start, end);
    }

    pub(crate) fn set_processes(&mut self, processes: &[Process]) {
        self.processes = processes.iter().map(ProcessRecord::from).collect();
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn start(&self) -> Option<Timestamp> {
        self.intervals.first().map(|interval| interval.start)
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.intervals.last().map(|interval| interval.end)
    }

    /// Time units in which some process held the CPU, summed per name
    pub fn executed_by(&self, name: &str) -> usize {
        self.intervals
            .iter()
            .filter(|interval| interval.slot.process_name() == Some(name))
            .map(Interval::duration)
            .sum()
    }

    pub fn idle_time(&self) -> usize {
        self.intervals
            .iter()
            .filter(|interval| interval.slot == Slot::Idle)
            .map(Interval::duration)
            .sum()
    }

    /// Share of the simulated span in which the CPU was busy, in `0.0..=1.0`
    pub fn utilization(&self) -> f64 {
        let span = match (self.start(), self.end()) {
            (Some(start), Some(end)) => end.since(start),
            _ => return 0.0,
        };

        if span == 0 {
            return 0.0;
        }

        (span - self.idle_time()) as f64 / span as f64
    }

    /// Metrics of one process, `None` if it is unknown or never ran
    pub fn metrics_for(&self, name: &str) -> Option<ProcessMetrics> {
        let record = self.processes.iter().find(|record| record.name == name)?;
        let completion_time = self
            .intervals
            .iter()
            .rev()
            .find(|interval| interval.slot.process_name() == Some(name))?
            .end;

        let turnaround_time = completion_time.since(record.arrival_time);

        Some(ProcessMetrics {
            name: record.name.clone(),
            arrival_time: record.arrival_time,
            total_execution: record.total_execution,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time.saturating_sub(record.total_execution),
        })
    }

    /// Metrics of every process, in input order
    pub fn metrics(&self) -> Vec<ProcessMetrics> {
        self.processes
            .iter()
            .filter_map(|record| self.metrics_for(&record.name))
            .collect()
    }

    pub fn average_waiting_time(&self) -> f64 {
        average(self.metrics().iter().map(|metrics| metrics.waiting_time))
    }

    pub fn average_turnaround_time(&self) -> f64 {
        average(self.metrics().iter().map(|metrics| metrics.turnaround_time))
    }

    /// The chronological `(name, start, end)` rendering of the timeline
    pub fn execution_string(&self) -> String {
        self.to_string()
    }
}

fn average(values: impl Iterator<Item = usize>) -> f64 {
    let (sum, count) = values.fold((0usize, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

impl fmt::Display for ExecutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {}, {})", interval.slot.label(), interval.start, interval.end)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(time: usize) -> Timestamp {
        Timestamp::new(time)
    }

    fn table() -> ExecutionTable {
        let mut table = ExecutionTable::new();
        table.processes = vec![
            ProcessRecord { name: "A".into(), arrival_time: at(0), total_execution: 3 },
            ProcessRecord { name: "B".into(), arrival_time: at(1), total_execution: 2 },
        ];
        table.push(Slot::Process("A".into()), at(0), at(2));
        table.push(Slot::Process("B".into()), at(2), at(4));
        table.push(Slot::Idle, at(4), at(6));
        table.push(Slot::Process("A".into()), at(6), at(7));
        table
    }

    #[test]
    fn renders_in_chronological_order() {
        assert_eq!(table().execution_string(), "(A, 0, 2), (B, 2, 4), (idle, 4, 6), (A, 6, 7)");
    }

    #[test]
    fn metrics_use_the_last_interval() {
        let table = table();
        let a = table.metrics_for("A").unwrap();
        assert_eq!(a.completion_time, at(7));
        assert_eq!(a.turnaround_time, 7);
        assert_eq!(a.waiting_time, 4);

        let b = table.metrics_for("B").unwrap();
        assert_eq!(b.turnaround_time, 3);
        assert_eq!(b.waiting_time, 1);

        assert_eq!(table.average_waiting_time(), 2.5);
        assert_eq!(table.average_turnaround_time(), 5.0);
    }

    #[test]
    fn idle_time_and_utilization() {
        let table = table();
        assert_eq!(table.idle_time(), 2);
        assert_eq!(table.executed_by("A"), 3);
        assert!((table.utilization() - 5.0 / 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn extend_merges_contiguous_runs_of_the_same_slot() {
        let mut table = ExecutionTable::new();
        table.extend(Slot::Process("A".into()), at(0), at(1));
        table.extend(Slot::Process("A".into()), at(1), at(3));
        table.extend(Slot::Process("B".into()), at(3), at(4));

        assert_eq!(table.intervals().len(), 2);
        assert_eq!(table.intervals()[0].end, at(3));
    }

    #[test]
    fn empty_table_has_no_span() {
        let table = ExecutionTable::new();
        assert_eq!(table.start(), None);
        assert_eq!(table.utilization(), 0.0);
        assert_eq!(table.average_waiting_time(), 0.0);
        assert_eq!(table.execution_string(), "");
    }
}

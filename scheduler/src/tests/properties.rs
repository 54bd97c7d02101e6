use std::num::NonZeroUsize;

use proptest::prelude::*;

use super::procs;
use crate::paging::{address_bit_width, page_number, real_address};
use crate::{simulate, ExecutionTable, Modification, Policy, Process, Slot};

fn workload() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..20, 1usize..10), 1..8)
}

fn build(specs: &[(usize, usize)]) -> Vec<Process> {
    let names: Vec<String> = (0..specs.len()).map(|i| format!("P{}", i)).collect();
    let triples: Vec<(&str, usize, usize)> = names
        .iter()
        .zip(specs)
        .map(|(name, &(arrival, exec))| (name.as_str(), arrival, exec))
        .collect();
    procs(&triples)
}

fn total_waiting(table: &ExecutionTable) -> usize {
    table.metrics().iter().map(|m| m.waiting_time).sum()
}

fn check_timeline(table: &ExecutionTable, processes: &[Process]) {
    for pair in table.intervals().windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    for interval in table.intervals() {
        assert!(interval.start < interval.end);
    }
    for proc in processes {
        let metrics = table.metrics_for(proc.name()).unwrap();
        assert_eq!(table.executed_by(proc.name()), metrics.total_execution);
        assert!(metrics.turnaround_time >= metrics.total_execution);
    }
}

proptest! {
    #[test]
    fn fcfs_follows_arrival_order(specs in workload()) {
        let processes = build(&specs);
        let table = simulate(processes.clone(), &Policy::FirstComeFirstServed).unwrap();
        check_timeline(&table, &processes);

        let mut order: Vec<usize> = (0..specs.len()).collect();
        order.sort_by_key(|&i| (specs[i].0, i));
        let expected: Vec<String> = order.iter().map(|i| format!("P{}", i)).collect();

        let ran: Vec<String> = table
            .intervals()
            .iter()
            .filter_map(|interval| interval.slot.process_name().map(str::to_string))
            .collect();
        prop_assert_eq!(ran, expected);
    }

    #[test]
    fn every_policy_runs_each_process_for_its_total(specs in workload(), slice in 1usize..5) {
        let processes = build(&specs);
        let policies = [
            Policy::FirstComeFirstServed,
            Policy::ShortestJobFirst,
            Policy::ShortestRemainingTimeNext,
            Policy::round_robin(NonZeroUsize::new(slice).unwrap()),
        ];

        for policy in &policies {
            let table = simulate(processes.clone(), policy).unwrap();
            check_timeline(&table, &processes);
        }
    }

    #[test]
    fn srtn_waits_no_longer_than_sjf(specs in workload()) {
        let processes = build(&specs);
        let sjf = simulate(processes.clone(), &Policy::ShortestJobFirst).unwrap();
        let srtn = simulate(processes, &Policy::ShortestRemainingTimeNext).unwrap();

        prop_assert!(total_waiting(&srtn) <= total_waiting(&sjf));
    }

    #[test]
    fn round_robin_slices_never_exceed_the_quanta(specs in workload(), slice in 1usize..5) {
        let table = simulate(
            build(&specs),
            &Policy::round_robin(NonZeroUsize::new(slice).unwrap()),
        )
        .unwrap();

        for interval in table.intervals() {
            if interval.slot != Slot::Idle {
                prop_assert!(interval.duration() <= slice);
            }
        }
    }

    #[test]
    fn late_modification_delays_completion_by_at_least_delta(
        specs in workload(),
        slice in 1usize..5,
        target in any::<prop::sample::Index>(),
        wait in 0usize..5,
        delta in 1usize..6,
    ) {
        let processes = build(&specs);
        let target = target.index(processes.len());
        let name = processes[target].name().to_string();
        let time_slice = NonZeroUsize::new(slice).unwrap();

        let before = simulate(processes.clone(), &Policy::round_robin(time_slice)).unwrap();
        let finished = before.metrics_for(&name).unwrap().completion_time;

        let policy = Policy::RoundRobin {
            time_slice,
            modifications: vec![Modification::new(name.clone(), finished.get() + wait, delta)],
        };
        let after = simulate(processes.clone(), &policy).unwrap();
        check_timeline(&after, &processes);

        let metrics = after.metrics_for(&name).unwrap();
        prop_assert!(metrics.completion_time.get() >= finished.get() + delta);
        prop_assert_eq!(metrics.total_execution, specs[target].1 + delta);
    }

    #[test]
    fn translation_keeps_the_offset(logical in 0u64..1 << 40, shift in 0u32..20, frame in 0u64..1 << 20) {
        let page_size = 1u64 << shift;
        let page = page_number(logical, page_size).unwrap();

        let physical = real_address(logical, page_size, page).unwrap();
        prop_assert_eq!(physical % page_size, logical % page_size);

        let mapped = real_address(logical, page_size, frame).unwrap();
        prop_assert_eq!(mapped / page_size, frame);
    }

    #[test]
    fn bit_width_is_monotonic(count in 1u64..1 << 20, size in 1u64..1 << 20, more in 0u64..1000) {
        let base = address_bit_width(count, size).unwrap();

        prop_assert!(address_bit_width(count + more, size).unwrap() >= base);
        prop_assert!(address_bit_width(count, size + more).unwrap() >= base);
    }
}

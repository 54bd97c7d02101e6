use crate::{ExecutionTable, Process};

mod paging;
mod properties;

/// Builds processes from `(name, arrival, execution)` triples
fn procs(specs: &[(&str, usize, usize)]) -> Vec<Process> {
    specs
        .iter()
        .map(|&(name, arrival, exec)| Process::new(name, arrival, exec).unwrap())
        .collect()
}

/// The timeline as `(label, start, end)` triples
fn spans(table: &ExecutionTable) -> Vec<(String, usize, usize)> {
    table
        .intervals()
        .iter()
        .map(|interval| {
            (
                interval.slot.label().to_string(),
                interval.start.get(),
                interval.end.get(),
            )
        })
        .collect()
}

fn expected(spans: &[(&str, usize, usize)]) -> Vec<(String, usize, usize)> {
    spans
        .iter()
        .map(|&(name, start, end)| (name.to_string(), start, end))
        .collect()
}

#[test]
fn simulations_are_independent_across_threads() {
    use crate::{simulate, Policy};
    use std::num::NonZeroUsize;
    use std::thread;

    fn assert_send<T: Send>() {}
    assert_send::<Process>();
    assert_send::<ExecutionTable>();
    assert_send::<Policy>();

    let policy = Policy::round_robin(NonZeroUsize::new(2).unwrap());
    let specs = [("A", 0, 5), ("B", 1, 3), ("C", 2, 1)];

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let policy = policy.clone();
            let processes = procs(&specs);
            thread::spawn(move || simulate(processes, &policy).unwrap())
        })
        .collect();

    let tables: Vec<ExecutionTable> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for table in &tables[1..] {
        assert_eq!(table, &tables[0]);
    }
}

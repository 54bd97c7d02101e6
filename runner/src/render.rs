//! Turns execution tables and translations into text for the terminal.

use cpusim::paging::Translation;
use cpusim::{ExecutionTable, Interval, ProcessMetrics};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    policy: &'a str,
    execution: String,
    intervals: &'a [Interval],
    metrics: Vec<ProcessMetrics>,
    average_waiting_time: f64,
    average_turnaround_time: f64,
    utilization: f64,
}

/// Execution string, per-process metrics and averages
pub fn summary(policy: &str, table: &ExecutionTable) -> String {
    let mut out = format!("{}: {}\n\n", policy, table.execution_string());

    out.push_str(&format!(
        "{:<10} {:>8} {:>10} {:>11} {:>11} {:>8}\n",
        "process", "arrival", "execution", "completion", "turnaround", "waiting"
    ));

    for m in table.metrics() {
        out.push_str(&format!(
            "{:<10} {:>8} {:>10} {:>11} {:>11} {:>8}\n",
            m.name, m.arrival_time, m.total_execution, m.completion_time, m.turnaround_time, m.waiting_time
        ));
    }

    out.push_str(&format!(
        "\naverage waiting time: {:.2}\naverage turnaround time: {:.2}\nCPU utilization: {:.1}%",
        table.average_waiting_time(),
        table.average_turnaround_time(),
        table.utilization() * 100.0
    ));

    out
}

pub fn json(policy: &str, table: &ExecutionTable) -> serde_json::Result<String> {
    let report = Report {
        policy,
        execution: table.execution_string(),
        intervals: table.intervals(),
        metrics: table.metrics(),
        average_waiting_time: table.average_waiting_time(),
        average_turnaround_time: table.average_turnaround_time(),
        utilization: table.utilization(),
    };

    serde_json::to_string_pretty(&report)
}

/// ASCII Gantt chart: one row per process, one column per time unit
pub fn chart(table: &ExecutionTable) -> String {
    let (Some(start), Some(end)) = (table.start(), table.end()) else {
        return String::new();
    };

    let width = end.since(start);
    let label_width = table
        .processes()
        .iter()
        .map(|record| record.name.len())
        .max()
        .unwrap_or(0);

    let mut rows = Vec::new();
    for record in table.processes() {
        let mut row = vec!['.'; width];
        for interval in table.intervals() {
            if interval.slot.process_name() == Some(record.name.as_str()) {
                let from = interval.start.since(start);
                let to = interval.end.since(start);
                row[from..to].fill('#');
            }
        }

        rows.push(format!(
            "{:<label_width$} |{}|",
            record.name,
            row.into_iter().collect::<String>()
        ));
    }

    let end_label = end.to_string();
    let start_label = start.to_string();
    let gap = (width + 2).saturating_sub(start_label.len() + end_label.len());
    rows.push(format!(
        "{:<label_width$} {}{}{}",
        "",
        start_label,
        " ".repeat(gap),
        end_label
    ));

    rows.join("\n")
}

pub fn translation(translation: &Translation) -> String {
    format!(
        "logical address {} = page {} + offset {}\npage {} -> frame {}\nphysical address: {}",
        translation.logical_address,
        translation.page_number,
        translation.offset,
        translation.page_number,
        translation.frame_number,
        translation.physical_address
    )
}

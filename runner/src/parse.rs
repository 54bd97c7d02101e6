//! Free-text inputs: process lists and modification events.

use cpusim::{Modification, Process, SchedulerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("`{0}` is not of the form name-{1}")]
    Malformed(String, &'static str),

    #[error("`{value}` is not a valid {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("`{0}` is not a valid size")]
    InvalidSize(String),

    #[error("unknown size unit `{0}`")]
    UnknownUnit(String),

    #[error(transparent)]
    Process(#[from] SchedulerError),
}

/// Splits `name-x-y` from the right, so that names may contain dashes
fn split_triple<'a>(
    item: &'a str,
    shape: &'static str,
) -> Result<(&'a str, &'a str, &'a str), InputError> {
    let mut parts = item.rsplitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(third), Some(second), Some(name)) => Ok((name.trim(), second.trim(), third.trim())),
        _ => Err(InputError::Malformed(item.to_string(), shape)),
    }
}

fn number(value: &str, field: &'static str) -> Result<usize, InputError> {
    value.parse().map_err(|_| InputError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parses `A-1-5,B-2-6,C-3-8` into processes, in the given order
///
/// Each item is `name-arrival_time-total_execution`.
pub fn parse_processes(input: &str) -> Result<Vec<Process>, InputError> {
    input
        .split(',')
        .map(str::trim)
        .map(|item| -> Result<Process, InputError> {
            let (name, arrival, execution) = split_triple(item, "arrival-execution")?;
            let process = Process::new(
                name,
                number(arrival, "arrival time")?,
                number(execution, "execution time")?,
            )?;
            Ok(process)
        })
        .collect()
}

/// Parses `A-4-3`: process `A` gets 3 more units at time 4
pub fn parse_modification(input: &str) -> Result<Modification, InputError> {
    let (target, time, delta) = split_triple(input.trim(), "time-delta")?;

    Ok(Modification::new(
        target,
        number(time, "time of change")?,
        number(delta, "delta")?,
    ))
}

//! Human readable sizes such as `4KB` or `2 MB`, normalized to bytes.

use std::fmt;
use std::str::FromStr;

use crate::parse::InputError;

/// Binary size units; `KB` is 1024 bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
}

impl Unit {
    pub fn multiplier(&self) -> u64 {
        match self {
            Unit::Byte => 1,
            Unit::Kilobyte => 1 << 10,
            Unit::Megabyte => 1 << 20,
            Unit::Gigabyte => 1 << 30,
        }
    }
}

impl FromStr for Unit {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "" | "B" => Ok(Unit::Byte),
            "K" | "KB" | "KIB" => Ok(Unit::Kilobyte),
            "M" | "MB" | "MIB" => Ok(Unit::Megabyte),
            "G" | "GB" | "GIB" => Ok(Unit::Gigabyte),
            _ => Err(InputError::UnknownUnit(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Unit::Byte => "B",
            Unit::Kilobyte => "KB",
            Unit::Megabyte => "MB",
            Unit::Gigabyte => "GB",
        };
        f.write_str(label)
    }
}

/// Splits `4KB` into `(4, Unit::Kilobyte)`; a bare number is in bytes
pub fn decompose_size(input: &str) -> Result<(u64, Unit), InputError> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    if digits.is_empty() {
        return Err(InputError::InvalidSize(input.to_string()));
    }

    let value = digits
        .parse::<u64>()
        .map_err(|_| InputError::InvalidSize(input.to_string()))?;

    Ok((value, unit.trim().parse()?))
}

pub fn to_bytes(value: u64, unit: Unit) -> Result<u64, InputError> {
    value
        .checked_mul(unit.multiplier())
        .ok_or_else(|| InputError::InvalidSize(format!("{}{}", value, unit)))
}

/// Parses a size string straight into bytes
pub fn parse_size(input: &str) -> Result<u64, InputError> {
    let (value, unit) = decompose_size(input)?;
    to_bytes(value, unit)
}

//! Simulations described in a JSON file.
//!
//! ```json
//! {
//!     "processes": [
//!         { "name": "A", "arrival_time": 0, "total_execution": 5 },
//!         { "name": "B", "arrival_time": 1, "total_execution": 3 }
//!     ],
//!     "policy": "rr",
//!     "time_slice": 2,
//!     "modifications": [{ "target": "A", "time_of_change": 4, "delta": 2 }]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use cpusim::{Policy, Process};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProcessSpec {
    pub name: String,
    #[serde(default)]
    pub arrival_time: usize,
    pub total_execution: usize,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub processes: Vec<ProcessSpec>,
    #[serde(flatten)]
    pub policy: Policy,
}

impl Scenario {
    pub fn from_json(json: &str) -> anyhow::Result<Scenario> {
        serde_json::from_str(json).context("malformed scenario")
    }

    pub fn load(path: &Path) -> anyhow::Result<Scenario> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("cannot read scenario {}", path.display()))?;
        Scenario::from_json(&json)
    }

    pub fn into_parts(self) -> anyhow::Result<(Vec<Process>, Policy)> {
        let processes = self
            .processes
            .into_iter()
            .map(|spec| Process::new(spec.name, spec.arrival_time, spec.total_execution))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((processes, self.policy))
    }
}

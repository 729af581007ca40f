//! Emitted solutions and run summaries

use super::enumerator::EnumerationOutcome;
use crate::config::SolverBackend;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Local-time timestamp format used in CSV rows and console lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One labeling as handed to the recorders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSolution {
    /// 1-based sequence number in discovery order
    pub index: u64,
    pub timestamp: String,
    /// Labels of `v1..vN`
    pub values: Vec<u32>,
}

impl LabeledSolution {
    pub fn new(index: u64, values: Vec<u32>) -> Self {
        Self {
            index,
            timestamp: timestamp_now(),
            values,
        }
    }

    /// Values formatted as a tuple, e.g. `(3, 1, 2)`
    pub fn tuple_string(&self) -> String {
        let inner: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        format!("({})", inner.join(", "))
    }
}

/// Outcome of one completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationSummary {
    pub name: String,
    pub sum_suffix: String,
    pub pentagon_sum: Option<u64>,
    pub hexagon_sum: Option<u64>,
    pub vertex_count: usize,
    pub backend: SolverBackend,
    pub outcome: EnumerationOutcome,
    pub total_solutions: u64,
    pub duplicates_skipped: u64,
    pub started_at: String,
    pub elapsed_seconds: f64,
    pub output_file: PathBuf,
}

impl EnumerationSummary {
    /// Save the summary as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        Ok(())
    }
}

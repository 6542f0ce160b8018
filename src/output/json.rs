//! JSON output formatting
//!
//! Serializes a [`RunReport`] into one document:
//!
//! ```json
//! {
//!   "timestamp": "2024-01-01T00:00:00+00:00",
//!   "host": "node-1",
//!   "workers": 4,
//!   "pi": { "samples": 5000000, "seed_base": 1234, "estimate": 3.1414, ... },
//!   "lines": { "files": 4, "total": 400000, "per_file": { ... }, ... },
//!   "sum": { "n": 100, "sum": 5050, ... }
//! }
//! ```

use super::{LinesOutcome, PiOutcome, RunReport, SumOutcome};
use crate::engine::FileCounts;
use crate::util::time::format_duration;
use crate::Result;
use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        let micros = d.as_micros() as u64;
        let human = format_duration(d);
        Self { micros, human }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonPi {
    pub samples: u64,
    pub seed_base: u64,
    pub estimate: f64,
    /// `estimate - π`
    pub error: f64,
    pub elapsed: JsonDuration,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonLines<'a> {
    pub files: usize,
    pub total: u64,
    pub per_file: &'a FileCounts,
    pub elapsed: JsonDuration,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSum {
    pub n: u64,
    pub sum: u64,
    pub elapsed: JsonDuration,
}

/// Top-level JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub workers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pi: Option<JsonPi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<JsonLines<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<JsonSum>,
}

impl<'a> JsonReport<'a> {
    pub fn from_report(report: &'a RunReport) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            host: hostname::get().ok().map(|h| h.to_string_lossy().into_owned()),
            workers: report.workers,
            pi: report.pi.as_ref().map(json_pi),
            lines: report.lines.as_ref().map(json_lines),
            sum: report.sum.as_ref().map(json_sum),
        }
    }
}

fn json_pi(pi: &PiOutcome) -> JsonPi {
    JsonPi {
        samples: pi.samples,
        seed_base: pi.seed_base,
        estimate: pi.estimate,
        error: pi.estimate - std::f64::consts::PI,
        elapsed: JsonDuration::from_duration(pi.elapsed),
    }
}

fn json_lines(lines: &LinesOutcome) -> JsonLines<'_> {
    JsonLines {
        files: lines.report.per_file.len(),
        total: lines.report.total,
        per_file: &lines.report.per_file,
        elapsed: JsonDuration::from_duration(lines.elapsed),
    }
}

fn json_sum(sum: &SumOutcome) -> JsonSum {
    JsonSum {
        n: sum.n,
        sum: sum.sum,
        elapsed: JsonDuration::from_duration(sum.elapsed),
    }
}

/// Render the report as pretty-printed JSON
pub fn to_json_string(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::from_report(report))
        .context("Failed to serialize JSON report")
}

/// Write the report to `path`, or to stdout when `path` is `None`
pub fn write_json_output(report: &RunReport, path: Option<&Path>) -> Result<()> {
    let json = to_json_string(report)?;

    match path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create JSON output: {}", path.display()))?;
            writeln!(file, "{}", json)
                .with_context(|| format!("Failed to write JSON output: {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json).context("Failed to write JSON report")?;
        }
    }

    Ok(())
}

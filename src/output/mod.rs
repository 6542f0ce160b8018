//! Result reporting
//!
//! Collects the outcome of each round run by the binary into a [`RunReport`]
//! and renders it either as a console report (`text`) or as a single JSON
//! document (`json`).

pub mod json;
pub mod text;

use crate::coordinator::LineReport;
use std::time::Duration;

/// Monte Carlo round outcome
#[derive(Debug, Clone, PartialEq)]
pub struct PiOutcome {
    pub samples: u64,
    pub seed_base: u64,
    pub estimate: f64,
    pub elapsed: Duration,
}

/// Line counting round outcome
#[derive(Debug, Clone, PartialEq)]
pub struct LinesOutcome {
    pub report: LineReport,
    pub elapsed: Duration,
}

/// Range sum round outcome
#[derive(Debug, Clone, PartialEq)]
pub struct SumOutcome {
    pub n: u64,
    pub sum: u64,
    pub elapsed: Duration,
}

/// Everything one invocation produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub workers: u32,
    pub pi: Option<PiOutcome>,
    pub lines: Option<LinesOutcome>,
    pub sum: Option<SumOutcome>,
}

impl RunReport {
    pub fn new(workers: u32) -> Self {
        Self {
            workers,
            pi: None,
            lines: None,
            sum: None,
        }
    }
}

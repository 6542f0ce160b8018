//! Worker engine abstraction
//!
//! A worker engine runs one worker's local computation over the slice it was
//! assigned and hands back a [`PartialResult`]. Engines are stateless across
//! invocations: the output depends only on the task (and, for sampling, the
//! derived seed carried inside it).
//!
//! # Computation kinds
//!
//! - **Sampling**: count Monte Carlo hits inside the unit quarter circle
//! - **Line count**: count `\n` terminators per file, missing files count zero
//! - **Range sum**: sum a contiguous run of integers
//!
//! # Example
//!
//! ```
//! use scatter_reduce::engine::{LocalEngine, LocalTask, PartialResult, WorkerEngine};
//!
//! let engine = LocalEngine;
//! let result = engine.execute(0, LocalTask::SumRange { first: 1, len: 4 }).unwrap();
//! assert_eq!(result, PartialResult::Count(10));
//! ```

pub mod line_count;
pub mod range_sum;
pub mod sampling;

#[cfg(test)]
pub mod mock;

use crate::error::{RoundError, RoundResult};
use std::collections::BTreeMap;

/// Per-file line counts, ordered by path
pub type FileCounts = BTreeMap<String, u64>;

/// A worker's unreduced contribution to a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialResult {
    /// Hit count, local line total, or local integer sum
    Count(u64),
    /// Line count for each path in the worker's slice
    FileCounts(FileCounts),
}

impl PartialResult {
    /// Short name of the variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            PartialResult::Count(_) => "count",
            PartialResult::FileCounts(_) => "file counts",
        }
    }
}

/// Local work handed to one worker
///
/// File lists are borrowed from the round's descriptor; no path is copied
/// until it becomes a key in the worker's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTask<'a> {
    /// Draw `range` points from a generator seeded with `seed`
    Sample { range: u64, seed: u64 },
    /// Count lines in each of `paths`
    CountLines { paths: &'a [String] },
    /// Sum the integers `first .. first + len`
    SumRange { first: u64, len: u64 },
}

impl LocalTask<'_> {
    /// Number of work items in this task
    pub fn items(&self) -> u64 {
        match self {
            LocalTask::Sample { range, .. } => *range,
            LocalTask::CountLines { paths } => paths.len() as u64,
            LocalTask::SumRange { len, .. } => *len,
        }
    }
}

/// Worker engine trait
///
/// Engines are shared by reference across all worker threads of a round, so
/// they must be `Sync`. Each call is a single synchronous unit of work.
///
/// # Errors
///
/// Returning an error marks the worker as failed, which aborts the round.
pub trait WorkerEngine: Send + Sync {
    /// Run `task` on behalf of worker `worker`
    fn execute(&self, worker: usize, task: LocalTask<'_>) -> RoundResult<PartialResult>;
}

/// Engine that performs the computation in-process on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEngine;

impl WorkerEngine for LocalEngine {
    fn execute(&self, worker: usize, task: LocalTask<'_>) -> RoundResult<PartialResult> {
        match task {
            LocalTask::Sample { range, seed } => {
                Ok(PartialResult::Count(sampling::sample_local(range, seed)))
            }
            LocalTask::CountLines { paths } => {
                Ok(PartialResult::FileCounts(line_count::count_lines_local(paths)))
            }
            LocalTask::SumRange { first, len } => range_sum::sum_range_local(first, len)
                .map(PartialResult::Count)
                .ok_or_else(|| {
                    RoundError::worker(
                        worker,
                        format!("sum of {} integers starting at {} overflows u64", len, first),
                    )
                }),
        }
    }
}

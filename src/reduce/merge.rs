//! Keyed-map merge reduction
//!
//! Unions the per-file maps of all workers. Partitioning never hands the same
//! path to two workers, but if a key does show up more than once its counts
//! are added; nothing is overwritten and the merge does not fail.
//!
//! The global total is summed from every partial entry as it arrives rather
//! than recomputed from the merged map.

use super::Reducer;
use crate::engine::{FileCounts, PartialResult};
use crate::error::{RoundError, RoundResult};
use serde::Serialize;
use std::collections::btree_map::Entry;
use tracing::warn;

/// Final result of a line counting round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineReport {
    /// Line count per path, ordered by path
    pub per_file: FileCounts,
    /// Total lines across every partial result
    pub total: u64,
}

/// Merges `FileCounts` partials with the additive collision policy
#[derive(Debug, Default)]
pub struct MergeReducer {
    per_file: FileCounts,
    total: u64,
    workers: usize,
    collisions: usize,
}

impl MergeReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys that arrived more than once
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

impl Reducer for MergeReducer {
    type Output = LineReport;

    fn add_worker(&mut self, worker_id: usize, partial: PartialResult) -> RoundResult<()> {
        let counts = match partial {
            PartialResult::FileCounts(counts) => counts,
            other => {
                return Err(RoundError::worker(
                    worker_id,
                    format!("expected file counts, got {}", other.kind()),
                ))
            }
        };

        for (path, lines) in counts {
            self.total = self
                .total
                .checked_add(lines)
                .ok_or(RoundError::Overflow("line totals"))?;

            match self.per_file.entry(path) {
                Entry::Vacant(slot) => {
                    slot.insert(lines);
                }
                Entry::Occupied(mut slot) => {
                    warn!(path = %slot.key(), worker = worker_id, "path reported by more than one worker, adding counts");
                    self.collisions += 1;
                    let merged = slot
                        .get()
                        .checked_add(lines)
                        .ok_or(RoundError::Overflow("line totals"))?;
                    slot.insert(merged);
                }
            }
        }

        self.workers += 1;
        Ok(())
    }

    fn num_workers(&self) -> usize {
        self.workers
    }

    fn finish(self) -> RoundResult<LineReport> {
        Ok(LineReport {
            per_file: self.per_file,
            total: self.total,
        })
    }
}

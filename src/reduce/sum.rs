//! Scalar sum reduction

use super::Reducer;
use crate::engine::PartialResult;
use crate::error::{RoundError, RoundResult};
use std::collections::BTreeMap;
use tracing::debug;

/// Sums `Count` partials across workers
///
/// Keeps each worker's contribution; they are logged at debug level when the
/// reduction finishes.
#[derive(Debug, Clone)]
pub struct SumReducer {
    /// What is being summed, used in overflow errors
    label: &'static str,
    sum: u64,
    per_worker: BTreeMap<usize, u64>,
}

impl SumReducer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            sum: 0,
            per_worker: BTreeMap::new(),
        }
    }
}

impl Reducer for SumReducer {
    type Output = u64;

    fn add_worker(&mut self, worker_id: usize, partial: PartialResult) -> RoundResult<()> {
        let value = match partial {
            PartialResult::Count(v) => v,
            other => {
                return Err(RoundError::worker(
                    worker_id,
                    format!("expected a count, got {}", other.kind()),
                ))
            }
        };

        self.sum = self
            .sum
            .checked_add(value)
            .ok_or(RoundError::Overflow(self.label))?;
        *self.per_worker.entry(worker_id).or_insert(0) += value;
        Ok(())
    }

    fn num_workers(&self) -> usize {
        self.per_worker.len()
    }

    fn finish(self) -> RoundResult<u64> {
        debug!(
            label = self.label,
            sum = self.sum,
            "per-worker contributions: {:?}",
            self.per_worker
        );
        Ok(self.sum)
    }
}

//! Error types for partition-compute-reduce rounds
//!
//! A round either fully succeeds or fully fails. Every error below is fatal to
//! the round that raised it; nothing is retried. Missing input files are not
//! errors at all (they count as zero lines, see `engine::line_count`).

use thiserror::Error;

/// Result type for round operations
pub type RoundResult<T> = std::result::Result<T, RoundError>;

/// Errors that abort a round
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    /// Caller supplied an unusable work descriptor or worker count
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A worker's local computation could not produce a partial result
    #[error("worker {worker} failed: {reason}")]
    WorkerFailure { worker: usize, reason: String },

    /// Combining partial results exceeded the range of the accumulator
    #[error("overflow while reducing {0}")]
    Overflow(&'static str),
}

impl RoundError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RoundError::InvalidArgument(msg.into())
    }

    pub(crate) fn worker(worker: usize, reason: impl Into<String>) -> Self {
        RoundError::WorkerFailure {
            worker,
            reason: reason.into(),
        }
    }

    /// Whether this error came from inside the parallel phase
    pub fn is_worker_failure(&self) -> bool {
        matches!(self, RoundError::WorkerFailure { .. })
    }
}

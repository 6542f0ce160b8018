//! scatter-reduce - partition, compute, and reduce across a fixed worker group
//!
//! A round splits a unit of work across every worker of a fixed-size group,
//! lets each worker compute a purely local partial result, and combines the
//! partials into one answer on the coordinator.
//!
//! # Architecture
//!
//! - **Partitioner**: balanced contiguous slices, remainder to the first workers
//! - **Worker engines**: Monte Carlo sampling, line counting, range summation
//! - **Coordinator**: partition → dispatch → barrier → reduce, one round at a time
//! - **Reducers**: scalar sum and keyed-map merge with additive collisions
//!
//! # Example
//!
//! ```
//! use scatter_reduce::{count_lines, estimate_pi};
//!
//! let pi = estimate_pi(100_000, 4, 1234).unwrap();
//! assert!((pi - std::f64::consts::PI).abs() < 0.1);
//!
//! let report = count_lines(&["does-not-exist.txt".to_string()], 2).unwrap();
//! assert_eq!(report.total, 0);
//! ```

pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod output;
pub mod partition;
pub mod reduce;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::{
    count_lines, estimate_pi, run_round, sum_range, Coordinator, FinalResult, LineReport,
    RoundState, WorkDescriptor,
};
pub use error::{RoundError, RoundResult};

/// Result type used outside the round core (config, dataset, output)
pub type Result<T> = anyhow::Result<T>;

//! Reduction of partial results
//!
//! Reducers combine the partial results of every worker in a round into one
//! value. They are fed one worker at a time after the round's barrier, so
//! they are plain owned state with no locking.
//!
//! # Strategies
//!
//! - **SumReducer**: scalar sum of `Count` partials (hits, integer sums)
//! - **MergeReducer**: union of per-file maps, adding counts on key collision,
//!   plus an independently accumulated global total
//!
//! # Example
//!
//! ```
//! use scatter_reduce::engine::PartialResult;
//! use scatter_reduce::reduce::{Reducer, SumReducer};
//!
//! let mut reducer = SumReducer::new("hits");
//! reducer.add_worker(0, PartialResult::Count(3)).unwrap();
//! reducer.add_worker(1, PartialResult::Count(4)).unwrap();
//! assert_eq!(reducer.num_workers(), 2);
//! assert_eq!(reducer.finish().unwrap(), 7);
//! ```

pub mod merge;
pub mod sum;

pub use merge::{LineReport, MergeReducer};
pub use sum::SumReducer;

use crate::engine::PartialResult;
use crate::error::RoundResult;

/// Combination strategy for partial results
pub trait Reducer {
    /// Final combined value
    type Output;

    /// Fold in the partial result of worker `worker_id`
    ///
    /// # Errors
    ///
    /// Fails if the partial has the wrong variant for this strategy or the
    /// accumulator would overflow.
    fn add_worker(&mut self, worker_id: usize, partial: PartialResult) -> RoundResult<()>;

    /// Number of workers folded in so far
    fn num_workers(&self) -> usize;

    /// Produce the combined value
    fn finish(self) -> RoundResult<Self::Output>;
}

/// Feed every `(worker_id, partial)` pair into `reducer` and finish it
pub fn reduce_all<R, I>(mut reducer: R, partials: I) -> RoundResult<R::Output>
where
    R: Reducer,
    I: IntoIterator<Item = (usize, PartialResult)>,
{
    for (worker_id, partial) in partials {
        reducer.add_worker(worker_id, partial)?;
    }
    reducer.finish()
}

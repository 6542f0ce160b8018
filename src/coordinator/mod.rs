//! Round coordinator
//!
//! Owns the group-wide protocol for one partition-compute-reduce round:
//!
//! 1. **Partitioned**: derive the item count from the descriptor and split it
//!    across the worker group
//! 2. **Dispatched**: turn slice `i` into worker `i`'s local task
//! 3. **Collected**: run every task on its own thread and wait for all of them
//! 4. **Reduced**: fold the partial results with the matching reducer
//! 5. **Done**: build the final result
//!
//! The sequence is linear with no retries. Any worker failure aborts the
//! round and no partial result is returned. All round state (partition,
//! tasks, partials) lives on the coordinator's stack for the duration of one
//! call; workers only see their own slice.
//!
//! # Example
//!
//! ```
//! use scatter_reduce::coordinator::{Coordinator, FinalResult, WorkDescriptor};
//!
//! let mut coordinator = Coordinator::new(4).unwrap();
//! let result = coordinator.run_round(&WorkDescriptor::RangeSum { n: 100 }).unwrap();
//! assert_eq!(result, FinalResult::RangeSum(5050));
//! ```

use crate::engine::sampling::derive_seed;
use crate::engine::{LocalEngine, LocalTask, PartialResult, WorkerEngine};
use crate::error::{RoundError, RoundResult};
use crate::partition::{partition, Partition};
use crate::reduce::{reduce_all, MergeReducer, Reducer, SumReducer};
use crate::util::time::Timestamp;
use std::fmt;
use std::thread;
use tracing::{debug, info};

pub use crate::reduce::LineReport;

/// Work for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkDescriptor {
    /// Monte Carlo estimate of π from `total` samples
    SampleCount { total: u64, seed_base: u64 },
    /// Line counts for an ordered list of files
    FileList { paths: Vec<String> },
    /// Sum of the integers `1..=n`
    RangeSum { n: u64 },
}

impl WorkDescriptor {
    /// Number of work items to partition
    pub fn items(&self) -> u64 {
        match self {
            WorkDescriptor::SampleCount { total, .. } => *total,
            WorkDescriptor::FileList { paths } => paths.len() as u64,
            WorkDescriptor::RangeSum { n } => *n,
        }
    }
}

/// Result of a completed round
#[derive(Debug, Clone, PartialEq)]
pub enum FinalResult {
    PiEstimate(f64),
    LineReport(LineReport),
    RangeSum(u64),
}

/// Protocol state of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoundState {
    Init,
    Partitioned,
    Dispatched,
    Collected,
    Reduced,
    Done,
}

impl RoundState {
    fn next(self) -> Self {
        match self {
            RoundState::Init => RoundState::Partitioned,
            RoundState::Partitioned => RoundState::Dispatched,
            RoundState::Dispatched => RoundState::Collected,
            RoundState::Collected => RoundState::Reduced,
            RoundState::Reduced | RoundState::Done => RoundState::Done,
        }
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundState::Init => "init",
            RoundState::Partitioned => "partitioned",
            RoundState::Dispatched => "dispatched",
            RoundState::Collected => "collected",
            RoundState::Reduced => "reduced",
            RoundState::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Coordinator for a fixed-size worker group
///
/// Worker indices are assigned by the coordinator (`0..worker_count`); workers
/// never discover their own rank.
pub struct Coordinator<E: WorkerEngine = LocalEngine> {
    worker_count: u32,
    engine: E,
    state: RoundState,
}

impl Coordinator<LocalEngine> {
    /// Create a coordinator running `worker_count` in-process workers
    pub fn new(worker_count: u32) -> RoundResult<Self> {
        Self::with_engine(worker_count, LocalEngine)
    }
}

impl<E: WorkerEngine> Coordinator<E> {
    /// Create a coordinator with a specific worker engine
    ///
    /// Fails with `InvalidArgument` if `worker_count` is zero.
    pub fn with_engine(worker_count: u32, engine: E) -> RoundResult<Self> {
        if worker_count == 0 {
            return Err(RoundError::invalid("worker count must be at least 1"));
        }

        Ok(Self {
            worker_count,
            engine,
            state: RoundState::Init,
        })
    }

    pub fn worker_count(&self) -> u32 {
        self.worker_count
    }

    /// State reached by the most recent round
    ///
    /// A failed round stays at the last state it completed.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Run one complete round for `descriptor`
    pub fn run_round(&mut self, descriptor: &WorkDescriptor) -> RoundResult<FinalResult> {
        match descriptor {
            WorkDescriptor::SampleCount { total, seed_base } => {
                self.run_sampling(*total, *seed_base).map(FinalResult::PiEstimate)
            }
            WorkDescriptor::FileList { paths } => {
                self.run_line_count(paths).map(FinalResult::LineReport)
            }
            WorkDescriptor::RangeSum { n } => self.run_range_sum(*n).map(FinalResult::RangeSum),
        }
    }

    /// Monte Carlo π over `total` samples
    pub fn run_sampling(&mut self, total: u64, seed_base: u64) -> RoundResult<f64> {
        self.state = RoundState::Init;
        if total == 0 {
            return Err(RoundError::invalid("sample count must be at least 1"));
        }

        let hits = self.round(total, SumReducer::new("hit counts"), |part| {
            Ok(part
                .slices()
                .iter()
                .map(|s| LocalTask::Sample {
                    range: s.len,
                    seed: derive_seed(seed_base, s.index),
                })
                .collect())
        })?;

        let estimate = 4.0 * hits as f64 / total as f64;
        self.advance();
        info!(total, hits, estimate, workers = self.worker_count, "sampling round complete");
        Ok(estimate)
    }

    /// Line counts for `paths`
    pub fn run_line_count(&mut self, paths: &[String]) -> RoundResult<LineReport> {
        self.state = RoundState::Init;

        let report = self.round(paths.len() as u64, MergeReducer::new(), |part| {
            Ok(part
                .split(paths)?
                .into_iter()
                .map(|slice| LocalTask::CountLines { paths: slice })
                .collect())
        })?;

        self.advance();
        info!(
            files = report.per_file.len(),
            total = report.total,
            workers = self.worker_count,
            "line count round complete"
        );
        Ok(report)
    }

    /// Sum of `1..=n`
    pub fn run_range_sum(&mut self, n: u64) -> RoundResult<u64> {
        self.state = RoundState::Init;

        let sum = self.round(n, SumReducer::new("range sums"), |part| {
            Ok(part
                .slices()
                .iter()
                .map(|s| LocalTask::SumRange {
                    first: s.offset.saturating_add(1),
                    len: s.len,
                })
                .collect())
        })?;

        self.advance();
        info!(n, sum, workers = self.worker_count, "range sum round complete");
        Ok(sum)
    }

    /// Partition, dispatch, collect, and reduce
    ///
    /// Leaves the coordinator in `Reduced`; the caller builds the final result.
    fn round<'a, R, F>(&mut self, items: u64, reducer: R, make_tasks: F) -> RoundResult<R::Output>
    where
        R: Reducer,
        F: FnOnce(&Partition) -> RoundResult<Vec<LocalTask<'a>>>,
    {
        let part = partition(items, self.worker_count)?;
        self.advance();

        let tasks = make_tasks(&part)?;
        self.advance();

        let partials = self.dispatch(tasks)?;
        self.advance();

        let output = reduce_all(reducer, partials)?;
        self.advance();

        Ok(output)
    }

    fn advance(&mut self) {
        let next = self.state.next();
        debug!(from = %self.state, to = %next, "round state");
        self.state = next;
    }

    /// Run each task on its own thread and wait for every one of them
    ///
    /// Results come back in worker order. The first failure (by worker index)
    /// is returned once all threads have been joined.
    fn dispatch(&self, tasks: Vec<LocalTask<'_>>) -> RoundResult<Vec<(usize, PartialResult)>> {
        let engine = &self.engine;

        thread::scope(|scope| {
            let handles: Vec<_> = tasks
                .into_iter()
                .enumerate()
                .map(|(worker, task)| {
                    let handle = thread::Builder::new()
                        .name(format!("worker-{}", worker))
                        .spawn_scoped(scope, move || {
                            let start = Timestamp::now();
                            let result = engine.execute(worker, task);
                            debug!(
                                worker,
                                items = task.items(),
                                elapsed_us = start.elapsed_micros(),
                                ok = result.is_ok(),
                                "worker finished"
                            );
                            result
                        });
                    (worker, handle)
                })
                .collect();

            // Barrier: every worker is joined before anything is reduced
            let mut partials = Vec::with_capacity(handles.len());
            let mut first_error = None;
            for (worker, handle) in handles {
                let outcome = match handle {
                    Ok(handle) => handle
                        .join()
                        .unwrap_or_else(|_| Err(RoundError::worker(worker, "worker thread panicked"))),
                    Err(e) => Err(RoundError::worker(
                        worker,
                        format!("failed to spawn worker thread: {}", e),
                    )),
                };

                match outcome {
                    Ok(partial) => partials.push((worker, partial)),
                    Err(e) => {
                        if first_error.is_none() {
                            first_error = Some(e);
                        }
                    }
                }
            }

            match first_error {
                Some(e) => Err(e),
                None => Ok(partials),
            }
        })
    }
}

/// Run one round with `worker_count` in-process workers
pub fn run_round(descriptor: &WorkDescriptor, worker_count: u32) -> RoundResult<FinalResult> {
    Coordinator::new(worker_count)?.run_round(descriptor)
}

/// Monte Carlo estimate of π
///
/// Identical `(total_samples, worker_count, seed_base)` always give the
/// identical estimate.
pub fn estimate_pi(total_samples: u64, worker_count: u32, seed_base: u64) -> RoundResult<f64> {
    Coordinator::new(worker_count)?.run_sampling(total_samples, seed_base)
}

/// Per-file and total line counts
///
/// Missing or unreadable files count as zero lines.
pub fn count_lines(paths: &[String], worker_count: u32) -> RoundResult<LineReport> {
    Coordinator::new(worker_count)?.run_line_count(paths)
}

/// Sum of the integers `1..=n`
pub fn sum_range(n: u64, worker_count: u32) -> RoundResult<u64> {
    Coordinator::new(worker_count)?.run_range_sum(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::{Injected, MockEngine};
    use crate::engine::sampling::sample_local;
    use crate::engine::FileCounts;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_lines(dir: &TempDir, name: &str, lines: usize) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..lines {
            writeln!(file, "row {}", i).unwrap();
        }
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(Coordinator::new(0), Err(RoundError::InvalidArgument(_))));
        assert!(matches!(estimate_pi(100, 0, 1), Err(RoundError::InvalidArgument(_))));
        assert!(matches!(count_lines(&[], 0), Err(RoundError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = estimate_pi(0, 4, 1234).unwrap_err();
        assert!(matches!(err, RoundError::InvalidArgument(_)));
    }

    #[test]
    fn test_pi_estimate_in_range() {
        let pi = estimate_pi(4_000_000, 4, 1234).unwrap();
        assert!((3.0..=3.3).contains(&pi), "estimate {}", pi);
    }

    #[test]
    fn test_pi_deterministic() {
        let a = estimate_pi(200_000, 3, 99).unwrap();
        let b = estimate_pi(200_000, 3, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_worker_matches_local_stream() {
        let total = 50_000;
        let hits = sample_local(total, 1234);
        let pi = estimate_pi(total, 1, 1234).unwrap();
        assert_eq!(pi, 4.0 * hits as f64 / total as f64);
    }

    #[test]
    fn test_hits_are_sum_of_worker_streams() {
        // 10 samples over 3 workers: slices 4, 3, 3
        let seed_base = 77;
        let expected: u64 = [(0usize, 4u64), (1, 3), (2, 3)]
            .iter()
            .map(|(i, len)| sample_local(*len, derive_seed(seed_base, *i)))
            .sum();

        let pi = estimate_pi(10, 3, seed_base).unwrap();
        assert_eq!(pi, 4.0 * expected as f64 / 10.0);
    }

    #[test]
    fn test_more_workers_than_samples() {
        let pi = estimate_pi(3, 8, 5).unwrap();
        assert!((0.0..=4.0).contains(&pi));
    }

    #[test]
    fn test_line_count_scenario() {
        let dir = TempDir::new().unwrap();
        let a = write_lines(&dir, "a", 10);
        let b = dir.path().join("b").to_string_lossy().into_owned(); // never created
        let c = write_lines(&dir, "c", 25);

        let report = count_lines(&[a.clone(), b.clone(), c.clone()], 2).unwrap();
        assert_eq!(report.per_file.len(), 3);
        assert_eq!(report.per_file[&a], 10);
        assert_eq!(report.per_file[&b], 0);
        assert_eq!(report.per_file[&c], 25);
        assert_eq!(report.total, 35);
    }

    #[test]
    fn test_line_count_empty_list() {
        let report = count_lines(&[], 3).unwrap();
        assert!(report.per_file.is_empty());
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_range_sum() {
        assert_eq!(sum_range(10_000_000, 4).unwrap(), 50_000_005_000_000);
        assert_eq!(sum_range(0, 4).unwrap(), 0);
        assert_eq!(sum_range(5, 8).unwrap(), 15);
    }

    #[test]
    fn test_range_sum_overflow_fails_round() {
        let err = sum_range(u64::MAX, 2).unwrap_err();
        assert!(err.is_worker_failure());
    }

    #[test]
    fn test_run_round_dispatches_by_descriptor() {
        let mut coordinator = Coordinator::new(2).unwrap();
        let result = coordinator
            .run_round(&WorkDescriptor::FileList { paths: vec!["missing-1".into(), "missing-2".into()] })
            .unwrap();
        match result {
            FinalResult::LineReport(report) => {
                assert_eq!(report.total, 0);
                assert_eq!(report.per_file.len(), 2);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(coordinator.state(), RoundState::Done);
    }

    #[test]
    fn test_slices_reach_workers_in_order() {
        let engine = MockEngine::new();
        let mut coordinator = Coordinator::with_engine(4, engine).unwrap();
        coordinator.run_sampling(10, 1).unwrap();
        assert_eq!(coordinator.engine.seen(), vec![(0, 3), (1, 3), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_worker_failure_aborts_round() {
        let engine = MockEngine::new().inject(1, Injected::Fail("disk on fire".into()));
        let mut coordinator = Coordinator::with_engine(3, engine).unwrap();

        let err = coordinator.run_sampling(300, 1).unwrap_err();
        assert_eq!(
            err,
            RoundError::WorkerFailure { worker: 1, reason: "disk on fire".into() }
        );
        // Every worker still ran before the round was abandoned
        assert_eq!(coordinator.engine.seen().len(), 3);
        assert_eq!(coordinator.state(), RoundState::Dispatched);
    }

    #[test]
    fn test_worker_panic_is_worker_failure() {
        let engine = MockEngine::new().inject(0, Injected::Panic);
        let mut coordinator = Coordinator::with_engine(2, engine).unwrap();

        let err = coordinator.run_range_sum(100).unwrap_err();
        assert_eq!(
            err,
            RoundError::WorkerFailure { worker: 0, reason: "worker thread panicked".into() }
        );
    }

    #[test]
    fn test_duplicate_keys_from_workers_are_added() {
        let mut dup = FileCounts::new();
        dup.insert("f.txt".to_string(), 5);
        let engine = MockEngine::new()
            .inject(0, Injected::Report(PartialResult::FileCounts(
                [("f.txt".to_string(), 3)].into_iter().collect(),
            )))
            .inject(1, Injected::Report(PartialResult::FileCounts(dup)));
        let mut coordinator = Coordinator::with_engine(2, engine).unwrap();

        let report = coordinator
            .run_line_count(&["x".to_string(), "y".to_string()])
            .unwrap();
        assert_eq!(report.per_file.len(), 1);
        assert_eq!(report.per_file["f.txt"], 8);
        assert_eq!(report.total, 8);
    }

    #[test]
    fn test_mismatched_partial_is_worker_failure() {
        let engine = MockEngine::new().inject(1, Injected::Report(PartialResult::Count(4)));
        let mut coordinator = Coordinator::with_engine(2, engine).unwrap();

        let err = coordinator.run_line_count(&["x".to_string()]).unwrap_err();
        assert!(matches!(err, RoundError::WorkerFailure { worker: 1, .. }));
    }

    #[test]
    fn test_round_state_sequence() {
        let mut state = RoundState::Init;
        let mut seen = vec![state];
        while state != RoundState::Done {
            state = state.next();
            seen.push(state);
        }
        assert_eq!(seen.len(), 6);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(RoundState::Collected.to_string(), "collected");
    }
}

//! Mock worker engine for testing
//!
//! Wraps [`LocalEngine`](super::LocalEngine) and lets tests make chosen
//! workers fail, panic, or report a fixed partial result.

use super::{LocalEngine, LocalTask, PartialResult, WorkerEngine};
use crate::error::{RoundError, RoundResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Behaviour injected for one worker
#[derive(Debug, Clone)]
pub enum Injected {
    Fail(String),
    Panic,
    Report(PartialResult),
}

/// Engine whose per-worker behaviour can be overridden
#[derive(Default)]
pub struct MockEngine {
    injected: HashMap<usize, Injected>,
    /// Items seen per worker, recorded for verification
    seen: Mutex<Vec<(usize, u64)>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject(mut self, worker: usize, behaviour: Injected) -> Self {
        self.injected.insert(worker, behaviour);
        self
    }

    /// `(worker, items)` pairs in worker order
    pub fn seen(&self) -> Vec<(usize, u64)> {
        let mut seen = self.seen.lock().unwrap().clone();
        seen.sort_unstable();
        seen
    }
}

impl WorkerEngine for MockEngine {
    fn execute(&self, worker: usize, task: LocalTask<'_>) -> RoundResult<PartialResult> {
        self.seen.lock().unwrap().push((worker, task.items()));

        match self.injected.get(&worker) {
            Some(Injected::Fail(reason)) => Err(RoundError::worker(worker, reason.clone())),
            Some(Injected::Panic) => panic!("injected panic in worker {}", worker),
            Some(Injected::Report(partial)) => Ok(partial.clone()),
            None => LocalEngine.execute(worker, task),
        }
    }
}

//! Completion slot and work-helping join handle.

use crate::executor::WorkerPool;
use crate::util::Backoff;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single-assignment result cell shared between a spawned task and the
/// frame awaiting it.
pub(crate) struct CompletionSlot<T> {
    done: AtomicBool,
    value: Mutex<Option<T>>,
}

impl<T> CompletionSlot<T> {
    pub fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
            value: Mutex::new(None),
        }
    }

    /// Publish the result. Called exactly once, by the spawned task.
    pub fn complete(&self, value: T) {
        *self.value.lock() = Some(value);
        self.done.store(true, Ordering::Release);
    }

    fn try_take(&self) -> Option<T> {
        if self.done.load(Ordering::Acquire) {
            self.value.lock().take()
        } else {
            None
        }
    }
}

/// Await handle for one spawned sort task.
///
/// `join` does not block the thread idle: while the child result is
/// outstanding it claims and executes other queued tasks from the pool,
/// which is what lets a bounded worker set drive an unbounded task tree
/// to completion.
pub(crate) struct JoinHandle<T> {
    slot: Arc<CompletionSlot<T>>,
    pool: Arc<WorkerPool>,
}

impl<T> JoinHandle<T> {
    pub fn new(slot: Arc<CompletionSlot<T>>, pool: Arc<WorkerPool>) -> Self {
        Self { slot, pool }
    }

    /// Wait for the spawned task's result, helping with queued work in the
    /// meantime.
    pub fn join(self) -> T {
        let mut backoff = Backoff::new();

        loop {
            if let Some(value) = self.slot.try_take() {
                return value;
            }

            if self.pool.run_pending_task() {
                backoff.reset();
            } else {
                backoff.wait();
            }
        }
    }
}

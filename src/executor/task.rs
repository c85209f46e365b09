//! Task representation and execution.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global task ID counter
static TASK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        TaskId(TASK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// One schedulable unit of work: a boxed closure plus an identifier used
/// in panic reports.
pub(crate) struct Task {
    pub(crate) id: TaskId,
    pub(crate) func: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Create a new task.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Task {
            id: TaskId::next(),
            func: Box::new(f),
        }
    }

    /// Execute the task, consuming it.
    pub fn execute(self) {
        (self.func)();
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("id", &self.id).finish()
    }
}

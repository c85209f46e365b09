//! Task execution infrastructure.
//!
//! A fixed pool of worker threads draws tasks from a shared injector queue
//! and each other's local queues under a work-stealing discipline. The pool
//! is an explicitly owned value with a construction/shutdown lifecycle, not
//! process-global state.

pub mod pool;
pub mod task;
pub(crate) mod worker;

pub use pool::WorkerPool;

pub(crate) use task::Task;

//! Fork/join sort scheduling.
//!
//! Wraps the sequential partition engine in a divide-and-conquer task
//! protocol: per call frame the greater branch is spawned onto the worker
//! pool while the less branch recurses on the current thread, and the one
//! suspension point per task is the join on the spawned child.

pub(crate) mod join;
pub mod quicksort;

pub use quicksort::Sorter;

//! TRISORT - parallel three-way quicksort
//!
//! A divide-and-conquer sorting engine that partitions its input around a
//! last-element pivot into less/equal/greater groups, sorts the outer groups
//! in parallel on a work-stealing thread pool, and falls back to plain
//! sequential recursion below a configurable cutoff.
//!
//! # Quick Start
//!
//! ```no_run
//! use trisort::Sorter;
//!
//! let sorter = Sorter::with_defaults().unwrap();
//! let sorted = sorter.sort(vec![3, 1, 4, 1, 5, 9, 2, 6]).unwrap();
//! assert_eq!(sorted, vec![1, 1, 2, 3, 4, 5, 6, 9]);
//! ```
//!
//! # Design
//!
//! - **Copy-based partitioning**: every partition step allocates a fresh
//!   container, so concurrent tasks never share mutable state.
//! - **Bounded fan-out**: only the greater branch is spawned per call frame;
//!   the less branch recurses on the current thread, which keeps outstanding
//!   spawned tasks proportional to tree depth rather than tree size.
//! - **Work-helping join**: a task awaiting its spawned child executes other
//!   queued tasks instead of blocking its worker idle.
//! - **Owned executor**: each [`Sorter`] constructs and owns its worker
//!   pool; dropping the sorter shuts the pool down.

// Lint configuration
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod partition;
pub mod prelude;
pub mod scheduler;
pub mod util;

// Re-export key types at crate root
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use partition::{partition, select_pivot, sequential_sort, Direction};
pub use scheduler::Sorter;

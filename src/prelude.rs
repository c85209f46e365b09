//! Convenience re-exports.

pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::partition::{partition, select_pivot, sequential_sort, Direction};
pub use crate::scheduler::Sorter;

//! Small shared utilities.

pub mod backoff;

pub use backoff::Backoff;

//! Crate-wide error and result types.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the sorting engine and its executor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A public API was called with an argument it cannot accept, e.g.
    /// pivot selection on an empty sequence.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The executor could not accept or schedule a task. Fatal for the
    /// whole sort call; never retried internally.
    #[error("scheduling failure: {0}")]
    Scheduling(String),

    /// Configuration validation failed.
    #[error("config error: {0}")]
    Config(String),

    /// A spawned sort task panicked. The join still resolves, carrying
    /// this error instead of a result.
    #[error("worker panic: {0}")]
    WorkerPanic(String),
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Build an [`Error::Scheduling`].
    pub fn scheduling<S: Into<String>>(msg: S) -> Self {
        Error::Scheduling(msg.into())
    }

    /// Build an [`Error::Config`].
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}

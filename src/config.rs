//! Sorter and worker-pool configuration.

use crate::error::{Error, Result};

/// Subproblem size below which the scheduler stops spawning tasks and
/// delegates to [`crate::partition::sequential_sort`].
pub const DEFAULT_CUTOFF: usize = 4;

/// Configuration for a [`crate::Sorter`] and its worker pool.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker thread count. `None` means one worker per logical CPU.
    pub num_threads: Option<usize>,

    /// Parallel/sequential cutoff; inputs shorter than this are sorted
    /// sequentially on the current thread.
    pub cutoff: usize,

    /// Upper bound on tasks queued in the executor. Submissions beyond the
    /// cap fail with a scheduling error instead of queueing. `None` means
    /// unbounded.
    pub max_pending_tasks: Option<usize>,

    /// Worker thread stack size in bytes. Sequential recursion depth grows
    /// with input size on adversarial (already sorted) inputs, so callers
    /// sorting such data may want headroom here.
    pub stack_size: Option<usize>,

    /// Prefix for worker thread names.
    pub thread_name_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: None,
            cutoff: DEFAULT_CUTOFF,
            max_pending_tasks: None,
            stack_size: Some(2 * 1024 * 1024),
            thread_name_prefix: "trisort-worker".to_string(),
        }
    }
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Check invariants the pool relies on.
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_threads {
            if n == 0 {
                return Err(Error::config("num_threads must be > 0"));
            }
            if n > 1024 {
                return Err(Error::config("num_threads too large (max 1024)"));
            }
        }

        if self.cutoff == 0 {
            return Err(Error::config("cutoff must be >= 1"));
        }

        if let Some(max) = self.max_pending_tasks {
            if max == 0 {
                return Err(Error::config("max_pending_tasks must be > 0"));
            }
        }

        Ok(())
    }

    /// Resolved worker thread count.
    pub fn worker_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the worker thread count.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = Some(n);
        self
    }

    /// Set the parallel/sequential cutoff.
    pub fn cutoff(mut self, cutoff: usize) -> Self {
        self.config.cutoff = cutoff;
        self
    }

    /// Cap the executor's pending-task queue.
    pub fn max_pending_tasks(mut self, max: usize) -> Self {
        self.config.max_pending_tasks = Some(max);
        self
    }

    /// Set the worker thread stack size.
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.config.stack_size = Some(bytes);
        self
    }

    /// Set the worker thread name prefix.
    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

//! Parallel quicksort entry point and per-task protocol.

use super::join::{CompletionSlot, JoinHandle};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::{Task, WorkerPool};
use crate::partition::{merge, partition, select_pivot, sequential_sort, Direction};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Parallel three-way quicksort engine.
///
/// Owns its worker pool; the pool is created in [`Sorter::new`] and shut
/// down when the sorter is dropped. One sorter can serve any number of
/// `sort` calls, concurrently from multiple threads.
pub struct Sorter {
    pool: Arc<WorkerPool>,
    config: Config,
}

impl Sorter {
    /// Build a sorter and spawn its worker pool.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(&config)?;

        Ok(Self {
            pool: Arc::new(pool),
            config,
        })
    }

    /// Build a sorter with the default configuration: one worker per
    /// logical CPU, cutoff 4.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Config::default())
    }

    /// The configuration this sorter was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of worker threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.num_threads()
    }

    /// Sort `input`, consuming it and returning a fresh sorted sequence.
    ///
    /// The caller blocks until the root task resolves, participating in
    /// queued work while it waits. Output is deterministic for a given
    /// input regardless of which worker runs which task.
    ///
    /// # Errors
    ///
    /// [`Error::Scheduling`] if the executor cannot accept a task; the
    /// call fails as a whole and no partial result is returned.
    pub fn sort<T>(&self, input: Vec<T>) -> Result<Vec<T>>
    where
        T: Ord + Clone + Send + 'static,
    {
        let ctx = SortContext {
            pool: self.pool.clone(),
            cutoff: self.config.cutoff,
        };

        spawn_sort(&ctx, input)?.join()
    }
}

impl std::fmt::Debug for Sorter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sorter")
            .field("num_threads", &self.pool.num_threads())
            .field("cutoff", &self.config.cutoff)
            .finish()
    }
}

/// Everything a task frame needs to split further.
#[derive(Clone)]
struct SortContext {
    pool: Arc<WorkerPool>,
    cutoff: usize,
}

/// One task of the divide-and-conquer tree.
///
/// Below the cutoff the whole subproblem is handed to the sequential
/// engine. Otherwise: partition three ways, short-circuit when the equal
/// group consumed the input, spawn the greater branch, recurse into the
/// less branch on this thread, join, merge in order.
fn sort_task<T>(ctx: &SortContext, input: Vec<T>) -> Result<Vec<T>>
where
    T: Ord + Clone + Send + 'static,
{
    if input.len() < ctx.cutoff {
        return Ok(sequential_sort(&input));
    }

    // Guarded by the cutoff check; input is non-empty here.
    let pivot = select_pivot(&input)?.clone();

    let equal = partition(&input, Direction::Equal, &pivot);
    if equal.len() == input.len() {
        // All remaining elements are identical; splitting further gains
        // nothing.
        return Ok(equal);
    }

    let less = partition(&input, Direction::Less, &pivot);
    let greater = partition(&input, Direction::Greater, &pivot);
    drop(input);

    // Fork the greater branch; run the less branch here. Spawning only one
    // side per frame keeps outstanding tasks proportional to tree depth.
    let greater_pending = spawn_sort(ctx, greater)?;
    let less_sorted = sort_task(ctx, less)?;
    let greater_sorted = greater_pending.join()?;

    Ok(merge(less_sorted, equal, greater_sorted))
}

/// Enqueue a child sort task and hand back its join handle.
///
/// A panic inside the child completes the slot with an error rather than
/// leaving the join spinning forever.
fn spawn_sort<T>(ctx: &SortContext, input: Vec<T>) -> Result<JoinHandle<Result<Vec<T>>>>
where
    T: Ord + Clone + Send + 'static,
{
    let slot = Arc::new(CompletionSlot::new());
    let task_slot = slot.clone();
    let task_ctx = ctx.clone();

    ctx.pool.submit(Task::new(move || {
        let result = catch_unwind(AssertUnwindSafe(|| sort_task(&task_ctx, input)))
            .unwrap_or_else(|_| Err(Error::WorkerPanic("sort task panicked".into())));
        task_slot.complete(result);
    }))?;

    Ok(JoinHandle::new(slot, ctx.pool.clone()))
}

use super::task::Task;
use super::worker::{Worker, WorkerState};
use crate::config::Config;
use crate::error::{Error, Result};
use crossbeam_deque::{Injector, Steal, Stealer};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Fixed-size work-stealing thread pool.
///
/// An owned value with an explicit lifecycle: constructed from a [`Config`],
/// shut down explicitly or on drop. Tasks enter through the shared injector
/// and migrate to worker-local queues as workers claim them.
pub struct WorkerPool {
    workers: Vec<WorkerHandle>,
    injector: Arc<Injector<Task>>,
    stealers: Vec<Stealer<Task>>,
    worker_states: Vec<Arc<WorkerState>>,
    shutdown: Arc<AtomicBool>,
    num_threads: usize,
    pending_tasks: Arc<AtomicUsize>,
    max_pending: Option<usize>,
    next_unpark: AtomicUsize,
}

struct WorkerHandle {
    thread: Option<JoinHandle<()>>,
    unparker: thread::Thread,
}

impl WorkerPool {
    /// Spawn the worker threads described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let num_threads = config.worker_threads();
        if num_threads == 0 {
            return Err(Error::config("need at least 1 thread"));
        }

        let injector = Arc::new(Injector::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let pending_tasks = Arc::new(AtomicUsize::new(0));

        let mut workers = Vec::with_capacity(num_threads);
        let mut stealers = Vec::with_capacity(num_threads);
        let mut worker_states = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let worker = Worker::new(id);
            stealers.push(worker.local_queue.stealer());
            worker_states.push(worker.state.clone());
            workers.push(worker);
        }

        let mut handles: Vec<WorkerHandle> = Vec::with_capacity(num_threads);

        for worker in workers {
            let id = worker.id;
            let stealers_clone = stealers.clone();
            let injector_clone = injector.clone();
            let shutdown_clone = shutdown.clone();
            let pending_clone = pending_tasks.clone();
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);

            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let spawned = builder.spawn(move || {
                worker.run(stealers_clone, injector_clone, shutdown_clone, pending_clone);
            });

            let thread = match spawned {
                Ok(thread) => thread,
                Err(e) => {
                    // Stop and join the workers spawned so far; a failed
                    // construction must not leak live threads.
                    shutdown.store(true, Ordering::Release);
                    for handle in &handles {
                        handle.unparker.unpark();
                    }
                    for handle in &mut handles {
                        if let Some(thread) = handle.thread.take() {
                            let _ = thread.join();
                        }
                    }
                    return Err(Error::scheduling(format!("worker spawn failed: {}", e)));
                }
            };

            let unparker = thread.thread().clone();

            handles.push(WorkerHandle {
                thread: Some(thread),
                unparker,
            });
        }

        Ok(Self {
            workers: handles,
            injector,
            stealers,
            worker_states,
            shutdown,
            num_threads,
            pending_tasks,
            max_pending: config.max_pending_tasks,
            next_unpark: AtomicUsize::new(0),
        })
    }

    /// Enqueue a task for execution.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Scheduling`] if the pool is shut down or the
    /// pending-task cap is reached. The task is not queued in either case.
    pub(crate) fn submit(&self, task: Task) -> Result<()> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(Error::scheduling("pool is shut down"));
        }

        if let Some(max) = self.max_pending {
            if self.pending_tasks.load(Ordering::Relaxed) >= max {
                return Err(Error::scheduling(format!("task queue full (cap {})", max)));
            }
        }

        self.pending_tasks.fetch_add(1, Ordering::Relaxed);
        self.injector.push(task);

        // Wake up one worker, round-robin
        let idx = self.next_unpark.fetch_add(1, Ordering::Relaxed) % self.num_threads;
        if let Some(worker) = self.workers.get(idx) {
            worker.unparker.unpark();
        }

        Ok(())
    }

    /// Claim and execute one queued task on the calling thread.
    ///
    /// Returns `false` when no task could be claimed. Used by joining
    /// threads to stay useful while a child result is outstanding.
    pub(crate) fn run_pending_task(&self) -> bool {
        if let Some(task) = self.claim_task() {
            let tid = task.id;
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                task.execute();
            }));
            if result.is_err() {
                eprintln!("task {:?} panicked", tid);
            }
            self.pending_tasks.fetch_sub(1, Ordering::Relaxed);
            return true;
        }
        false
    }

    fn claim_task(&self) -> Option<Task> {
        loop {
            match self.injector.steal() {
                Steal::Success(task) => return Some(task),
                Steal::Empty => break,
                Steal::Retry => continue,
            }
        }

        for stealer in &self.stealers {
            loop {
                match stealer.steal() {
                    Steal::Success(task) => return Some(task),
                    Steal::Empty => break,
                    Steal::Retry => continue,
                }
            }
        }

        None
    }

    /// Number of tasks submitted but not yet finished.
    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks.load(Ordering::Relaxed)
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    #[cfg(test)]
    pub(crate) fn tasks_executed(&self) -> u64 {
        self.worker_states
            .iter()
            .map(|s| s.tasks_executed.load(Ordering::Relaxed))
            .sum()
    }

    /// Stop the workers and join their threads. Idempotent.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Release);

        // wake everyone up to check shutdown flag
        for worker in &self.workers {
            worker.unparker.unpark();
        }

        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_threads", &self.num_threads)
            .field("pending_tasks", &self.pending_tasks())
            .finish()
    }
}

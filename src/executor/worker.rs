// worker thread stuff
use super::task::Task;
use crate::util::Backoff;
use crossbeam_deque::{Injector, Steal, Stealer, Worker as WorkerQueue};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

pub type WorkerId = usize;

// stats for each worker
pub struct WorkerState {
    pub tasks_executed: AtomicU64,
    pub tasks_stolen: AtomicU64,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            tasks_executed: AtomicU64::new(0),
            tasks_stolen: AtomicU64::new(0),
        }
    }
}

pub(crate) struct Worker {
    pub id: WorkerId,
    pub local_queue: WorkerQueue<Task>,
    pub state: Arc<WorkerState>,
}

impl Worker {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            local_queue: WorkerQueue::new_fifo(),
            state: Arc::new(WorkerState::new()),
        }
    }

    // main loop
    pub fn run(
        &self,
        stealers: Vec<Stealer<Task>>,
        injector: Arc<Injector<Task>>,
        shutdown: Arc<AtomicBool>,
        pending_tasks: Arc<AtomicUsize>,
    ) {
        let mut backoff = Backoff::new();

        loop {
            if shutdown.load(Ordering::Acquire) {
                break;
            }

            // Priority: local -> global -> steal
            if let Some(task) = self.find_task(&stealers, &injector) {
                backoff.reset();
                self.execute_task(task);
                pending_tasks.fetch_sub(1, Ordering::Relaxed);
            } else {
                backoff.wait();
            }
        }
    }

    fn find_task(&self, stealers: &[Stealer<Task>], injector: &Injector<Task>) -> Option<Task> {
        // 1. Check local queue first (best cache locality)
        if let Some(task) = self.local_queue.pop() {
            return Some(task);
        }

        // 2. Check global injector queue
        loop {
            match injector.steal_batch_and_pop(&self.local_queue) {
                Steal::Success(task) => {
                    self.state.tasks_stolen.fetch_add(1, Ordering::Relaxed);
                    return Some(task);
                }
                Steal::Empty => break,
                Steal::Retry => continue,
            }
        }

        // 3. Steal from other workers
        self.try_steal_from_workers(stealers)
    }

    fn try_steal_from_workers(&self, stealers: &[Stealer<Task>]) -> Option<Task> {
        use rand::seq::SliceRandom;
        use rand::thread_rng;

        if stealers.is_empty() {
            return None;
        }

        let mut indices: Vec<usize> = (0..stealers.len()).collect();
        indices.shuffle(&mut thread_rng());

        for &idx in &indices {
            if idx == self.id {
                continue;
            }

            loop {
                match stealers[idx].steal_batch_and_pop(&self.local_queue) {
                    Steal::Success(task) => {
                        self.state.tasks_stolen.fetch_add(1, Ordering::Relaxed);
                        return Some(task);
                    }
                    Steal::Empty => break,
                    Steal::Retry => continue,
                }
            }
        }

        None
    }

    fn execute_task(&self, task: Task) {
        let tid = task.id;

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            task.execute();
        }));

        if result.is_err() {
            eprintln!("task {:?} panicked", tid);
        }

        self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);
    }
}

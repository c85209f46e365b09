//! Incremental backoff for idle loops.

use std::hint::spin_loop;
use std::thread;
use std::time::Duration;

/// Escalating wait strategy for loops polling for work or a result:
/// spin first, then yield, then park the thread for short intervals.
#[derive(Debug, Default)]
pub struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 6;
    const YIELD_LIMIT: u32 = 12;

    /// Create a fresh backoff at the spinning phase.
    pub fn new() -> Self {
        Self { step: 0 }
    }

    /// Return to the spinning phase. Call after useful work was found.
    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Perform one wait step and escalate.
    pub fn wait(&mut self) {
        if self.step <= Self::SPIN_LIMIT {
            for _ in 0..(1 << self.step) {
                spin_loop();
            }
        } else if self.step <= Self::YIELD_LIMIT {
            thread::yield_now();
        } else {
            thread::park_timeout(Duration::from_micros(100));
        }
        self.step = self.step.saturating_add(1);
    }

    /// Whether escalation has reached the parking phase.
    pub fn is_parking(&self) -> bool {
        self.step > Self::YIELD_LIMIT
    }
}

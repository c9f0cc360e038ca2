//! Execution context for the accelerated library.
//!
//! A `Queue` carries the worker count a routine may use. Every routine runs
//! its body through [`Queue::run`] and hands back an [`Event`]; the work is
//! complete once the call returns, and `Event::wait` reports how long it took.

use crate::error::StatusCode;
use crate::parallel::default_threads;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Queue {
    threads: usize,
}

impl Default for Queue {
    fn default() -> Self {
        Self::new(default_threads())
    }
}

impl Queue {
    /// Queue using `threads` workers (at least one).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs `body` and times it. Validation failures come back before any write.
    pub fn run<F>(&mut self, body: F) -> Result<Event, StatusCode>
    where
        F: FnOnce(&Queue) -> Result<(), StatusCode>,
    {
        let start = Instant::now();
        body(self)?;
        Ok(Event {
            elapsed: start.elapsed(),
        })
    }
}

/// Completion handle for one routine call.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Event {
    elapsed: Duration,
}

impl Event {
    /// Blocks until the routine has finished and returns its run time.
    pub fn wait(self) -> Duration {
        self.elapsed
    }
}

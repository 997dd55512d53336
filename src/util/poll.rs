//! Cancellation handle for timer-driven loops.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session validity poll runs as a detached `spawn_local` loop. The
//! owning scope keeps one clone of [`PollHandle`] and cancels it from
//! `on_cleanup`; the loop checks its clone after every sleep and exits
//! without acting once cancelled.

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct PollHandle {
    alive: Arc<AtomicBool>,
}

impl Default for PollHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl PollHandle {
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Stop every clone of this handle. Idempotent.
    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }
}

//! One-shot run deadline
//!
//! Each worker owns a deadline: a flag armed once, flipped by a timer
//! task, and polled between steps. The flag is monotonic, once expired
//! it stays expired.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A one-shot expiry flag armed by a timer task
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    expired: Arc<AtomicBool>,
}

impl Deadline {
    /// Create an unarmed deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the timer; after `duration` the deadline reads as expired
    pub fn arm(&self, duration: Duration) {
        let expired = self.expired.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            expired.store(true, Ordering::Release);
        });
    }

    /// Check expiry without blocking
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Acquire)
    }
}

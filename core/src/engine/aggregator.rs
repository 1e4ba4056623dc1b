//! Result aggregation from multiple workers

use crate::worker::WorkerCounters;

/// Aggregated results from all workers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateReport {
    /// Number of workers that completed
    pub total_workers: usize,

    /// Total steps that received response bytes
    pub total_succeeded: u64,

    /// Total steps that failed
    pub total_failed: u64,

    /// Total response bytes received
    pub total_bytes: u64,

    /// Attempted pages per minute, failures included
    pub pages_per_minute: f64,

    /// Received bytes per second
    pub bytes_per_second: f64,
}

impl AggregateReport {
    /// Get the total number of attempted steps (succeeded + failed)
    pub fn total_requests(&self) -> u64 {
        self.total_succeeded + self.total_failed
    }

    /// Get the success rate (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        let total = self.total_requests();
        if total > 0 {
            self.total_succeeded as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Aggregate counters from multiple workers over the run duration
///
/// The page rate counts failed attempts too: it measures offered load,
/// not delivery.
pub fn aggregate_worker_counters(counters: &[WorkerCounters], duration_secs: f64) -> AggregateReport {
    if counters.is_empty() {
        return AggregateReport::default();
    }

    let total_succeeded: u64 = counters.iter().map(|c| c.succeeded).sum();
    let total_failed: u64 = counters.iter().map(|c| c.failed).sum();
    let total_bytes: u64 = counters.iter().map(|c| c.bytes_received).sum();

    let (pages_per_minute, bytes_per_second) = if duration_secs > 0.0 {
        (
            ((total_succeeded + total_failed) as f64 / (duration_secs / 60.0)).round(),
            (total_bytes as f64 / duration_secs).round(),
        )
    } else {
        (0.0, 0.0)
    };

    AggregateReport {
        total_workers: counters.len(),
        total_succeeded,
        total_failed,
        total_bytes,
        pages_per_minute,
        bytes_per_second,
    }
}

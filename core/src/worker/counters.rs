//! Worker counter tracking

/// Counters tracked by each worker
///
/// Each send+receive step increments exactly one of `succeeded` or
/// `failed`; `bytes_received` grows only on successful receives.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerCounters {
    /// Number of steps that completed with response bytes
    pub succeeded: u64,

    /// Number of steps that failed to send or receive
    pub failed: u64,

    /// Total response bytes received
    pub bytes_received: u64,
}

impl WorkerCounters {
    /// Create new empty counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total number of attempted steps (succeeded + failed)
    pub fn total_requests(&self) -> u64 {
        self.succeeded + self.failed
    }

    /// Get success rate as a fraction (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_requests() == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total_requests() as f64
        }
    }

    /// Record a step that received `bytes` response bytes
    pub fn record_success(&mut self, bytes: u64) {
        self.succeeded += 1;
        self.bytes_received += bytes;
    }

    /// Record a failed step
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Merge counters from another worker
    pub fn merge(&mut self, other: &WorkerCounters) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.bytes_received += other.bytes_received;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_defaults() {
        let counters = WorkerCounters::default();
        assert_eq!(counters.succeeded, 0);
        assert_eq!(counters.failed, 0);
        assert_eq!(counters.bytes_received, 0);
    }

    #[test]
    fn test_counters_total_requests() {
        let mut counters = WorkerCounters::new();
        counters.succeeded = 10;
        counters.failed = 2;
        assert_eq!(counters.total_requests(), 12);
    }

    #[test]
    fn test_counters_success_rate() {
        let mut counters = WorkerCounters::new();
        counters.succeeded = 8;
        counters.failed = 2;
        assert!((counters.success_rate() - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_counters_success_rate_zero_requests() {
        let counters = WorkerCounters::new();
        assert_eq!(counters.success_rate(), 0.0);
    }

    #[test]
    fn test_counters_record_success() {
        let mut counters = WorkerCounters::new();
        counters.record_success(1024);
        counters.record_success(512);

        assert_eq!(counters.succeeded, 2);
        assert_eq!(counters.bytes_received, 1536);
        assert_eq!(counters.failed, 0);
    }

    #[test]
    fn test_counters_record_failure() {
        let mut counters = WorkerCounters::new();
        counters.record_failure();
        counters.record_failure();

        assert_eq!(counters.failed, 2);
        assert_eq!(counters.succeeded, 0);
        assert_eq!(counters.bytes_received, 0);
    }

    #[test]
    fn test_counters_merge() {
        let mut a = WorkerCounters {
            succeeded: 10,
            failed: 1,
            bytes_received: 4096,
        };
        let b = WorkerCounters {
            succeeded: 5,
            failed: 2,
            bytes_received: 2048,
        };

        a.merge(&b);

        assert_eq!(a.succeeded, 15);
        assert_eq!(a.failed, 3);
        assert_eq!(a.bytes_received, 6144);
    }
}

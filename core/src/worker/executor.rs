//! Worker execution loop

use crate::config::RunConfig;
use crate::deadline::Deadline;
use crate::script::{RequestScript, ScriptStep};
use crate::transport::{Connection, Transport};

use super::counters::WorkerCounters;

use std::sync::Arc;
use std::time::Duration;

/// Pause between connect attempts while the target is unreachable
const RECONNECT_BACKOFF: Duration = Duration::from_millis(5);

/// Maximum bytes read per response
const RECV_LIMIT: usize = 2048;

/// Worker drives one connection through the request script in a loop:
/// **connect -> cycle steps -> repeat until the deadline expires**
///
/// Workers are tokio tasks managed by the Engine. They share the
/// Transport and RequestScript via Arc and own their counters and
/// deadline exclusively; counters come back by value at join.
pub struct Worker {
    /// Unique worker identifier (1-based)
    id: usize,

    /// Run configuration (shared across workers via Arc)
    config: Arc<RunConfig>,

    /// Connection factory (shared across workers via Arc)
    transport: Arc<dyn Transport>,

    /// Request script (shared across workers via Arc)
    script: Arc<RequestScript>,

    /// This worker's run deadline
    deadline: Deadline,
}

enum StepOutcome {
    /// Step completed or failed recoverably; keep going
    Continue,
    /// Send failed; abandon the cycle and start a new one
    RestartCycle,
    /// Peer closed or deadline expired; leave the run loop
    Terminate,
}

impl Worker {
    /// Create a new worker
    pub fn new(
        id: usize,
        config: Arc<RunConfig>,
        transport: Arc<dyn Transport>,
        script: Arc<RequestScript>,
        deadline: Deadline,
    ) -> Self {
        Self {
            id,
            config,
            transport,
            script,
            deadline,
        }
    }

    /// Run the worker loop
    ///
    /// Arms the deadline, connects (retrying until the deadline expires),
    /// then cycles the script until expiry or peer close. The connection
    /// is closed on every exit path. Returns the final counters.
    pub async fn run(self) -> WorkerCounters {
        let mut counters = WorkerCounters::new();

        self.deadline.arm(self.config.duration());
        tracing::debug!(worker_id = self.id, "Worker started");

        let Some(mut conn) = self.acquire_connection().await else {
            // Deadline crossed before any connect succeeded; the one
            // connect-phase failure path.
            counters.record_failure();
            tracing::warn!(
                worker_id = self.id,
                "Deadline expired before a connection was established"
            );
            return counters;
        };

        let mut iteration: u64 = 0;
        'run: while !self.deadline.is_expired() {
            iteration += 1;
            for step in self.script.steps() {
                if self.deadline.is_expired() {
                    break 'run;
                }

                match self.execute_step(&mut *conn, step, iteration, &mut counters).await {
                    StepOutcome::Continue => {}
                    StepOutcome::RestartCycle => continue 'run,
                    StepOutcome::Terminate => break 'run,
                }

                if self.deadline.is_expired() {
                    break 'run;
                }
            }
        }

        conn.close().await;

        tracing::debug!(
            worker_id = self.id,
            succeeded = counters.succeeded,
            failed = counters.failed,
            bytes_received = counters.bytes_received,
            iterations = iteration,
            "Worker finished"
        );

        counters
    }

    /// Retry connecting until success or deadline expiry
    async fn acquire_connection(&self) -> Option<Box<dyn Connection>> {
        while !self.deadline.is_expired() {
            match self
                .transport
                .connect(&self.config.host, self.config.port, self.config.duration())
                .await
            {
                Ok(conn) => {
                    tracing::debug!(worker_id = self.id, "Connection established");
                    return Some(conn);
                }
                Err(e) => {
                    tracing::debug!(worker_id = self.id, error = %e, "Connect attempt failed");
                    tokio::time::sleep(RECONNECT_BACKOFF).await;
                }
            }
        }
        None
    }

    /// Send one scripted request and receive its response
    async fn execute_step(
        &self,
        conn: &mut dyn Connection,
        step: ScriptStep,
        iteration: u64,
        counters: &mut WorkerCounters,
    ) -> StepOutcome {
        let request = self.script.request_bytes(step, self.id, iteration);

        match conn.send(&request).await {
            Ok(n) if n == request.len() => {}
            Ok(n) => {
                counters.record_failure();
                tracing::warn!(
                    worker_id = self.id,
                    step = %step,
                    sent = n,
                    expected = request.len(),
                    "Short write"
                );
                return StepOutcome::RestartCycle;
            }
            Err(e) => {
                counters.record_failure();
                tracing::warn!(worker_id = self.id, step = %step, error = %e, "Send failed");
                return StepOutcome::RestartCycle;
            }
        }

        match conn.recv(RECV_LIMIT).await {
            Ok(body) if body.is_empty() => {
                tracing::debug!(worker_id = self.id, step = %step, "Peer closed connection");
                StepOutcome::Terminate
            }
            Ok(body) => {
                counters.record_success(body.len() as u64);
                StepOutcome::Continue
            }
            Err(e) => {
                counters.record_failure();
                tracing::warn!(worker_id = self.id, step = %step, error = %e, "Receive failed");
                StepOutcome::Continue
            }
        }
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .finish()
    }
}

//! Engine execution logic

use std::sync::Arc;
use std::time::Instant;

use crate::config::RunConfig;
use crate::error::Result;
use crate::script::RequestScript;
use crate::transport::Transport;
use crate::worker::{WorkerBuilder, WorkerCounters};

use super::aggregator::{aggregate_worker_counters, AggregateReport};

/// Engine manages the load run lifecycle
///
/// Responsible for spawning workers, waiting out the run duration,
/// draining worker results, and producing the aggregate report.
pub struct Engine {
    /// Run configuration
    pub(crate) config: Arc<RunConfig>,

    /// Connection factory (shared across workers)
    pub(crate) transport: Arc<dyn Transport>,

    /// Request script (shared across workers)
    pub(crate) script: Arc<RequestScript>,
}

impl Engine {
    /// Create a new engine
    ///
    /// Use `EngineBuilder` for a more ergonomic construction.
    pub fn new(config: RunConfig, transport: Arc<dyn Transport>) -> Self {
        let script = Arc::new(RequestScript::new(&config));
        Self {
            config: Arc::new(config),
            transport,
            script,
        }
    }

    /// Get the run configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the load test
    ///
    /// Spawns one worker task per configured client, sleeps out the run
    /// duration, then drains every join handle. A worker may finish an
    /// in-flight step past the nominal duration; the drain waits for it.
    /// Panicked workers are logged and skipped, so a report is always
    /// produced.
    pub async fn run(&self) -> Result<AggregateReport> {
        let start = Instant::now();

        tracing::info!(
            clients = self.config.clients,
            duration_secs = self.config.duration_secs,
            host = %self.config.host,
            port = self.config.port,
            path = %self.config.path,
            "Starting load run"
        );

        let mut handles = Vec::with_capacity(self.config.clients);
        for worker_id in 1..=self.config.clients {
            let worker = WorkerBuilder::new(worker_id)
                .config(Arc::clone(&self.config))
                .transport(Arc::clone(&self.transport))
                .script(Arc::clone(&self.script))
                .build()?;

            handles.push(tokio::spawn(worker.run()));
        }

        tokio::time::sleep(self.config.duration()).await;

        let mut results: Vec<WorkerCounters> = Vec::with_capacity(handles.len());
        for (idx, handle) in handles.into_iter().enumerate() {
            let worker_id = idx + 1;
            match handle.await {
                Ok(counters) => {
                    tracing::debug!(
                        worker_id,
                        succeeded = counters.succeeded,
                        failed = counters.failed,
                        bytes_received = counters.bytes_received,
                        "Worker completed"
                    );
                    results.push(counters);
                }
                Err(e) => {
                    tracing::error!(worker_id, error = %e, "Worker task panicked");
                    // Continue collecting other results
                }
            }
        }

        let elapsed = start.elapsed();
        let report = aggregate_worker_counters(&results, self.config.duration_secs);
        tracing::info!(
            elapsed_secs = elapsed.as_secs_f64(),
            total_succeeded = report.total_succeeded,
            total_failed = report.total_failed,
            pages_per_minute = report.pages_per_minute,
            bytes_per_second = report.bytes_per_second,
            "Load run completed"
        );

        Ok(report)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish()
    }
}

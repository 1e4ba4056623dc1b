//! Builder pattern for Worker construction

use crate::config::RunConfig;
use crate::deadline::Deadline;
use crate::error::{Error, Result};
use crate::script::RequestScript;
use crate::transport::Transport;

use super::executor::Worker;

use std::sync::Arc;

/// Builder for creating Worker instances
///
/// Provides ergonomic construction with validation.
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(1)
///     .config(config)
///     .transport(transport)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    config: Option<Arc<RunConfig>>,
    transport: Option<Arc<dyn Transport>>,
    script: Option<Arc<RequestScript>>,
    deadline: Option<Deadline>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            config: None,
            transport: None,
            script: None,
            deadline: None,
        }
    }

    /// Set the run configuration
    pub fn config(mut self, config: Arc<RunConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the request script (defaults to one derived from the config)
    pub fn script(mut self, script: Arc<RequestScript>) -> Self {
        self.script = Some(script);
        self
    }

    /// Set the deadline (defaults to a fresh unarmed deadline)
    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> Result<Worker> {
        let config = self
            .config
            .ok_or_else(|| Error::Config("worker requires a config".into()))?;
        let transport = self
            .transport
            .ok_or_else(|| Error::Config("worker requires a transport".into()))?;
        let script = self
            .script
            .unwrap_or_else(|| Arc::new(RequestScript::new(&config)));
        let deadline = self.deadline.unwrap_or_default();

        Ok(Worker::new(self.id, config, transport, script, deadline))
    }
}

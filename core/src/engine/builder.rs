//! Builder pattern for Engine construction

use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::transport::Transport;

use super::executor::Engine;

/// Builder for creating an Engine with proper configuration
///
/// # Example
///
/// ```ignore
/// let engine = EngineBuilder::new()
///     .config(config)
///     .transport(transport)
///     .build()?;
/// ```
pub struct EngineBuilder {
    config: RunConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl EngineBuilder {
    /// Create a new engine builder with default configuration
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
            transport: None,
        }
    }

    /// Set the full run configuration
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of concurrent clients
    pub fn clients(mut self, clients: usize) -> Self {
        self.config.clients = clients;
        self
    }

    /// Set the run duration in seconds
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.config.duration_secs = secs;
        self
    }

    /// Set the transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the engine
    ///
    /// # Errors
    ///
    /// Returns an error if the transport is not set or if configuration
    /// validation fails.
    pub fn build(self) -> Result<Engine> {
        let transport = self
            .transport
            .ok_or_else(|| Error::Config("engine requires a transport".into()))?;

        self.config
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Engine::new(self.config, transport))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

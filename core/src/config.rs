//! Run configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load run configuration
///
/// Defines how a load run should be executed, including client count,
/// run duration, and the target endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Run duration in seconds
    pub duration_secs: f64,

    /// Number of concurrent client workers
    pub clients: usize,

    /// Target host name or address
    pub host: String,

    /// Target TCP port
    pub port: u16,

    /// Request path for the index page
    pub path: String,

    /// Skip server certificate verification
    #[serde(default)]
    pub insecure: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_secs: 30.0,
            clients: 1,
            host: "127.0.0.1".to_string(),
            port: 443,
            path: "/index.html".to_string(),
            insecure: false,
        }
    }
}

impl RunConfig {
    /// Create a new config with the given client count
    pub fn new(clients: usize) -> Self {
        Self {
            clients,
            ..Default::default()
        }
    }

    /// Set the run duration in seconds
    pub fn with_duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Set the target host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the target port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the request path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Skip server certificate verification
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// The run duration as a [`Duration`]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ConfigError::InvalidDuration(
                "duration must be a positive number of seconds".into(),
            ));
        }

        if self.clients == 0 {
            return Err(ConfigError::InvalidClients(
                "client count must be at least 1".into(),
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidEndpoint("port must be nonzero".into()));
        }

        if self.host.is_empty() {
            return Err(ConfigError::InvalidEndpoint("host must not be empty".into()));
        }

        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidEndpoint(
                "path must start with '/'".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid run duration
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Invalid client count
    #[error("Invalid client count: {0}")]
    InvalidClients(String),

    /// Invalid target endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

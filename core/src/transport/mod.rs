//! Transport capability traits
//!
//! These traits form the seam between the worker loop and the wire.
//! The production implementation is [`TlsTransport`]; tests substitute
//! mock implementations to script connection behavior.

use async_trait::async_trait;
use std::time::Duration;

mod tls;

pub use tls::TlsTransport;

/// Factory for outbound connections
///
/// Implementations handle the dialing details (TCP, TLS handshake)
/// while presenting a unified interface to the worker.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a connection to `host:port`, failing after `timeout`
    async fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Box<dyn Connection>, TransportError>;
}

/// An established byte-stream connection
#[async_trait]
pub trait Connection: Send {
    /// Write the buffer, returning the number of bytes accepted
    ///
    /// A return value smaller than `buf.len()` is a short write.
    async fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError>;

    /// Read up to `max` bytes
    ///
    /// An empty vector means the peer closed the connection.
    async fn recv(&mut self, max: usize) -> Result<Vec<u8>, TransportError>;

    /// Shut the connection down, ignoring errors
    async fn close(&mut self);
}

/// Transport-level errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// TCP connect failed
    #[error("connect to {addr} failed: {source}")]
    Connect {
        /// Target address
        addr: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// TLS handshake failed
    #[error("TLS handshake with {addr} failed: {source}")]
    Handshake {
        /// Target address
        addr: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Host name not usable as a TLS server name
    #[error("invalid server name: {0}")]
    ServerName(String),

    /// System root certificates could not be loaded
    #[error("failed to load native root certificates: {0}")]
    NativeRoots(#[source] std::io::Error),

    /// TLS configuration error
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Operation exceeded its deadline
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// Write failed
    #[error("send failed: {0}")]
    Send(#[source] std::io::Error),

    /// Read failed
    #[error("receive failed: {0}")]
    Receive(#[source] std::io::Error),
}

impl TransportError {
    /// Check if this error occurred while establishing the connection
    pub fn is_connect(&self) -> bool {
        matches!(
            self,
            TransportError::Connect { .. }
                | TransportError::Handshake { .. }
                | TransportError::ServerName(_)
        )
    }
}

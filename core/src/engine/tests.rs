//! Integration tests for the Engine module

use super::*;
use crate::config::RunConfig;
use crate::transport::{Connection, Transport, TransportError};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Mock Transport
// ============================================================================

struct MockTransport {
    connect_fails: bool,
    recv_size: usize,
}

impl MockTransport {
    fn healthy() -> Self {
        Self {
            connect_fails: false,
            recv_size: 10,
        }
    }

    fn unreachable() -> Self {
        Self {
            connect_fails: true,
            recv_size: 0,
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(
        &self,
        _host: &str,
        _port: u16,
        _timeout: Duration,
    ) -> Result<Box<dyn Connection>, TransportError> {
        if self.connect_fails {
            return Err(TransportError::Connect {
                addr: "mock:0".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
            });
        }
        Ok(Box::new(MockConnection {
            recv_size: self.recv_size,
        }))
    }
}

struct MockConnection {
    recv_size: usize,
}

#[async_trait]
impl Connection for MockConnection {
    async fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        // Keeps the loop yielding so timer tasks get scheduled.
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(buf.len())
    }

    async fn recv(&mut self, _max: usize) -> Result<Vec<u8>, TransportError> {
        Ok(vec![b'x'; self.recv_size])
    }

    async fn close(&mut self) {}
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_engine_healthy_run() {
    let engine = EngineBuilder::new()
        .config(
            RunConfig::new(5)
                .with_duration_secs(1.0)
                .with_host("mock")
                .with_port(1),
        )
        .transport(Arc::new(MockTransport::healthy()))
        .build()
        .expect("Failed to build engine");

    let report = engine.run().await.expect("Engine run failed");

    assert_eq!(report.total_workers, 5);
    assert_eq!(report.total_failed, 0);
    assert!(report.total_succeeded > 0);
    // At one second of run time the byte rate equals the byte total.
    assert_eq!(report.bytes_per_second, report.total_bytes as f64);
    assert_eq!(
        report.total_bytes,
        report.total_succeeded * 10,
        "every success received 10 bytes"
    );
}

#[tokio::test]
async fn test_engine_unreachable_target() {
    let engine = EngineBuilder::new()
        .config(
            RunConfig::new(3)
                .with_duration_secs(0.1)
                .with_host("mock")
                .with_port(1),
        )
        .transport(Arc::new(MockTransport::unreachable()))
        .build()
        .expect("Failed to build engine");

    let report = engine.run().await.expect("Engine run failed");

    // One connect-phase failure per worker, nothing else.
    assert_eq!(report.total_workers, 3);
    assert_eq!(report.total_failed, 3);
    assert_eq!(report.total_succeeded, 0);
    assert_eq!(report.total_bytes, 0);
}

#[tokio::test]
async fn test_engine_rates_are_non_negative() {
    let engine = EngineBuilder::new()
        .config(
            RunConfig::new(2)
                .with_duration_secs(0.1)
                .with_host("mock")
                .with_port(1),
        )
        .transport(Arc::new(MockTransport::healthy()))
        .build()
        .expect("Failed to build engine");

    let report = engine.run().await.expect("Engine run failed");

    assert!(report.pages_per_minute >= 0.0);
    assert!(report.bytes_per_second >= 0.0);
}

#[test]
fn test_builder_requires_transport() {
    let result = EngineBuilder::new().build();
    assert!(result.is_err());
}

#[test]
fn test_builder_rejects_invalid_config() {
    let result = EngineBuilder::new()
        .clients(0)
        .transport(Arc::new(MockTransport::healthy()))
        .build();
    assert!(result.is_err());

    let result = EngineBuilder::new()
        .duration_secs(0.0)
        .transport(Arc::new(MockTransport::healthy()))
        .build();
    assert!(result.is_err());
}

//! webbench-core: Core load-generation engine for webbench
//!
//! This crate provides the building blocks of the load generator:
//!
//! - Transport capability traits and the TLS implementation
//! - The fixed request script workers cycle through
//! - Per-worker deadlines and counters
//! - The engine that spawns workers and aggregates their results
//! - Error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod deadline;
pub mod engine;
pub mod error;
pub mod script;
pub mod transport;
pub mod worker;

pub use config::{ConfigError, RunConfig};
pub use deadline::Deadline;
pub use engine::{aggregate_worker_counters, AggregateReport, Engine, EngineBuilder};
pub use error::{Error, Result};
pub use script::{RequestScript, ScriptStep};
pub use transport::{Connection, TlsTransport, Transport, TransportError};
pub use worker::{Worker, WorkerBuilder, WorkerCounters};

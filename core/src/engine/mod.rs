//! Engine for load run lifecycle management
//!
//! The Engine coordinates the complete load run:
//! - Spawning one worker task per configured client
//! - Sleeping out the run duration while workers cycle
//! - Draining worker results at join
//! - Aggregating counters into the final report
//!
//! # Example
//!
//! ```ignore
//! use webbench_core::EngineBuilder;
//!
//! let engine = EngineBuilder::new()
//!     .config(config)
//!     .transport(transport)
//!     .build()?;
//!
//! let report = engine.run().await?;
//! ```

mod aggregator;
mod builder;
mod executor;

pub use aggregator::{aggregate_worker_counters, AggregateReport};
pub use builder::EngineBuilder;
pub use executor::Engine;

#[cfg(test)]
mod tests;

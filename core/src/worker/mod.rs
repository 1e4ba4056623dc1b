//! Worker module for driving scripted request cycles
//!
//! The Worker is the core execution unit in webbench, responsible for the
//! simple but critical loop: **connect -> send -> receive -> repeat**.
//!
//! Unlike load testing tools that simulate "users" with lifecycle hooks,
//! think times, and session state, our Worker is intentionally minimal.
//! Each Worker is a tokio task that:
//!
//! 1. Arms its one-shot deadline
//! 2. Connects via the Transport, retrying until the deadline expires
//! 3. Cycles the fixed request script, counting successes and failures
//! 4. Closes the connection and returns its counters at join
//!
//! # Example
//!
//! ```ignore
//! use webbench_core::worker::{Worker, WorkerBuilder, WorkerCounters};
//!
//! let worker = WorkerBuilder::new(1)
//!     .config(config)
//!     .transport(transport)
//!     .build()?;
//!
//! let counters = worker.run().await;
//! println!("Succeeded: {}", counters.succeeded);
//! ```

mod builder;
mod counters;
mod executor;

pub use builder::WorkerBuilder;
pub use counters::WorkerCounters;
pub use executor::Worker;

//! webbench - Concurrent HTTPS load generator

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use webbench_core::{AggregateReport, EngineBuilder, RunConfig, TlsTransport};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let config = cli.run_config();
    config
        .validate()
        .context("invalid command-line arguments")?;

    // The socket IO timeout matches the run duration, so no blocking
    // call can outlive the deadline by more than one timeout.
    let transport = if config.insecure {
        TlsTransport::insecure(config.duration())
    } else {
        TlsTransport::new(config.duration())
    }
    .context("failed to build TLS transport")?;

    let engine = EngineBuilder::new()
        .config(config.clone())
        .transport(Arc::new(transport))
        .build()
        .context("failed to build engine")?;

    let report = engine.run().await.context("load run failed")?;

    print_report(&config, &report);

    Ok(())
}

fn print_report(config: &RunConfig, report: &AggregateReport) {
    println!(
        "\nRunning info: {} clients, running {} seconds.\n",
        config.clients, config.duration_secs
    );
    println!(
        "Speed={} pages/min, {} bytes/sec.",
        report.pages_per_minute, report.bytes_per_second
    );
    println!(
        "Requests: {} succeeded, {} failed.",
        report.total_succeeded, report.total_failed
    );
}

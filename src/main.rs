//! HTTP behavior fixture server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                  FIXTURE SERVER                   │
//!                     │                                                   │
//!   Client Request    │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ──────────────────┼─▶│  http   │───▶│ routing  │───▶│  behaviors  │  │
//!                     │  │ server  │    │  table   │    │ status/delay│  │
//!                     │  └─────────┘    └──────────┘    │ bytes/cache │  │
//!                     │                                  │ redirect/...│  │
//!   Client Response   │                                  └──────┬──────┘  │
//!   ◀─────────────────┼──────────────────────────────────────────┘         │
//!                     │                                                   │
//!                     │  ┌─────────┐ ┌──────────────┐ ┌───────────────┐  │
//!                     │  │ config  │ │observability │ │   lifecycle   │  │
//!                     │  └─────────┘ └──────────────┘ └───────────────┘  │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_fixture::config::{load_config, FixtureConfig};
use http_fixture::lifecycle::{signals, Shutdown};
use http_fixture::observability::{logging, metrics};
use http_fixture::HttpServer;

#[derive(Parser)]
#[command(name = "http-fixture")]
#[command(about = "HTTP behavior fixture server for testing clients and proxies", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FixtureConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("http-fixture v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_delay_secs = config.behaviors.max_delay_secs,
        max_bytes = config.behaviors.max_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config, shutdown);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! omniwallet server
//!
//! A single-key custodial wallet for EVM chains, served over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / CLI
//!          │
//!          ▼
//!     ┌──────────┐     ┌────────────┐     ┌──────────────┐
//!     │   http   │────▶│  transfer  │────▶│  blockchain  │────▶ JSON-RPC node
//!     │  server  │     │  service   │     │ sign + send  │
//!     └────┬─────┘     └─────┬──────┘     └──────────────┘
//!          │                 │
//!          │                 ▼
//!          │           ┌──────────┐
//!          │           │ keystore │ (keyfile on disk)
//!          │           └──────────┘
//!          ▼
//!     ┌──────────┐
//!     │ balances │────▶ Covalent balances API
//!     └──────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use omniwallet::config::load_config;
use omniwallet::http::HttpServer;
use omniwallet::lifecycle::{build_state, wait_for_signal, Shutdown};
use omniwallet::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "omniwallet")]
#[command(about = "Custodial EVM wallet server", version)]
struct Args {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "omniwallet starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        primary_rpc = %config.chains.primary_rpc_url,
        secondary_rpc = %config.chains.secondary_rpc_url,
        serialize_per_address = config.transfers.serialize_per_address,
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

    let state = build_state(&config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config.server.clone(), state);

    let serve = async {
        match &config.server.tls {
            Some(tls) => {
                let addr = config.server.bind_address.parse()?;
                server.run_tls(addr, tls, server_shutdown).await?;
            }
            None => {
                let listener = TcpListener::bind(&config.server.bind_address).await?;
                server.run(listener, server_shutdown).await?;
            }
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    };

    let signal = async {
        wait_for_signal().await;
        shutdown.trigger();
        std::future::pending::<()>().await;
    };

    tokio::select! {
        result = serve => result?,
        _ = signal => {}
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

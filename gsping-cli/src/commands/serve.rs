//! HTTP server commands
//!
//! `serve` runs the database-backed service; `serve-minimal` runs the static
//! health responder.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use gsping_server::db::init_store;
use gsping_server::http::{run_minimal_server, run_server, ServerConfig};
use gsping_server::StoreConfig;

use super::RetryArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "GSPING_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub retry: RetryArgs,
}

/// Arguments for the serve-minimal command
#[derive(Parser, Debug)]
pub struct ServeMinimalArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "GSPING_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,
}

/// Run the database-backed HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = StoreConfig::from_env().context("Invalid PG* environment")?;
    tracing::debug!(?store, "store configuration loaded");

    // Blocks until the database is reachable or the policy gives up
    let pool = init_store(&store, &args.retry.policy())
        .await
        .context("Failed to initialise the store")?;

    tracing::info!("Starting gsping server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(pool, config).await.context("Server error")?;

    Ok(())
}

/// Run the minimal health-check server
pub async fn run_serve_minimal(args: ServeMinimalArgs) -> Result<()> {
    tracing::info!("Starting minimal gsping server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        ..Default::default()
    };

    run_minimal_server(config).await.context("Server error")?;

    Ok(())
}

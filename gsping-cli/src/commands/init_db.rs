//! Store bootstrap without serving
//!
//! Connects with backoff, creates the `message` table if needed, and exits.
//! Useful as a container init step.

use anyhow::{Context, Result};
use clap::Parser;

use gsping_server::db::init_store;
use gsping_server::StoreConfig;

use super::RetryArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub retry: RetryArgs,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let store = StoreConfig::from_env().context("Invalid PG* environment")?;

    let pool = init_store(&store, &args.retry.policy())
        .await
        .context("Failed to initialise the store")?;
    pool.close().await;

    println!("message table ready on {}", store.target());
    Ok(())
}

//! gsping CLI - HTTP service over a single PostgreSQL table
//!
//! Subcommands:
//! - `serve`: database-backed service (`/`, `/ping`, `/send`)
//! - `serve-minimal`: static greeting and `/health`, no database
//! - `init-db`: create the `message` table and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "gsping",
    author,
    version,
    about = "Tiny HTTP service that upserts values into PostgreSQL and counts them"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server backed by PostgreSQL (PG* environment variables)
    Serve(commands::serve::ServeArgs),
    /// Run the static health-check server (no database)
    ServeMinimal(commands::serve::ServeMinimalArgs),
    /// Connect to PostgreSQL, create the message table, and exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; PG* variables may come from the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::ServeMinimal(args) => commands::run_serve_minimal(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}

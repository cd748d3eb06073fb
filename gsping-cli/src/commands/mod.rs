//! Command implementations for the gsping CLI

pub mod init_db;
pub mod serve;

pub use init_db::run_init_db;
pub use serve::{run_serve, run_serve_minimal};

use std::time::Duration;

use clap::Args;
use gsping_server::ExponentialBackoff;

/// Connection retry options shared by database-backed commands
#[derive(Args, Debug, Clone)]
pub struct RetryArgs {
    /// Give up connecting after this many attempts (default: retry forever)
    #[arg(long, env = "GSPING_CONNECT_MAX_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    /// Delay before the first reconnect, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub initial_delay_ms: u64,
}

impl RetryArgs {
    /// Backoff policy described by these options
    pub fn policy(&self) -> ExponentialBackoff {
        let policy = ExponentialBackoff::unbounded()
            .with_initial_delay(Duration::from_millis(self.initial_delay_ms));

        match self.max_attempts {
            Some(max) => policy.with_max_attempts(max),
            None => policy,
        }
    }
}

//! Store configuration - connection parameters from the environment
//!
//! Configuration is loaded from the standard libpq variables:
//! - `PGHOST` (default: localhost)
//! - `PGPORT` (default: 5432)
//! - `PGDATABASE` (default: postgres)
//! - `PGUSER` (default: postgres)
//! - `PGPASSWORD` (default: empty)

use std::fmt;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },
}

/// PostgreSQL connection parameters
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match var("PGPORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "PGPORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: var("PGHOST").unwrap_or(defaults.host),
            port,
            database: var("PGDATABASE").unwrap_or(defaults.database),
            user: var("PGUSER").unwrap_or(defaults.user),
            password: lookup("PGPASSWORD").unwrap_or(defaults.password),
        })
    }

    /// Connection options with TLS disabled.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .ssl_mode(PgSslMode::Disable);

        // empty password leaves room for trust auth or a pgpass entry
        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    /// `host:port/database`, safe to log.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

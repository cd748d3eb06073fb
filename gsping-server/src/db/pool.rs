//! Database connection pool management and store bootstrap
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is opened once
//! at startup behind an exponential backoff, then the `message` table is
//! created if it does not exist yet.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::StoreConfig;
use crate::retry::{retry, ExponentialBackoff};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a single connection attempt may wait for a connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Idempotent schema for the single-column message table.
const CREATE_MESSAGE_TABLE: &str = "CREATE TABLE IF NOT EXISTS message (value TEXT PRIMARY KEY)";

/// Pool sizing and timeouts
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Store bootstrap error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not connect to {target} after {attempts} attempt(s): {source}")]
    Connect {
        target: String,
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to create message table: {0}")]
    Schema(#[source] sqlx::Error),
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the first connection cannot be established.
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    create_pool_with_settings(options, PoolSettings::default()).await
}

/// Create a PostgreSQL connection pool with custom settings.
pub async fn create_pool_with_settings(
    options: PgConnectOptions,
    settings: PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
}

/// Create the `message` table if absent.
///
/// Safe to call any number of times.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MESSAGE_TABLE).execute(pool).await?;
    Ok(())
}

/// Open the store described by `config`, retrying per `policy`.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::from_env()?;
/// let pool = init_store(&config, &ExponentialBackoff::unbounded()).await?;
/// ```
pub async fn init_store(
    config: &StoreConfig,
    policy: &ExponentialBackoff,
) -> Result<PgPool, StoreError> {
    init_store_with(
        config.connect_options(),
        &config.target(),
        policy,
        PoolSettings::default(),
    )
    .await
}

/// Open a store from explicit connect options.
///
/// Connection failures are retried; a failing schema statement is not.
pub async fn init_store_with(
    options: PgConnectOptions,
    target: &str,
    policy: &ExponentialBackoff,
    settings: PoolSettings,
) -> Result<PgPool, StoreError> {
    bootstrap(target, policy, |attempt| {
        tracing::debug!(attempt, "opening connection pool");
        create_pool_with_settings(options.clone(), settings)
    })
    .await
}

/// Retry `connect` per `policy`, then create the schema once.
async fn bootstrap<F, Fut>(
    target: &str,
    policy: &ExponentialBackoff,
    connect: F,
) -> Result<PgPool, StoreError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PgPool, sqlx::Error>>,
{
    tracing::info!(database = %target, "connecting to database");

    let pool = retry(policy, connect)
        .await
        .map_err(|e| StoreError::Connect {
            target: target.to_string(),
            attempts: e.attempts,
            source: e.last_error,
        })?;

    if let Err(e) = ensure_schema(&pool).await {
        pool.close().await;
        return Err(StoreError::Schema(e));
    }

    tracing::info!(database = %target, "store ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn unreachable() -> PgConnectOptions {
        // Nothing listens on port 1
        PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nowhere")
            .ssl_mode(sqlx::postgres::PgSslMode::Disable)
    }

    #[tokio::test]
    async fn unreachable_database_is_retried() {
        let policy = ExponentialBackoff::default()
            .with_initial_delay(Duration::from_millis(10))
            .with_max_attempts(3);
        let settings = PoolSettings {
            max_connections: 1,
            acquire_timeout: Duration::from_millis(200),
        };

        let err = init_store_with(unreachable(), "127.0.0.1:1/nowhere", &policy, settings)
            .await
            .unwrap_err();

        match err {
            StoreError::Connect { attempts, target, .. } => {
                assert_eq!(attempts, 3);
                assert_eq!(target, "127.0.0.1:1/nowhere");
            }
            other => panic!("expected connect error, got {other:?}"),
        }
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p gsping-server -- --ignored --test-threads=1

    fn database_options() -> PgConnectOptions {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        PgConnectOptions::from_str(&url).expect("invalid DATABASE_URL")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn init_store_is_repeatable() {
        let policy = ExponentialBackoff::default().with_max_attempts(3);

        for _ in 0..2 {
            let pool = init_store_with(database_options(), "test", &policy, PoolSettings::default())
                .await
                .expect("store init failed");

            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = 'message')",
            )
            .fetch_one(&pool)
            .await
            .expect("query failed");

            assert!(exists);
            pool.close().await;
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn schema_failure_is_not_retried() {
        use std::sync::atomic::{AtomicU32, Ordering};

        // CREATE TABLE fails inside a read-only transaction
        let options = database_options().options([("default_transaction_read_only", "on")]);
        let policy = ExponentialBackoff::default().with_max_attempts(3);
        let connects = AtomicU32::new(0);

        let err = bootstrap("read-only", &policy, |_| {
            connects.fetch_add(1, Ordering::SeqCst);
            create_pool_with_settings(options.clone(), PoolSettings::default())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::Schema(_)), "got {err:?}");
        assert_eq!(connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let pool = create_pool(database_options())
            .await
            .expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}

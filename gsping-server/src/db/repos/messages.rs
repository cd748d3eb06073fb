//! Message repository
//!
//! A message's value is both its primary key and its payload:
//! - upsert: INSERT with ON CONFLICT (idempotent)
//! - count: total number of stored values

use sqlx::PgPool;

/// Database error type
///
/// Displays the driver's message unchanged so handlers can surface it.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Message repository
pub struct MessageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a value, overwriting an existing row with the same value.
    ///
    /// Concurrent upserts of the same value are resolved by the database.
    pub async fn upsert(&self, value: &str) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO message (value) VALUES ($1)
            ON CONFLICT (value) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(value)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Count all stored values.
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM message")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use sqlx::postgres::PgConnectOptions;

    use crate::db::pool::{init_store_with, PoolSettings};
    use crate::retry::ExponentialBackoff;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p gsping-server -- --ignored --test-threads=1

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options = PgConnectOptions::from_str(&url).expect("invalid DATABASE_URL");
        init_store_with(
            options,
            "test",
            &ExponentialBackoff::default().with_max_attempts(3),
            PoolSettings::default(),
        )
        .await
        .expect("store init failed")
    }

    fn unique_value(tag: &str) -> String {
        format!("{}-{}", tag, uuid::Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upsert_is_idempotent() {
        let pool = test_pool().await;
        let repo = MessageRepo::new(&pool);
        let value = unique_value("idempotent");

        let before = repo.count().await.unwrap();
        repo.upsert(&value).await.unwrap();
        let once = repo.count().await.unwrap();
        repo.upsert(&value).await.unwrap();
        let twice = repo.count().await.unwrap();

        assert_eq!(once, before + 1);
        assert_eq!(twice, once);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn distinct_values_are_counted_separately() {
        let pool = test_pool().await;
        let repo = MessageRepo::new(&pool);

        let before = repo.count().await.unwrap();
        repo.upsert(&unique_value("first")).await.unwrap();
        repo.upsert(&unique_value("second")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), before + 2);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_upserts_of_one_value() {
        let pool = test_pool().await;
        let value = unique_value("race");
        let before = MessageRepo::new(&pool).count().await.unwrap();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let pool = pool.clone();
                let value = value.clone();
                tokio::spawn(async move { MessageRepo::new(&pool).upsert(&value).await })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task panicked").expect("upsert failed");
        }

        assert_eq!(MessageRepo::new(&pool).count().await.unwrap(), before + 1);
    }
}

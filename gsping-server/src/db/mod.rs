//! Database layer - connection pool, store bootstrap and repositories
//!
//! - Pool opened once at startup behind a backoff
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod pool;
pub mod repos;

pub use pool::{create_pool, ensure_schema, init_store, PoolSettings, StoreError};
pub use repos::*;

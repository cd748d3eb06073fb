//! gsping-server: HTTP service backed by a single PostgreSQL table
//!
//! Accepts values via `POST /send`, upserts them into the `message` table and
//! reports how many are stored via `GET /`. A minimal variant answers health
//! checks without touching a database.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod retry;

pub use config::{ConfigError, StoreConfig};
pub use retry::ExponentialBackoff;

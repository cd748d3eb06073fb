//! HTTP server layer
//!
//! Axum server with:
//! - JSON responses and JSON error envelopes
//! - Per-route method enforcement (405 with a JSON body)
//! - Request tracing
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{
    build_minimal_router, build_router, run_minimal_server, run_server, AppState, ServerConfig,
    ServerError,
};

//! Liveness endpoint

use axum::{Json, Router};
use serde::Serialize;

use super::get_only;

/// Ping response
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
}

/// GET /ping
async fn ping() -> Json<PingResponse> {
    Json(PingResponse { status: "OK" })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/ping", get_only(ping))
}

//! Minimal variant - static greeting and health check, no persistence

use axum::{Json, Router};
use serde::Serialize;

use super::{get_only, not_found};

/// Plain text greeting served at `/`.
pub const GREETING: &str = "Hello, Docker! <3";

/// Health response, capitalised field name
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    #[serde(rename = "Status")]
    pub status: &'static str,
}

/// GET /
async fn greet() -> &'static str {
    GREETING
}

/// GET /health
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "OK" })
}

/// Minimal routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get_only(greet))
        .route("/health", get_only(health))
        .fallback(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_field_is_capitalised() {
        let body = serde_json::to_value(HealthStatus { status: "OK" }).unwrap();
        assert_eq!(body, serde_json::json!({ "Status": "OK" }));
    }
}

//! Message endpoints - greeting with record count, and value upserts

use std::sync::Arc;

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use super::{get_only, method_not_allowed};
use crate::db::repos::MessageRepo;
use crate::http::error::ApiError;
use crate::http::extractors::SendPayload;
use crate::http::server::AppState;
use crate::models::Message;

/// Greeting response
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

/// Greeting text embedding the number of stored values.
pub fn greeting(count: i64) -> String {
    format!("Hello, Docker! ({})\n", count)
}

/// GET / - greeting with the current record count
async fn root(State(state): State<Arc<AppState>>) -> Result<Json<GreetingResponse>, ApiError> {
    let count = MessageRepo::new(&state.pool).count().await?;

    Ok(Json(GreetingResponse {
        message: greeting(count),
    }))
}

/// POST /send - upsert a value and echo it back
async fn send(
    State(state): State<Arc<AppState>>,
    SendPayload(message): SendPayload,
) -> Result<Json<Message>, ApiError> {
    MessageRepo::new(&state.pool).upsert(&message.value).await?;
    tracing::debug!(value = %message.value, "message stored");

    Ok(Json(message))
}

/// Message routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get_only(root))
        .route("/send", post(send).fallback(method_not_allowed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_embeds_count() {
        assert_eq!(greeting(0), "Hello, Docker! (0)\n");
        assert_eq!(greeting(42), "Hello, Docker! (42)\n");
    }
}

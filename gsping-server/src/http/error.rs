//! API error types with IntoResponse
//!
//! Every error renders as `{"error": "<message>"}` with a matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be decoded (400)
    BadRequest { message: String },

    /// Body could not be read; keeps axum's status (e.g. 413 over the size limit)
    Rejected { status: StatusCode, message: String },

    /// Unknown path (404)
    NotFound,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Database error (500, logged, message exposed)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest { message } | Self::Rejected { message, .. } => message.clone(),
            Self::NotFound => "Not found".to_string(),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::Database(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(e) = &self {
            tracing::error!("Database error: {}", e);
        }

        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

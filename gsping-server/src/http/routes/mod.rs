//! Route handlers organized by resource

pub mod health;
pub mod messages;
pub mod minimal;

use axum::handler::Handler;
use axum::routing::{get, MethodRouter};

use super::error::ApiError;

/// Fallback for a known path hit with the wrong method.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown paths.
pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// GET route that refuses every other method, HEAD included.
///
/// Plain `get` also serves HEAD through the GET handler.
pub(crate) fn get_only<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    get(handler)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

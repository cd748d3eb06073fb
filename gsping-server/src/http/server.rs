//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Optional permissive CORS
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Allow any origin via CORS (default: false = no CORS headers)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_permissive: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

/// Build the application router with all routes
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::messages::router())
        .fallback(routes::not_found);

    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Build the stateless router for the minimal variant
pub fn build_minimal_router() -> Router {
    routes::minimal::router().layer(TraceLayer::new_for_http())
}

/// Run the HTTP server.
///
/// The pool is closed once the server has shut down.
///
/// # Example
///
/// ```ignore
/// let pool = init_store(&StoreConfig::from_env()?, &ExponentialBackoff::unbounded()).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState { pool: pool.clone() }, &config);
    let result = serve(app, config.bind_addr).await;

    pool.close().await;
    tracing::info!("Database pool closed");
    result
}

/// Run the minimal variant (no database).
pub async fn run_minimal_server(config: ServerConfig) -> Result<(), ServerError> {
    serve(build_minimal_router(), config.bind_addr).await
}

async fn serve(app: Router, bind_addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.bind_addr.ip().is_unspecified());
        assert!(!config.cors_permissive);
    }
}

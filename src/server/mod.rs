//! HTTP server for the summarizer API.
//!
//! Provides REST endpoints for:
//! - Summarization (`POST /summarize`)
//! - Liveness (`GET /`) and health (`GET /health`)

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ServerError};
pub use routes::create_router;
pub use state::AppState;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// API router wrapped with permissive CORS and request tracing.
#[must_use]
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until `shutdown_signal` completes.
///
/// In-flight requests are allowed to finish after the signal.
///
/// # Errors
/// Returns an error if the address cannot be bound or the accept loop fails.
pub async fn serve<F>(
    state: Arc<AppState>,
    addr: SocketAddr,
    shutdown_signal: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    tracing::info!("Summarizer listening on http://{addr}");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(ServerError::Serve)
}

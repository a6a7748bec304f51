//! Startup helpers for the summarizer server.

use std::error::Error;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use crate::server::{self, AppState};
use crate::summarization::SummarizerConfig;

/// Boxed error used at the process boundary.
type BoxError = Box<dyn Error + Send + Sync>;

/// Run the server until Ctrl-C.
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting summarizer v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = serve_from_env() {
        tracing::error!("{e}");
        return ExitCode::from(1);
    }

    tracing::info!("Summarizer stopped");
    ExitCode::SUCCESS
}

/// Load configuration, build state and block on the server.
fn serve_from_env() -> Result<(), BoxError> {
    let config =
        SummarizerConfig::from_env().map_err(|e| format!("Invalid configuration: {e}"))?;
    let state = initialize(&config)?;
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create runtime: {e}"))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));
    rt.block_on(server::serve(state, addr, shutdown_signal()))?;
    Ok(())
}

/// Initialize application state without starting the server.
///
/// # Errors
/// Returns an error if state creation fails.
pub fn initialize(config: &SummarizerConfig) -> Result<Arc<AppState>, BoxError> {
    AppState::new(config).map_err(|e| format!("Failed to create state: {e}").into())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

//! Listener lifecycle.

use crate::{AppState, ServerConfig, create_router};
use std::sync::Arc;
use storyteller_error::{ServerError, StorytellerResult};
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Serve until Ctrl-C, then wait for in-flight story runs.
///
/// # Errors
///
/// Returns a server error if the address cannot be bound or the listener
/// fails.
#[instrument(skip_all, fields(address = %config.address()))]
pub async fn serve(state: Arc<AppState>, config: &ServerConfig) -> StorytellerResult<()> {
    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ServerError::new(format!("Failed to bind {}: {}", address, e)))?;
    info!("Storyteller listening on {}", address);

    let dispatcher = state.dispatcher.clone();
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(format!("Server error: {}", e)))?;

    info!(in_flight = dispatcher.in_flight(), "Listener stopped");
    dispatcher.shutdown().await;
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

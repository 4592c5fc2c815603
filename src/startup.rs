//! Application startup and server initialization.
//!
//! This module wires the shared state, binds the listener, and serves the
//! router until a shutdown signal arrives, then closes the identity client.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::identity::LifecycleError;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error while serving.
pub async fn run(settings: Arc<Settings>) -> Result<(), Box<dyn std::error::Error>> {
    if !settings.has_identity_service() {
        warn!("service_url or service_secret_key is empty; protected routes will answer 503");
    }

    let state = AppState::new(settings.clone());
    let app = routes::create_router(state.clone());

    let listener = TcpListener::bind(&settings.bind_address)
        .await
        .map_err(|e| format!("Could not bind to {}: {}", settings.bind_address, e))?;
    info!(
        environment = settings.environment.as_str(),
        "Starting server on {}", settings.bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match state.clients.close_client().await {
        Ok(()) => {}
        Err(LifecycleError::Uninitialized) => debug!("No identity client was opened."),
        Err(e) => warn!("Failed to close identity client: {}", e),
    }
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

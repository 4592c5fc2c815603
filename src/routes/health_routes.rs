//! Health check endpoints.

use crate::state::AppState;
use axum::{
    body::Body,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Simple liveness check; does not touch the identity service.
async fn health_check() -> impl IntoResponse {
    Response::new(Body::from("OK"))
}

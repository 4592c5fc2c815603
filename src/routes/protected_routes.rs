//! Endpoints that require a verified bearer token.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::info;

use crate::models::AuthenticatedUser;
use crate::state::AppState;

/// Registers protected routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/protected", get(protected))
}

#[derive(Serialize)]
struct ProtectedResponse {
    message: &'static str,
    user_id: String,
}

/// Only reachable once the gate has resolved the caller.
async fn protected(user: AuthenticatedUser) -> Json<ProtectedResponse> {
    info!(user_id = user.id.as_str(), "Serving protected route");
    Json(ProtectedResponse {
        message: "You are authenticated!",
        user_id: user.id,
    })
}

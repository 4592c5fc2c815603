//! Unauthenticated endpoints.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Registers public routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Python API!",
    })
}

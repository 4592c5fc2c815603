//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! the public greeting, protected routes, user administration, and health checks.

mod admin_routes;
mod health_routes;
mod protected_routes;
mod public_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router, attaches the application
/// state, and wraps everything in request tracing and a permissive CORS policy
/// (any origin, credentials allowed).
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes::routes())
        .merge(protected_routes::routes())
        .merge(admin_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::very_permissive()),
        )
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use identity_gate::config::Settings;
use identity_gate::routes::create_router;
use identity_gate::state::AppState;
use mockito::{Mock, Server, ServerGuard};
use serde_json::Value;

pub const SERVICE_SECRET: &str = "service-secret";

pub fn settings_for(service_url: &str) -> Settings {
    Settings {
        service_url: service_url.to_string(),
        service_secret_key: SERVICE_SECRET.to_string(),
        request_timeout_ms: 2000,
        ..Settings::default()
    }
}

pub fn build_app(settings: Settings) -> (Router, AppState) {
    let state = AppState::new(Arc::new(settings));
    (create_router(state.clone()), state)
}

/// An app wired to a fake identity service whose health check always passes.
pub async fn app_with_identity_service() -> (Router, AppState, ServerGuard) {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/v1/health")
        .with_status(200)
        .create_async()
        .await;
    let (app, state) = build_app(settings_for(&server.url()));
    (app, state, server)
}

/// Makes the fake service resolve `token` to a user with `user_id`.
pub async fn accept_token(server: &mut Server, token: &str, user_id: &str) -> Mock {
    server
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", format!("Bearer {}", token).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"id": "{}", "aud": "authenticated", "email": "{}@example.com"}}"#,
            user_id, user_id
        ))
        .create_async()
        .await
}

pub fn request(path: &str, method: Method) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn request_with_bearer(path: &str, token: &str, method: Method) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

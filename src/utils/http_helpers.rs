use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
///
/// Renders as `{"detail": "<detail>"}`, with an optional `WWW-Authenticate` challenge.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    detail: String,
    challenge: Option<String>,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code, detail and optional challenge.
    pub fn new(status: StatusCode, detail: impl Into<String>, challenge: Option<String>) -> Self {
        HTTPError {
            status,
            detail: detail.into(),
            challenge,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(json!({ "detail": self.detail }))).into_response();
        if let Some(value) = self
            .challenge
            .as_deref()
            .and_then(|c| HeaderValue::from_str(c).ok())
        {
            response.headers_mut().insert(WWW_AUTHENTICATE, value);
        }
        response
    }
}

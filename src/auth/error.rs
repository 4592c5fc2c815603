use axum::http::StatusCode;
use thiserror::Error;

use crate::utils::http_helpers::HTTPError;

/// Challenge sent with every 401 so clients know which scheme to retry with.
pub const BEARER_CHALLENGE: &str = "Bearer";

/// Why a request could not be authenticated.
///
/// Only the variant crosses the HTTP boundary; the text carried by
/// `ServiceUnavailable` is for logs.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("missing or malformed bearer credentials")]
    MissingCredentials,

    #[error("invalid authentication credentials")]
    InvalidCredentials,

    #[error("identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// An administrative action failed upstream.
#[derive(Debug, Error)]
#[error("Failed to delete user: {message}")]
pub struct OperationError {
    pub message: String,
}

impl From<AuthenticationError> for HTTPError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::MissingCredentials => HTTPError::new(
                StatusCode::UNAUTHORIZED,
                "Not authenticated",
                Some(BEARER_CHALLENGE.to_string()),
            ),
            AuthenticationError::InvalidCredentials => HTTPError::new(
                StatusCode::UNAUTHORIZED,
                "Invalid authentication credentials",
                Some(BEARER_CHALLENGE.to_string()),
            ),
            AuthenticationError::ServiceUnavailable(_) => HTTPError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
                None,
            ),
        }
    }
}

impl From<OperationError> for HTTPError {
    fn from(err: OperationError) -> Self {
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
    }
}

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the client lifecycle: constructing or tearing down the shared handle.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    #[error("identity client has not been initialized")]
    Uninitialized,

    #[error("identity service is misconfigured: {0}")]
    Misconfigured(String),

    #[error("identity service handshake failed: {0}")]
    Handshake(String),
}

/// Failures of a single call against the identity service.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("identity service answered {status}: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("error parsing identity service response: {0}")]
    Decode(String),
}

impl IdentityError {
    /// The message reported by the service itself, without our own framing.
    pub fn upstream_message(&self) -> String {
        match self {
            IdentityError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the service judged the request itself bad (4xx other than 429).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            IdentityError::Rejected { status, .. }
                if status.is_client_error() && *status != StatusCode::TOO_MANY_REQUESTS
        )
    }
}

//! Authentication services built on the shared identity client.
//!
//! - [`TokenVerifier`] resolves bearer tokens to users.
//! - [`UserAdmin`] performs administrative user operations.
//! - [`gate`] turns the verifier into an axum extractor for `AuthenticatedUser`.

pub mod admin;
pub mod error;
pub mod gate;
pub mod verifier;

pub use admin::UserAdmin;
pub use error::{AuthenticationError, OperationError};
pub use gate::extract_bearer_token;
pub use verifier::TokenVerifier;

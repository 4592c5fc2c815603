use std::sync::Arc;

use tracing::{debug, error, warn};

use super::error::AuthenticationError;
use crate::identity::ClientManager;
use crate::models::AuthenticatedUser;

/// Asks the identity service which user a bearer token belongs to.
pub struct TokenVerifier {
    clients: Arc<ClientManager>,
}

impl TokenVerifier {
    pub fn new(clients: Arc<ClientManager>) -> Self {
        Self { clients }
    }

    /// Resolves `token` to its user.
    ///
    /// Rejections by the service and tokens that resolve to no user are
    /// `InvalidCredentials`; anything that prevents an answer is `ServiceUnavailable`.
    pub async fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, AuthenticationError> {
        if token.is_empty() {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let client = self.clients.get_client().await.map_err(|e| {
            error!("Identity client unavailable during token verification: {}", e);
            AuthenticationError::ServiceUnavailable(e.to_string())
        })?;

        match client.get_user(token).await {
            Ok(Some(user)) => {
                debug!(user_id = user.id.as_str(), "Bearer token verified");
                Ok(user)
            }
            Ok(None) => {
                warn!("Identity service resolved bearer token to no user");
                Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) if e.is_rejection() => {
                warn!("Identity service rejected bearer token: {}", e);
                Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) => {
                error!("Token verification failed: {}", e);
                Err(AuthenticationError::ServiceUnavailable(e.to_string()))
            }
        }
    }
}

use std::sync::Arc;

use tracing::{error, info};

use super::error::OperationError;
use crate::identity::ClientManager;
use crate::models::DeletedUser;

/// Administrative user operations, performed with the service key.
pub struct UserAdmin {
    clients: Arc<ClientManager>,
}

impl UserAdmin {
    pub fn new(clients: Arc<ClientManager>) -> Self {
        Self { clients }
    }

    /// Deletes `user_id` upstream. No "already deleted" handling: whatever the
    /// service answers for an unknown id is reported as is.
    pub async fn delete_user(&self, user_id: &str) -> Result<DeletedUser, OperationError> {
        let client = self.clients.get_client().await.map_err(|e| {
            error!("Identity client unavailable during user deletion: {}", e);
            OperationError {
                message: e.to_string(),
            }
        })?;

        client.delete_user(user_id).await.map_err(|e| {
            error!(user_id, "Failed to delete user: {}", e);
            OperationError {
                message: e.upstream_message(),
            }
        })?;

        info!(user_id, "Deleted user from identity service");
        Ok(DeletedUser {
            deleted_user_id: user_id.to_string(),
        })
    }
}

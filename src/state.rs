//! Shared application state.
//!
//! Contains the state that is shared across all request handlers: the settings
//! snapshot, the identity client manager, and the services built on top of it.

use crate::auth::{TokenVerifier, UserAdmin};
use crate::config::Settings;
use crate::identity::ClientManager;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Settings loaded at startup.
    pub settings: Arc<Settings>,
    /// Owner of the single identity-service client.
    pub clients: Arc<ClientManager>,
    /// Bearer token verification, used by the authentication gate.
    pub verifier: Arc<TokenVerifier>,
    /// Administrative user operations.
    pub admin: Arc<UserAdmin>,
}

impl AppState {
    /// Wires the services to one shared client manager. No connection is made
    /// until the first request needs one.
    pub fn new(settings: Arc<Settings>) -> Self {
        let clients = Arc::new(ClientManager::new(settings.clone()));
        AppState {
            verifier: Arc::new(TokenVerifier::new(clients.clone())),
            admin: Arc::new(UserAdmin::new(clients.clone())),
            clients,
            settings,
        }
    }
}

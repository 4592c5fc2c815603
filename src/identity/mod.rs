//! Connectivity to the external identity service.
//!
//! [`IdentityClient`] speaks the service's HTTP API; [`ClientManager`] owns the
//! single shared instance of it for the lifetime of the process.

pub mod client;
pub mod error;
pub mod manager;

pub use client::IdentityClient;
pub use error::{IdentityError, LifecycleError};
pub use manager::ClientManager;

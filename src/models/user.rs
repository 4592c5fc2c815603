use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user as resolved by the identity service for a single request.
///
/// Only `id` (and `email`, when present) is interpreted locally; every other
/// provider field is kept as opaque pass-through data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AuthenticatedUser {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Confirmation returned once the identity service has deleted a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeletedUser {
    pub deleted_user_id: String,
}

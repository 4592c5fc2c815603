//! User administration endpoints.

use axum::extract::{Path, State};
use axum::{routing::delete, Json, Router};
use tracing::info;

use crate::models::{AuthenticatedUser, DeletedUser};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers user administration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/users/{user_id}", delete(delete_user))
}

/// Deletes a user from the identity service.
///
/// Any authenticated caller may do this; upstream failures come back as 500
/// with the service's own message.
async fn delete_user(
    caller: AuthenticatedUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DeletedUser>, HTTPError> {
    info!(
        caller_id = caller.id.as_str(),
        user_id = user_id.as_str(),
        "Delete user requested"
    );
    let deleted = state.admin.delete_user(&user_id).await?;
    Ok(Json(deleted))
}

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::models::user::{User, UserUpdate};
use crate::state::AppState;
use crate::validation::validate_user_update;

/// GET /api/users/me
pub async fn handle_get_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// PUT /api/users/me
pub async fn handle_update_me(
    State(state): State<AppState>,
    CurrentUser(mut user): CurrentUser,
    JsonBody(req): JsonBody<UserUpdate>,
) -> Result<Json<User>, AppError> {
    validate_user_update(&req)?;
    req.apply_to(&mut user);
    Ok(Json(state.store.update_user(&user).await?))
}

/// DELETE /api/users/me
///
/// Removes the account and everything it owns. Global skills are kept.
pub async fn handle_delete_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_user(user.id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    info!("Deleted user {} and owned records", user.id);
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::user::UserProfile;
use shared::services::profile_service::ProfileUpdate;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(update_profile))
}

/// Profiles are created on first read, so a fresh user gets defaults back
/// instead of a 404.
async fn get_profile(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .profile_service
        .get_or_create_profile(&authenticated_user.identity())
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to load profile for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn update_profile(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .profile_service
        .update_profile(&authenticated_user.user_id, payload)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to update profile for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::user::UserProfile;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games/{game_id}/join", post(request_to_join))
        .route("/games/{game_id}/leave", post(leave_game))
        .route("/games/{game_id}/requests", get(pending_requests))
        .route(
            "/games/{game_id}/requests/{user_id}/approve",
            post(approve_request),
        )
        .route(
            "/games/{game_id}/requests/{user_id}/reject",
            post(reject_request),
        )
        .route(
            "/games/{game_id}/participants/{user_id}",
            delete(remove_participant),
        )
}

async fn request_to_join(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .membership_service
        .request_to_join(&game_id, &authenticated_user.identity())
        .await
        .map_err(|e| {
            error!(
                "Join request by {} for game {} failed: {}",
                authenticated_user.user_id, game_id, e
            );
            ApiError::from(e)
        })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn leave_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .membership_service
        .leave_game(&game_id, &authenticated_user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Profiles of the game's pending requesters, for the organizer's management
/// view.
async fn pending_requests(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let profiles = state
        .membership_service
        .pending_profiles(&game_id, &authenticated_user.user_id)
        .await?;
    Ok(Json(profiles))
}

async fn approve_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((game_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .membership_service
        .approve_request(&game_id, &authenticated_user.user_id, &user_id)
        .await
        .map_err(|e| {
            error!(
                "Approval of {} for game {} failed: {}",
                user_id, game_id, e
            );
            ApiError::from(e)
        })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reject_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((game_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .membership_service
        .reject_request(&game_id, &authenticated_user.user_id, &user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_participant(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((game_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .membership_service
        .remove_participant(&game_id, &authenticated_user.user_id, &user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

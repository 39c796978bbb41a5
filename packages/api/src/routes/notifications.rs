use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::notification::Notification;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/{notification_id}/read", post(mark_read))
        .route("/notifications/read-all", post(mark_all_read))
}

#[derive(Debug, Serialize)]
struct UnreadCountResponse {
    count: usize,
}

/// Newest first.
async fn list_notifications(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = state
        .notification_service
        .list_for_user(&authenticated_user.user_id)
        .await?;
    Ok(Json(notifications))
}

async fn unread_count(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let count = state
        .notification_service
        .unread_count(&authenticated_user.user_id)
        .await?;
    Ok(Json(UnreadCountResponse { count }))
}

async fn mark_read(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(notification_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .notification_service
        .mark_read(&authenticated_user.user_id, &notification_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_all_read(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<StatusCode, ApiError> {
    state
        .notification_service
        .mark_all_read(&authenticated_user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

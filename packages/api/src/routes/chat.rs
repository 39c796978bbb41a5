use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::message::Message;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/games/{game_id}/messages",
        get(list_messages).post(send_message),
    )
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Oldest first.
async fn list_messages(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.chat_service.list_messages(&game_id).await?;
    Ok(Json(messages))
}

async fn send_message(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = state
        .chat_service
        .send_message(&game_id, &authenticated_user.identity(), &payload.text)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

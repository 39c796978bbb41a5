use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::coordinate::Coordinate;
use shared::models::game::{Game, GameStatus, SkillLevel};
use shared::services::game_service::{GameFilter, GameInput, GameSort, StatusFilter};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(list_games).post(create_game))
        .route("/games/mine", get(my_games))
        .route(
            "/games/{game_id}",
            get(get_game).put(update_game).delete(delete_game),
        )
}

/// A game as clients see it, with the derived status alongside the stored
/// fields.
#[derive(Debug, Serialize)]
pub struct GameResponse {
    #[serde(flatten)]
    pub game: Game,
    pub status: GameStatus,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        let status = game.status();
        GameResponse { game, status }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListGamesQuery {
    pub skill_level: Option<SkillLevel>,
    pub status: Option<StatusFilter>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub sort: Option<GameSort>,
}

impl From<ListGamesQuery> for GameFilter {
    fn from(query: ListGamesQuery) -> Self {
        let origin = match (query.lat, query.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        };
        GameFilter {
            skill_level: query.skill_level,
            status: query.status,
            origin,
            radius_miles: query.radius,
            sort: query.sort,
        }
    }
}

async fn create_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<GameInput>,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    let game = state
        .game_service
        .create_game(&authenticated_user.identity(), payload)
        .await
        .map_err(|e| {
            error!(
                "Failed to create game for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;
    Ok((StatusCode::CREATED, Json(game.into())))
}

async fn list_games(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Query(query): Query<ListGamesQuery>,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = state.game_service.list_games(query.into()).await?;
    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

async fn my_games(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = state
        .game_service
        .list_games_by_organizer(&authenticated_user.user_id)
        .await?;
    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

async fn get_game(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = state.game_service.get_game(&game_id).await?;
    Ok(Json(game.into()))
}

async fn update_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
    Json(payload): Json<GameInput>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = state
        .game_service
        .update_game(&authenticated_user.user_id, &game_id, payload)
        .await
        .map_err(|e| {
            error!("Failed to update game {}: {}", game_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(game.into()))
}

async fn delete_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .game_service
        .delete_game(&authenticated_user.user_id, &game_id)
        .await
        .map_err(|e| {
            error!("Failed to delete game {}: {}", game_id, e);
            ApiError::from(e)
        })?;
    Ok(StatusCode::NO_CONTENT)
}

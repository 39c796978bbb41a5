use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::geocoding::Geocoder;
use crate::models::auth::Identity;
use crate::models::coordinate::{within_radius, Coordinate};
use crate::models::game::{Game, SkillLevel, MAX_PLAYERS, MIN_PLAYERS};
use crate::models::notification::NotificationKind;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::notification_service::NotificationService;

/// Organizer-editable game fields, shared by create and edit. Organizer
/// identity, membership sets and ids never pass through here.
#[derive(Debug, Clone, Deserialize)]
pub struct GameInput {
    pub title: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub max_players: u32,
    pub skill_level: SkillLevel,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSort {
    Date,
    Players,
}

#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub skill_level: Option<SkillLevel>,
    pub status: Option<StatusFilter>,
    pub origin: Option<Coordinate>,
    pub radius_miles: Option<f64>,
    pub sort: Option<GameSort>,
}

pub struct GameService {
    games: Arc<dyn GameRepository + Send + Sync>,
    notifications: Arc<NotificationService>,
    geocoder: Arc<dyn Geocoder + Send + Sync>,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        notifications: Arc<NotificationService>,
        geocoder: Arc<dyn Geocoder + Send + Sync>,
    ) -> Self {
        GameService {
            games,
            notifications,
            geocoder,
        }
    }

    pub async fn create_game(
        &self,
        organizer: &Identity,
        input: GameInput,
    ) -> Result<Game, GameServiceError> {
        validate_input(&input)?;
        validate_date(input.date, Utc::now())?;
        let coordinate = self.geocoder.geocode(&input.location).await;
        let game = Game::new(
            &organizer.user_id,
            &organizer.email,
            &input.title,
            input.date,
            &input.location,
            coordinate,
            input.max_players,
            input.skill_level,
            input.description,
        );
        self.games
            .create_game(&game)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;
        info!("Game {} created by {}", game.id, organizer.user_id);
        Ok(game)
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game, GameServiceError> {
        self.games
            .get_game(game_id)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?
            .ok_or(GameServiceError::GameNotFound)
    }

    pub async fn list_games(&self, filter: GameFilter) -> Result<Vec<Game>, GameServiceError> {
        let now = Utc::now();
        let mut games = self
            .games
            .list_games()
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;

        if let Some(wanted) = filter.skill_level {
            games.retain(|game| game.skill_level.matches(wanted));
        }
        match filter.status {
            Some(StatusFilter::Upcoming) => games.retain(|game| game.date > now),
            Some(StatusFilter::Past) => games.retain(|game| game.date < now),
            None => {}
        }
        if let Some(origin) = filter.origin {
            let radius = filter.radius_miles.unwrap_or(0.0);
            games.retain(|game| within_radius(game.coordinate.as_ref(), &origin, radius));
        }
        match filter.sort.unwrap_or(GameSort::Date) {
            GameSort::Date => games.sort_by_key(|game| game.date),
            GameSort::Players => {
                games.sort_by_key(|game| std::cmp::Reverse(game.participants.len()))
            }
        }
        Ok(games)
    }

    pub async fn list_games_by_organizer(
        &self,
        organizer_id: &str,
    ) -> Result<Vec<Game>, GameServiceError> {
        let mut games = self
            .games
            .list_games_by_organizer(organizer_id)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;
        games.sort_by_key(|game| game.date);
        Ok(games)
    }

    pub async fn update_game(
        &self,
        acting_user: &str,
        game_id: &str,
        input: GameInput,
    ) -> Result<Game, GameServiceError> {
        validate_input(&input)?;
        let mut game = self.get_game(game_id).await?;
        if !game.is_organizer(acting_user) {
            return Err(GameServiceError::Unauthorized);
        }
        // Keeping the stored date is always allowed, so a game already past
        // kickoff can still have its other fields edited.
        if input.date != game.date {
            validate_date(input.date, Utc::now())?;
        }
        if (input.max_players as usize) < game.participants.len() {
            return Err(GameServiceError::ValidationError(
                "Maximum players cannot drop below the current participant count".to_string(),
            ));
        }
        if input.location != game.location {
            game.coordinate = self.geocoder.geocode(&input.location).await;
        }
        game.title = input.title;
        game.date = input.date;
        game.location = input.location;
        game.max_players = input.max_players;
        game.skill_level = input.skill_level;
        game.description = input.description;

        self.games.update_game(&game).await.map_err(|e| match e {
            GameRepositoryError::VersionConflict => GameServiceError::Conflict,
            _ => GameServiceError::RepositoryError(e.to_string()),
        })?;
        game.version += 1;
        Ok(game)
    }

    /// Organizer-only and irreversible. Outstanding pending requesters are
    /// told the game is gone; those notifications are best-effort.
    pub async fn delete_game(
        &self,
        acting_user: &str,
        game_id: &str,
    ) -> Result<(), GameServiceError> {
        let game = self.get_game(game_id).await?;
        if !game.is_organizer(acting_user) {
            return Err(GameServiceError::Unauthorized);
        }
        self.games.delete_game(game_id).await.map_err(|e| match e {
            GameRepositoryError::NotFound => GameServiceError::GameNotFound,
            _ => GameServiceError::RepositoryError(e.to_string()),
        })?;
        info!("Game {} deleted by {}", game_id, acting_user);

        for requester in &game.pending_requests {
            if let Err(e) = self
                .notifications
                .notify(
                    requester,
                    NotificationKind::GameCancelled,
                    "Game Cancelled",
                    &format!("\"{}\" has been cancelled by the organizer", game.title),
                    Some(game_id),
                )
                .await
            {
                warn!(
                    "Failed to notify pending requester {} about deletion of game {}: {}",
                    requester, game_id, e
                );
            }
        }
        Ok(())
    }
}

fn validate_input(input: &GameInput) -> Result<(), GameServiceError> {
    if input.title.trim().is_empty() {
        return Err(GameServiceError::ValidationError(
            "Title cannot be empty".to_string(),
        ));
    }
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&input.max_players) {
        return Err(GameServiceError::ValidationError(format!(
            "Maximum players must be between {} and {}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    Ok(())
}

fn validate_date(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), GameServiceError> {
    if date < now {
        return Err(GameServiceError::InvalidSchedule(
            "Game date and time cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::MockGeocoder;
    use crate::repositories::game_repository::MockGameRepository;
    use crate::repositories::notification_repository::MockNotificationRepository;
    use chrono::Duration;

    fn organizer() -> Identity {
        Identity::new("organizer-1", "organizer@example.com")
    }

    fn input() -> GameInput {
        GameInput {
            title: "Sunday Kickabout".to_string(),
            date: Utc::now() + Duration::days(1),
            location: "Griffith Park".to_string(),
            max_players: 10,
            skill_level: SkillLevel::All,
            description: None,
        }
    }

    fn service(
        games: MockGameRepository,
        notifications: MockNotificationRepository,
        geocoder: MockGeocoder,
    ) -> GameService {
        GameService::new(
            Arc::new(games),
            Arc::new(NotificationService::new(Arc::new(notifications))),
            Arc::new(geocoder),
        )
    }

    fn stored_game() -> Game {
        Game::new(
            "organizer-1",
            "organizer@example.com",
            "Sunday Kickabout",
            Utc::now() + Duration::days(1),
            "Griffith Park",
            None,
            10,
            SkillLevel::All,
            None,
        )
    }

    #[tokio::test]
    async fn create_seats_the_organizer_and_geocodes() {
        let mut games = MockGameRepository::new();
        games
            .expect_create_game()
            .withf(|g: &Game| {
                g.participants == vec!["organizer-1".to_string()]
                    && g.pending_requests.is_empty()
                    && g.coordinate == Some(Coordinate::new(34.05, -118.24))
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .returning(|_| Some(Coordinate::new(34.05, -118.24)));
        let service = service(games, MockNotificationRepository::new(), geocoder);

        let game = service.create_game(&organizer(), input()).await.unwrap();
        assert!(game.is_participant("organizer-1"));
    }

    #[tokio::test]
    async fn geocoding_failure_degrades_to_no_coordinate() {
        let mut games = MockGameRepository::new();
        games
            .expect_create_game()
            .withf(|g: &Game| g.coordinate.is_none())
            .times(1)
            .returning(|_| Ok(()));
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().returning(|_| None);
        let service = service(games, MockNotificationRepository::new(), geocoder);

        service.create_game(&organizer(), input()).await.unwrap();
    }

    #[tokio::test]
    async fn create_rejects_a_past_game_time() {
        let service = service(
            MockGameRepository::new(),
            MockNotificationRepository::new(),
            MockGeocoder::new(),
        );
        let mut past = input();
        past.date = Utc::now() - Duration::hours(1);

        assert!(matches!(
            service.create_game(&organizer(), past).await,
            Err(GameServiceError::InvalidSchedule(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_capacity() {
        let service = service(
            MockGameRepository::new(),
            MockNotificationRepository::new(),
            MockGeocoder::new(),
        );
        for max_players in [1, 31] {
            let mut bad = input();
            bad.max_players = max_players;
            assert!(matches!(
                service.create_game(&organizer(), bad).await,
                Err(GameServiceError::ValidationError(_))
            ));
        }
    }

    #[tokio::test]
    async fn update_is_organizer_only() {
        let stored = stored_game();
        let mut games = MockGameRepository::new();
        games
            .expect_get_game()
            .returning(move |_| Ok(Some(stored.clone())));
        games.expect_update_game().never();
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        assert!(matches!(
            service.update_game("intruder", "game-1", input()).await,
            Err(GameServiceError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn update_cannot_shrink_capacity_below_roster() {
        let mut stored = stored_game();
        stored.participants.push("user-2".to_string());
        stored.participants.push("user-3".to_string());
        let mut games = MockGameRepository::new();
        games
            .expect_get_game()
            .returning(move |_| Ok(Some(stored.clone())));
        games.expect_update_game().never();
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        let mut shrink = input();
        shrink.max_players = 2;
        assert!(matches!(
            service.update_game("organizer-1", "game-1", shrink).await,
            Err(GameServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn update_with_the_stored_past_date_edits_other_fields() {
        let mut stored = stored_game();
        stored.date = Utc::now() - Duration::hours(4);
        let stored_date = stored.date;
        let mut games = MockGameRepository::new();
        games
            .expect_get_game()
            .returning(move |_| Ok(Some(stored.clone())));
        games
            .expect_update_game()
            .withf(|g: &Game| g.description.as_deref() == Some("bring cones"))
            .times(1)
            .returning(|_| Ok(()));
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        let mut edit = input();
        edit.date = stored_date;
        edit.description = Some("bring cones".to_string());
        let updated = service
            .update_game("organizer-1", "game-1", edit)
            .await
            .unwrap();
        assert_eq!(updated.date, stored_date);
    }

    #[tokio::test]
    async fn update_rejects_moving_the_date_into_the_past() {
        let stored = stored_game();
        let mut games = MockGameRepository::new();
        games
            .expect_get_game()
            .returning(move |_| Ok(Some(stored.clone())));
        games.expect_update_game().never();
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        let mut rewound = input();
        rewound.date = Utc::now() - Duration::hours(1);
        assert!(matches!(
            service.update_game("organizer-1", "game-1", rewound).await,
            Err(GameServiceError::InvalidSchedule(_))
        ));
    }

    #[tokio::test]
    async fn update_version_conflict_surfaces_as_conflict() {
        let stored = stored_game();
        let mut games = MockGameRepository::new();
        games
            .expect_get_game()
            .returning(move |_| Ok(Some(stored.clone())));
        games
            .expect_update_game()
            .returning(|_| Err(GameRepositoryError::VersionConflict));
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        assert!(matches!(
            service
                .update_game("organizer-1", "game-1", input())
                .await,
            Err(GameServiceError::Conflict)
        ));
    }

    #[tokio::test]
    async fn delete_is_organizer_only() {
        let stored = stored_game();
        let mut games = MockGameRepository::new();
        games
            .expect_get_game()
            .returning(move |_| Ok(Some(stored.clone())));
        games.expect_delete_game().never();
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        assert!(matches!(
            service.delete_game("intruder", "game-1").await,
            Err(GameServiceError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn delete_notifies_pending_requesters() {
        let mut stored = stored_game();
        stored.pending_requests = vec!["user-2".to_string(), "user-3".to_string()];
        let mut games = MockGameRepository::new();
        games
            .expect_get_game()
            .returning(move |_| Ok(Some(stored.clone())));
        games.expect_delete_game().times(1).returning(|_| Ok(()));
        let mut notifications = MockNotificationRepository::new();
        notifications
            .expect_create_notification()
            .withf(|n| n.kind == NotificationKind::GameCancelled)
            .times(2)
            .returning(|_| Ok(()));
        let service = service(games, notifications, MockGeocoder::new());

        service.delete_game("organizer-1", "game-1").await.unwrap();
    }

    #[tokio::test]
    async fn list_applies_skill_status_distance_and_sort() {
        let origin = Coordinate::new(34.0522, -118.2437);
        let mut near = stored_game();
        near.coordinate = Some(Coordinate::new(34.06, -118.25));
        near.skill_level = SkillLevel::Beginner;
        let mut far = stored_game();
        far.coordinate = Some(Coordinate::new(36.0, -118.25));
        far.skill_level = SkillLevel::Beginner;
        let mut open_to_all = stored_game();
        open_to_all.coordinate = None;
        open_to_all.skill_level = SkillLevel::All;
        let mut advanced = stored_game();
        advanced.skill_level = SkillLevel::Advanced;
        let mut past = stored_game();
        past.skill_level = SkillLevel::Beginner;
        past.date = Utc::now() - Duration::days(1);

        let all = vec![
            near.clone(),
            far.clone(),
            open_to_all.clone(),
            advanced.clone(),
            past.clone(),
        ];
        let mut games = MockGameRepository::new();
        games.expect_list_games().returning(move || Ok(all.clone()));
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        let filter = GameFilter {
            skill_level: Some(SkillLevel::Beginner),
            status: Some(StatusFilter::Upcoming),
            origin: Some(origin),
            radius_miles: Some(20.0),
            sort: None,
        };
        let result = service.list_games(filter).await.unwrap();
        // `far` is ~134 miles out, `advanced` fails the skill filter, `past`
        // fails the status filter; `open_to_all` has no coordinate so it is
        // never excluded by distance.
        let ids: Vec<&str> = result.iter().map(|g| g.id.as_str()).collect();
        assert!(ids.contains(&near.id.as_str()));
        assert!(ids.contains(&open_to_all.id.as_str()));
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn list_sorts_by_player_count_descending() {
        let mut busy = stored_game();
        busy.participants.push("user-2".to_string());
        busy.participants.push("user-3".to_string());
        let quiet = stored_game();

        let all = vec![quiet.clone(), busy.clone()];
        let mut games = MockGameRepository::new();
        games.expect_list_games().returning(move || Ok(all.clone()));
        let service = service(games, MockNotificationRepository::new(), MockGeocoder::new());

        let filter = GameFilter {
            sort: Some(GameSort::Players),
            ..GameFilter::default()
        };
        let result = service.list_games(filter).await.unwrap();
        assert_eq!(result[0].id, busy.id);
        assert_eq!(result[1].id, quiet.id);
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::coordinate::Coordinate;

pub const MIN_PLAYERS: u32 = 2;
pub const MAX_PLAYERS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    All,
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Whether a game tagged with `self` matches a requested level. Games open
    /// to all levels match every filter, and an `All` filter matches every
    /// game.
    pub fn matches(&self, wanted: SkillLevel) -> bool {
        *self == SkillLevel::All || wanted == SkillLevel::All || *self == wanted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Upcoming,
    Ongoing,
    Completed,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub coordinate: Option<Coordinate>,
    pub max_players: u32,
    pub skill_level: SkillLevel,
    pub organizer_id: String,
    pub organizer_email: String,
    pub participants: Vec<String>,
    pub pending_requests: Vec<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Optimistic-concurrency token; bumped by the repository on every write.
    pub version: u64,
}

impl Game {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        organizer_id: &str,
        organizer_email: &str,
        title: &str,
        date: DateTime<Utc>,
        location: &str,
        coordinate: Option<Coordinate>,
        max_players: u32,
        skill_level: SkillLevel,
        description: Option<String>,
    ) -> Self {
        Game {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            date,
            location: location.to_string(),
            coordinate,
            max_players,
            skill_level,
            organizer_id: organizer_id.to_string(),
            organizer_email: organizer_email.to_string(),
            // The organizer is always the first participant.
            participants: vec![organizer_id.to_string()],
            pending_requests: vec![],
            description,
            created_at: Utc::now(),
            version: 0,
        }
    }

    pub fn is_organizer(&self, user_id: &str) -> bool {
        self.organizer_id == user_id
    }

    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|id| id == user_id)
    }

    pub fn is_pending(&self, user_id: &str) -> bool {
        self.pending_requests.iter().any(|id| id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() as u32 >= self.max_players
    }

    pub fn status(&self) -> GameStatus {
        self.status_at(Utc::now())
    }

    /// Status is a pure function of the game time and the clock. Games between
    /// thirty minutes and three hours past kickoff report `Unknown`; tests pin
    /// this window.
    pub fn status_at(&self, now: DateTime<Utc>) -> GameStatus {
        let elapsed = now - self.date;
        if elapsed > Duration::hours(3) {
            return GameStatus::Completed;
        }
        if elapsed.abs() < Duration::minutes(30) {
            return GameStatus::Ongoing;
        }
        if self.date > now {
            return GameStatus::Upcoming;
        }
        GameStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn game_at(date: DateTime<Utc>) -> Game {
        Game::new(
            "organizer-1",
            "organizer@example.com",
            "Sunday Kickabout",
            date,
            "Griffith Park",
            None,
            10,
            SkillLevel::All,
            None,
        )
    }

    #[test]
    fn new_game_seats_the_organizer() {
        let game = game_at(Utc::now());
        assert_eq!(game.participants, vec!["organizer-1".to_string()]);
        assert!(game.pending_requests.is_empty());
        assert!(game.is_organizer("organizer-1"));
        assert!(game.is_participant("organizer-1"));
        assert_eq!(game.version, 0);
    }

    #[test]
    fn game_ids_are_unique() {
        let a = game_at(Utc::now());
        let b = game_at(Utc::now());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn full_game_detection() {
        let mut game = game_at(Utc::now());
        game.max_players = 2;
        assert!(!game.is_full());
        game.participants.push("user-2".to_string());
        assert!(game.is_full());
    }

    #[test_case(-240, GameStatus::Completed ; "four hours past is completed")]
    #[test_case(-181, GameStatus::Completed ; "just over three hours past is completed")]
    #[test_case(-60, GameStatus::Unknown ; "one hour past falls in the unknown window")]
    #[test_case(-31, GameStatus::Unknown ; "just past the ongoing window is unknown")]
    #[test_case(-29, GameStatus::Ongoing ; "shortly after kickoff is ongoing")]
    #[test_case(0, GameStatus::Ongoing ; "kickoff is ongoing")]
    #[test_case(29, GameStatus::Ongoing ; "shortly before kickoff is ongoing")]
    #[test_case(60, GameStatus::Upcoming ; "one hour ahead is upcoming")]
    fn status_derivation(offset_minutes: i64, expected: GameStatus) {
        let now = Utc::now();
        let game = game_at(now + Duration::minutes(offset_minutes));
        assert_eq!(game.status_at(now), expected);
    }

    #[test]
    fn skill_level_matching() {
        assert!(SkillLevel::All.matches(SkillLevel::Advanced));
        assert!(SkillLevel::Beginner.matches(SkillLevel::All));
        assert!(SkillLevel::Beginner.matches(SkillLevel::Beginner));
        assert!(!SkillLevel::Beginner.matches(SkillLevel::Advanced));
    }

    #[test]
    fn serialization_round_trip() {
        let game = game_at(Utc::now());
        let json = serde_json::to_string(&game).unwrap();
        assert!(json.contains("\"skill_level\":\"all\""));
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game);
    }
}

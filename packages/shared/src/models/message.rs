use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat message scoped to a single game. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub game_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(game_id: &str, sender_id: &str, sender_name: &str, text: &str) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: sender_name.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    JoinRequest,
    RequestApproved,
    RequestRejected,
    GameCancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Recipient. Only this user may flip the read flag.
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub game_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: &str,
        kind: NotificationKind,
        title: &str,
        message: &str,
        game_id: Option<&str>,
    ) -> Self {
        Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            game_id: game_id.map(|id| id.to_string()),
            read: false,
            created_at: Utc::now(),
        }
    }
}

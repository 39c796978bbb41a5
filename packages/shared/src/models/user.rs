use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::game::SkillLevel;

pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    NotSpecified,
}

/// A player profile. The id is the identity provider's stable user id, so
/// profiles are created lazily on first read rather than at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub gender: Gender,
    pub location: Option<String>,
    pub skill_level: SkillLevel,
    /// Preferred search radius in miles; zero means unlimited.
    pub preferred_radius: f64,
    /// Lifetime count of approved game participations.
    pub games_count: u32,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Default profile for a first-time visitor, named after the local part of
    /// their email address.
    pub fn default_for(user_id: &str, email: &str) -> Self {
        let username = email.split('@').next().unwrap_or(email).to_string();
        UserProfile {
            id: user_id.to_string(),
            username,
            email: email.to_string(),
            gender: Gender::NotSpecified,
            location: None,
            skill_level: SkillLevel::Beginner,
            preferred_radius: DEFAULT_RADIUS_MILES,
            games_count: 0,
            created_at: Utc::now(),
        }
    }
}

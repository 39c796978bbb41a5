use std::sync::Arc;

use serde::Deserialize;

use crate::models::auth::Identity;
use crate::models::game::SkillLevel;
use crate::models::user::{Gender, UserProfile};
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::profile_service_errors::ProfileServiceError;

/// Owner-editable profile fields. Identity, email and the participation
/// counter are immutable through this path.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub gender: Gender,
    pub location: Option<String>,
    pub skill_level: SkillLevel,
    pub preferred_radius: f64,
}

pub struct ProfileService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        ProfileService { repository }
    }

    /// Profiles are created lazily on first view, defaulting from the auth
    /// email. A lost creation race falls back to reading the winner's row.
    pub async fn get_or_create_profile(
        &self,
        identity: &Identity,
    ) -> Result<UserProfile, ProfileServiceError> {
        if let Some(profile) = self
            .repository
            .get_profile(&identity.user_id)
            .await
            .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?
        {
            return Ok(profile);
        }

        let profile = UserProfile::default_for(&identity.user_id, &identity.email);
        match self.repository.create_profile(&profile).await {
            Ok(()) => Ok(profile),
            Err(UserRepositoryError::AlreadyExists) => self
                .repository
                .get_profile(&identity.user_id)
                .await
                .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?
                .ok_or(ProfileServiceError::ProfileNotFound),
            Err(e) => Err(ProfileServiceError::RepositoryError(e.to_string())),
        }
    }

    pub async fn update_profile(
        &self,
        acting_user: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileServiceError> {
        if update.username.trim().is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        if update.preferred_radius < 0.0 {
            return Err(ProfileServiceError::ValidationError(
                "Preferred radius cannot be negative".to_string(),
            ));
        }

        let mut profile = self
            .repository
            .get_profile(acting_user)
            .await
            .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?
            .ok_or(ProfileServiceError::ProfileNotFound)?;

        profile.username = update.username;
        profile.gender = update.gender;
        profile.location = update.location;
        profile.skill_level = update.skill_level;
        profile.preferred_radius = update.preferred_radius;

        self.repository
            .update_profile(&profile)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => ProfileServiceError::ProfileNotFound,
                _ => ProfileServiceError::RepositoryError(e.to_string()),
            })?;
        Ok(profile)
    }

    /// Profiles for a set of user ids; ids without a stored profile are
    /// skipped rather than failing the whole lookup.
    pub async fn get_profiles(
        &self,
        user_ids: &[String],
    ) -> Result<Vec<UserProfile>, ProfileServiceError> {
        let mut profiles = Vec::new();
        for user_id in user_ids {
            if let Some(profile) = self
                .repository
                .get_profile(user_id)
                .await
                .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?
            {
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn sam() -> Identity {
        Identity::new("user-1", "sam@example.com")
    }

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            username: "sam_the_keeper".to_string(),
            gender: Gender::NotSpecified,
            location: Some("Los Angeles".to_string()),
            skill_level: SkillLevel::Intermediate,
            preferred_radius: 25.0,
        }
    }

    #[tokio::test]
    async fn first_view_creates_a_default_profile() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_profile().returning(|_| Ok(None));
        repo.expect_create_profile()
            .withf(|p: &UserProfile| p.id == "user-1" && p.username == "sam" && p.games_count == 0)
            .times(1)
            .returning(|_| Ok(()));
        let service = ProfileService::new(Arc::new(repo));

        let profile = service.get_or_create_profile(&sam()).await.unwrap();
        assert_eq!(profile.username, "sam");
    }

    #[tokio::test]
    async fn existing_profile_is_returned_untouched() {
        let stored = UserProfile::default_for("user-1", "sam@example.com");
        let expected = stored.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_get_profile()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_create_profile().never();
        let service = ProfileService::new(Arc::new(repo));

        let profile = service.get_or_create_profile(&sam()).await.unwrap();
        assert_eq!(profile, expected);
    }

    #[tokio::test]
    async fn lost_creation_race_reads_the_winner() {
        let winner = UserProfile::default_for("user-1", "sam@example.com");
        let winner_clone = winner.clone();
        let mut repo = MockUserRepository::new();
        let mut first = true;
        repo.expect_get_profile().returning(move |_| {
            if first {
                first = false;
                Ok(None)
            } else {
                Ok(Some(winner_clone.clone()))
            }
        });
        repo.expect_create_profile()
            .returning(|_| Err(UserRepositoryError::AlreadyExists));
        let service = ProfileService::new(Arc::new(repo));

        let profile = service.get_or_create_profile(&sam()).await.unwrap();
        assert_eq!(profile, winner);
    }

    #[tokio::test]
    async fn update_replaces_editable_fields_only() {
        let stored = UserProfile::default_for("user-1", "sam@example.com");
        let mut repo = MockUserRepository::new();
        repo.expect_get_profile()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update_profile()
            .withf(|p: &UserProfile| {
                p.id == "user-1"
                    && p.email == "sam@example.com"
                    && p.username == "sam_the_keeper"
                    && p.skill_level == SkillLevel::Intermediate
                    && p.preferred_radius == 25.0
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = ProfileService::new(Arc::new(repo));

        service.update_profile("user-1", update()).await.unwrap();
    }

    #[tokio::test]
    async fn update_rejects_blank_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile().never();
        let service = ProfileService::new(Arc::new(repo));

        let mut bad = update();
        bad.username = "  ".to_string();
        assert!(matches!(
            service.update_profile("user-1", bad).await,
            Err(ProfileServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn get_profiles_skips_missing_users() {
        let stored = UserProfile::default_for("user-1", "sam@example.com");
        let mut repo = MockUserRepository::new();
        repo.expect_get_profile().returning(move |id: &str| {
            if id == "user-1" {
                Ok(Some(stored.clone()))
            } else {
                Ok(None)
            }
        });
        let service = ProfileService::new(Arc::new(repo));

        let profiles = service
            .get_profiles(&["user-1".to_string(), "ghost".to_string()])
            .await
            .unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "user-1");
    }
}

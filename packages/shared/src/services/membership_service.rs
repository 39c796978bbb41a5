use std::sync::Arc;

use tracing::{info, warn};

use crate::models::auth::Identity;
use crate::models::game::{Game, GameStatus};
use crate::models::notification::NotificationKind;
use crate::models::user::UserProfile;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::membership_service_errors::MembershipServiceError;
use crate::services::notification_service::NotificationService;

/// The join/approve/reject workflow. Every mutation of the participant and
/// pending sets goes through the game repository's versioned write, so a race
/// between two organizers (or organizer and leaver) surfaces as `Conflict`
/// instead of a lost update. Notifications are emitted after the membership
/// write lands; a failed notification is logged and dropped rather than
/// rolling the membership change back.
pub struct MembershipService {
    games: Arc<dyn GameRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
    notifications: Arc<NotificationService>,
}

impl MembershipService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        MembershipService {
            games,
            users,
            notifications,
        }
    }

    pub async fn request_to_join(
        &self,
        game_id: &str,
        user: &Identity,
    ) -> Result<(), MembershipServiceError> {
        let mut game = self.load(game_id).await?;
        if game.is_organizer(&user.user_id) || game.is_participant(&user.user_id) {
            return Err(MembershipServiceError::AlreadyMember);
        }
        // Re-requesting is a no-op, never a duplicate entry.
        if game.is_pending(&user.user_id) {
            return Ok(());
        }
        if game.status() == GameStatus::Completed {
            return Err(MembershipServiceError::GameCompleted);
        }
        if game.is_full() {
            return Err(MembershipServiceError::CapacityExceeded);
        }

        game.pending_requests.push(user.user_id.clone());
        self.store(&game).await?;
        info!("User {} requested to join game {}", user.user_id, game_id);

        self.notify_quietly(
            &game.organizer_id,
            NotificationKind::JoinRequest,
            "New Join Request",
            &format!(
                "{} has requested to join your game \"{}\"",
                user.email, game.title
            ),
            game_id,
        )
        .await;
        Ok(())
    }

    /// Capacity is re-checked here, not just at request time: concurrent
    /// approvals can consume the remaining seats. On `CapacityExceeded` the
    /// target stays in the pending set and nothing is written.
    pub async fn approve_request(
        &self,
        game_id: &str,
        acting_user: &str,
        target_user: &str,
    ) -> Result<(), MembershipServiceError> {
        let mut game = self.load(game_id).await?;
        if !game.is_organizer(acting_user) {
            return Err(MembershipServiceError::Unauthorized);
        }
        if !game.is_pending(target_user) {
            return Err(MembershipServiceError::RequestNotFound);
        }
        if game.is_full() {
            return Err(MembershipServiceError::CapacityExceeded);
        }

        game.pending_requests.retain(|id| id != target_user);
        game.participants.push(target_user.to_string());
        self.store(&game).await?;
        info!("User {} approved for game {}", target_user, game_id);

        if let Err(e) = self.users.increment_games_count(target_user).await {
            warn!(
                "Failed to bump games count for {} after approval: {}",
                target_user, e
            );
        }
        self.notify_quietly(
            target_user,
            NotificationKind::RequestApproved,
            "Request Approved",
            &format!(
                "Your request to join \"{}\" has been approved!",
                game.title
            ),
            game_id,
        )
        .await;
        Ok(())
    }

    pub async fn reject_request(
        &self,
        game_id: &str,
        acting_user: &str,
        target_user: &str,
    ) -> Result<(), MembershipServiceError> {
        let mut game = self.load(game_id).await?;
        if !game.is_organizer(acting_user) {
            return Err(MembershipServiceError::Unauthorized);
        }
        if !game.is_pending(target_user) {
            return Err(MembershipServiceError::RequestNotFound);
        }

        game.pending_requests.retain(|id| id != target_user);
        self.store(&game).await?;

        self.notify_quietly(
            target_user,
            NotificationKind::RequestRejected,
            "Request Not Approved",
            &format!("Your request to join \"{}\" was not approved", game.title),
            game_id,
        )
        .await;
        Ok(())
    }

    pub async fn remove_participant(
        &self,
        game_id: &str,
        acting_user: &str,
        target_user: &str,
    ) -> Result<(), MembershipServiceError> {
        let mut game = self.load(game_id).await?;
        if !game.is_organizer(acting_user) {
            return Err(MembershipServiceError::Unauthorized);
        }
        if game.is_organizer(target_user) {
            return Err(MembershipServiceError::OrganizerImmovable);
        }
        if !game.is_participant(target_user) {
            return Err(MembershipServiceError::ParticipantNotFound);
        }

        game.participants.retain(|id| id != target_user);
        self.store(&game).await?;
        info!("User {} removed from game {}", target_user, game_id);
        Ok(())
    }

    pub async fn leave_game(
        &self,
        game_id: &str,
        acting_user: &str,
    ) -> Result<(), MembershipServiceError> {
        let mut game = self.load(game_id).await?;
        // Organizers delete or manage their game instead of leaving it.
        if game.is_organizer(acting_user) {
            return Err(MembershipServiceError::OrganizerImmovable);
        }
        if !game.is_participant(acting_user) {
            return Err(MembershipServiceError::ParticipantNotFound);
        }

        game.participants.retain(|id| id != acting_user);
        self.store(&game).await?;
        info!("User {} left game {}", acting_user, game_id);
        Ok(())
    }

    /// Profiles behind a game's pending requests, for the organizer's
    /// management view. Requesters without a stored profile are skipped.
    pub async fn pending_profiles(
        &self,
        game_id: &str,
        acting_user: &str,
    ) -> Result<Vec<UserProfile>, MembershipServiceError> {
        let game = self.load(game_id).await?;
        if !game.is_organizer(acting_user) {
            return Err(MembershipServiceError::Unauthorized);
        }
        let mut profiles = Vec::new();
        for user_id in &game.pending_requests {
            if let Some(profile) = self
                .users
                .get_profile(user_id)
                .await
                .map_err(|e| MembershipServiceError::RepositoryError(e.to_string()))?
            {
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }

    async fn load(&self, game_id: &str) -> Result<Game, MembershipServiceError> {
        self.games
            .get_game(game_id)
            .await
            .map_err(|e| MembershipServiceError::RepositoryError(e.to_string()))?
            .ok_or(MembershipServiceError::GameNotFound)
    }

    async fn store(&self, game: &Game) -> Result<(), MembershipServiceError> {
        self.games.update_game(game).await.map_err(|e| match e {
            GameRepositoryError::VersionConflict => MembershipServiceError::Conflict,
            _ => MembershipServiceError::RepositoryError(e.to_string()),
        })
    }

    async fn notify_quietly(
        &self,
        user_id: &str,
        kind: NotificationKind,
        title: &str,
        message: &str,
        game_id: &str,
    ) {
        if let Err(e) = self
            .notifications
            .notify(user_id, kind, title, message, Some(game_id))
            .await
        {
            warn!(
                "Failed to notify {} about game {}: {}",
                user_id, game_id, e
            );
        }
    }
}

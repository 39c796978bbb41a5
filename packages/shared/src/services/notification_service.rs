use std::sync::Arc;
use std::time::Duration;

use crate::models::notification::{Notification, NotificationKind};
use crate::repositories::notification_repository::NotificationRepository;
use crate::services::errors::notification_service_errors::NotificationServiceError;
use crate::services::subscription::{watch, SubscriptionHandle};

pub struct NotificationService {
    repository: Arc<dyn NotificationRepository + Send + Sync>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepository + Send + Sync>) -> Self {
        NotificationService { repository }
    }

    pub async fn notify(
        &self,
        user_id: &str,
        kind: NotificationKind,
        title: &str,
        message: &str,
        game_id: Option<&str>,
    ) -> Result<Notification, NotificationServiceError> {
        let notification = Notification::new(user_id, kind, title, message, game_id);
        self.repository
            .create_notification(&notification)
            .await
            .map_err(|e| NotificationServiceError::RepositoryError(e.to_string()))?;
        Ok(notification)
    }

    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, NotificationServiceError> {
        self.repository
            .list_for_user(user_id)
            .await
            .map_err(|e| NotificationServiceError::RepositoryError(e.to_string()))
    }

    pub async fn unread_count(&self, user_id: &str) -> Result<usize, NotificationServiceError> {
        let notifications = self.list_for_user(user_id).await?;
        Ok(notifications.iter().filter(|n| !n.read).count())
    }

    pub async fn mark_read(
        &self,
        acting_user: &str,
        notification_id: &str,
    ) -> Result<(), NotificationServiceError> {
        let notification = self
            .repository
            .get_notification(notification_id)
            .await
            .map_err(|e| NotificationServiceError::RepositoryError(e.to_string()))?
            .ok_or(NotificationServiceError::NotificationNotFound)?;
        if notification.user_id != acting_user {
            return Err(NotificationServiceError::Unauthorized);
        }
        self.repository
            .mark_read(notification_id)
            .await
            .map_err(|e| NotificationServiceError::RepositoryError(e.to_string()))
    }

    pub async fn mark_all_read(&self, user_id: &str) -> Result<(), NotificationServiceError> {
        let notifications = self.list_for_user(user_id).await?;
        for notification in notifications.iter().filter(|n| !n.read) {
            self.repository
                .mark_read(&notification.id)
                .await
                .map_err(|e| NotificationServiceError::RepositoryError(e.to_string()))?;
        }
        Ok(())
    }

    /// Push-style feed: the callback fires with the user's full notification
    /// list immediately and on every observed change, until the handle is
    /// cancelled or dropped.
    pub fn subscribe<F>(
        &self,
        user_id: &str,
        poll_interval: Duration,
        callback: F,
    ) -> SubscriptionHandle
    where
        F: Fn(Vec<Notification>) + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        let user_id = user_id.to_string();
        watch(
            poll_interval,
            move || {
                let repository = Arc::clone(&repository);
                let user_id = user_id.clone();
                async move {
                    repository
                        .list_for_user(&user_id)
                        .await
                        .map_err(|e| e.to_string())
                }
            },
            callback,
        )
    }
}

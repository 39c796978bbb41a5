use std::sync::Arc;
use std::time::Duration;

use crate::models::auth::Identity;
use crate::models::message::Message;
use crate::repositories::message_repository::MessageRepository;
use crate::services::errors::chat_service_errors::ChatServiceError;
use crate::services::subscription::{watch, SubscriptionHandle};

pub struct ChatService {
    repository: Arc<dyn MessageRepository + Send + Sync>,
}

impl ChatService {
    pub fn new(repository: Arc<dyn MessageRepository + Send + Sync>) -> Self {
        ChatService { repository }
    }

    pub async fn send_message(
        &self,
        game_id: &str,
        sender: &Identity,
        text: &str,
    ) -> Result<Message, ChatServiceError> {
        if text.trim().is_empty() {
            return Err(ChatServiceError::ValidationError(
                "Message text cannot be empty".to_string(),
            ));
        }
        let message = Message::new(game_id, &sender.user_id, &sender.email, text);
        self.repository
            .append_message(&message)
            .await
            .map_err(|e| ChatServiceError::RepositoryError(e.to_string()))?;
        Ok(message)
    }

    /// Oldest first.
    pub async fn list_messages(&self, game_id: &str) -> Result<Vec<Message>, ChatServiceError> {
        self.repository
            .list_for_game(game_id)
            .await
            .map_err(|e| ChatServiceError::RepositoryError(e.to_string()))
    }

    /// Live chat feed for a game; fires with the full message list on start
    /// and after every append, until cancelled.
    pub fn subscribe<F>(
        &self,
        game_id: &str,
        poll_interval: Duration,
        callback: F,
    ) -> SubscriptionHandle
    where
        F: Fn(Vec<Message>) + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        let game_id = game_id.to_string();
        watch(
            poll_interval,
            move || {
                let repository = Arc::clone(&repository);
                let game_id = game_id.clone();
                async move {
                    repository
                        .list_for_game(&game_id)
                        .await
                        .map_err(|e| e.to_string())
                }
            },
            callback,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::message_repository::MockMessageRepository;
    use std::sync::Mutex;

    fn sam() -> Identity {
        Identity::new("user-1", "sam@example.com")
    }

    #[tokio::test]
    async fn send_message_records_sender_identity() {
        let mut repo = MockMessageRepository::new();
        repo.expect_append_message()
            .withf(|m: &Message| {
                m.game_id == "game-1"
                    && m.sender_id == "user-1"
                    && m.sender_name == "sam@example.com"
                    && m.text == "anyone up for a warmup?"
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = ChatService::new(Arc::new(repo));

        service
            .send_message("game-1", &sam(), "anyone up for a warmup?")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_messages_are_rejected() {
        let mut repo = MockMessageRepository::new();
        repo.expect_append_message().never();
        let service = ChatService::new(Arc::new(repo));

        assert!(matches!(
            service.send_message("game-1", &sam(), "   ").await,
            Err(ChatServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn subscription_observes_appended_messages() {
        let backing: Arc<Mutex<Vec<Message>>> =
            Arc::new(Mutex::new(vec![Message::new("game-1", "user-1", "sam", "hi")]));
        let mut repo = MockMessageRepository::new();
        let store = Arc::clone(&backing);
        repo.expect_list_for_game()
            .returning(move |_| Ok(store.lock().unwrap().clone()));
        let service = ChatService::new(Arc::new(repo));

        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handle = service.subscribe("game-1", Duration::from_millis(10), move |items| {
            sink.lock().unwrap().push(items.len())
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        backing
            .lock()
            .unwrap()
            .push(Message::new("game-1", "user-2", "alex", "hey"));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();

        assert_eq!(seen.lock().unwrap().clone(), vec![1, 2]);
    }
}

use crate::models::message::Message;
use crate::repositories::errors::message_repository_errors::MessageRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbMessageRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbMessageRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("MESSAGES_TABLE")
            .expect("MESSAGES_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn append_message(&self, message: &Message) -> Result<(), MessageRepositoryError>;
    /// Oldest first.
    async fn list_for_game(&self, game_id: &str) -> Result<Vec<Message>, MessageRepositoryError>;
}

#[async_trait]
impl MessageRepository for DynamoDbMessageRepository {
    async fn append_message(&self, message: &Message) -> Result<(), MessageRepositoryError> {
        let item =
            to_item(message).map_err(|e| MessageRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| MessageRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn list_for_game(&self, game_id: &str) -> Result<Vec<Message>, MessageRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_MessagesByGame")
            .key_condition_expression("game_id = :game_id")
            .expression_attribute_values(
                ":game_id",
                to_attribute_value(game_id)
                    .map_err(|e| MessageRepositoryError::Serialization(e.to_string()))?,
            )
            .scan_index_forward(true)
            .send()
            .await
            .map_err(|e| MessageRepositoryError::DynamoDb(e.to_string()))?;
        let mut messages = Vec::new();
        if let Some(items) = output.items {
            for item in items {
                messages.push(
                    from_item(item)
                        .map_err(|e| MessageRepositoryError::Serialization(e.to_string()))?,
                );
            }
        }
        Ok(messages)
    }
}

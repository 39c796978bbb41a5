use crate::models::notification::Notification;
use crate::repositories::errors::notification_repository_errors::NotificationRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbNotificationRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbNotificationRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("NOTIFICATIONS_TABLE")
            .expect("NOTIFICATIONS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationRepositoryError>;
    async fn get_notification(
        &self,
        notification_id: &str,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;
    /// Newest first.
    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;
    async fn mark_read(&self, notification_id: &str) -> Result<(), NotificationRepositoryError>;
}

#[async_trait]
impl NotificationRepository for DynamoDbNotificationRepository {
    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationRepositoryError> {
        let item = to_item(notification)
            .map_err(|e| NotificationRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| NotificationRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn get_notification(
        &self,
        notification_id: &str,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(notification_id)
                    .map_err(|e| NotificationRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| NotificationRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let notification: Notification = from_item(item)
                .map_err(|e| NotificationRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(notification))
        } else {
            Ok(None)
        }
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_NotificationsByUser")
            .key_condition_expression("user_id = :user_id")
            .expression_attribute_values(
                ":user_id",
                to_attribute_value(user_id)
                    .map_err(|e| NotificationRepositoryError::Serialization(e.to_string()))?,
            )
            .scan_index_forward(false)
            .send()
            .await
            .map_err(|e| NotificationRepositoryError::DynamoDb(e.to_string()))?;
        let mut notifications = Vec::new();
        if let Some(items) = output.items {
            for item in items {
                notifications.push(
                    from_item(item)
                        .map_err(|e| NotificationRepositoryError::Serialization(e.to_string()))?,
                );
            }
        }
        Ok(notifications)
    }

    async fn mark_read(&self, notification_id: &str) -> Result<(), NotificationRepositoryError> {
        // "read" is a DynamoDB reserved word.
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(notification_id)
                    .map_err(|e| NotificationRepositoryError::Serialization(e.to_string()))?,
            )
            .update_expression("SET #read = :read")
            .condition_expression("attribute_exists(id)")
            .expression_attribute_names("#read", "read")
            .expression_attribute_values(":read", AttributeValue::Bool(true))
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(NotificationRepositoryError::NotFound)
                } else {
                    Err(NotificationRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }
}

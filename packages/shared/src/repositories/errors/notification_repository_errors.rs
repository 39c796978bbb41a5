#[derive(Debug)]
pub enum NotificationRepositoryError {
    NotFound,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for NotificationRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationRepositoryError::NotFound => write!(f, "Notification not found"),
            NotificationRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            NotificationRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for NotificationRepositoryError {}

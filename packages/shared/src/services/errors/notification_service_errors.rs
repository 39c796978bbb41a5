use std::fmt;

#[derive(Debug)]
pub enum NotificationServiceError {
    NotificationNotFound,
    /// Only the recipient may mark a notification read.
    Unauthorized,
    RepositoryError(String),
}

impl fmt::Display for NotificationServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotificationServiceError::NotificationNotFound => write!(f, "Notification not found"),
            NotificationServiceError::Unauthorized => {
                write!(f, "Only the recipient may update this notification")
            }
            NotificationServiceError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for NotificationServiceError {}

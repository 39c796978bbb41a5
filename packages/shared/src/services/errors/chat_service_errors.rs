use std::fmt;

#[derive(Debug)]
pub enum ChatServiceError {
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for ChatServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChatServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ChatServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ChatServiceError {}

use std::fmt;

#[derive(Debug)]
pub enum AuthServiceError {
    InvalidToken,
    ExpiredToken,
    ValidationError(String),
}

impl fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthServiceError::InvalidToken => write!(f, "Invalid bearer token"),
            AuthServiceError::ExpiredToken => write!(f, "Bearer token has expired"),
            AuthServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AuthServiceError {}

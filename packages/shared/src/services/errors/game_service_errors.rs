use std::fmt;

#[derive(Debug)]
pub enum GameServiceError {
    GameNotFound,
    /// The acting user is not the organizer of the game.
    Unauthorized,
    /// The submitted game time is in the past.
    InvalidSchedule(String),
    ValidationError(String),
    /// The game changed under the caller; re-read and retry.
    Conflict,
    RepositoryError(String),
}

impl fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::Unauthorized => {
                write!(f, "Only the organizer may perform this action")
            }
            GameServiceError::InvalidSchedule(msg) => write!(f, "Invalid schedule: {}", msg),
            GameServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GameServiceError::Conflict => write!(f, "Game was modified concurrently"),
            GameServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}

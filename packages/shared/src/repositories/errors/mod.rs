pub mod game_repository_errors;
pub mod message_repository_errors;
pub mod notification_repository_errors;
pub mod user_repository_errors;

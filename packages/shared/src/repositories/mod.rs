pub mod errors;
pub mod game_repository;
pub mod message_repository;
pub mod notification_repository;
pub mod user_repository;

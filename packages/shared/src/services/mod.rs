pub mod auth_service;
pub mod chat_service;
pub mod errors;
pub mod game_service;
pub mod membership_service;
pub mod notification_service;
pub mod profile_service;
pub mod subscription;

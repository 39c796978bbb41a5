pub mod auth_service_errors;
pub mod chat_service_errors;
pub mod game_service_errors;
pub mod membership_service_errors;
pub mod notification_service_errors;
pub mod profile_service_errors;

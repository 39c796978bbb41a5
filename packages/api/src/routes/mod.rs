pub mod chat;
pub mod games;
pub mod health;
pub mod membership;
pub mod notifications;
pub mod profile;

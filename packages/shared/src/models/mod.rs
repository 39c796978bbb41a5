pub mod auth;
pub mod coordinate;
pub mod game;
pub mod message;
pub mod notification;
pub mod user;

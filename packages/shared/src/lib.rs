pub mod geocoding;
pub mod models;
pub mod repositories;
pub mod services;

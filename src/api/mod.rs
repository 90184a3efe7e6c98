//! HTTP API handlers

pub mod auth;
pub mod chatbot;
pub mod health;
pub mod places;

pub use auth::{auth_routes, AuthUser};
pub use chatbot::chatbot_routes;
pub use health::health_routes;
pub use places::places_routes;

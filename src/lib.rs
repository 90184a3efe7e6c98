//! tn-explorer library interface
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::Config;
pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::services::chatbot::ChatbotService;
use crate::services::images::ImageResolver;
use crate::services::overpass_client::OverpassClient;

const USER_AGENT: &str = "tn-explorer/0.1.0 (tourism backend)";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (users, sessions, saved places)
    pub db: SqlitePool,
    /// Resolved configuration
    pub config: Arc<Config>,
    /// Geodata source fetcher
    pub overpass: Arc<OverpassClient>,
    /// Image fallback-chain resolver with process-wide memo cache
    pub images: Arc<ImageResolver>,
    /// Search + LLM proxy
    pub chatbot: Arc<ChatbotService>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        let overpass = Arc::new(OverpassClient::new(config.overpass_url.clone())?);
        let images = Arc::new(ImageResolver::from_config(&config, http_client.clone()));
        let chatbot = Arc::new(ChatbotService::from_config(&config, http_client));

        Ok(Self {
            db,
            config: Arc::new(config),
            overpass,
            images,
            chatbot,
            startup_time: Utc::now(),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::places_routes())
        .merge(api::auth_routes())
        .merge(api::chatbot_routes())
        .merge(api::health_routes())
        .with_state(state)
}

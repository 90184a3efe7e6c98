//! Configuration resolution
//!
//! All settings resolve from the environment with sensible defaults.
//! Provider API keys are independently optional: a missing key disables only
//! that provider, the rest of the pipeline keeps running.

use std::path::PathBuf;

use tracing::{info, warn};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`)
    pub port: u16,
    /// SQLite database path (`DATABASE_PATH`)
    pub database_path: PathBuf,
    /// Overpass interpreter endpoint (`OVERPASS_URL`)
    pub overpass_url: String,
    /// Pexels photo search endpoint (`PEXELS_URL`)
    pub pexels_url: String,
    /// Pexels API key (`PEXELS_API_KEY`, optional)
    pub pexels_api_key: Option<String>,
    /// Unsplash featured-image base URL (`UNSPLASH_URL`)
    pub unsplash_url: String,
    /// Google Custom Search endpoint (`GOOGLE_SEARCH_URL`)
    pub google_search_url: String,
    /// Google Custom Search API key (`GOOGLE_API_KEY`, optional)
    pub google_api_key: Option<String>,
    /// Google Custom Search engine id (`SEARCH_ENGINE_ID`, optional)
    pub search_engine_id: Option<String>,
    /// OpenRouter chat-completions endpoint (`OPENROUTER_URL`)
    pub openrouter_url: String,
    /// OpenRouter API key (`OPENROUTER_API_KEY`, optional)
    pub openrouter_api_key: Option<String>,
}

impl Config {
    /// Resolve configuration from the environment
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("tn-explorer.db"));

        Self {
            port,
            database_path,
            overpass_url: env_or("OVERPASS_URL", "https://overpass-api.de/api/interpreter"),
            pexels_url: env_or("PEXELS_URL", "https://api.pexels.com/v1/search"),
            pexels_api_key: optional_key("PEXELS_API_KEY", "Pexels"),
            unsplash_url: env_or("UNSPLASH_URL", "https://source.unsplash.com"),
            google_search_url: env_or(
                "GOOGLE_SEARCH_URL",
                "https://www.googleapis.com/customsearch/v1",
            ),
            google_api_key: optional_key("GOOGLE_API_KEY", "Google Custom Search"),
            search_engine_id: optional_key("SEARCH_ENGINE_ID", "Google search engine id"),
            openrouter_url: env_or(
                "OPENROUTER_URL",
                "https://openrouter.ai/api/v1/chat/completions",
            ),
            openrouter_api_key: optional_key("OPENROUTER_API_KEY", "OpenRouter"),
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).ok().filter(|v| is_valid_key(v)).unwrap_or_else(|| default.to_string())
}

/// Read an optional provider credential from the environment
///
/// Absence is not an error: the provider is disabled and logged as such.
fn optional_key(var: &str, provider: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(key) if is_valid_key(&key) => {
            info!("{} API key loaded from environment ({})", provider, var);
            Some(key)
        }
        _ => {
            warn!("{} not configured ({} unset); provider disabled", provider, var);
            None
        }
    }
}

/// Validate a credential (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

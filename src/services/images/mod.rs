//! Image resolution: priority-ordered provider chain with a memo cache
//!
//! Guarantees every place a displayable image URL. Providers sit behind one
//! trait and are tried in order; "no credential", "non-2xx" and "empty result"
//! are uniformly a miss. The terminal placeholder is deterministic and cannot
//! fail, so `resolve` never errors.

mod cache;
mod pexels;
mod unsplash;

pub use cache::{cache_key, ImageCache, DEFAULT_CAPACITY};
pub use pexels::PexelsProvider;
pub use unsplash::UnsplashProvider;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/800x400";

/// One interchangeable image lookup strategy
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Best-effort lookup: `None` is a miss, never an error
    async fn lookup(&self, query: &str) -> Option<String>;
}

/// Deterministic terminal fallback, templated with the place name
pub fn placeholder_url(name: &str) -> String {
    reqwest::Url::parse_with_params(PLACEHOLDER_BASE, &[("text", name)])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| PLACEHOLDER_BASE.to_string())
}

/// The fallback-chain resolver
///
/// Only the primary provider's results are memoized; a negative sentinel
/// stops a known-failing key from re-querying the primary within the process
/// lifetime while still letting the fallbacks run. Concurrent lookups for the
/// same key are serialized so the primary sees at most one call per key.
pub struct ImageResolver {
    primary: Box<dyn ImageProvider>,
    fallbacks: Vec<Box<dyn ImageProvider>>,
    cache: ImageCache,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ImageResolver {
    pub fn new(
        primary: Box<dyn ImageProvider>,
        fallbacks: Vec<Box<dyn ImageProvider>>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            primary,
            fallbacks,
            cache: ImageCache::new(cache_capacity),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Build the canonical chain: Pexels → Unsplash → placeholder
    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Self {
        let primary = Box::new(PexelsProvider::new(
            http_client.clone(),
            config.pexels_url.clone(),
            config.pexels_api_key.clone(),
        ));
        let fallbacks: Vec<Box<dyn ImageProvider>> =
            vec![Box::new(UnsplashProvider::new(http_client, config.unsplash_url.clone()))];
        Self::new(primary, fallbacks, DEFAULT_CAPACITY)
    }

    /// Resolve an image URL for a place name; total, never errors
    pub async fn resolve(&self, name: &str) -> String {
        let key = cache_key(name);

        if let Some(url) = self.resolve_primary(&key, name).await {
            return url;
        }

        for provider in &self.fallbacks {
            if let Some(url) = provider.lookup(name).await {
                tracing::debug!(provider = provider.name(), name = %name, "Image resolved");
                return url;
            }
        }

        tracing::debug!(name = %name, "All image providers missed; using placeholder");
        placeholder_url(name)
    }

    /// Memoized primary lookup with single-writer-per-key serialization:
    /// a concurrent lookup for the same key waits on the first one and is then
    /// served from cache instead of re-querying the provider.
    async fn resolve_primary(&self, key: &str, name: &str) -> Option<String> {
        let key_lock = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.entry(key.to_string()).or_default().clone()
        };
        let guard = key_lock.lock().await;

        let result = match self.cache.get(key).await {
            Some(hit) => hit,
            None => {
                let result = self.primary.lookup(name).await;
                self.cache.insert(key.to_string(), result.clone()).await;
                if result.is_some() {
                    tracing::debug!(provider = self.primary.name(), name = %name, "Image resolved");
                }
                result
            }
        };

        drop(guard);
        let mut in_flight = self.in_flight.lock().await;
        if let Some(lock) = in_flight.get(key) {
            // The map holds one reference and we hold another; no remaining
            // waiters means the entry can go.
            if Arc::strong_count(lock) == 2 {
                in_flight.remove(key);
            }
        }

        result
    }
}

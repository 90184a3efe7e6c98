//! Pexels photo search provider (primary image source)

use serde::Deserialize;

use super::ImageProvider;

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsSrc {
    large: String,
}

/// Pexels API client
///
/// Credential-gated: with no API key configured every lookup is an immediate
/// miss, which disables the provider without disturbing the chain.
pub struct PexelsProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PexelsProvider {
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self { http_client, endpoint: endpoint.into(), api_key }
    }
}

#[async_trait::async_trait]
impl ImageProvider for PexelsProvider {
    fn name(&self) -> &'static str {
        "pexels"
    }

    async fn lookup(&self, query: &str) -> Option<String> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::debug!("Pexels disabled (no API key); treating as miss");
                return None;
            }
        };

        let response = match self
            .http_client
            .get(&self.endpoint)
            .header("Authorization", api_key)
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Pexels request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(query = %query, status = %response.status(), "Pexels returned error status");
            return None;
        }

        let payload: PexelsResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Pexels payload unparseable");
                return None;
            }
        };

        payload.photos.into_iter().next().map(|photo| photo.src.large)
    }
}

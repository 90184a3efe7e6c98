//! Unsplash featured-image provider (secondary image source)
//!
//! Keyless "featured image by keyword" service: one GET per lookup, the
//! redirected final URL is the image. Unreachable or non-2xx is a miss.

use super::ImageProvider;

pub struct UnsplashProvider {
    http_client: reqwest::Client,
    base_url: String,
}

impl UnsplashProvider {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http_client, base_url: base_url.into() }
    }

    fn featured_url(&self, query: &str) -> Option<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).ok()?.join("featured/").ok()?;
        // The featured endpoint takes bare comma-separated keywords as the
        // query string; set_query percent-encodes what it must.
        url.set_query(Some(&format!("{query},tamilnadu")));
        Some(url)
    }
}

#[async_trait::async_trait]
impl ImageProvider for UnsplashProvider {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn lookup(&self, query: &str) -> Option<String> {
        let url = self.featured_url(query)?;

        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Unsplash request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(query = %query, status = %response.status(), "Unsplash returned error status");
            return None;
        }

        // Redirects resolve to the concrete image; the final URL is the result.
        Some(response.url().to_string())
    }
}

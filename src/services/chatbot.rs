//! Chatbot proxy: web-search context plus LLM completion
//!
//! Mirrors the upstream contract of the original assistant route: a Google
//! Custom Search pass gathers context, an OpenRouter chat completion writes
//! the answer. Either provider being unconfigured or failing degrades to a
//! canned reply; this route never surfaces upstream errors.

use serde::Deserialize;
use serde_json::json;

use crate::config::Config;

const SYSTEM_PROMPT: &str = "You are a helpful tourism chatbot for Tamil Nadu.";
const MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";
const MAX_SEARCH_RESULTS: usize = 5;
const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request right now.";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    #[serde(default)]
    snippet: String,
    link: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

pub struct ChatbotService {
    http_client: reqwest::Client,
    search_url: String,
    google_api_key: Option<String>,
    search_engine_id: Option<String>,
    completions_url: String,
    openrouter_api_key: Option<String>,
}

impl ChatbotService {
    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            search_url: config.google_search_url.clone(),
            google_api_key: config.google_api_key.clone(),
            search_engine_id: config.search_engine_id.clone(),
            completions_url: config.openrouter_url.clone(),
            openrouter_api_key: config.openrouter_api_key.clone(),
        }
    }

    /// Answer a user question; total, never errors
    pub async fn ask(&self, query: &str) -> String {
        let context = self.search_context(query).await;
        match self.complete(query, &context).await {
            Some(answer) => answer,
            None => FALLBACK_REPLY.to_string(),
        }
    }

    /// Best-effort web search pass; failures collapse to a stock line
    async fn search_context(&self, query: &str) -> String {
        let (api_key, engine_id) = match (&self.google_api_key, &self.search_engine_id) {
            (Some(key), Some(id)) => (key, id),
            _ => {
                tracing::debug!("Search context disabled (no Google credentials)");
                return "No relevant results found.".to_string();
            }
        };

        let num = MAX_SEARCH_RESULTS.to_string();
        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[
                ("key", api_key.as_str()),
                ("cx", engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await;

        let payload: Option<SearchResponse> = match response {
            Ok(r) if r.status().is_success() => r.json().await.ok(),
            Ok(r) => {
                tracing::warn!(status = %r.status(), "Search provider returned error status");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Search provider unreachable");
                None
            }
        };

        match payload {
            Some(p) if !p.items.is_empty() => p
                .items
                .iter()
                .map(|item| format!("- {}: {} (Source: {})", item.title, item.snippet, item.link))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => "No relevant results found.".to_string(),
        }
    }

    async fn complete(&self, query: &str, context: &str) -> Option<String> {
        let api_key = match &self.openrouter_api_key {
            Some(key) => key,
            None => {
                tracing::debug!("Chat completion disabled (no OpenRouter key)");
                return None;
            }
        };

        let prompt = format!(
            "Use the search results below to answer the user's question in 1-2 \
             sentences. Be brief and accurate, and include a source URL if available.\n\n\
             User Question: {query}\n\nSearch Results:\n{context}"
        );

        let body = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        });

        let response = match self
            .http_client
            .post(&self.completions_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Completion provider unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Completion provider returned error status");
            return None;
        }

        let payload: CompletionResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Completion payload unparseable");
                return None;
            }
        };

        payload.choices.into_iter().next().map(|choice| choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn unconfigured() -> ChatbotService {
        let config = Config {
            port: 0,
            database_path: "unused.db".into(),
            overpass_url: String::new(),
            pexels_url: String::new(),
            pexels_api_key: None,
            unsplash_url: String::new(),
            google_search_url: "http://127.0.0.1:1".to_string(),
            google_api_key: None,
            search_engine_id: None,
            openrouter_url: "http://127.0.0.1:1".to_string(),
            openrouter_api_key: None,
        };
        ChatbotService::from_config(&config, reqwest::Client::new())
    }

    #[tokio::test]
    async fn unconfigured_service_degrades_to_canned_reply() {
        let service = unconfigured();
        assert_eq!(service.ask("best temples in Madurai?").await, FALLBACK_REPLY);
    }

    #[test]
    fn completion_response_shape_parses() {
        let payload: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Visit Meenakshi Temple."}}]}"#,
        )
        .unwrap();
        assert_eq!(payload.choices[0].message.content, "Visit Meenakshi Temple.");
    }
}

//! Overpass API client (source fetcher)
//!
//! Issues exactly one query per listing request, bounded to the Tamil Nadu
//! bounding box, and returns raw elements in provider order. No retries:
//! transport and payload failures surface immediately with distinct kinds.

use std::time::Duration;

use thiserror::Error;

use crate::models::{Category, RawRecord};
use crate::services::classifier::{Condition, CATEGORY_RULES};

/// Tamil Nadu bounding box: south,west,north,east
const REGION_BBOX: &str = "8.0,76.0,13.5,80.3";

/// Hard cap on records returned per query
pub const RESULT_LIMIT: usize = 50;

const USER_AGENT: &str = "tn-explorer/0.1.0 (tourism backend)";

/// Fetch-stage errors
///
/// `Unreachable` and `Status` are reported to clients as a gateway failure
/// (502); `InvalidPayload` as a server-side data-integrity failure (500).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider returned status {0}: {1}")]
    Status(u16, String),

    #[error("malformed provider payload: {0}")]
    InvalidPayload(String),
}

/// Overpass API client
pub struct OverpassClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        Ok(Self { http_client, endpoint: endpoint.into() })
    }

    /// Fetch raw records for one category, or the full region union
    ///
    /// Exactly one upstream request per call; output is provider-ordered and
    /// capped at [`RESULT_LIMIT`].
    pub async fn fetch(&self, category: Option<Category>) -> Result<Vec<RawRecord>, FetchError> {
        let query = build_query(category);

        tracing::debug!(
            category = %category.map(|c| c.to_string()).unwrap_or_else(|| "all".to_string()),
            "Querying Overpass API"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .body(query)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FetchError::Status(status.as_u16(), error_text));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

        let elements = payload
            .get("elements")
            .and_then(|e| e.as_array())
            .ok_or_else(|| FetchError::InvalidPayload("missing 'elements' array".to_string()))?;

        let mut records = Vec::with_capacity(elements.len().min(RESULT_LIMIT));
        for element in elements {
            match serde_json::from_value::<RawRecord>(element.clone()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    // Per-record recovery: one unparseable element does not
                    // abort the batch.
                    tracing::warn!(error = %e, "Skipping unparseable Overpass element");
                }
            }
            if records.len() >= RESULT_LIMIT {
                break;
            }
        }

        tracing::info!(count = records.len(), "Fetched Overpass records");
        Ok(records)
    }
}

/// Match conditions to query upstream for the given filter
///
/// The catch-all category owns no native selectors, so it (like "no filter")
/// queries the full union and lets classification sort the results.
fn conditions_for(category: Option<Category>) -> Vec<Condition> {
    match category {
        Some(cat) if cat != Category::Other => CATEGORY_RULES
            .iter()
            .find(|(c, _)| *c == cat)
            .map(|(_, conds)| conds.to_vec())
            .unwrap_or_default(),
        _ => CATEGORY_RULES.iter().flat_map(|(_, conds)| conds.iter().copied()).collect(),
    }
}

/// Build the Overpass QL query for a category filter
fn build_query(category: Option<Category>) -> String {
    let mut selectors = String::new();
    for (key, pattern) in conditions_for(category) {
        let selector = if pattern.contains('|') {
            format!("[\"{key}\"~\"^({pattern})$\"]")
        } else {
            format!("[\"{key}\"=\"{pattern}\"]")
        };
        selectors.push_str(&format!("  node{selector}({REGION_BBOX});\n"));
        selectors.push_str(&format!("  way{selector}({REGION_BBOX});\n"));
    }

    format!("[out:json][timeout:25];\n(\n{selectors});\nout center {RESULT_LIMIT};\n")
}

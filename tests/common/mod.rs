//! Shared test helpers: stub upstream providers on an ephemeral listener and
//! an app state wired against them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use sqlx::SqlitePool;

use tn_explorer::{AppState, Config};

/// Handles to a running stub upstream (Overpass + Pexels)
pub struct StubUpstream {
    pub base_url: String,
    pub overpass_calls: Arc<AtomicUsize>,
    pub pexels_calls: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct StubState {
    overpass_status: StatusCode,
    overpass_body: Arc<serde_json::Value>,
    overpass_calls: Arc<AtomicUsize>,
    pexels_body: Arc<serde_json::Value>,
    pexels_calls: Arc<AtomicUsize>,
}

async fn stub_overpass(State(state): State<StubState>) -> (StatusCode, Json<serde_json::Value>) {
    state.overpass_calls.fetch_add(1, Ordering::SeqCst);
    (state.overpass_status, Json((*state.overpass_body).clone()))
}

async fn stub_pexels(State(state): State<StubState>) -> Json<serde_json::Value> {
    state.pexels_calls.fetch_add(1, Ordering::SeqCst);
    Json((*state.pexels_body).clone())
}

/// Spawn a stub upstream serving the given Overpass response (status + body)
/// and Pexels body. Unmatched paths (e.g. Unsplash) return 404, which the
/// resolver treats as a miss.
pub async fn spawn_stub(
    overpass_status: u16,
    overpass_body: serde_json::Value,
    pexels_body: serde_json::Value,
) -> StubUpstream {
    let overpass_calls = Arc::new(AtomicUsize::new(0));
    let pexels_calls = Arc::new(AtomicUsize::new(0));

    let state = StubState {
        overpass_status: StatusCode::from_u16(overpass_status).unwrap(),
        overpass_body: Arc::new(overpass_body),
        overpass_calls: overpass_calls.clone(),
        pexels_body: Arc::new(pexels_body),
        pexels_calls: pexels_calls.clone(),
    };

    let app = Router::new()
        .route("/api/interpreter", post(stub_overpass))
        .route("/v1/search", get(stub_pexels))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream {
        base_url: format!("http://{addr}"),
        overpass_calls,
        pexels_calls,
    }
}

/// App state with an in-memory database, pointed at the stub upstream
pub async fn test_state(stub: &StubUpstream) -> AppState {
    let config = Config {
        port: 0,
        database_path: ":memory:".into(),
        overpass_url: format!("{}/api/interpreter", stub.base_url),
        pexels_url: format!("{}/v1/search", stub.base_url),
        pexels_api_key: Some("test-key".to_string()),
        unsplash_url: format!("{}/unsplash/", stub.base_url),
        google_search_url: format!("{}/customsearch", stub.base_url),
        google_api_key: None,
        search_engine_id: None,
        openrouter_url: format!("{}/openrouter", stub.base_url),
        openrouter_api_key: None,
    };

    let db = SqlitePool::connect(":memory:").await.unwrap();
    tn_explorer::db::init_tables(&db).await.unwrap();

    AppState::new(db, config).unwrap()
}

/// A well-formed Overpass payload with the given elements
pub fn overpass_payload(elements: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "version": 0.6, "elements": elements })
}

/// A Pexels payload with one photo
pub fn pexels_payload(url: &str) -> serde_json::Value {
    serde_json::json!({ "photos": [ { "src": { "large": url } } ], "total_results": 1 })
}

/// A Pexels payload with no photos
pub fn pexels_empty() -> serde_json::Value {
    serde_json::json!({ "photos": [], "total_results": 0 })
}

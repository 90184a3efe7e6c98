//! Chatbot endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// POST /api/chatbot/ask
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    if req.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query is required".to_string()));
    }

    let answer = state.chatbot.ask(req.query.trim()).await;
    Ok(Json(AskResponse { answer }))
}

/// Build chatbot routes
pub fn chatbot_routes() -> Router<AppState> {
    Router::new().route("/api/chatbot/ask", post(ask))
}

//! Place listing and saved-destination endpoints
//!
//! `GET /api/places` runs the listing pipeline. The category key is validated
//! against the closed enumeration before any upstream call; an unknown key is
//! a 400. Upstream unreachable is a 502, a malformed upstream payload a 500,
//! and zero results a valid empty array.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Category, Coordinates, Place};
use crate::services::pipeline;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListPlacesArgs {
    pub category: Option<String>,
}

/// GET /api/places?category=<key>
pub async fn list_places(
    State(state): State<AppState>,
    Query(args): Query<ListPlacesArgs>,
) -> ApiResult<Json<Vec<Place>>> {
    let category = match args.category.as_deref() {
        Some(key) => Some(key.parse::<Category>().map_err(ApiError::BadRequest)?),
        None => None,
    };

    let places = pipeline::list_places(&state.overpass, &state.images, category).await?;
    Ok(Json(places))
}

/// Save-place request body (wire names per the original REST contract)
#[derive(Debug, Deserialize)]
pub struct SavePlaceRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Debug, Serialize)]
pub struct SavePlaceResponse {
    pub message: String,
    pub place: Place,
}

/// POST /api/places/save (auth) — idempotent on external id
pub async fn save_place(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SavePlaceRequest>,
) -> ApiResult<Json<SavePlaceResponse>> {
    if req.name.trim().is_empty() || req.external_id.trim().is_empty() {
        return Err(ApiError::BadRequest("name and externalId are required".to_string()));
    }

    let place = Place {
        name: req.name,
        description: req.description,
        coordinates: Coordinates { lon: req.lon, lat: req.lat },
        category: req.category.unwrap_or(Category::Other),
        tags: req.tags,
        address: req.address,
        image_url: req.image_url,
        external_id: req.external_id,
        source: "api".to_string(),
    };

    let place_id = db::places::upsert_place(&state.db, &place).await?;
    db::places::save_for_user(&state.db, &user.user_id, &place_id).await?;

    tracing::info!(user_id = %user.user_id, place_id = %place_id, "Place saved");

    Ok(Json(SavePlaceResponse { message: "Place saved".to_string(), place }))
}

/// GET /api/places/saved (auth)
pub async fn saved_places(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Place>>> {
    let places = db::places::saved_places_for_user(&state.db, &user.user_id).await?;
    Ok(Json(places))
}

/// Build places routes
pub fn places_routes() -> Router<AppState> {
    Router::new()
        .route("/api/places", get(list_places))
        .route("/api/places/save", post(save_place))
        .route("/api/places/saved", get(saved_places))
}

//! Saved-place accessors
//!
//! Persistence of a place is idempotent on `external_id`: saving the same
//! external record twice yields one row, and re-saving for the same user is
//! a no-op.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::{Category, Coordinates, Place};

/// Insert a place if its external id is new; returns the internal place id
pub async fn upsert_place(db: &SqlitePool, place: &Place) -> Result<String, sqlx::Error> {
    if let Some(existing) = sqlx::query("SELECT id FROM places WHERE external_id = ?")
        .bind(&place.external_id)
        .fetch_optional(db)
        .await?
    {
        return Ok(existing.get("id"));
    }

    let id = Uuid::new_v4().to_string();
    let tags = serde_json::to_string(&place.tags).unwrap_or_else(|_| "[]".to_string());

    sqlx::query(
        r#"
        INSERT INTO places
            (id, external_id, name, description, lon, lat, category, tags, address, image_url, source, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&place.external_id)
    .bind(&place.name)
    .bind(&place.description)
    .bind(place.coordinates.lon)
    .bind(place.coordinates.lat)
    .bind(place.category.as_str())
    .bind(tags)
    .bind(&place.address)
    .bind(&place.image_url)
    .bind(&place.source)
    .bind(Utc::now().to_rfc3339())
    .execute(db)
    .await?;

    Ok(id)
}

/// Associate a place with a user's saved destinations (idempotent)
pub async fn save_for_user(
    db: &SqlitePool,
    user_id: &str,
    place_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO saved_places (user_id, place_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(place_id)
        .execute(db)
        .await?;
    Ok(())
}

/// All places a user has saved
pub async fn saved_places_for_user(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Place>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.name, p.description, p.lon, p.lat, p.category, p.tags, p.address,
               p.image_url, p.external_id, p.source
        FROM places p
        JOIN saved_places s ON s.place_id = p.id
        WHERE s.user_id = ?
        ORDER BY p.name
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let places = rows
        .into_iter()
        .map(|row| {
            let category = row
                .get::<String, _>("category")
                .parse::<Category>()
                .unwrap_or(Category::Other);
            let tags: Vec<String> =
                serde_json::from_str(&row.get::<String, _>("tags")).unwrap_or_default();

            Place {
                name: row.get("name"),
                description: row.get("description"),
                coordinates: Coordinates { lon: row.get("lon"), lat: row.get("lat") },
                category,
                tags,
                address: row.get("address"),
                image_url: row.get("image_url"),
                external_id: row.get("external_id"),
                source: row.get("source"),
            }
        })
        .collect();

    Ok(places)
}

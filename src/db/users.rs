//! User and session accessors

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Insert a new user; fails on duplicate email (unique constraint)
pub async fn create_user(
    db: &SqlitePool,
    email: &str,
    password_digest: &str,
) -> Result<String, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO users (id, email, password_digest, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(email)
        .bind(password_digest)
        .bind(Utc::now().to_rfc3339())
        .execute(db)
        .await?;
    Ok(id)
}

/// Lookup (user id, password digest) by email
pub async fn find_user_by_email(
    db: &SqlitePool,
    email: &str,
) -> Result<Option<(String, String)>, sqlx::Error> {
    let row = sqlx::query("SELECT id, password_digest FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await?;
    Ok(row.map(|r| (r.get("id"), r.get("password_digest"))))
}

/// Issue an opaque session token for a user
pub async fn create_session(db: &SqlitePool, user_id: &str) -> Result<String, sqlx::Error> {
    let token = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(Utc::now().to_rfc3339())
        .execute(db)
        .await?;
    Ok(token)
}

/// Resolve a session token back to its user id
pub async fn user_id_for_token(
    db: &SqlitePool,
    token: &str,
) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT user_id FROM sessions WHERE token = ?")
        .bind(token)
        .fetch_optional(db)
        .await?;
    Ok(row.map(|r| r.get("user_id")))
}

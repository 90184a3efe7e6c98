//! Registration, login, and the bearer-token auth extractor
//!
//! Deliberately minimal session handling: opaque db-backed tokens, salted
//! SHA-256 password digests. Handlers needing a verified identity take the
//! `AuthUser` extractor, which resolves the bearer token or rejects with 401.

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Verified request identity, resolved from the `Authorization` bearer token
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("expected bearer token".to_string()))?;

        match db::users::user_id_for_token(&state.db, token).await? {
            Some(user_id) => Ok(AuthUser { user_id }),
            None => Err(ApiError::Unauthorized("invalid session token".to_string())),
        }
    }
}

/// Salted password digest (email acts as the per-user salt)
fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    STANDARD.encode(hasher.finalize())
}

fn validate_credentials(creds: &Credentials) -> ApiResult<()> {
    if creds.email.trim().is_empty() || creds.password.is_empty() {
        return Err(ApiError::BadRequest("email and password are required".to_string()));
    }
    Ok(())
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    validate_credentials(&creds)?;

    let digest = password_digest(&creds.email, &creds.password);
    let user_id = match db::users::create_user(&state.db, creds.email.trim(), &digest).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::Conflict("email already registered".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user_id, "User registered");

    let token = db::users::create_session(&state.db, &user_id).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    validate_credentials(&creds)?;

    let found = db::users::find_user_by_email(&state.db, creds.email.trim()).await?;
    let (user_id, stored_digest) = found
        .ok_or_else(|| ApiError::Unauthorized("invalid email or password".to_string()))?;

    if password_digest(&creds.email, &creds.password) != stored_digest {
        return Err(ApiError::Unauthorized("invalid email or password".to_string()));
    }

    let token = db::users::create_session(&state.db, &user_id).await?;
    Ok(Json(TokenResponse { token }))
}

/// Build auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic_and_salted_by_email() {
        let a = password_digest("a@example.com", "secret");
        assert_eq!(a, password_digest("a@example.com", "secret"));
        assert_ne!(a, password_digest("b@example.com", "secret"));
        assert_ne!(a, password_digest("a@example.com", "other"));
    }
}

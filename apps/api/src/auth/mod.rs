//! Bearer-token auth: Argon2 password hashing, HS256 JWT issue/verify, and
//! the `AuthedUser` extractor that route handlers take as an argument.
//!
//! The rest of the application trusts the identity this module extracts and
//! performs no authentication logic of its own.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub mod handlers;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::Token(_) => AppError::Unauthorized,
            AuthError::Hash(detail) => {
                AppError::Internal(anyhow::anyhow!("password hashing failed: {detail}"))
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Passwords
// ────────────────────────────────────────────────────────────────────────────

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// ────────────────────────────────────────────────────────────────────────────
// Tokens
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    /// Expiry as a Unix timestamp.
    exp: i64,
}

pub fn create_access_token(
    user_id: Uuid,
    secret: &str,
    ttl_minutes: i64,
) -> Result<String, AuthError> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::minutes(ttl_minutes)).timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Uuid, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidCredentials)
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

/// The verified identity of the requesting user.
///
/// Extraction reads the `Authorization: Bearer` header, verifies the token
/// signature and expiry, and confirms the user row still exists.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
    pub id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let user_id = verify_access_token(token, &state.config.jwt_secret)?;

        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

        match exists {
            Some(id) => Ok(AuthedUser { id }),
            None => Err(AppError::Unauthorized),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_password_hash_verify_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, SECRET, 60).unwrap();
        assert_eq!(verify_access_token(&token, SECRET).unwrap(), user_id);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = create_access_token(Uuid::new_v4(), SECRET, 60).unwrap();
        assert!(verify_access_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = create_access_token(Uuid::new_v4(), SECRET, 60).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(verify_access_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_access_token(Uuid::new_v4(), SECRET, -5).unwrap();
        assert!(verify_access_token(&token, SECRET).is_err());
    }
}

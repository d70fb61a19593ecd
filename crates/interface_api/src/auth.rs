//! Session authentication
//!
//! Identity lives with an external provider. This module only mints and
//! verifies the session cookie that proves a sign-in already happened,
//! and answers the one question the rest of the API asks: is this
//! request from an allowed admin?

use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the session cookie set after a successful sign-in
pub const SESSION_COOKIE: &str = "backoffice_session";

/// JWT claims carried by the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the signed-in admin's e-mail address
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// An authenticated admin, attached to requests that passed the session check
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub email: String,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid session token")]
    InvalidToken,
    #[error("Session expired")]
    TokenExpired,
}

/// Creates a signed session token for an admin e-mail
pub fn create_session_token(
    email: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_secs as i64);

    let claims = SessionClaims {
        sub: email.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a session token and returns its claims
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Checks an e-mail against the configured allow-list, case-insensitively
pub fn is_allowed_admin(email: &str, allowed: &[String]) -> bool {
    let email = email.trim().to_lowercase();
    allowed.iter().any(|candidate| candidate == &email)
}

/// Pulls the session token out of the request's Cookie header, if present
pub fn session_cookie_value(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Builds the Set-Cookie value that installs a session
pub fn session_set_cookie(token: &str, ttl_secs: u64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}

/// Builds the Set-Cookie value that clears the session
pub fn session_clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

//! Session handlers
//!
//! Sign-in itself happens at the external identity provider; what
//! arrives here is its signed assertion. These handlers trade that for
//! the session cookie the rest of the admin surface requires.

use axum::{
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use axum::extract::State;
use chrono::{DateTime, Duration, Utc};

use crate::auth::{
    create_session_token, is_allowed_admin, session_clear_cookie, session_cookie_value,
    session_set_cookie, validate_session_token,
};
use crate::dto::session::{SessionResponse, StartSessionRequest};
use crate::{error::ApiError, AppState};

/// Exchanges an identity assertion for a session cookie
///
/// The assertion must verify against the shared secret and name an
/// e-mail on the admin allow-list. The session the cookie carries gets
/// its own, longer lifetime.
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = validate_session_token(&request.assertion, &state.config.session_secret)?;

    if !is_allowed_admin(&claims.sub, &state.config.allowed_admins()) {
        tracing::warn!(email = %claims.sub, "sign-in from an address not on the admin list");
        return Err(ApiError::Forbidden(
            "this account is not an administrator".to_string(),
        ));
    }

    let ttl = state.config.session_ttl_secs;
    let token = create_session_token(&claims.sub, &state.config.session_secret, ttl)?;
    let expires_at = Utc::now() + Duration::seconds(ttl as i64);

    tracing::info!(email = %claims.sub, "admin session started");

    Ok((
        AppendHeaders([(SET_COOKIE, session_set_cookie(&token, ttl))]),
        Json(SessionResponse {
            email: claims.sub,
            expires_at,
        }),
    ))
}

/// Reports who the current session belongs to
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    let token = session_cookie_value(&headers).ok_or(ApiError::Unauthorized)?;
    let claims = validate_session_token(&token, &state.config.session_secret)?;

    if !is_allowed_admin(&claims.sub, &state.config.allowed_admins()) {
        return Err(ApiError::Forbidden(
            "this account is not an administrator".to_string(),
        ));
    }

    Ok(Json(session_response(claims.sub, claims.exp)?))
}

/// Ends the session by expiring the cookie
pub async fn end_session() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, session_clear_cookie())]),
    )
}

fn session_response(email: String, exp: i64) -> Result<SessionResponse, ApiError> {
    let expires_at = DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| ApiError::Internal("session expiry out of range".to_string()))?;
    Ok(SessionResponse { email, expires_at })
}

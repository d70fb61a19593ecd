//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::{
    is_allowed_admin, session_cookie_value, validate_session_token, AdminSession,
};
use crate::error::ApiError;
use crate::AppState;

/// Session authentication middleware
///
/// Admits only requests carrying a valid session cookie for an e-mail on
/// the configured allow-list. No cookie, a bad signature, or an expired
/// session all look the same from outside: 401. A valid session for an
/// address that is not on the list gets a 403 instead, so a signed-in
/// non-admin learns they are signed in but not welcome.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match session_cookie_value(request.headers()) {
        Some(token) => token,
        None => {
            warn!("admin request without a session cookie");
            return Err(ApiError::Unauthorized);
        }
    };

    let claims = validate_session_token(&token, &state.config.session_secret).map_err(|e| {
        warn!("session validation failed: {e:?}");
        ApiError::Unauthorized
    })?;

    if !is_allowed_admin(&claims.sub, &state.config.allowed_admins()) {
        warn!(email = %claims.sub, "session e-mail is not on the admin list");
        return Err(ApiError::Forbidden(
            "this account is not an administrator".to_string(),
        ));
    }

    request
        .extensions_mut()
        .insert(AdminSession { email: claims.sub });
    Ok(next.run(request).await)
}

/// Request throttling middleware
///
/// Counts requests per identity within a fixed window and rejects with
/// 429 once the configured ceiling is passed. Runs before the session
/// check so unauthenticated probing is throttled too.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let key = client_key(&state, request.headers());
    let seen = state.limiter.increment(&key);

    if seen > state.config.rate_limit_max_requests {
        warn!(%key, seen, ceiling = state.config.rate_limit_max_requests, "rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// Logs every admin request with who made it
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<AdminSession>()
        .map(|session| session.email.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}

/// Picks the identity a request is throttled under: the session e-mail
/// when a valid cookie is present, else the first forwarded IP, else one
/// shared anonymous bucket.
fn client_key(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(token) = session_cookie_value(headers) {
        if let Ok(claims) = validate_session_token(&token, &state.config.session_secret) {
            return format!("admin:{}", claims.sub.to_lowercase());
        }
    }

    match forwarded_ip(headers) {
        Some(ip) => format!("ip:{ip}"),
        None => "anonymous".to_string(),
    }
}

/// First entry of the X-Forwarded-For header, if one is present
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

//! Session DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Starts a session from an identity-provider assertion: a short-lived
/// token signed with the shared secret, naming the signed-in e-mail.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub assertion: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_kernel::PortError;
use domain_billing::{BillingError, ValidationIssue};
use domain_client::ClientError;
use domain_content::ContentError;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::dto::billing::{QuoteTotalsDto, TaxBreakdownDto};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A draft failed validation; the response carries every issue plus
    /// the figures the document would have had, so the editor can keep
    /// showing live totals.
    #[error("{message}")]
    Rejected {
        message: String,
        issues: Vec<String>,
        preview: Option<serde_json::Value>,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Too many requests".to_string(),
            ),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg.clone())
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::Rejected { message, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message.clone())
            }
        };

        let (details, preview) = match self {
            ApiError::Rejected { issues, preview, .. } => (Some(issues), preview),
            _ => (None, None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
            preview,
        };

        (status, Json(body)).into_response()
    }
}

fn issue_line(issue: &ValidationIssue) -> String {
    match &issue.field {
        Some(field) => format!("{field}: {}", issue.message),
        None => issue.message.clone(),
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{entity_type} {id}"))
            }
            PortError::Validation { message, .. } => ApiError::Validation(message),
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Connection { message, .. } => ApiError::Unavailable(message),
            PortError::Timeout { operation, .. } => {
                ApiError::Unavailable(format!("operation timed out: {operation}"))
            }
            PortError::ServiceUnavailable { service } => ApiError::Unavailable(service),
            PortError::Transformation { message } => ApiError::Internal(message),
            PortError::Internal { message, .. } => ApiError::Internal(message),
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::QuoteRejected { issues, preview } => ApiError::Rejected {
                message: "quote draft rejected".to_string(),
                issues: issues.iter().map(issue_line).collect(),
                preview: serde_json::to_value(QuoteTotalsDto::from(preview)).ok(),
            },
            BillingError::InvoiceRejected { issues, preview } => ApiError::Rejected {
                message: "invoice draft rejected".to_string(),
                issues: issues.iter().map(issue_line).collect(),
                preview: serde_json::to_value(TaxBreakdownDto::from(preview)).ok(),
            },
            err @ (BillingError::InvalidQuoteTransition { .. }
            | BillingError::InvalidInvoiceTransition { .. }
            | BillingError::QuoteNotConvertible { .. }) => ApiError::Conflict(err.to_string()),
            BillingError::Port(err) => err.into(),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { issues } => ApiError::Rejected {
                message: "client record rejected".to_string(),
                issues,
                preview: None,
            },
            ClientError::Port(err) => err.into(),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::SampleReadOnly { slug } => ApiError::Validation(format!(
                "sample content '{slug}' is read-only; create a real document to replace it"
            )),
            ContentError::Rejected { issues } => ApiError::Rejected {
                message: "content document rejected".to_string(),
                issues,
                preview: None,
            },
            ContentError::Port(err) => err.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

//! Billing domain errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::PortError;

use crate::invoice::InvoiceStatus;
use crate::quote::{QuoteStatus, QuoteTotals};
use crate::tax::TaxBreakdown;

/// A single problem found while validating a draft document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The offending field, when the problem is field-specific
    pub field: Option<String>,
    /// Human-readable description
    pub message: String,
}

impl ValidationIssue {
    /// Creates a document-level issue
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a field-level issue
    pub fn on_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

/// Errors that can occur in the billing domain
///
/// Rejected drafts carry the totals that would have been saved, so the
/// caller can show the full preview alongside the validation issues
/// without recomputing anything.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Quote draft failed validation
    #[error("quote draft rejected: {} validation issue(s)", .issues.len())]
    QuoteRejected {
        issues: Vec<ValidationIssue>,
        preview: QuoteTotals,
    },

    /// Invoice draft failed validation
    #[error("invoice draft rejected: {} validation issue(s)", .issues.len())]
    InvoiceRejected {
        issues: Vec<ValidationIssue>,
        preview: TaxBreakdown,
    },

    /// Disallowed quote lifecycle move
    #[error("invalid quote transition: {from} -> {to}")]
    InvalidQuoteTransition {
        from: QuoteStatus,
        to: QuoteStatus,
    },

    /// Disallowed invoice lifecycle move
    #[error("invalid invoice transition: {from} -> {to}")]
    InvalidInvoiceTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// Invoice derivation attempted from a quote that is not accepted
    #[error("only accepted quotes can become invoices (quote is {status})")]
    QuoteNotConvertible { status: QuoteStatus },

    /// Failure at the persistence boundary
    #[error(transparent)]
    Port(#[from] PortError),
}

impl BillingError {
    /// Returns true if the underlying cause is a missing document
    pub fn is_not_found(&self) -> bool {
        matches!(self, BillingError::Port(e) if e.is_not_found())
    }
}

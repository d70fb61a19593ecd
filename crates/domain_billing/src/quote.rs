//! Quote composition and lifecycle
//!
//! A quote carries two independently taxed item collections: one-time
//! project work and recurring monthly services. Both share one tax
//! policy, and both aggregates are recomputed together whenever items
//! or the policy change. The headline `grand_total` has always meant
//! the one-time figure only; recurring work is presented per month
//! alongside it rather than folded in.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClientId, QuoteId};

use crate::error::{BillingError, ValidationIssue};
use crate::line_item::{refresh_totals, LineItem};
use crate::tax::{compute_tax, TaxBreakdown, TaxConfig};

/// Stored quote lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    /// Being edited, not yet shown to the client
    Draft,
    /// Delivered to the client, awaiting an answer
    Sent,
    /// Client agreed; an invoice may be derived
    Accepted,
    /// Client turned it down
    Declined,
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuoteStatus::Draft => "Draft",
            QuoteStatus::Sent => "Sent",
            QuoteStatus::Accepted => "Accepted",
            QuoteStatus::Declined => "Declined",
        };
        f.write_str(label)
    }
}

/// Status as presented in lists, folding in the time-derived state.
///
/// `Expired` is never persisted: a sent quote past its validity date
/// shows as expired while its stored status stays `Sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteDisplayStatus {
    Draft,
    Sent,
    Expired,
    Accepted,
    Declined,
}

impl From<QuoteStatus> for QuoteDisplayStatus {
    fn from(status: QuoteStatus) -> Self {
        match status {
            QuoteStatus::Draft => QuoteDisplayStatus::Draft,
            QuoteStatus::Sent => QuoteDisplayStatus::Sent,
            QuoteStatus::Accepted => QuoteDisplayStatus::Accepted,
            QuoteStatus::Declined => QuoteDisplayStatus::Declined,
        }
    }
}

/// The derived aggregates for both collections of a quote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Figures for the one-time collection
    pub one_time: TaxBreakdown,
    /// Figures for the recurring collection, per month
    pub monthly: TaxBreakdown,
    /// Tax across both collections
    pub combined_tax_amount: Decimal,
    /// The document total: the one-time grand total only
    pub grand_total: Decimal,
}

impl QuoteTotals {
    pub const ZERO: QuoteTotals = QuoteTotals {
        one_time: TaxBreakdown::ZERO,
        monthly: TaxBreakdown::ZERO,
        combined_tax_amount: Decimal::ZERO,
        grand_total: Decimal::ZERO,
    };

    /// Runs the tax aggregation independently over each collection
    pub fn compute(
        one_time_items: &[LineItem],
        recurring_items: &[LineItem],
        tax: &TaxConfig,
    ) -> Self {
        let one_time = compute_tax(one_time_items, tax);
        let monthly = compute_tax(recurring_items, tax);
        Self {
            combined_tax_amount: one_time.tax_amount + monthly.tax_amount,
            grand_total: one_time.grand_total,
            one_time,
            monthly,
        }
    }
}

/// The editable fields of a quote, before or between saves
///
/// Optional where a half-finished editor state must be expressible;
/// [`QuoteDraft::validate`] reports what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteDraft {
    /// Billing party
    pub client_id: Option<ClientId>,
    /// Short label shown in lists
    #[serde(default)]
    pub title: Option<String>,
    /// Last day the quoted prices hold
    pub valid_until: Option<NaiveDate>,
    /// Tax policy snapshot for this document
    pub tax: TaxConfig,
    /// One-time project rows
    #[serde(default)]
    pub one_time_items: Vec<LineItem>,
    /// Recurring monthly rows
    #[serde(default)]
    pub recurring_items: Vec<LineItem>,
    /// Internal notes, not shown to the client
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteDraft {
    /// Returns every problem that blocks saving; empty means saveable.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.client_id.is_none() {
            issues.push(ValidationIssue::on_field(
                "client_id",
                "a client must be selected",
            ));
        }
        if self.one_time_items.is_empty() && self.recurring_items.is_empty() {
            issues.push(ValidationIssue::new("at least one line item is required"));
        }
        if self.valid_until.is_none() {
            issues.push(ValidationIssue::on_field(
                "valid_until",
                "a validity date is required",
            ));
        }
        issues
    }

    /// The totals exactly as they would be persisted.
    ///
    /// Valid on any draft, including rejected ones, so a failed save
    /// can still show the full preview.
    pub fn totals(&self) -> QuoteTotals {
        QuoteTotals::compute(&self.one_time_items, &self.recurring_items, &self.tax)
    }
}

/// A quotation for project and recurring work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier
    pub id: QuoteId,
    /// Human-readable number, assigned once at creation
    pub quote_number: String,
    /// Billing party
    pub client_id: ClientId,
    /// Short label shown in lists
    #[serde(default)]
    pub title: Option<String>,
    /// Stored lifecycle state
    pub status: QuoteStatus,
    /// Last day the quoted prices hold
    pub valid_until: NaiveDate,
    /// One-time project rows
    pub one_time_items: Vec<LineItem>,
    /// Recurring monthly rows
    pub recurring_items: Vec<LineItem>,
    /// Tax policy snapshot
    pub tax: TaxConfig,
    /// Derived aggregates, recomputed before every persist
    pub totals: QuoteTotals,
    /// Internal notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Set exactly when the quote transitions to `Sent`
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// Builds a new draft quote from editor input.
    ///
    /// A rejected draft returns the validation issues together with
    /// the totals that would have been saved; nothing is persisted by
    /// this call either way.
    pub fn from_draft(draft: QuoteDraft, quote_number: String) -> Result<Self, BillingError> {
        let issues = draft.validate();
        match (draft.client_id, draft.valid_until, issues.is_empty()) {
            (Some(client_id), Some(valid_until), true) => {
                let now = Utc::now();
                let mut quote = Self {
                    id: QuoteId::new(),
                    quote_number,
                    client_id,
                    title: draft.title,
                    status: QuoteStatus::Draft,
                    valid_until,
                    one_time_items: draft.one_time_items,
                    recurring_items: draft.recurring_items,
                    tax: draft.tax,
                    totals: QuoteTotals::ZERO,
                    notes: draft.notes,
                    sent_at: None,
                    created_at: now,
                    updated_at: now,
                };
                quote.recompute();
                Ok(quote)
            }
            _ => Err(BillingError::QuoteRejected {
                preview: draft.totals(),
                issues,
            }),
        }
    }

    /// Replaces the editable fields from a new draft.
    ///
    /// Identity, number, lifecycle state, and `sent_at` are kept; the
    /// same validation and rejection rules as [`Quote::from_draft`]
    /// apply.
    pub fn apply_draft(&mut self, draft: QuoteDraft) -> Result<(), BillingError> {
        let issues = draft.validate();
        match (draft.client_id, draft.valid_until, issues.is_empty()) {
            (Some(client_id), Some(valid_until), true) => {
                self.client_id = client_id;
                self.title = draft.title;
                self.valid_until = valid_until;
                self.tax = draft.tax;
                self.one_time_items = draft.one_time_items;
                self.recurring_items = draft.recurring_items;
                self.notes = draft.notes;
                self.recompute();
                self.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(BillingError::QuoteRejected {
                preview: draft.totals(),
                issues,
            }),
        }
    }

    /// Recomputes row totals and both aggregates from current state.
    ///
    /// Stored figures are outputs of this method, never inputs.
    pub fn recompute(&mut self) {
        refresh_totals(&mut self.one_time_items);
        refresh_totals(&mut self.recurring_items);
        self.totals = QuoteTotals::compute(&self.one_time_items, &self.recurring_items, &self.tax);
    }

    /// Marks the quote as sent to the client.
    ///
    /// The only transition that writes `sent_at`.
    pub fn mark_sent(&mut self) -> Result<(), BillingError> {
        if self.status != QuoteStatus::Draft {
            return Err(BillingError::InvalidQuoteTransition {
                from: self.status,
                to: QuoteStatus::Sent,
            });
        }
        let now = Utc::now();
        self.status = QuoteStatus::Sent;
        self.sent_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Marks a sent quote as accepted
    pub fn mark_accepted(&mut self) -> Result<(), BillingError> {
        if self.status != QuoteStatus::Sent {
            return Err(BillingError::InvalidQuoteTransition {
                from: self.status,
                to: QuoteStatus::Accepted,
            });
        }
        self.status = QuoteStatus::Accepted;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks a sent quote as declined
    pub fn mark_declined(&mut self) -> Result<(), BillingError> {
        if self.status != QuoteStatus::Sent {
            return Err(BillingError::InvalidQuoteTransition {
                from: self.status,
                to: QuoteStatus::Declined,
            });
        }
        self.status = QuoteStatus::Declined;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// True when a sent quote's validity date has passed
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.status == QuoteStatus::Sent && self.valid_until < today
    }

    /// The status to show, with expiry taking precedence over `Sent`
    pub fn display_status(&self, today: NaiveDate) -> QuoteDisplayStatus {
        if self.is_expired(today) {
            QuoteDisplayStatus::Expired
        } else {
            self.status.into()
        }
    }
}

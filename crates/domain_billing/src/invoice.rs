//! Invoice composition and lifecycle
//!
//! The single-collection counterpart of the quote: one item list, one
//! tax policy, one set of derived figures. An invoice may be minted
//! from an accepted quote, in which case it records the quote it came
//! from; only the quote's one-time rows are carried over, since
//! recurring services bill on their own cycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClientId, InvoiceId, QuoteId};

use crate::error::{BillingError, ValidationIssue};
use crate::line_item::{refresh_totals, LineItem};
use crate::quote::{Quote, QuoteStatus};
use crate::tax::{compute_tax, TaxBreakdown, TaxConfig};

/// Stored invoice lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Being edited, not yet billed
    Draft,
    /// Delivered to the client, awaiting payment
    Sent,
    /// Payment received in full
    Paid,
    /// Voided without payment
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// Status as presented in lists, folding in the time-derived state.
///
/// `Overdue` is never persisted: a sent invoice past its due date
/// shows as overdue while its stored status stays `Sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceDisplayStatus {
    Draft,
    Sent,
    Overdue,
    Paid,
    Cancelled,
}

impl From<InvoiceStatus> for InvoiceDisplayStatus {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Draft => InvoiceDisplayStatus::Draft,
            InvoiceStatus::Sent => InvoiceDisplayStatus::Sent,
            InvoiceStatus::Paid => InvoiceDisplayStatus::Paid,
            InvoiceStatus::Cancelled => InvoiceDisplayStatus::Cancelled,
        }
    }
}

/// The editable fields of an invoice, before or between saves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Billing party
    pub client_id: Option<ClientId>,
    /// Short label shown in lists
    #[serde(default)]
    pub title: Option<String>,
    /// Payment due date
    pub due_date: Option<NaiveDate>,
    /// Tax policy snapshot for this document
    pub tax: TaxConfig,
    /// Billable rows
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Internal notes, not shown to the client
    #[serde(default)]
    pub notes: Option<String>,
}

impl InvoiceDraft {
    /// Returns every problem that blocks saving; empty means saveable.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.client_id.is_none() {
            issues.push(ValidationIssue::on_field(
                "client_id",
                "a client must be selected",
            ));
        }
        if self.items.is_empty() {
            issues.push(ValidationIssue::new("at least one line item is required"));
        }
        if self.due_date.is_none() {
            issues.push(ValidationIssue::on_field("due_date", "a due date is required"));
        }
        issues
    }

    /// The totals exactly as they would be persisted.
    pub fn totals(&self) -> TaxBreakdown {
        compute_tax(&self.items, &self.tax)
    }
}

/// A bill for delivered work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Human-readable number, assigned once at creation
    pub invoice_number: String,
    /// Billing party
    pub client_id: ClientId,
    /// The accepted quote this invoice was minted from, if any.
    /// Immutable once set.
    #[serde(default)]
    pub related_quote: Option<QuoteId>,
    /// Short label shown in lists
    #[serde(default)]
    pub title: Option<String>,
    /// Stored lifecycle state
    pub status: InvoiceStatus,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Billable rows
    pub items: Vec<LineItem>,
    /// Tax policy snapshot
    pub tax: TaxConfig,
    /// Derived figures, recomputed before every persist
    pub totals: TaxBreakdown,
    /// Internal notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Set exactly when the invoice transitions to `Sent`
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Builds a new draft invoice from editor input.
    ///
    /// A rejected draft returns the validation issues together with
    /// the totals that would have been saved.
    pub fn from_draft(draft: InvoiceDraft, invoice_number: String) -> Result<Self, BillingError> {
        let issues = draft.validate();
        match (draft.client_id, draft.due_date, issues.is_empty()) {
            (Some(client_id), Some(due_date), true) => {
                let now = Utc::now();
                let mut invoice = Self {
                    id: InvoiceId::new(),
                    invoice_number,
                    client_id,
                    related_quote: None,
                    title: draft.title,
                    status: InvoiceStatus::Draft,
                    due_date,
                    items: draft.items,
                    tax: draft.tax,
                    totals: TaxBreakdown::ZERO,
                    notes: draft.notes,
                    sent_at: None,
                    created_at: now,
                    updated_at: now,
                };
                invoice.recompute();
                Ok(invoice)
            }
            _ => Err(BillingError::InvoiceRejected {
                preview: draft.totals(),
                issues,
            }),
        }
    }

    /// Mints a draft invoice from an accepted quote.
    ///
    /// Copies the client and the one-time rows; recurring rows stay on
    /// the quote. The tax policy snapshot is carried over unchanged.
    pub fn from_accepted_quote(
        quote: &Quote,
        due_date: NaiveDate,
        invoice_number: String,
    ) -> Result<Self, BillingError> {
        if quote.status != QuoteStatus::Accepted {
            return Err(BillingError::QuoteNotConvertible {
                status: quote.status,
            });
        }
        let now = Utc::now();
        let mut invoice = Self {
            id: InvoiceId::new(),
            invoice_number,
            client_id: quote.client_id,
            related_quote: Some(quote.id),
            title: quote.title.clone(),
            status: InvoiceStatus::Draft,
            due_date,
            items: quote.one_time_items.clone(),
            tax: quote.tax,
            totals: TaxBreakdown::ZERO,
            notes: None,
            sent_at: None,
            created_at: now,
            updated_at: now,
        };
        invoice.recompute();
        Ok(invoice)
    }

    /// Replaces the editable fields from a new draft.
    ///
    /// Identity, number, lifecycle state, `sent_at`, and the related
    /// quote reference are kept.
    pub fn apply_draft(&mut self, draft: InvoiceDraft) -> Result<(), BillingError> {
        let issues = draft.validate();
        match (draft.client_id, draft.due_date, issues.is_empty()) {
            (Some(client_id), Some(due_date), true) => {
                self.client_id = client_id;
                self.title = draft.title;
                self.due_date = due_date;
                self.tax = draft.tax;
                self.items = draft.items;
                self.notes = draft.notes;
                self.recompute();
                self.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(BillingError::InvoiceRejected {
                preview: draft.totals(),
                issues,
            }),
        }
    }

    /// Recomputes row totals and the invoice figures from current state
    pub fn recompute(&mut self) {
        refresh_totals(&mut self.items);
        self.totals = compute_tax(&self.items, &self.tax);
    }

    /// Marks the invoice as sent to the client.
    ///
    /// The only transition that writes `sent_at`.
    pub fn mark_sent(&mut self) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Draft {
            return Err(BillingError::InvalidInvoiceTransition {
                from: self.status,
                to: InvoiceStatus::Sent,
            });
        }
        let now = Utc::now();
        self.status = InvoiceStatus::Sent;
        self.sent_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Marks a sent invoice as paid in full
    pub fn mark_paid(&mut self) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Sent {
            return Err(BillingError::InvalidInvoiceTransition {
                from: self.status,
                to: InvoiceStatus::Paid,
            });
        }
        self.status = InvoiceStatus::Paid;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Voids a sent invoice
    pub fn mark_cancelled(&mut self) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Sent {
            return Err(BillingError::InvalidInvoiceTransition {
                from: self.status,
                to: InvoiceStatus::Cancelled,
            });
        }
        self.status = InvoiceStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// True when a sent invoice's due date has passed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent && self.due_date < today
    }

    /// The status to show, with overdue taking precedence over `Sent`
    pub fn display_status(&self, today: NaiveDate) -> InvoiceDisplayStatus {
        if self.is_overdue(today) {
            InvoiceDisplayStatus::Overdue
        } else {
            self.status.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::QuoteDraft;
    use rust_decimal_macros::dec;

    fn texas_config() -> TaxConfig {
        TaxConfig::new(dec!(8.25)).with_data_processing_exemption()
    }

    fn valid_draft() -> InvoiceDraft {
        InvoiceDraft {
            client_id: Some(ClientId::new()),
            title: None,
            due_date: NaiveDate::from_ymd_opt(2026, 10, 15),
            tax: texas_config(),
            items: vec![LineItem::new("Retainer", 2, dec!(100)).with_discount(dec!(10))],
            notes: None,
        }
    }

    fn accepted_quote() -> Quote {
        let draft = QuoteDraft {
            client_id: Some(ClientId::new()),
            title: Some("Site + care plan".into()),
            valid_until: NaiveDate::from_ymd_opt(2026, 9, 30),
            tax: texas_config(),
            one_time_items: vec![LineItem::new("Site build", 1, dec!(4800))],
            recurring_items: vec![LineItem::new("Care plan", 1, dec!(150))],
            notes: None,
        };
        let mut quote = Quote::from_draft(draft, "Q-010".into()).unwrap();
        quote.mark_sent().unwrap();
        quote.mark_accepted().unwrap();
        quote
    }

    #[test]
    fn draft_invoice_computes_single_collection_totals() {
        let invoice = Invoice::from_draft(valid_draft(), "INV-001".into()).unwrap();
        assert_eq!(invoice.totals.subtotal, dec!(180.00));
        assert_eq!(invoice.totals.tax_amount, dec!(11.88));
        assert_eq!(invoice.totals.grand_total, dec!(191.88));
        assert!(invoice.related_quote.is_none());
    }

    #[test]
    fn rejected_draft_carries_preview_figures() {
        let mut draft = valid_draft();
        draft.items.clear();
        draft.due_date = None;

        match Invoice::from_draft(draft, "INV-002".into()) {
            Err(BillingError::InvoiceRejected { issues, preview }) => {
                assert_eq!(issues.len(), 2);
                assert_eq!(preview, TaxBreakdown::ZERO);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn conversion_requires_accepted_status() {
        let mut quote = accepted_quote();
        quote.status = QuoteStatus::Sent;

        let due = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        match Invoice::from_accepted_quote(&quote, due, "INV-003".into()) {
            Err(BillingError::QuoteNotConvertible { status }) => {
                assert_eq!(status, QuoteStatus::Sent);
            }
            other => panic!("expected QuoteNotConvertible, got {other:?}"),
        }
    }

    #[test]
    fn conversion_copies_one_time_rows_only() {
        let quote = accepted_quote();
        let due = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let invoice = Invoice::from_accepted_quote(&quote, due, "INV-004".into()).unwrap();

        assert_eq!(invoice.client_id, quote.client_id);
        assert_eq!(invoice.related_quote, Some(quote.id));
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].name, "Site build");
        // The monthly care plan stays on the quote.
        assert_eq!(invoice.totals.subtotal, dec!(4800.00));
        assert_eq!(invoice.totals, quote.totals.one_time);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
    }

    #[test]
    fn apply_draft_keeps_related_quote() {
        let quote = accepted_quote();
        let due = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let mut invoice = Invoice::from_accepted_quote(&quote, due, "INV-005".into()).unwrap();

        invoice.apply_draft(valid_draft()).unwrap();
        assert_eq!(invoice.related_quote, Some(quote.id));
        assert_eq!(invoice.invoice_number, "INV-005");
    }

    #[test]
    fn mark_sent_sets_sent_at_exactly_once() {
        let mut invoice = Invoice::from_draft(valid_draft(), "INV-006".into()).unwrap();
        invoice.mark_sent().unwrap();
        let sent_at = invoice.sent_at.expect("sent_at set on send");

        invoice.mark_paid().unwrap();
        assert_eq!(invoice.sent_at, Some(sent_at));
    }

    #[test]
    fn lifecycle_rejects_out_of_order_moves() {
        let mut invoice = Invoice::from_draft(valid_draft(), "INV-007".into()).unwrap();

        assert!(invoice.mark_paid().is_err());
        assert!(invoice.mark_cancelled().is_err());

        invoice.mark_sent().unwrap();
        invoice.mark_cancelled().unwrap();

        assert!(invoice.mark_sent().is_err());
        assert!(invoice.mark_paid().is_err());
    }

    #[test]
    fn overdue_is_display_only() {
        let mut invoice = Invoice::from_draft(valid_draft(), "INV-008".into()).unwrap();
        invoice.mark_sent().unwrap();

        let past_due = invoice.due_date + chrono::Days::new(5);
        assert!(invoice.is_overdue(past_due));
        assert_eq!(
            invoice.display_status(past_due),
            InvoiceDisplayStatus::Overdue
        );
        assert_eq!(invoice.status, InvoiceStatus::Sent);

        // Not overdue on the due date itself.
        assert!(!invoice.is_overdue(invoice.due_date));
    }

    #[test]
    fn paid_invoices_never_show_overdue() {
        let mut invoice = Invoice::from_draft(valid_draft(), "INV-009".into()).unwrap();
        invoice.mark_sent().unwrap();
        invoice.mark_paid().unwrap();

        let far_future = invoice.due_date + chrono::Days::new(90);
        assert_eq!(invoice.display_status(far_future), InvoiceDisplayStatus::Paid);
    }
}

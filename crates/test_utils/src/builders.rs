//! Test Data Builders
//!
//! Provides builder patterns for constructing test drafts with sensible
//! defaults. The defaults are always saveable: a known client, a
//! far-future date, the Texas tax policy, and one billable row. Tests
//! that need a rejection opt into it explicitly, so a failed assertion
//! always points at the thing the test changed.

use chrono::NaiveDate;
use core_kernel::ClientId;
use domain_billing::{InvoiceDraft, LineItem, QuoteDraft, TaxConfig};
use rust_decimal_macros::dec;

use crate::fixtures::{IdFixtures, StringFixtures, TaxFixtures, TemporalFixtures};

/// Builder for quote drafts
pub struct QuoteDraftBuilder {
    draft: QuoteDraft,
}

impl Default for QuoteDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteDraftBuilder {
    /// Creates a new builder with saveable default values
    pub fn new() -> Self {
        Self {
            draft: QuoteDraft {
                client_id: Some(IdFixtures::client_id()),
                title: Some("Website refresh".to_string()),
                valid_until: Some(TemporalFixtures::valid_until()),
                tax: TaxFixtures::texas(),
                one_time_items: vec![LineItem::new(
                    StringFixtures::one_time_item_name(),
                    1,
                    dec!(3000),
                )],
                recurring_items: Vec::new(),
                notes: None,
            },
        }
    }

    /// Sets the billing client
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.draft.client_id = Some(client_id);
        self
    }

    /// Clears the client, which makes the draft unsaveable
    pub fn without_client(mut self) -> Self {
        self.draft.client_id = None;
        self
    }

    /// Sets the list title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.draft.title = Some(title.into());
        self
    }

    /// Sets the validity date
    pub fn with_valid_until(mut self, valid_until: NaiveDate) -> Self {
        self.draft.valid_until = Some(valid_until);
        self
    }

    /// Sets a validity date that has already passed
    pub fn already_expired(self) -> Self {
        self.with_valid_until(TemporalFixtures::expired_valid_until())
    }

    /// Sets the tax policy
    pub fn with_tax(mut self, tax: TaxConfig) -> Self {
        self.draft.tax = tax;
        self
    }

    /// Adds a one-time row
    pub fn with_one_time_item(mut self, item: LineItem) -> Self {
        self.draft.one_time_items.push(item);
        self
    }

    /// Adds a recurring monthly row
    pub fn with_recurring_item(mut self, item: LineItem) -> Self {
        self.draft.recurring_items.push(item);
        self
    }

    /// Removes every row, which makes the draft unsaveable
    pub fn without_items(mut self) -> Self {
        self.draft.one_time_items.clear();
        self.draft.recurring_items.clear();
        self
    }

    /// Builds the final draft
    pub fn build(self) -> QuoteDraft {
        self.draft
    }
}

/// Builder for invoice drafts
pub struct InvoiceDraftBuilder {
    draft: InvoiceDraft,
}

impl Default for InvoiceDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceDraftBuilder {
    /// Creates a new builder with saveable default values
    pub fn new() -> Self {
        Self {
            draft: InvoiceDraft {
                client_id: Some(IdFixtures::client_id()),
                title: None,
                due_date: Some(TemporalFixtures::due_date()),
                tax: TaxFixtures::texas(),
                items: vec![LineItem::new("Development hours", 10, dec!(95))],
                notes: None,
            },
        }
    }

    /// Sets the billing client
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.draft.client_id = Some(client_id);
        self
    }

    /// Clears the client, which makes the draft unsaveable
    pub fn without_client(mut self) -> Self {
        self.draft.client_id = None;
        self
    }

    /// Sets the list title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.draft.title = Some(title.into());
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.draft.due_date = Some(due_date);
        self
    }

    /// Sets a due date that has already passed
    pub fn already_overdue(self) -> Self {
        self.with_due_date(TemporalFixtures::overdue_due_date())
    }

    /// Sets the tax policy
    pub fn with_tax(mut self, tax: TaxConfig) -> Self {
        self.draft.tax = tax;
        self
    }

    /// Adds a billable row
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.draft.items.push(item);
        self
    }

    /// Removes every row, which makes the draft unsaveable
    pub fn without_items(mut self) -> Self {
        self.draft.items.clear();
        self
    }

    /// Builds the final draft
    pub fn build(self) -> InvoiceDraft {
        self.draft
    }
}

//! Billing domain services
//!
//! This module contains the orchestration layer for quotes and
//! invoices: drafts go in, persisted documents come out, with number
//! allocation and lifecycle transitions handled in one place.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use core_kernel::{CatalogItemId, InvoiceId, QuoteId};

use crate::catalog::CatalogItem;
use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceDraft};
use crate::numbering::{first_number, format_number, next_number, DocumentKind, NumberingMode};
use crate::ports::{BillingPort, CatalogQuery, InvoiceQuery, QuoteQuery};
use crate::quote::{Quote, QuoteDraft, QuoteStatus, QuoteTotals};
use crate::tax::TaxBreakdown;

/// Service for quote and invoice workflows
///
/// The BillingService validates drafts, allocates document numbers,
/// computes totals, and drives status transitions. All persistence
/// goes through the injected [`BillingPort`].
pub struct BillingService {
    /// Document store
    port: Arc<dyn BillingPort>,
    /// How document numbers are allocated
    numbering: NumberingMode,
}

impl BillingService {
    /// Creates a new billing service with snapshot-max numbering
    pub fn new(port: Arc<dyn BillingPort>) -> Self {
        Self {
            port,
            numbering: NumberingMode::default(),
        }
    }

    /// Selects the number allocation strategy
    pub fn with_numbering(mut self, numbering: NumberingMode) -> Self {
        self.numbering = numbering;
        self
    }

    /// Computes the totals a draft would have if saved
    ///
    /// Works on any draft, valid or not, so the figures can be shown
    /// while the user is still filling the form in.
    pub fn preview_quote(&self, draft: &QuoteDraft) -> QuoteTotals {
        draft.totals()
    }

    /// Creates a quote from a draft
    ///
    /// This method:
    /// 1. Validates the draft
    /// 2. Allocates the next quote number
    /// 3. Computes line totals and the tax breakdown
    /// 4. Persists the new quote
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::QuoteRejected`] with the would-be totals
    /// when validation fails; nothing is persisted in that case.
    pub async fn create_quote(&self, draft: QuoteDraft) -> Result<Quote, BillingError> {
        let issues = draft.validate();
        if !issues.is_empty() {
            return Err(BillingError::QuoteRejected {
                issues,
                preview: draft.totals(),
            });
        }

        // Allocate only once the draft is known to be saveable.
        let number = self.allocate_number(DocumentKind::Quote).await;
        let quote = Quote::from_draft(draft, number)?;
        self.port.save_quote(&quote).await?;
        Ok(quote)
    }

    /// Replaces the editable fields of an existing quote
    ///
    /// The quote keeps its id, number, status, and timestamps; line
    /// totals and the tax breakdown are recomputed from the draft.
    pub async fn update_quote(&self, id: QuoteId, draft: QuoteDraft) -> Result<Quote, BillingError> {
        let mut quote = self.port.get_quote(id).await?;
        quote.apply_draft(draft)?;
        self.port.save_quote(&quote).await?;
        Ok(quote)
    }

    /// Fetches a quote by id
    pub async fn get_quote(&self, id: QuoteId) -> Result<Quote, BillingError> {
        Ok(self.port.get_quote(id).await?)
    }

    /// Finds quotes matching the query
    pub async fn list_quotes(&self, query: QuoteQuery) -> Result<Vec<Quote>, BillingError> {
        Ok(self.port.find_quotes(query).await?)
    }

    /// Deletes a quote
    pub async fn delete_quote(&self, id: QuoteId) -> Result<(), BillingError> {
        Ok(self.port.delete_quote(id).await?)
    }

    /// Marks a quote as sent, stamping `sent_at`
    pub async fn send_quote(&self, id: QuoteId) -> Result<Quote, BillingError> {
        let mut quote = self.port.get_quote(id).await?;
        quote.mark_sent()?;
        self.port.save_quote(&quote).await?;
        Ok(quote)
    }

    /// Marks a sent quote as accepted
    pub async fn accept_quote(&self, id: QuoteId) -> Result<Quote, BillingError> {
        let mut quote = self.port.get_quote(id).await?;
        quote.mark_accepted()?;
        self.port.save_quote(&quote).await?;
        Ok(quote)
    }

    /// Marks a sent quote as declined
    pub async fn decline_quote(&self, id: QuoteId) -> Result<Quote, BillingError> {
        let mut quote = self.port.get_quote(id).await?;
        quote.mark_declined()?;
        self.port.save_quote(&quote).await?;
        Ok(quote)
    }

    /// Converts an accepted quote into a draft invoice
    ///
    /// This method:
    /// 1. Checks the quote is in `Accepted`
    /// 2. Allocates the next invoice number
    /// 3. Copies the one-time rows and the tax policy snapshot
    /// 4. Persists the new invoice, linked back to the quote
    ///
    /// Recurring rows stay on the quote; the invoice bills the
    /// one-time work only.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::QuoteNotConvertible`] when the quote is
    /// in any other status.
    pub async fn convert_quote(
        &self,
        id: QuoteId,
        due_date: NaiveDate,
    ) -> Result<Invoice, BillingError> {
        let quote = self.port.get_quote(id).await?;
        if quote.status != QuoteStatus::Accepted {
            return Err(BillingError::QuoteNotConvertible {
                status: quote.status,
            });
        }

        // Allocate only once the guard has passed.
        let number = self.allocate_number(DocumentKind::Invoice).await;
        let invoice = Invoice::from_accepted_quote(&quote, due_date, number)?;
        self.port.save_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Computes the breakdown a draft invoice would have if saved
    pub fn preview_invoice(&self, draft: &InvoiceDraft) -> TaxBreakdown {
        draft.totals()
    }

    /// Creates an invoice from a draft
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvoiceRejected`] with the would-be
    /// breakdown when validation fails; nothing is persisted.
    pub async fn create_invoice(&self, draft: InvoiceDraft) -> Result<Invoice, BillingError> {
        let issues = draft.validate();
        if !issues.is_empty() {
            return Err(BillingError::InvoiceRejected {
                issues,
                preview: draft.totals(),
            });
        }

        let number = self.allocate_number(DocumentKind::Invoice).await;
        let invoice = Invoice::from_draft(draft, number)?;
        self.port.save_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Replaces the editable fields of an existing invoice
    pub async fn update_invoice(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
    ) -> Result<Invoice, BillingError> {
        let mut invoice = self.port.get_invoice(id).await?;
        invoice.apply_draft(draft)?;
        self.port.save_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Fetches an invoice by id
    pub async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, BillingError> {
        Ok(self.port.get_invoice(id).await?)
    }

    /// Finds invoices matching the query
    pub async fn list_invoices(&self, query: InvoiceQuery) -> Result<Vec<Invoice>, BillingError> {
        Ok(self.port.find_invoices(query).await?)
    }

    /// Deletes an invoice
    pub async fn delete_invoice(&self, id: InvoiceId) -> Result<(), BillingError> {
        Ok(self.port.delete_invoice(id).await?)
    }

    /// Marks an invoice as sent, stamping `sent_at`
    pub async fn send_invoice(&self, id: InvoiceId) -> Result<Invoice, BillingError> {
        let mut invoice = self.port.get_invoice(id).await?;
        invoice.mark_sent()?;
        self.port.save_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Marks a sent invoice as paid
    pub async fn mark_invoice_paid(&self, id: InvoiceId) -> Result<Invoice, BillingError> {
        let mut invoice = self.port.get_invoice(id).await?;
        invoice.mark_paid()?;
        self.port.save_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Marks a sent invoice as cancelled
    pub async fn cancel_invoice(&self, id: InvoiceId) -> Result<Invoice, BillingError> {
        let mut invoice = self.port.get_invoice(id).await?;
        invoice.mark_cancelled()?;
        self.port.save_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Fetches a catalog item by id
    pub async fn get_catalog_item(&self, id: CatalogItemId) -> Result<CatalogItem, BillingError> {
        Ok(self.port.get_catalog_item(id).await?)
    }

    /// Finds catalog items matching the query
    pub async fn list_catalog_items(
        &self,
        query: CatalogQuery,
    ) -> Result<Vec<CatalogItem>, BillingError> {
        Ok(self.port.find_catalog_items(query).await?)
    }

    /// Creates or replaces a catalog item
    pub async fn save_catalog_item(&self, item: &CatalogItem) -> Result<(), BillingError> {
        Ok(self.port.save_catalog_item(item).await?)
    }

    /// Deletes a catalog item
    pub async fn delete_catalog_item(&self, id: CatalogItemId) -> Result<(), BillingError> {
        Ok(self.port.delete_catalog_item(id).await?)
    }

    /// Allocates the next document number for a kind.
    ///
    /// Allocation never blocks document creation: if the store cannot
    /// answer, the sequence restarts at its first number and the
    /// failure is logged.
    async fn allocate_number(&self, kind: DocumentKind) -> String {
        let prefix = kind.number_prefix();
        match self.numbering {
            NumberingMode::SnapshotMax => {
                match self.port.highest_document_number(kind).await {
                    Ok(current) => next_number(current.as_deref(), prefix),
                    Err(error) => {
                        warn!(%kind, %error, "number lookup failed, restarting sequence");
                        first_number(prefix)
                    }
                }
            }
            NumberingMode::StoreReserved => {
                match self.port.reserve_document_number(kind).await {
                    Ok(value) => format_number(prefix, value),
                    Err(error) => {
                        warn!(%kind, %error, "number reservation failed, restarting sequence");
                        first_number(prefix)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use core_kernel::{ClientId, DomainPort, PortError};

    use crate::line_item::LineItem;
    use crate::numbering::trailing_number;
    use crate::quote::QuoteStatus;
    use crate::tax::TaxConfig;

    /// In-memory stand-in for the billing store.
    #[derive(Default)]
    struct MockBillingStore {
        quotes: Mutex<HashMap<QuoteId, Quote>>,
        invoices: Mutex<HashMap<InvoiceId, Invoice>>,
        catalog: Mutex<HashMap<CatalogItemId, CatalogItem>>,
        quote_counter: AtomicU64,
        invoice_counter: AtomicU64,
        fail_number_lookups: AtomicBool,
    }

    impl MockBillingStore {
        fn fail_number_lookups(&self) {
            self.fail_number_lookups.store(true, Ordering::SeqCst);
        }

        fn quote_count(&self) -> usize {
            self.quotes.lock().unwrap().len()
        }
    }

    impl DomainPort for MockBillingStore {}

    #[async_trait]
    impl BillingPort for MockBillingStore {
        async fn get_quote(&self, id: QuoteId) -> Result<Quote, PortError> {
            self.quotes
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Quote", id))
        }

        async fn find_quotes(&self, _query: QuoteQuery) -> Result<Vec<Quote>, PortError> {
            Ok(self.quotes.lock().unwrap().values().cloned().collect())
        }

        async fn save_quote(&self, quote: &Quote) -> Result<(), PortError> {
            self.quotes.lock().unwrap().insert(quote.id, quote.clone());
            Ok(())
        }

        async fn delete_quote(&self, id: QuoteId) -> Result<(), PortError> {
            self.quotes.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
            self.invoices
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Invoice", id))
        }

        async fn find_invoices(&self, _query: InvoiceQuery) -> Result<Vec<Invoice>, PortError> {
            Ok(self.invoices.lock().unwrap().values().cloned().collect())
        }

        async fn save_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
            self.invoices
                .lock()
                .unwrap()
                .insert(invoice.id, invoice.clone());
            Ok(())
        }

        async fn delete_invoice(&self, id: InvoiceId) -> Result<(), PortError> {
            self.invoices.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn get_catalog_item(&self, id: CatalogItemId) -> Result<CatalogItem, PortError> {
            self.catalog
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("CatalogItem", id))
        }

        async fn find_catalog_items(
            &self,
            _query: CatalogQuery,
        ) -> Result<Vec<CatalogItem>, PortError> {
            Ok(self.catalog.lock().unwrap().values().cloned().collect())
        }

        async fn save_catalog_item(&self, item: &CatalogItem) -> Result<(), PortError> {
            self.catalog.lock().unwrap().insert(item.id, item.clone());
            Ok(())
        }

        async fn delete_catalog_item(&self, id: CatalogItemId) -> Result<(), PortError> {
            self.catalog.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn highest_document_number(
            &self,
            kind: DocumentKind,
        ) -> Result<Option<String>, PortError> {
            if self.fail_number_lookups.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "billing store".to_string(),
                });
            }
            let numbers: Vec<String> = match kind {
                DocumentKind::Quote => self
                    .quotes
                    .lock()
                    .unwrap()
                    .values()
                    .map(|quote| quote.quote_number.clone())
                    .collect(),
                DocumentKind::Invoice => self
                    .invoices
                    .lock()
                    .unwrap()
                    .values()
                    .map(|invoice| invoice.invoice_number.clone())
                    .collect(),
            };
            Ok(numbers.into_iter().max_by_key(|number| trailing_number(number)))
        }

        async fn reserve_document_number(&self, kind: DocumentKind) -> Result<u64, PortError> {
            let counter = match kind {
                DocumentKind::Quote => &self.quote_counter,
                DocumentKind::Invoice => &self.invoice_counter,
            };
            Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn service() -> (Arc<MockBillingStore>, BillingService) {
        let store = Arc::new(MockBillingStore::default());
        let service = BillingService::new(store.clone());
        (store, service)
    }

    fn valid_draft() -> QuoteDraft {
        QuoteDraft {
            client_id: Some(ClientId::new()),
            title: Some("Site redesign".to_string()),
            valid_until: Some(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()),
            tax: TaxConfig::new(dec!(8.25)),
            one_time_items: vec![LineItem::new("Design", 1, dec!(1200))],
            recurring_items: vec![],
            notes: None,
        }
    }

    mod quote_workflow {
        use super::*;

        #[tokio::test]
        async fn create_allocates_sequential_numbers() {
            let (_, service) = service();

            let first = service.create_quote(valid_draft()).await.unwrap();
            let second = service.create_quote(valid_draft()).await.unwrap();

            assert_eq!(first.quote_number, "Q-001");
            assert_eq!(second.quote_number, "Q-002");
        }

        #[tokio::test]
        async fn rejected_draft_is_not_saved() {
            let (store, service) = service();

            let error = service.create_quote(QuoteDraft::default()).await.unwrap_err();
            match error {
                BillingError::QuoteRejected { issues, preview } => {
                    assert!(!issues.is_empty());
                    assert_eq!(preview, QuoteTotals::ZERO);
                }
                other => panic!("expected QuoteRejected, got {other:?}"),
            }
            assert_eq!(store.quote_count(), 0);
        }

        #[tokio::test]
        async fn update_keeps_number_and_recomputes() {
            let (_, service) = service();

            let quote = service.create_quote(valid_draft()).await.unwrap();
            let mut draft = valid_draft();
            draft.client_id = Some(quote.client_id);
            draft.one_time_items = vec![LineItem::new("Design", 1, dec!(2000))];

            let updated = service.update_quote(quote.id, draft).await.unwrap();

            assert_eq!(updated.quote_number, quote.quote_number);
            assert_eq!(updated.totals.one_time.subtotal, dec!(2000.00));
            assert_ne!(updated.totals, quote.totals);
        }

        #[tokio::test]
        async fn send_accept_convert_walks_the_lifecycle() {
            let (_, service) = service();
            let due = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();

            let quote = service.create_quote(valid_draft()).await.unwrap();
            let sent = service.send_quote(quote.id).await.unwrap();
            assert_eq!(sent.status, QuoteStatus::Sent);
            assert!(sent.sent_at.is_some());

            service.accept_quote(quote.id).await.unwrap();
            let invoice = service.convert_quote(quote.id, due).await.unwrap();

            assert_eq!(invoice.invoice_number, "INV-001");
            assert_eq!(invoice.related_quote, Some(quote.id));
            assert_eq!(invoice.totals, quote.totals.one_time);
        }

        #[tokio::test]
        async fn convert_requires_accepted_status() {
            let (_, service) = service();
            let due = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();

            let quote = service.create_quote(valid_draft()).await.unwrap();
            let error = service.convert_quote(quote.id, due).await.unwrap_err();

            assert!(matches!(
                error,
                BillingError::QuoteNotConvertible {
                    status: QuoteStatus::Draft
                }
            ));
        }
    }

    mod numbering_resilience {
        use super::*;

        #[tokio::test]
        async fn lookup_failure_falls_back_to_first_number() {
            let (store, service) = service();

            let first = service.create_quote(valid_draft()).await.unwrap();
            assert_eq!(first.quote_number, "Q-001");

            store.fail_number_lookups();
            let second = service.create_quote(valid_draft()).await.unwrap();

            // Creation survives the outage; the sequence restarts.
            assert_eq!(second.quote_number, "Q-001");
            assert_eq!(store.quote_count(), 2);
        }

        #[tokio::test]
        async fn reserved_mode_numbers_do_not_repeat() {
            let store = Arc::new(MockBillingStore::default());
            let service = BillingService::new(store.clone())
                .with_numbering(NumberingMode::StoreReserved);

            let mut numbers = Vec::new();
            for _ in 0..3 {
                numbers.push(service.create_quote(valid_draft()).await.unwrap().quote_number);
            }

            assert_eq!(numbers, vec!["Q-001", "Q-002", "Q-003"]);
        }

        #[tokio::test]
        async fn reserved_mode_survives_lookup_outage() {
            let store = Arc::new(MockBillingStore::default());
            store.fail_number_lookups();
            let service = BillingService::new(store.clone())
                .with_numbering(NumberingMode::StoreReserved);

            // Reservation does not go through the snapshot lookup.
            let quote = service.create_quote(valid_draft()).await.unwrap();
            assert_eq!(quote.quote_number, "Q-001");
        }
    }

    mod invoice_workflow {
        use super::*;

        fn valid_invoice_draft() -> InvoiceDraft {
            InvoiceDraft {
                client_id: Some(ClientId::new()),
                title: Some("October retainer".to_string()),
                due_date: Some(NaiveDate::from_ymd_opt(2026, 10, 31).unwrap()),
                tax: TaxConfig::new(dec!(8.25)),
                items: vec![LineItem::new("Retainer", 1, dec!(3500))],
                notes: None,
            }
        }

        #[tokio::test]
        async fn create_and_pay() {
            let (_, service) = service();

            let invoice = service.create_invoice(valid_invoice_draft()).await.unwrap();
            assert_eq!(invoice.invoice_number, "INV-001");

            service.send_invoice(invoice.id).await.unwrap();
            let paid = service.mark_invoice_paid(invoice.id).await.unwrap();
            assert_eq!(paid.status, crate::invoice::InvoiceStatus::Paid);
        }

        #[tokio::test]
        async fn rejected_draft_carries_preview() {
            let (_, service) = service();

            let mut draft = valid_invoice_draft();
            draft.client_id = None;

            let error = service.create_invoice(draft).await.unwrap_err();
            match error {
                BillingError::InvoiceRejected { preview, .. } => {
                    assert_eq!(preview.subtotal, dec!(3500.00));
                }
                other => panic!("expected InvoiceRejected, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn quote_and_invoice_sequences_are_independent() {
            let (_, service) = service();

            service.create_quote(valid_draft()).await.unwrap();
            service.create_quote(valid_draft()).await.unwrap();
            let invoice = service.create_invoice(valid_invoice_draft()).await.unwrap();

            assert_eq!(invoice.invoice_number, "INV-001");
        }
    }

    mod catalog {
        use super::*;

        #[tokio::test]
        async fn save_get_and_delete() {
            let (_, service) = service();
            let item = CatalogItem::new("SEO audit", dec!(450), crate::catalog::BillingType::OneTime);

            service.save_catalog_item(&item).await.unwrap();
            let fetched = service.get_catalog_item(item.id).await.unwrap();
            assert_eq!(fetched.name, "SEO audit");

            service.delete_catalog_item(item.id).await.unwrap();
            let error = service.get_catalog_item(item.id).await.unwrap_err();
            assert!(error.is_not_found());
        }
    }
}

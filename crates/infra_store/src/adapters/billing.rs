//! Billing port adapter
//!
//! Quotes, invoices, and catalog items over the shared maps, plus the
//! numbering lookups: a max-scan for snapshot allocation and a locked
//! counter for atomic reservation.

use async_trait::async_trait;
use chrono::Utc;

use core_kernel::{CatalogItemId, InvoiceId, PortError, QuoteId};
use domain_billing::{
    trailing_number, BillingPort, CatalogItem, CatalogQuery, DocumentKind, Invoice, InvoiceQuery,
    Quote, QuoteQuery,
};

use crate::memory::{paginate, MemoryStore};

impl MemoryStore {
    /// Largest trailing numeric run among stored numbers of a kind.
    async fn stored_number_floor(&self, kind: DocumentKind) -> u64 {
        match kind {
            DocumentKind::Quote => self
                .quotes
                .read()
                .await
                .values()
                .filter_map(|quote| trailing_number(&quote.quote_number))
                .max()
                .unwrap_or(0),
            DocumentKind::Invoice => self
                .invoices
                .read()
                .await
                .values()
                .filter_map(|invoice| trailing_number(&invoice.invoice_number))
                .max()
                .unwrap_or(0),
        }
    }
}

#[async_trait]
impl BillingPort for MemoryStore {
    async fn get_quote(&self, id: QuoteId) -> Result<Quote, PortError> {
        self.quotes
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Quote", id))
    }

    async fn find_quotes(&self, query: QuoteQuery) -> Result<Vec<Quote>, PortError> {
        let quotes = self.quotes.read().await;
        let mut matches: Vec<Quote> = quotes
            .values()
            .filter(|quote| {
                query.client_id.map_or(true, |client| quote.client_id == client)
                    && query.status.map_or(true, |status| quote.status == status)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.quote_number.cmp(&a.quote_number))
        });
        Ok(paginate(matches, query.limit, query.offset))
    }

    async fn save_quote(&self, quote: &Quote) -> Result<(), PortError> {
        let mut stored = quote.clone();
        stored.updated_at = Utc::now();
        self.quotes.write().await.insert(stored.id, stored);
        Ok(())
    }

    async fn delete_quote(&self, id: QuoteId) -> Result<(), PortError> {
        self.quotes.write().await.remove(&id);
        Ok(())
    }

    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        self.invoices
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }

    async fn find_invoices(&self, query: InvoiceQuery) -> Result<Vec<Invoice>, PortError> {
        let invoices = self.invoices.read().await;
        let mut matches: Vec<Invoice> = invoices
            .values()
            .filter(|invoice| {
                query
                    .client_id
                    .map_or(true, |client| invoice.client_id == client)
                    && query.status.map_or(true, |status| invoice.status == status)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.invoice_number.cmp(&a.invoice_number))
        });
        Ok(paginate(matches, query.limit, query.offset))
    }

    async fn save_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
        let mut stored = invoice.clone();
        stored.updated_at = Utc::now();
        self.invoices.write().await.insert(stored.id, stored);
        Ok(())
    }

    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), PortError> {
        self.invoices.write().await.remove(&id);
        Ok(())
    }

    async fn get_catalog_item(&self, id: CatalogItemId) -> Result<CatalogItem, PortError> {
        self.catalog
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("CatalogItem", id))
    }

    async fn find_catalog_items(&self, query: CatalogQuery) -> Result<Vec<CatalogItem>, PortError> {
        let catalog = self.catalog.read().await;
        let mut matches: Vec<CatalogItem> = catalog
            .values()
            .filter(|item| {
                query.billing.map_or(true, |billing| item.billing == billing)
                    && query
                        .category
                        .as_deref()
                        .map_or(true, |category| item.category.as_deref() == Some(category))
            })
            .cloned()
            .collect();
        matches.sort_by_key(|item| item.name.to_lowercase());
        Ok(matches)
    }

    async fn save_catalog_item(&self, item: &CatalogItem) -> Result<(), PortError> {
        let mut stored = item.clone();
        stored.updated_at = Utc::now();
        self.catalog.write().await.insert(stored.id, stored);
        Ok(())
    }

    async fn delete_catalog_item(&self, id: CatalogItemId) -> Result<(), PortError> {
        self.catalog.write().await.remove(&id);
        Ok(())
    }

    async fn highest_document_number(
        &self,
        kind: DocumentKind,
    ) -> Result<Option<String>, PortError> {
        let highest = match kind {
            DocumentKind::Quote => self
                .quotes
                .read()
                .await
                .values()
                .map(|quote| quote.quote_number.clone())
                .max_by_key(|number| trailing_number(number)),
            DocumentKind::Invoice => self
                .invoices
                .read()
                .await
                .values()
                .map(|invoice| invoice.invoice_number.clone())
                .max_by_key(|number| trailing_number(number)),
        };
        Ok(highest)
    }

    async fn reserve_document_number(&self, kind: DocumentKind) -> Result<u64, PortError> {
        // The counter lock makes floor-read and claim one step; the
        // floor keeps reservations above documents numbered by the
        // snapshot path.
        let mut counters = self.counters.lock().await;
        let reserved = match kind {
            DocumentKind::Quote => &mut counters.quote,
            DocumentKind::Invoice => &mut counters.invoice,
        };
        let next = self
            .stored_number_floor(kind)
            .await
            .max(*reserved)
            .saturating_add(1);
        *reserved = next;
        Ok(next)
    }
}

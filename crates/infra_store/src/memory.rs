//! Shared in-memory document store
//!
//! One [`MemoryStore`] instance backs every domain port in the
//! process. Each document family lives in its own `RwLock`-guarded
//! map, so reads in one family never contend with writes in another.
//!
//! The store hands out clones on read and replaces whole documents on
//! write: last write wins, with `updated_at` restamped on every write
//! so the admin list always shows when a record last changed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use core_kernel::{CatalogItemId, ClientId, DocumentId, DomainPort, InvoiceId, QuoteId};
use domain_billing::{CatalogItem, Invoice, Quote};
use domain_client::Client;
use domain_content::ContentDoc;

/// Reserved sequence positions, one per numbered document family.
///
/// Guarded by a single async mutex so a reservation reads the floor
/// and claims the next value as one step.
#[derive(Debug, Default)]
pub(crate) struct SequenceCounters {
    pub(crate) quote: u64,
    pub(crate) invoice: u64,
}

/// Process-wide in-memory store behind all domain ports
///
/// Cloning is cheap and every clone shares the same data, so one
/// store can be handed to each service and to the API state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub(crate) quotes: Arc<RwLock<HashMap<QuoteId, Quote>>>,
    pub(crate) invoices: Arc<RwLock<HashMap<InvoiceId, Invoice>>>,
    pub(crate) catalog: Arc<RwLock<HashMap<CatalogItemId, CatalogItem>>>,
    pub(crate) clients: Arc<RwLock<HashMap<ClientId, Client>>>,
    pub(crate) content: Arc<RwLock<HashMap<DocumentId, ContentDoc>>>,
    pub(crate) counters: Arc<Mutex<SequenceCounters>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored quotes
    pub async fn quote_count(&self) -> usize {
        self.quotes.read().await.len()
    }

    /// Number of stored invoices
    pub async fn invoice_count(&self) -> usize {
        self.invoices.read().await.len()
    }

    /// Number of stored clients
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Number of stored content documents
    pub async fn content_count(&self) -> usize {
        self.content.read().await.len()
    }

    /// Drops every document and resets the number sequences.
    pub async fn clear(&self) {
        self.quotes.write().await.clear();
        self.invoices.write().await.clear();
        self.catalog.write().await.clear();
        self.clients.write().await.clear();
        self.content.write().await.clear();
        let mut counters = self.counters.lock().await;
        counters.quote = 0;
        counters.invoice = 0;
    }
}

impl DomainPort for MemoryStore {}

/// Applies limit/offset pagination in the order the caller sorted.
pub(crate) fn paginate<T>(items: Vec<T>, limit: Option<u32>, offset: Option<u32>) -> Vec<T> {
    let offset = offset.unwrap_or(0) as usize;
    let mut page: Vec<T> = items.into_iter().skip(offset).collect();
    if let Some(limit) = limit {
        page.truncate(limit as usize);
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_slices_in_order() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(paginate(items.clone(), Some(2), Some(1)), vec![2, 3]);
        assert_eq!(paginate(items.clone(), None, Some(3)), vec![4, 5]);
        assert_eq!(paginate(items.clone(), Some(10), None), items);
        assert_eq!(paginate(items, Some(0), None), Vec::<i32>::new());
    }

    #[tokio::test]
    async fn clones_share_the_same_data() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store
            .clients
            .write()
            .await
            .insert(ClientId::new(), sample_client());
        assert_eq!(clone.client_count().await, 1);

        clone.clear().await;
        assert_eq!(store.client_count().await, 0);
    }

    fn sample_client() -> Client {
        use domain_client::ClientDraft;
        Client::from_draft(ClientDraft::named("Ada Flores")).unwrap()
    }
}

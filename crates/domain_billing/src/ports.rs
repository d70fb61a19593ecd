//! Billing Domain Ports
//!
//! Port interfaces for everything the billing domain needs persisted:
//! quotes, invoices, the service catalog, and the document-number
//! lookup the allocator runs on.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_billing::ports::BillingPort;
//! use std::sync::Arc;
//!
//! pub struct BillingService {
//!     port: Arc<dyn BillingPort>,
//! }
//!
//! impl BillingService {
//!     pub async fn get_quote(&self, id: QuoteId) -> Result<Quote, PortError> {
//!         self.port.get_quote(id).await
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{CatalogItemId, ClientId, DomainPort, InvoiceId, PortError, QuoteId};

use crate::catalog::{BillingType, CatalogItem};
use crate::invoice::{Invoice, InvoiceStatus};
use crate::numbering::{trailing_number, DocumentKind};
use crate::quote::{Quote, QuoteStatus};

/// Query parameters for finding quotes
#[derive(Debug, Clone, Default)]
pub struct QuoteQuery {
    /// Filter by billing party
    pub client_id: Option<ClientId>,
    /// Filter by stored status
    pub status: Option<QuoteStatus>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl QuoteQuery {
    /// Creates a query for one client's quotes
    pub fn by_client(client_id: ClientId) -> Self {
        Self {
            client_id: Some(client_id),
            ..Default::default()
        }
    }

    /// Creates a query for quotes in a given status
    pub fn with_status(status: QuoteStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Query parameters for finding invoices
#[derive(Debug, Clone, Default)]
pub struct InvoiceQuery {
    /// Filter by billing party
    pub client_id: Option<ClientId>,
    /// Filter by stored status
    pub status: Option<InvoiceStatus>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl InvoiceQuery {
    /// Creates a query for one client's invoices
    pub fn by_client(client_id: ClientId) -> Self {
        Self {
            client_id: Some(client_id),
            ..Default::default()
        }
    }

    /// Creates a query for invoices in a given status
    pub fn with_status(status: InvoiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Query parameters for finding catalog items
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Filter by billing cadence
    pub billing: Option<BillingType>,
    /// Filter by category label
    pub category: Option<String>,
}

impl CatalogQuery {
    /// Creates a query for one billing cadence
    pub fn by_billing(billing: BillingType) -> Self {
        Self {
            billing: Some(billing),
            ..Default::default()
        }
    }

    /// Creates a query for one category
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }
}

/// Persistence operations for the billing domain
///
/// `save_*` is an upsert: the store keys on the document id. Reads of
/// missing documents return [`PortError::NotFound`].
#[async_trait]
pub trait BillingPort: DomainPort {
    /// Fetches a quote by id
    async fn get_quote(&self, id: QuoteId) -> Result<Quote, PortError>;

    /// Finds quotes matching the query, newest first
    async fn find_quotes(&self, query: QuoteQuery) -> Result<Vec<Quote>, PortError>;

    /// Creates or replaces a quote
    async fn save_quote(&self, quote: &Quote) -> Result<(), PortError>;

    /// Deletes a quote
    async fn delete_quote(&self, id: QuoteId) -> Result<(), PortError>;

    /// Fetches an invoice by id
    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError>;

    /// Finds invoices matching the query, newest first
    async fn find_invoices(&self, query: InvoiceQuery) -> Result<Vec<Invoice>, PortError>;

    /// Creates or replaces an invoice
    async fn save_invoice(&self, invoice: &Invoice) -> Result<(), PortError>;

    /// Deletes an invoice
    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), PortError>;

    /// Fetches a catalog item by id
    async fn get_catalog_item(&self, id: CatalogItemId) -> Result<CatalogItem, PortError>;

    /// Finds catalog items matching the query, name order
    async fn find_catalog_items(&self, query: CatalogQuery) -> Result<Vec<CatalogItem>, PortError>;

    /// Creates or replaces a catalog item
    async fn save_catalog_item(&self, item: &CatalogItem) -> Result<(), PortError>;

    /// Deletes a catalog item
    async fn delete_catalog_item(&self, id: CatalogItemId) -> Result<(), PortError>;

    /// Returns the highest existing document number of a kind.
    ///
    /// "Highest" means the largest trailing numeric run among stored
    /// numbers of that kind; `None` when no documents exist yet.
    async fn highest_document_number(
        &self,
        kind: DocumentKind,
    ) -> Result<Option<String>, PortError>;

    /// Reserves the next sequence value for a kind.
    ///
    /// The default derives it from [`highest_document_number`], which
    /// carries the same read-then-increment race as snapshot
    /// allocation. Stores with native counters should override this
    /// with a genuinely atomic reservation.
    ///
    /// [`highest_document_number`]: BillingPort::highest_document_number
    async fn reserve_document_number(&self, kind: DocumentKind) -> Result<u64, PortError> {
        let current = self.highest_document_number(kind).await?;
        Ok(current
            .as_deref()
            .and_then(trailing_number)
            .unwrap_or(0)
            .saturating_add(1))
    }
}

//! Billing Domain - Quotes, Invoices, and Tax Aggregation
//!
//! This crate implements the billing core for the agency back office:
//! line-item aggregation, the sales tax breakdown, quote and invoice
//! lifecycles, and sequential document numbering.
//!
//! # Money Pipeline
//!
//! Every figure a document carries is derived, never trusted:
//! - Each line total is recomputed from price, quantity, and discount
//! - Collections aggregate into a subtotal, taxable amount, tax, and
//!   grand total, each rounded to cents exactly once
//! - Documents recompute the whole pipeline on every save
//!
//! # Document Lifecycles
//!
//! Quotes move `Draft → Sent → Accepted | Declined`; invoices move
//! `Draft → Sent → Paid | Cancelled`. Expiry and overdue are derived
//! at read time from the business-timezone date and never persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingService, QuoteDraft};
//!
//! let service = BillingService::new(store);
//!
//! // Figures are visible before the draft is saveable
//! let preview = service.preview_quote(&draft);
//!
//! let quote = service.create_quote(draft).await?;
//! let sent = service.send_quote(quote.id).await?;
//! ```

pub mod catalog;
pub mod error;
pub mod invoice;
pub mod line_item;
pub mod numbering;
pub mod ports;
pub mod quote;
pub mod services;
pub mod tax;

pub use catalog::{BillingType, CatalogItem};
pub use error::{BillingError, ValidationIssue};
pub use invoice::{Invoice, InvoiceDisplayStatus, InvoiceDraft, InvoiceStatus};
pub use line_item::{item_total, refresh_totals, LineItem};
pub use numbering::{
    first_number, format_number, next_number, trailing_number, DocumentKind, NumberingMode,
    INVOICE_PREFIX, QUOTE_PREFIX,
};
pub use ports::{BillingPort, CatalogQuery, InvoiceQuery, QuoteQuery};
pub use quote::{Quote, QuoteDisplayStatus, QuoteDraft, QuoteStatus, QuoteTotals};
pub use services::BillingService;
pub use tax::{compute_tax, TaxBreakdown, TaxConfig, DATA_PROCESSING_TAXABLE_SHARE};

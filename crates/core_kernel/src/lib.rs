//! Core Kernel - Foundational types and utilities for the agency back office
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Monetary rounding and percentage handling on precise decimals
//! - Business-calendar date helpers
//! - Common identifiers and the port error taxonomy

pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use identifiers::{
    AuditEventId, CatalogItemId, ClientId, DocId, DocumentId, InvoiceId, LineItemKey, QuoteId,
};
pub use money::{format_usd, round2, Percent};
pub use ports::{DomainPort, PortError};
pub use temporal::{business_date, business_today, days_past, BUSINESS_TZ};

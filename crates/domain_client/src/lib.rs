//! Client Domain - Agency Customers
//!
//! This crate holds the billing party model: the customers quotes and
//! invoices are addressed to. A client is intentionally lightweight -
//! a required name plus optional contact detail - because records are
//! often opened mid-phone-call and completed later.
//!
//! Billing documents reference clients by id only. Deleting a client
//! neither cascades into its documents nor is blocked by them.

pub mod client;
pub mod error;
pub mod ports;
pub mod services;

pub use client::{Client, ClientDraft};
pub use error::ClientError;
pub use ports::{ClientPort, ClientQuery};
pub use services::ClientService;

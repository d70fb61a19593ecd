//! Request handlers

pub mod catalog;
pub mod clients;
pub mod content;
pub mod health;
pub mod invoices;
pub mod quotes;
pub mod session;
pub mod site;

//! Infrastructure Store Layer
//!
//! This crate provides the persistence layer for the agency back
//! office: a process-local in-memory document store implementing every
//! domain port.
//!
//! # Architecture
//!
//! One [`MemoryStore`] backs all three domains. Each domain sees only
//! its own port trait; the adapters in [`adapters`] implement those
//! traits over shared `RwLock`-guarded maps. The whole back office
//! runs single-process, so in-memory storage is the deployment model,
//! not a test stub; durability would arrive by implementing the same
//! ports over a database, with no domain changes.
//!
//! # Write Rules
//!
//! - Saves replace the whole document; last write wins
//! - `updated_at` is restamped by the store on every write
//! - Document-number reservation is atomic under a sequence lock
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let billing = BillingService::new(store.clone());
//! let clients = ClientService::new(store.clone());
//! ```

pub mod adapters;
pub mod memory;

pub use memory::MemoryStore;

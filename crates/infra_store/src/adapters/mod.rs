//! Domain port adapters
//!
//! [`MemoryStore`](crate::MemoryStore) implements each domain's port
//! trait directly; the modules here hold one implementation per
//! domain. Adapters translate query structs into in-memory filtering
//! and keep the store's two writing rules: whole-document replacement
//! and an `updated_at` restamp on every write.

pub mod billing;
pub mod client;
pub mod content;

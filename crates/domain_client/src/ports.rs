//! Client Domain Ports
//!
//! Port interface for client persistence. Billing documents reference
//! clients by id only; the store holds no back-references, so client
//! deletion neither cascades into documents nor is blocked by them.

use async_trait::async_trait;

use core_kernel::{ClientId, DomainPort, PortError};

use crate::client::Client;

/// Query parameters for finding clients
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    /// Case-insensitive text matched against name, company, and e-mail
    pub search: Option<String>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ClientQuery {
    /// Creates a free-text search query
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
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

/// Persistence operations for client records
#[async_trait]
pub trait ClientPort: DomainPort {
    /// Fetches a client by id
    async fn get_client(&self, id: ClientId) -> Result<Client, PortError>;

    /// Finds clients matching the query, name order
    async fn find_clients(&self, query: ClientQuery) -> Result<Vec<Client>, PortError>;

    /// Creates or replaces a client
    async fn save_client(&self, client: &Client) -> Result<(), PortError>;

    /// Deletes a client.
    ///
    /// Documents that reference the client keep their id; they render
    /// with an unresolved party until reassigned.
    async fn delete_client(&self, id: ClientId) -> Result<(), PortError>;
}

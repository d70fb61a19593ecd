//! Client domain services

use std::sync::Arc;

use core_kernel::ClientId;

use crate::client::{Client, ClientDraft};
use crate::error::ClientError;
use crate::ports::{ClientPort, ClientQuery};

/// Service for client record management
pub struct ClientService {
    /// Client store
    port: Arc<dyn ClientPort>,
}

impl ClientService {
    /// Creates a new client service
    pub fn new(port: Arc<dyn ClientPort>) -> Self {
        Self { port }
    }

    /// Creates a client from a draft
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the draft fails
    /// validation; nothing is persisted in that case.
    pub async fn create_client(&self, draft: ClientDraft) -> Result<Client, ClientError> {
        let client = Client::from_draft(draft)?;
        self.port.save_client(&client).await?;
        Ok(client)
    }

    /// Replaces the editable fields of an existing client
    pub async fn update_client(
        &self,
        id: ClientId,
        draft: ClientDraft,
    ) -> Result<Client, ClientError> {
        let mut client = self.port.get_client(id).await?;
        client.apply_draft(draft)?;
        self.port.save_client(&client).await?;
        Ok(client)
    }

    /// Fetches a client by id
    pub async fn get_client(&self, id: ClientId) -> Result<Client, ClientError> {
        Ok(self.port.get_client(id).await?)
    }

    /// Finds clients matching the query
    pub async fn list_clients(&self, query: ClientQuery) -> Result<Vec<Client>, ClientError> {
        Ok(self.port.find_clients(query).await?)
    }

    /// Deletes a client; billing documents that reference it are left
    /// untouched
    pub async fn delete_client(&self, id: ClientId) -> Result<(), ClientError> {
        Ok(self.port.delete_client(id).await?)
    }
}

//! Client port adapter

use async_trait::async_trait;
use chrono::Utc;

use core_kernel::{ClientId, PortError};
use domain_client::{Client, ClientPort, ClientQuery};

use crate::memory::{paginate, MemoryStore};

#[async_trait]
impl ClientPort for MemoryStore {
    async fn get_client(&self, id: ClientId) -> Result<Client, PortError> {
        self.clients
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Client", id))
    }

    async fn find_clients(&self, query: ClientQuery) -> Result<Vec<Client>, PortError> {
        let clients = self.clients.read().await;
        let mut matches: Vec<Client> = clients
            .values()
            .filter(|client| {
                query
                    .search
                    .as_deref()
                    .map_or(true, |needle| client.matches_search(needle))
            })
            .cloned()
            .collect();
        matches.sort_by_key(|client| client.name.to_lowercase());
        Ok(paginate(matches, query.limit, query.offset))
    }

    async fn save_client(&self, client: &Client) -> Result<(), PortError> {
        let mut stored = client.clone();
        stored.updated_at = Utc::now();
        self.clients.write().await.insert(stored.id, stored);
        Ok(())
    }

    async fn delete_client(&self, id: ClientId) -> Result<(), PortError> {
        self.clients.write().await.remove(&id);
        Ok(())
    }
}

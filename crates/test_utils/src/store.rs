//! Store Test Utilities
//!
//! Provides a seeded in-memory store for integration-style tests. The
//! reference store lives in process, so every test gets its own fully
//! isolated instance; there is no shared state to reset between tests
//! unless a test asks for it.

use std::sync::Arc;

use domain_billing::{BillingService, BillingType, CatalogItem};
use domain_client::{Client, ClientService};
use domain_content::ContentService;
use infra_store::MemoryStore;
use rust_decimal_macros::dec;

use crate::fixtures::ClientFixtures;

/// A store pre-loaded with the records most tests start from
///
/// Seeding gives every test one saveable client and a small service
/// catalog, which is enough to exercise the full quote-to-invoice
/// path without each test repeating the setup.
pub struct TestStore {
    /// The backing store, shareable with any service under test
    pub store: Arc<MemoryStore>,
    /// The seeded client
    pub client: Client,
    /// The seeded catalog, in insertion order
    pub catalog: Vec<CatalogItem>,
}

impl TestStore {
    /// Creates a fresh store holding one client and three catalog items
    ///
    /// # Panics
    ///
    /// Panics if seeding fails, which the in-memory store never does.
    pub async fn seeded() -> Self {
        let store = Arc::new(MemoryStore::new());

        let client = ClientService::new(store.clone())
            .create_client(ClientFixtures::draft())
            .await
            .expect("seed client is valid");

        let catalog = vec![
            CatalogItem::new("Website build", dec!(3000), BillingType::OneTime)
                .with_description("Design and build of a marketing site")
                .with_category("web"),
            CatalogItem::new("Care plan", dec!(150), BillingType::Monthly)
                .with_description("Hosting, backups, and small fixes")
                .with_category("care"),
            CatalogItem::new("SEO audit", dec!(750), BillingType::OneTime)
                .with_category("marketing"),
        ];
        let billing = BillingService::new(store.clone());
        for item in &catalog {
            billing
                .save_catalog_item(item)
                .await
                .expect("seed catalog item saves");
        }

        Self {
            store,
            client,
            catalog,
        }
    }

    /// A billing service over the seeded store
    pub fn billing(&self) -> BillingService {
        BillingService::new(self.store.clone())
    }

    /// A client service over the seeded store
    pub fn clients(&self) -> ClientService {
        ClientService::new(self.store.clone())
    }

    /// A content service over the seeded store
    pub fn content(&self) -> ContentService {
        ContentService::new(self.store.clone())
    }

    /// Empties the store, seeded records included
    pub async fn reset(&self) {
        self.store.clear().await;
    }
}

/// Creates a bare store with nothing in it
pub fn empty_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::QuoteDraftBuilder;

    #[tokio::test]
    async fn test_seeded_store_carries_the_starting_records() {
        let fixture = TestStore::seeded().await;

        assert_eq!(fixture.store.client_count().await, 1);
        assert_eq!(fixture.store.quote_count().await, 0);
        assert_eq!(fixture.store.invoice_count().await, 0);
        assert_eq!(fixture.store.content_count().await, 0);
        assert_eq!(fixture.catalog.len(), 3);

        // Seeded records are reachable through the services.
        let billing = fixture.billing();
        for item in &fixture.catalog {
            let fetched = billing.get_catalog_item(item.id).await.unwrap();
            assert_eq!(fetched.name, item.name);
        }
    }

    #[tokio::test]
    async fn test_services_share_the_seeded_state() {
        let fixture = TestStore::seeded().await;

        let quote = fixture
            .billing()
            .create_quote(
                QuoteDraftBuilder::new()
                    .with_client(fixture.client.id)
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(quote.quote_number, "Q-001");
        assert_eq!(quote.client_id, fixture.client.id);
        assert_eq!(fixture.store.quote_count().await, 1);
    }

    #[tokio::test]
    async fn test_reset_empties_everything() {
        let fixture = TestStore::seeded().await;
        fixture.reset().await;

        assert_eq!(fixture.store.client_count().await, 0);
        assert_eq!(fixture.store.quote_count().await, 0);
    }

    #[tokio::test]
    async fn test_separate_stores_are_isolated() {
        let first = TestStore::seeded().await;
        let second = TestStore::seeded().await;

        first
            .billing()
            .create_quote(
                QuoteDraftBuilder::new()
                    .with_client(first.client.id)
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(first.store.quote_count().await, 1);
        assert_eq!(second.store.quote_count().await, 0);
    }
}

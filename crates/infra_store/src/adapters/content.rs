//! Content port adapter
//!
//! Stands in for the headless content store. Patch goes through the
//! domain's shared merge helper so anything stored here behaves the
//! same as a real store-side merge patch.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use core_kernel::{DocumentId, PortError};
use domain_content::{apply_merge_patch, ContentDoc, ContentPort, ContentQuery};

use crate::memory::MemoryStore;

#[async_trait]
impl ContentPort for MemoryStore {
    async fn fetch(&self, query: ContentQuery) -> Result<Vec<ContentDoc>, PortError> {
        let content = self.content.read().await;
        let mut matches: Vec<ContentDoc> = content
            .iter()
            .filter(|(id, doc)| {
                query.id.map_or(true, |wanted| wanted == **id)
                    && query.kind.map_or(true, |kind| doc.kind() == kind)
                    && query
                        .slug
                        .as_deref()
                        .map_or(true, |slug| doc.slug() == Some(slug))
                    && (!query.published_only || doc.is_published())
            })
            .map(|(_, doc)| doc.clone())
            .collect();
        matches.sort_by_key(|doc| (doc.display_order(), doc.created_at()));
        if let Some(limit) = query.limit {
            matches.truncate(limit as usize);
        }
        Ok(matches)
    }

    async fn create(&self, doc: &ContentDoc) -> Result<(), PortError> {
        let id = doc
            .id()
            .as_persisted()
            .ok_or_else(|| PortError::validation("sample documents cannot be stored"))?;
        let mut content = self.content.write().await;
        if content.contains_key(&id) {
            return Err(PortError::conflict(format!(
                "content document {id} already exists"
            )));
        }
        let mut stored = doc.clone();
        stored.touch(Utc::now());
        content.insert(id, stored);
        Ok(())
    }

    async fn patch(&self, id: DocumentId, patch: Value) -> Result<ContentDoc, PortError> {
        let mut content = self.content.write().await;
        let doc = content
            .get(&id)
            .ok_or_else(|| PortError::not_found("content document", id))?;
        let mut patched = apply_merge_patch(doc, &patch)?;
        patched.touch(Utc::now());
        content.insert(id, patched.clone());
        Ok(patched)
    }

    async fn delete(&self, id: DocumentId) -> Result<(), PortError> {
        self.content.write().await.remove(&id);
        Ok(())
    }
}

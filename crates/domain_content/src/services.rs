//! Content services
//!
//! Read paths for the public site and write paths for the admin area,
//! over any [`ContentPort`] adapter.
//!
//! Public reads never come back empty: when the store holds nothing of
//! a kind, the built-in sample records are served instead, so a fresh
//! deployment renders a complete site before an editor has touched it.
//! Admin listings apply the same substitution so editors see exactly
//! what visitors see; any attempt to edit or delete a sample record is
//! rejected before it reaches the store.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use core_kernel::ports::PortError;
use core_kernel::{DocId, DocumentId};

use crate::documents::{ContentDoc, ContentKind, LandingPage, SiteSettings};
use crate::error::ContentError;
use crate::ports::{ContentPort, ContentQuery};
use crate::sample::{find_sample, sample_docs};

/// Content operations over a store adapter
pub struct ContentService {
    port: Arc<dyn ContentPort>,
}

impl ContentService {
    /// Creates the service over a content store adapter.
    pub fn new(port: Arc<dyn ContentPort>) -> Self {
        Self { port }
    }

    // ------------------------------------------------------------------
    // Public site reads
    // ------------------------------------------------------------------

    /// Returns the published documents of a kind, in display order.
    ///
    /// Falls back to the built-in sample records when the store has
    /// nothing published of this kind.
    pub async fn published(&self, kind: ContentKind) -> Result<Vec<ContentDoc>, ContentError> {
        let docs = self
            .port
            .fetch(ContentQuery::of_kind(kind).published())
            .await?;
        if docs.is_empty() {
            debug!(%kind, "no published content in the store, serving samples");
            return Ok(sample_docs(kind));
        }
        Ok(docs)
    }

    /// Returns one published document by slug.
    ///
    /// The sample fallback applies per kind: a slug miss against a
    /// store that has real content of the kind is a plain not-found,
    /// never a silent switch to sample content.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no published document of the
    /// kind carries the slug.
    pub async fn published_by_slug(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<ContentDoc, ContentError> {
        let mut docs = self
            .port
            .fetch(ContentQuery::of_kind(kind).published().by_slug(slug))
            .await?;
        if let Some(doc) = docs.pop() {
            return Ok(doc);
        }

        let any = self
            .port
            .fetch(ContentQuery::of_kind(kind).published().with_limit(1))
            .await?;
        if any.is_empty() {
            if let Some(doc) = sample_docs(kind)
                .into_iter()
                .find(|doc| doc.slug() == Some(slug))
            {
                return Ok(doc);
            }
        }
        Err(PortError::not_found("content document", slug).into())
    }

    /// Returns the site settings singleton, sample defaults included.
    pub async fn site_settings(&self) -> Result<SiteSettings, ContentError> {
        self.published(ContentKind::SiteSettings)
            .await?
            .into_iter()
            .find_map(|doc| match doc {
                ContentDoc::SiteSettings(settings) => Some(settings),
                _ => None,
            })
            .ok_or_else(|| PortError::not_found("site settings", "singleton").into())
    }

    /// Returns a published landing page by slug.
    pub async fn landing_page(&self, slug: &str) -> Result<LandingPage, ContentError> {
        match self
            .published_by_slug(ContentKind::LandingPage, slug)
            .await?
        {
            ContentDoc::LandingPage(page) => Ok(page),
            other => Err(PortError::transformation(format!(
                "expected a landing page for '{slug}', found {}",
                other.kind()
            ))
            .into()),
        }
    }

    // ------------------------------------------------------------------
    // Admin operations
    // ------------------------------------------------------------------

    /// Lists every document of a kind for the admin area, drafts
    /// included. Sample records appear here too when the store is
    /// empty, so editors see what the site is currently serving.
    pub async fn list_documents(&self, kind: ContentKind) -> Result<Vec<ContentDoc>, ContentError> {
        let docs = self.port.fetch(ContentQuery::of_kind(kind)).await?;
        if docs.is_empty() {
            debug!(%kind, "store holds no documents of this kind, listing samples");
            return Ok(sample_docs(kind));
        }
        Ok(docs)
    }

    /// Returns a single document by id. Sample ids resolve to the
    /// built-in records; they can be read, just never written.
    pub async fn get_document(&self, id: &DocId) -> Result<ContentDoc, ContentError> {
        match id {
            DocId::Sample(slug) => find_sample(slug)
                .ok_or_else(|| PortError::not_found("content document", slug).into()),
            DocId::Persisted(doc_id) => {
                let mut docs = self.port.fetch(ContentQuery::by_id(*doc_id)).await?;
                docs.pop()
                    .ok_or_else(|| PortError::not_found("content document", doc_id).into())
            }
        }
    }

    /// Validates and stores a new document.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::SampleReadOnly`] if the document
    /// carries a sample id, or [`ContentError::Rejected`] listing
    /// every validation issue; in both cases nothing is written.
    pub async fn create_document(&self, doc: ContentDoc) -> Result<ContentDoc, ContentError> {
        self.persisted_id(doc.id())?;
        let issues = doc.validation_issues();
        if !issues.is_empty() {
            return Err(ContentError::Rejected { issues });
        }
        self.port.create(&doc).await?;
        Ok(doc)
    }

    /// Applies a JSON merge patch to a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::SampleReadOnly`] for sample ids before
    /// any store call is made.
    pub async fn update_document(
        &self,
        id: &DocId,
        patch: Value,
    ) -> Result<ContentDoc, ContentError> {
        let doc_id = self.persisted_id(id)?;
        Ok(self.port.patch(doc_id, patch).await?)
    }

    /// Deletes a stored document. Sample ids are rejected; deleting a
    /// persisted id that no longer exists succeeds quietly.
    pub async fn delete_document(&self, id: &DocId) -> Result<(), ContentError> {
        let doc_id = self.persisted_id(id)?;
        Ok(self.port.delete(doc_id).await?)
    }

    /// Resolves a store id, refusing sample identities.
    fn persisted_id(&self, id: &DocId) -> Result<DocumentId, ContentError> {
        match id {
            DocId::Persisted(doc_id) => Ok(*doc_id),
            DocId::Sample(slug) => Err(ContentError::SampleReadOnly { slug: slug.clone() }),
        }
    }
}

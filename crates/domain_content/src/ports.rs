//! Content store port
//!
//! The headless CMS sits behind [`ContentPort`]: an opaque document
//! store offering fetch, create, patch, and delete. The domain never
//! sees the store's own query language; it expresses reads through
//! [`ContentQuery`] and lets the adapter translate.
//!
//! Updates are JSON merge patches. The admin UI sends only the fields
//! it changed, and [`apply_merge_patch`] folds them into the stored
//! document the same way in every adapter.

use async_trait::async_trait;
use serde_json::Value;

use core_kernel::ports::{DomainPort, PortError};
use core_kernel::DocumentId;

use crate::documents::{ContentDoc, ContentKind};

/// Query parameters for content reads
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    /// Match a single document by store id
    pub id: Option<DocumentId>,
    /// Restrict to one document kind
    pub kind: Option<ContentKind>,
    /// Match a single document by slug
    pub slug: Option<String>,
    /// Drop unpublished documents from the result
    pub published_only: bool,
    /// Maximum number of documents to return
    pub limit: Option<u32>,
}

impl ContentQuery {
    /// Everything of one kind, drafts included
    pub fn of_kind(kind: ContentKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// A single document by store id
    pub fn by_id(id: DocumentId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Keeps only published documents
    pub fn published(mut self) -> Self {
        self.published_only = true;
        self
    }

    /// Narrows to a single slug
    pub fn by_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Caps the result size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Port to the content store
#[async_trait]
pub trait ContentPort: DomainPort {
    /// Fetches documents matching the query, sorted by display order
    /// then creation time.
    async fn fetch(&self, query: ContentQuery) -> Result<Vec<ContentDoc>, PortError>;

    /// Stores a new document under the id it already carries.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Conflict`] if a document with that id
    /// already exists.
    async fn create(&self, doc: &ContentDoc) -> Result<(), PortError>;

    /// Applies a JSON merge patch to a stored document and returns the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotFound`] if no document has that id, or
    /// [`PortError::Validation`] if the patched document no longer
    /// decodes or tries to change its id or kind.
    async fn patch(&self, id: DocumentId, patch: Value) -> Result<ContentDoc, PortError>;

    /// Removes a document. Deleting an id that does not exist is not
    /// an error.
    async fn delete(&self, id: DocumentId) -> Result<(), PortError>;
}

/// Folds a JSON merge patch into a document.
///
/// Merge-patch semantics: object fields merge recursively, `null`
/// removes a field, and any other value replaces the original. The
/// patch may not move the document to a different id or kind.
///
/// # Errors
///
/// Returns [`PortError::Validation`] when the patched JSON no longer
/// decodes as a content document, or when the patch touches `id` or
/// `kind`.
pub fn apply_merge_patch(doc: &ContentDoc, patch: &Value) -> Result<ContentDoc, PortError> {
    let mut value = serde_json::to_value(doc)
        .map_err(|error| PortError::transformation(format!("document failed to encode: {error}")))?;
    merge_json(&mut value, patch);

    let patched: ContentDoc = serde_json::from_value(value).map_err(|error| {
        PortError::validation(format!("patched document no longer decodes: {error}"))
    })?;
    if patched.kind() != doc.kind() {
        return Err(PortError::validation("a patch cannot change a document's kind"));
    }
    if patched.id() != doc.id() {
        return Err(PortError::validation("a patch cannot change a document's id"));
    }
    Ok(patched)
}

fn merge_json(target: &mut Value, patch: &Value) {
    match patch {
        Value::Object(patch_map) => {
            if !target.is_object() {
                *target = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(target_map) = target {
                for (key, value) in patch_map {
                    if value.is_null() {
                        target_map.remove(key);
                    } else {
                        merge_json(
                            target_map.entry(key.clone()).or_insert(Value::Null),
                            value,
                        );
                    }
                }
            }
        }
        _ => *target = patch.clone(),
    }
}

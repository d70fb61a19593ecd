//! Content DTOs
//!
//! Content travels in its stored document shape, so there are no
//! per-kind request structs here. What this module owns is the path
//! grammar: kind segments, and document ids that are either a UUID
//! (persisted) or a slug (sample).

use chrono::Utc;
use domain_content::{ContentDoc, ContentKind, DocId, DocumentId};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Parses a kind path segment like `service` or `pricing-plan`
pub fn parse_kind(raw: &str) -> Result<ContentKind, ApiError> {
    ContentKind::ALL
        .into_iter()
        .find(|kind| kind.to_string() == raw)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown content kind '{raw}'")))
}

/// Parses a document id path segment: UUIDs address stored documents,
/// anything else is treated as a sample slug.
pub fn parse_doc_id(raw: &str) -> DocId {
    match Uuid::parse_str(raw) {
        Ok(uuid) => DocId::Persisted(DocumentId::from(uuid)),
        Err(_) => DocId::sample(raw),
    }
}

/// Assembles a full document from an admin create request.
///
/// The caller sends the fields; the server owns identity and
/// timestamps, and the kind comes from the route. Anything the client
/// put in those slots is discarded.
pub fn build_document(kind: ContentKind, body: Value) -> Result<ContentDoc, ApiError> {
    let mut body = body;
    let map = body
        .as_object_mut()
        .ok_or_else(|| ApiError::BadRequest("document body must be a JSON object".to_string()))?;

    let id = serde_json::to_value(DocId::persisted())
        .map_err(|e| ApiError::Internal(format!("failed to encode a fresh document id: {e}")))?;
    let now = serde_json::to_value(Utc::now())
        .map_err(|e| ApiError::Internal(format!("failed to encode a timestamp: {e}")))?;

    map.insert("kind".to_string(), Value::String(kind.to_string()));
    map.insert("id".to_string(), id);
    map.insert("created_at".to_string(), now.clone());
    map.insert("updated_at".to_string(), now);

    serde_json::from_value(body).map_err(|e| {
        ApiError::Validation(format!("document does not match the '{kind}' shape: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_segments_parse_in_kebab_case() {
        assert_eq!(parse_kind("service").unwrap(), ContentKind::Service);
        assert_eq!(parse_kind("pricing-plan").unwrap(), ContentKind::PricingPlan);
        assert!(parse_kind("blog-post").is_err());
    }

    #[test]
    fn uuid_segments_address_stored_documents() {
        let id = parse_doc_id("f47ac10b-58cc-4372-a567-0e02b2c3d479");
        assert!(matches!(id, DocId::Persisted(_)));

        let id = parse_doc_id("sample-web-design");
        assert_eq!(id, DocId::sample("sample-web-design"));
    }

    #[test]
    fn build_document_owns_identity_and_timestamps() {
        let doc = build_document(
            ContentKind::Service,
            json!({
                "id": {"source": "sample", "id": "smuggled"},
                "slug": "web-design",
                "title": "Web design",
                "summary": "Sites that sell",
                "published": true
            }),
        )
        .unwrap();

        assert!(!doc.is_sample());
        assert_eq!(doc.kind(), ContentKind::Service);
        assert_eq!(doc.slug(), Some("web-design"));
    }

    #[test]
    fn build_document_rejects_shape_mismatches() {
        // A service needs a title; leaving it out is a validation error
        let err = build_document(ContentKind::Service, json!({"slug": "web-design"}));
        assert!(matches!(err, Err(ApiError::Validation(_))));

        let err = build_document(ContentKind::Service, json!([1, 2, 3]));
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
    }
}

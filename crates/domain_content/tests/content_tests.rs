//! Comprehensive tests for the content domain
//!
//! Covers the document model and its JSON shape, the built-in sample
//! catalog, merge-patch behavior, and the service rules: sample
//! fallback on empty stores and the read-only guard on sample ids.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use core_kernel::ports::{DomainPort, PortError};
use core_kernel::{DocId, DocumentId};
use domain_content::{
    apply_merge_patch, sample_docs, ContentDoc, ContentError, ContentKind, ContentPort,
    ContentQuery, ContentService, PageSection, PortfolioProject, ServiceOffering, SiteSettings,
    Testimonial,
};

// ============================================================
// Shared fixtures
// ============================================================

/// Plain in-memory content store for exercising the service rules.
#[derive(Default)]
struct MemoryContent {
    docs: Mutex<HashMap<DocumentId, ContentDoc>>,
}

impl DomainPort for MemoryContent {}

#[async_trait]
impl ContentPort for MemoryContent {
    async fn fetch(&self, query: ContentQuery) -> Result<Vec<ContentDoc>, PortError> {
        let docs = self.docs.lock().unwrap();
        let mut matches: Vec<ContentDoc> = docs
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
        matches.sort_by_key(|doc| doc.display_order());
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
        let mut docs = self.docs.lock().unwrap();
        if docs.contains_key(&id) {
            return Err(PortError::conflict(format!("document {id} already exists")));
        }
        docs.insert(id, doc.clone());
        Ok(())
    }

    async fn patch(&self, id: DocumentId, patch: Value) -> Result<ContentDoc, PortError> {
        let mut docs = self.docs.lock().unwrap();
        let doc = docs
            .get(&id)
            .ok_or_else(|| PortError::not_found("content document", id))?;
        let patched = apply_merge_patch(doc, &patch)?;
        docs.insert(id, patched.clone());
        Ok(patched)
    }

    async fn delete(&self, id: DocumentId) -> Result<(), PortError> {
        self.docs.lock().unwrap().remove(&id);
        Ok(())
    }
}

fn content_service() -> ContentService {
    ContentService::new(Arc::new(MemoryContent::default()))
}

fn offering(slug: &str, order: i32, published: bool) -> ContentDoc {
    let now = Utc::now();
    ContentDoc::Service(ServiceOffering {
        id: DocId::persisted(),
        slug: slug.to_string(),
        title: format!("Service {slug}"),
        summary: "What we do and how we do it.".to_string(),
        body: None,
        icon: None,
        display_order: order,
        published,
        created_at: now,
        updated_at: now,
    })
}

fn testimonial(author: &str, order: i32) -> ContentDoc {
    let now = Utc::now();
    ContentDoc::Testimonial(Testimonial {
        id: DocId::persisted(),
        author: author.to_string(),
        company: None,
        body: "Worked with them twice, would again.".to_string(),
        display_order: order,
        published: true,
        created_at: now,
        updated_at: now,
    })
}

// ============================================================
// Document model
// ============================================================

mod document_model_tests {
    use super::*;

    #[test]
    fn test_docs_serialize_with_a_kind_tag() {
        let doc = offering("web-design", 1, true);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["kind"], "service");
        assert_eq!(value["slug"], "web-design");
        assert_eq!(value["id"]["source"], "persisted");
    }

    #[test]
    fn test_sample_ids_serialize_with_their_slug() {
        let doc = sample_docs(ContentKind::Service).remove(0);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["id"]["source"], "sample");
        assert_eq!(value["id"]["id"], "sample-web-design");
    }

    #[test]
    fn test_optional_fields_may_be_absent_in_stored_json() {
        let value = json!({
            "kind": "portfolio-project",
            "id": { "source": "persisted", "id": "7f1aa815-4f9c-4f42-bb7a-1f8cc2d46f6f" },
            "slug": "old-project",
            "title": "Old Project",
            "summary": "Delivered before the redesign.",
            "created_at": "2024-03-01T00:00:00Z",
            "updated_at": "2024-03-01T00:00:00Z"
        });

        let doc: ContentDoc = serde_json::from_value(value).unwrap();
        match doc {
            ContentDoc::PortfolioProject(PortfolioProject {
                client_name,
                services,
                display_order,
                published,
                ..
            }) => {
                assert_eq!(client_name, None);
                assert!(services.is_empty());
                assert_eq!(display_order, 0);
                assert!(!published);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_validation_collects_every_missing_field() {
        let now = Utc::now();
        let doc = ContentDoc::SiteSettings(SiteSettings {
            id: DocId::persisted(),
            site_title: String::new(),
            tagline: None,
            contact_email: " ".to_string(),
            phone: None,
            address: None,
            default_tax: Default::default(),
            created_at: now,
            updated_at: now,
        });

        assert_eq!(doc.validation_issues().len(), 2);
    }
}

// ============================================================
// Sample catalog
// ============================================================

mod sample_catalog_tests {
    use super::*;

    #[test]
    fn test_every_kind_ships_sample_content() {
        for kind in ContentKind::ALL {
            let docs = sample_docs(kind);
            assert!(!docs.is_empty(), "missing samples for {kind}");
            for doc in docs {
                assert!(doc.is_sample());
                assert!(doc.is_published());
                assert!(doc.validation_issues().is_empty());
            }
        }
    }

    #[test]
    fn test_sample_settings_carry_usable_tax_defaults() {
        let settings = sample_docs(ContentKind::SiteSettings).remove(0);
        match settings {
            ContentDoc::SiteSettings(settings) => {
                assert!(settings.default_tax.tax_enabled);
                assert_eq!(settings.default_tax.tax_rate_percent, dec!(8.25));
                assert!(settings.default_tax.data_processing_exemption);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_both_landing_pages_are_brand_complete() {
        for doc in sample_docs(ContentKind::LandingPage) {
            match doc {
                ContentDoc::LandingPage(page) => {
                    assert!(!page.brand_name.is_empty());
                    assert!(!page.hero_heading.is_empty());
                    assert!(!page.contact_email.is_empty());
                }
                other => panic!("wrong variant: {other:?}"),
            }
        }
    }
}

// ============================================================
// Merge patch
// ============================================================

mod merge_patch_tests {
    use super::*;

    #[test]
    fn test_patch_touches_only_named_fields() {
        let doc = offering("web", 3, true);
        let patched =
            apply_merge_patch(&doc, &json!({ "summary": "Rewritten summary." })).unwrap();

        match patched {
            ContentDoc::Service(offering) => {
                assert_eq!(offering.summary, "Rewritten summary.");
                assert_eq!(offering.display_order, 3);
                assert!(offering.published);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_arrays_replace_wholesale() {
        let now = Utc::now();
        let doc = ContentDoc::PortfolioProject(PortfolioProject {
            id: DocId::persisted(),
            slug: "shop".to_string(),
            title: "Shop".to_string(),
            client_name: None,
            summary: "E-commerce build.".to_string(),
            services: vec!["web".to_string(), "seo".to_string()],
            image_url: None,
            display_order: 1,
            published: true,
            created_at: now,
            updated_at: now,
        });

        let patched = apply_merge_patch(&doc, &json!({ "services": ["branding"] })).unwrap();
        match patched {
            ContentDoc::PortfolioProject(project) => {
                assert_eq!(project.services, vec!["branding".to_string()]);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_nested_sections_replace_as_a_unit() {
        let page = sample_docs(ContentKind::LandingPage).remove(0);
        let patched = apply_merge_patch(
            &page,
            &json!({ "sections": [
                { "heading": "Pricing", "body": "Flat monthly rate." },
                { "heading": "Contact", "body": "Write to us." }
            ]}),
        )
        .unwrap();

        match patched {
            ContentDoc::LandingPage(page) => {
                assert_eq!(page.sections.len(), 2);
                assert_eq!(
                    page.sections[0],
                    PageSection {
                        heading: "Pricing".to_string(),
                        body: "Flat monthly rate.".to_string(),
                    }
                );
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_patch_may_not_change_identity_or_kind() {
        let doc = offering("web", 1, true);

        let kind_change = apply_merge_patch(&doc, &json!({ "kind": "testimonial" }));
        assert!(kind_change.is_err());

        let id_change = apply_merge_patch(
            &doc,
            &json!({ "id": { "source": "persisted", "id": "0b879918-74ce-4060-b355-d6b8b7cd9c35" } }),
        );
        assert!(id_change.is_err());
    }
}

// ============================================================
// Service rules
// ============================================================

mod service_rules_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_serves_complete_sample_site() {
        let service = content_service();

        for kind in ContentKind::ALL {
            let docs = service.published(kind).await.unwrap();
            assert!(!docs.is_empty(), "public site empty for {kind}");
            assert!(docs.iter().all(|doc| doc.is_sample()));
        }
    }

    #[tokio::test]
    async fn test_real_content_displaces_samples_kind_by_kind() {
        let service = content_service();
        service
            .create_document(testimonial("Dana", 1))
            .await
            .unwrap();

        let testimonials = service.published(ContentKind::Testimonial).await.unwrap();
        assert_eq!(testimonials.len(), 1);
        assert!(!testimonials[0].is_sample());

        // untouched kinds keep the fallback
        let services = service.published(ContentKind::Service).await.unwrap();
        assert!(services.iter().all(|doc| doc.is_sample()));
    }

    #[tokio::test]
    async fn test_published_docs_come_back_in_display_order() {
        let service = content_service();
        service
            .create_document(offering("third", 3, true))
            .await
            .unwrap();
        service
            .create_document(offering("first", 1, true))
            .await
            .unwrap();
        service
            .create_document(offering("second", 2, true))
            .await
            .unwrap();

        let docs = service.published(ContentKind::Service).await.unwrap();
        let slugs: Vec<_> = docs.iter().filter_map(|doc| doc.slug()).collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_sample_writes_are_rejected_as_read_only() {
        let service = content_service();
        let sample_id = DocId::sample("sample-web-design");

        let patch = service
            .update_document(&sample_id, json!({ "title": "Mine now" }))
            .await;
        assert!(matches!(patch, Err(ContentError::SampleReadOnly { .. })));

        let delete = service.delete_document(&sample_id).await;
        assert!(matches!(delete, Err(ContentError::SampleReadOnly { .. })));

        // the sample record is still served afterwards
        let docs = service.published(ContentKind::Service).await.unwrap();
        assert!(docs.iter().any(|doc| doc.slug() == Some("sample-web-design")));
    }

    #[tokio::test]
    async fn test_admin_edit_cycle_end_to_end() {
        let service = content_service();
        let created = service
            .create_document(offering("web", 1, false))
            .await
            .unwrap();
        let id = created.id().clone();

        // publish via patch
        let published = service
            .update_document(&id, json!({ "published": true }))
            .await
            .unwrap();
        assert!(published.is_published());

        // now live on the public site
        let live = service
            .published_by_slug(ContentKind::Service, "web")
            .await
            .unwrap();
        assert_eq!(live.id(), &id);

        service.delete_document(&id).await.unwrap();
        let gone = service.published(ContentKind::Service).await.unwrap();
        assert!(gone.iter().all(|doc| doc.is_sample()));
    }

    #[tokio::test]
    async fn test_site_settings_singleton_prefers_the_store() {
        let service = content_service();
        let now = Utc::now();
        service
            .create_document(ContentDoc::SiteSettings(SiteSettings {
                id: DocId::persisted(),
                site_title: "Bluebonnet Digital".to_string(),
                tagline: None,
                contact_email: "hello@bluebonnet.example".to_string(),
                phone: None,
                address: None,
                default_tax: domain_content::DefaultTaxSettings {
                    tax_enabled: true,
                    tax_rate_percent: dec!(6.25),
                    data_processing_exemption: false,
                },
                created_at: now,
                updated_at: now,
            }))
            .await
            .unwrap();

        let settings = service.site_settings().await.unwrap();
        assert_eq!(settings.site_title, "Bluebonnet Digital");
        assert_eq!(settings.default_tax.tax_rate_percent, dec!(6.25));
        assert!(!settings.id.is_sample());
    }
}

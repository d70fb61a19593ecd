//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidental mixing of different identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Client domain identifiers
define_id!(ClientId, "CLI");

// Billing domain identifiers
define_id!(CatalogItemId, "CAT");
define_id!(QuoteId, "QUO");
define_id!(InvoiceId, "INV");
define_id!(LineItemKey, "LIN");

// Content domain identifiers
define_id!(DocumentId, "DOC");

// Generic identifiers
define_id!(AuditEventId, "AUD");

/// Identity of a content record as served to the site.
///
/// Public pages fall back to built-in sample records until an editor
/// has published real content. Carrying that distinction in the type
/// keeps sample records out of the store: a mutation against a
/// `Sample` id is rejected before it reaches any port, instead of
/// being detected by sniffing a string prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "id", rename_all = "snake_case")]
pub enum DocId {
    /// A record that lives in the document store.
    Persisted(DocumentId),
    /// A built-in placeholder, keyed by slug.
    Sample(String),
}

impl DocId {
    /// Creates the id for a freshly persisted record.
    pub fn persisted() -> Self {
        DocId::Persisted(DocumentId::new())
    }

    /// Creates a sample-record id from its slug.
    pub fn sample(slug: impl Into<String>) -> Self {
        DocId::Sample(slug.into())
    }

    pub fn is_sample(&self) -> bool {
        matches!(self, DocId::Sample(_))
    }

    /// Returns the store id, or `None` for sample records.
    pub fn as_persisted(&self) -> Option<DocumentId> {
        match self {
            DocId::Persisted(id) => Some(*id),
            DocId::Sample(_) => None,
        }
    }
}

impl From<DocumentId> for DocId {
    fn from(id: DocumentId) -> Self {
        DocId::Persisted(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Persisted(id) => write!(f, "{id}"),
            DocId::Sample(slug) => write!(f, "{slug}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_id_display() {
        let id = QuoteId::new();
        let display = id.to_string();
        assert!(display.starts_with("QUO-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = InvoiceId::new();
        let parsed: InvoiceId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let client_id = ClientId::from(uuid);
        let back: Uuid = client_id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_doc_id_sample_never_persisted() {
        let id = DocId::sample("sample-hero-main");
        assert!(id.is_sample());
        assert_eq!(id.as_persisted(), None);
        assert_eq!(id.to_string(), "sample-hero-main");
    }

    #[test]
    fn test_doc_id_serde_tagging() {
        let id = DocId::sample("about");
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["source"], "sample");
        assert_eq!(json["id"], "about");

        let back: DocId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }
}

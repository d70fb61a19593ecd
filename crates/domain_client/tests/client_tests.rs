//! Comprehensive tests for domain_client

use domain_client::{Client, ClientDraft, ClientError};

// ============================================================================
// Record Lifecycle Tests
// ============================================================================

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_minimal_record_grows_over_time() {
        // Opened from a phone call with just a name...
        let mut client = Client::from_draft(ClientDraft::named("Dan Archer")).unwrap();
        assert!(client.email.is_none());

        // ...and completed once the engagement letter goes out.
        let full = ClientDraft::named("Dan Archer")
            .with_company("Archer Roofing")
            .with_email("dan@archerroofing.com");
        client.apply_draft(full).unwrap();

        assert_eq!(client.company.as_deref(), Some("Archer Roofing"));
        assert!(client.updated_at >= client.created_at);
    }

    #[test]
    fn test_all_issues_are_reported_at_once() {
        let draft = ClientDraft {
            name: " ".to_string(),
            email: Some("nope".to_string()),
            ..Default::default()
        };

        match Client::from_draft(draft).unwrap_err() {
            ClientError::Rejected { issues } => {
                assert_eq!(issues.len(), 2);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}

// ============================================================================
// Wire Format Tests
// ============================================================================

mod wire_format_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_deserializes_with_missing_optional_fields() {
        let draft: ClientDraft = serde_json::from_value(json!({
            "name": "Maria Flores"
        }))
        .unwrap();

        assert_eq!(draft.name, "Maria Flores");
        assert!(draft.email.is_none());
        assert!(draft.issues().is_empty());
    }

    #[test]
    fn test_client_round_trips_through_json() {
        let client = Client::from_draft(
            ClientDraft::named("Maria Flores").with_email("maria@example.com"),
        )
        .unwrap();

        let encoded = serde_json::to_string(&client).unwrap();
        let decoded: Client = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, client);
    }
}

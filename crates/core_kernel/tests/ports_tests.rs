//! Unit tests for the port error taxonomy
//!
//! Tests cover error construction, classification helpers, and the
//! display formats the API layer depends on.

use core_kernel::{PortError, QuoteId};

mod classification {
    use super::*;

    #[test]
    fn test_not_found_is_not_transient() {
        let error = PortError::not_found("Invoice", "INV-42");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
    }

    #[test]
    fn test_transient_variants() {
        let transient: Vec<PortError> = vec![
            PortError::connection("connection refused"),
            PortError::Timeout {
                operation: "save_quote".into(),
                duration_ms: 3000,
            },
            PortError::ServiceUnavailable {
                service: "document-store".into(),
            },
        ];
        for error in transient {
            assert!(error.is_transient(), "{error} should be transient");
        }
    }

    #[test]
    fn test_permanent_variants() {
        let permanent: Vec<PortError> = vec![
            PortError::validation("quantity must be positive"),
            PortError::conflict("document changed underneath the update"),
            PortError::transformation("stored quote is missing line items"),
            PortError::internal("poisoned lock"),
        ];
        for error in permanent {
            assert!(!error.is_transient(), "{error} should not be transient");
        }
    }
}

mod display {
    use super::*;

    #[test]
    fn test_not_found_includes_entity_and_id() {
        let id = QuoteId::new();
        let error = PortError::not_found("Quote", id);
        let message = error.to_string();
        assert!(message.contains("Quote"));
        assert!(message.contains(&id.to_string()));
    }

    #[test]
    fn test_validation_field_is_carried() {
        let error = PortError::validation_field("must be a valid email", "email");
        match error {
            PortError::Validation { message, field } => {
                assert_eq!(message, "must be a valid email");
                assert_eq!(field.as_deref(), Some("email"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_timeout_message_format() {
        let error = PortError::Timeout {
            operation: "list_documents".into(),
            duration_ms: 5000,
        };
        assert_eq!(
            error.to_string(),
            "Timeout after 5000ms: list_documents"
        );
    }
}

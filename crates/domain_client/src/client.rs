//! Client entity
//!
//! A client is the billing party quotes and invoices point at: an
//! agency customer with a required name and whatever contact detail
//! has been collected so far. Everything except the name is optional,
//! so a record can be created from nothing more than a first phone
//! call and filled in later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use core_kernel::ClientId;

use crate::error::ClientError;

/// The editable fields of a client record
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClientDraft {
    /// Display name, the only required field
    pub name: String,
    /// Company the contact belongs to
    #[serde(default)]
    pub company: Option<String>,
    /// Billing e-mail; must be well-formed when present
    #[serde(default)]
    #[validate(email(message = "e-mail address is not valid"))]
    pub email: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address as free-form text
    #[serde(default)]
    pub address: Option<String>,
    /// Internal notes, not shown to the client
    #[serde(default)]
    pub notes: Option<String>,
}

impl ClientDraft {
    /// Creates a draft carrying only the required name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the billing e-mail
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the company name
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Returns every problem that blocks saving; empty means saveable.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push("a client name is required".to_string());
        }
        if let Err(errors) = self.validate() {
            issues.extend(flatten_errors(&errors));
        }
        issues
    }
}

fn flatten_errors(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid value"),
            })
        })
        .collect()
}

/// An agency customer that can be billed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Display name
    pub name: String,
    /// Company the contact belongs to
    pub company: Option<String>,
    /// Billing e-mail
    pub email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Postal address as free-form text
    pub address: Option<String>,
    /// Internal notes
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a client from a draft
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] listing every failed rule.
    pub fn from_draft(draft: ClientDraft) -> Result<Self, ClientError> {
        let issues = draft.issues();
        if !issues.is_empty() {
            return Err(ClientError::Rejected { issues });
        }
        let now = Utc::now();
        Ok(Self {
            id: ClientId::new(),
            name: draft.name,
            company: draft.company,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable fields from a new draft.
    ///
    /// Identity and `created_at` are kept; `updated_at` is refreshed.
    pub fn apply_draft(&mut self, draft: ClientDraft) -> Result<(), ClientError> {
        let issues = draft.issues();
        if !issues.is_empty() {
            return Err(ClientError::Rejected { issues });
        }
        self.name = draft.name;
        self.company = draft.company;
        self.email = draft.email;
        self.phone = draft.phone;
        self.address = draft.address;
        self.notes = draft.notes;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// True when the query text appears in the name, company, or e-mail
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .company
                .as_deref()
                .map_or(false, |company| company.to_lowercase().contains(&needle))
            || self
                .email
                .as_deref()
                .map_or(false, |email| email.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ClientDraft {
        ClientDraft::named("Maria Flores")
            .with_company("Flores Landscaping")
            .with_email("maria@floreslandscaping.com")
    }

    #[test]
    fn from_draft_populates_timestamps() {
        let client = Client::from_draft(valid_draft()).unwrap();
        assert_eq!(client.name, "Maria Flores");
        assert_eq!(client.created_at, client.updated_at);
    }

    #[test]
    fn name_only_draft_is_enough() {
        let client = Client::from_draft(ClientDraft::named("Walk-in")).unwrap();
        assert!(client.email.is_none());
        assert!(client.company.is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let error = Client::from_draft(ClientDraft::named("   ")).unwrap_err();
        match error {
            ClientError::Rejected { issues } => {
                assert!(issues.iter().any(|issue| issue.contains("name")));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        let draft = ClientDraft::named("Maria Flores").with_email("not-an-email");
        let error = Client::from_draft(draft).unwrap_err();
        match error {
            ClientError::Rejected { issues } => {
                assert!(issues.iter().any(|issue| issue.contains("email")));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn missing_email_is_not_an_error() {
        assert!(ClientDraft::named("Maria Flores").issues().is_empty());
    }

    #[test]
    fn apply_draft_keeps_identity() {
        let mut client = Client::from_draft(valid_draft()).unwrap();
        let id = client.id;
        let created_at = client.created_at;

        client
            .apply_draft(ClientDraft::named("Maria Flores-Reyes"))
            .unwrap();

        assert_eq!(client.id, id);
        assert_eq!(client.created_at, created_at);
        assert_eq!(client.name, "Maria Flores-Reyes");
        // The draft replaces optional fields wholesale.
        assert!(client.email.is_none());
    }

    #[test]
    fn apply_draft_rejection_leaves_the_record_alone() {
        let mut client = Client::from_draft(valid_draft()).unwrap();
        let before = client.clone();

        let result = client.apply_draft(ClientDraft::named(""));
        assert!(result.is_err());
        assert_eq!(client, before);
    }

    #[test]
    fn search_covers_name_company_and_email() {
        let client = Client::from_draft(valid_draft()).unwrap();
        assert!(client.matches_search("maria"));
        assert!(client.matches_search("LANDSCAPING"));
        assert!(client.matches_search("@floreslandscaping"));
        assert!(!client.matches_search("acme"));
    }
}

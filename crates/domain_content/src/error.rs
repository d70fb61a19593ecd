//! Content domain errors

use thiserror::Error;

use core_kernel::ports::PortError;

/// Errors from content operations
#[derive(Debug, Error)]
pub enum ContentError {
    /// The target is a built-in sample record, which cannot be edited
    /// or deleted; real content must be created in its place.
    #[error("sample content '{slug}' is read-only")]
    SampleReadOnly { slug: String },

    /// The document failed validation; nothing was written.
    #[error("content document rejected: {} validation issue(s)", .issues.len())]
    Rejected { issues: Vec<String> },

    /// The content store failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ContentError {
    /// True when the underlying cause is a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::Port(PortError::NotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_read_only_names_the_slug() {
        let error = ContentError::SampleReadOnly {
            slug: "sample-web-design".to_string(),
        };
        assert!(error.to_string().contains("sample-web-design"));
    }

    #[test]
    fn not_found_is_detected_through_the_port_wrapper() {
        let error = ContentError::from(PortError::not_found("content document", "DOC-123"));
        assert!(error.is_not_found());

        let rejected = ContentError::Rejected { issues: vec![] };
        assert!(!rejected.is_not_found());
    }
}

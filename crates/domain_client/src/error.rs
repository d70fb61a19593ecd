//! Client domain error types

use thiserror::Error;

use core_kernel::PortError;

/// Errors specific to the client domain
#[derive(Debug, Error)]
pub enum ClientError {
    /// The submitted record failed validation and was not saved
    #[error("client record rejected: {} validation issue(s)", .issues.len())]
    Rejected {
        /// Human-readable problems, one per failed rule
        issues: Vec<String>,
    },

    /// Error from the persistence layer
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClientError {
    /// True when the underlying cause is a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Port(port) if port.is_not_found())
    }
}

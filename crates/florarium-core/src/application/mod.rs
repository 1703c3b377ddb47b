//! Application layer - use cases and orchestration
//!
//! Implements the CQRS pattern with separate command and query handlers.
//! Handlers validate cross-record invariants (name uniqueness, referenced
//! record existence) and delegate persistence to the repository ports.

pub mod commands;
pub mod handlers;
pub mod queries;

use florarium_domain::DomainError;

/// Application Result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application-specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationError {
    /// Domain validation failure, propagated unchanged
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A referenced record does not exist
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"soil type"`
        kind: &'static str,
        /// Requested identifier
        id: i64,
    },
}

impl ApplicationError {
    /// Create a not-found error for the given entity kind
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    /// True for adapter failures the client cannot fix; everything else is
    /// a validation-class error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Storage(_)))
    }
}

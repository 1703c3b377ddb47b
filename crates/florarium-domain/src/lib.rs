//! Florarium Domain Layer - Pure Business Logic
//!
//! This crate contains the pure domain logic for the Florarium catalog
//! backend with no dependencies beyond serde and thiserror.
//!
//! ## Architecture
//!
//! Following Clean Architecture principles:
//! - **Value Objects**: Immutable, validated domain concepts (`Id`,
//!   `EntityName`, `Percentage`)
//! - **Entities**: Catalog records with identity (plants, containers,
//!   decorations, soil types, projects)
//! - **Aggregates**: The `SoilFormula` consistency unit
//! - **Listing**: The filter + sort + page contracts shared by every list
//!   operation

#![warn(missing_docs)]

pub mod aggregates;
pub mod entities;
pub mod listing;
pub mod value_objects;

// Re-export core types
pub use aggregates::{FormulaItem, SoilFormula};
pub use entities::{Container, Decoration, Plant, Project, SoilType};
pub use listing::{Page, PageRequest, SortDirection, SortSpec};
pub use value_objects::{EntityName, Percentage};

/// Domain Result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
///
/// Every expected failure of a public domain operation is an enumerated
/// variant here; operations never panic on bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Page number below 1
    #[error("Invalid page: {0} (must be >= 1)")]
    InvalidPage(i64),

    /// Page size outside the allowed bounds
    #[error("Invalid page size: {0} (must be between 1 and 25)")]
    InvalidPageSize(i64),

    /// Sort field not in the entity's allow-list
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// Name empty after trimming
    #[error("Name must not be empty")]
    EmptyName,

    /// Name longer than the allowed maximum after trimming
    #[error("Name too long: {0} chars (max {max})", max = value_objects::MAX_NAME_LEN)]
    NameTooLong(usize),

    /// Another record of the same kind already carries this name
    #[error("Name already in use: {0}")]
    DuplicateName(String),

    /// Formula created or updated with no items
    #[error("Formula must contain at least one item")]
    EmptyItemList,

    /// Percentage outside [1, 100]
    #[error("Invalid percentage: {0} (must be between 1 and 100)")]
    InvalidPercentage(i64),

    /// Negative item order
    #[error("Invalid order: {0} (must be >= 0)")]
    InvalidOrder(i64),

    /// Non-positive identifier
    #[error("Invalid identifier: {0} (must be > 0)")]
    InvalidId(i64),

    /// Multi-value filter with more entries than allowed
    #[error("Too many filter values: {0} (max {max})", max = listing::MAX_FILTER_VALUES)]
    TooManyFilterValues(usize),

    /// Soil type still referenced by at least one formula item
    #[error("Soil type {0} is referenced by a formula and cannot be deleted")]
    SoilTypeInUse(i64),

    /// Record does not exist (already deleted or never created)
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"soil formula"`
        kind: &'static str,
        /// Requested identifier
        id: i64,
    },

    /// Persistence adapter failure (unexpected, caller may retry or report)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Create a not-found error for the given entity kind
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        Self::NotFound { kind, id }
    }
}

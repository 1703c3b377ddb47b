//! Sort token parsing against per-entity allow-lists
//!
//! A sort token is a field name with an optional `-` (descending) or `+`
//! (ascending) prefix. Field names are matched case-insensitively against
//! the entity's compile-time allow-list; an unknown field is a validation
//! failure, never an ignored sort.

use crate::{DomainError, DomainResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest key first (`+field` or bare `field`)
    Ascending,
    /// Largest key first (`-field`)
    Descending,
}

/// Per-entity allow-listed sort field.
///
/// Each listable entity defines an enum of its sortable fields and maps the
/// lowercased token text onto it here. Fields are plain copyable enums, so
/// a parsed [`SortSpec`] can cross task boundaries.
pub trait SortField: Copy + Send + Sync + 'static {
    /// Resolve an already-lowercased field name, `None` if not allowed
    fn from_name(name: &str) -> Option<Self>;
}

/// Direction-qualified field reference produced by [`parse_sort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    /// Resolved allow-listed field
    pub field: F,
    /// Requested direction
    pub direction: SortDirection,
}

/// Parse an optional sort token.
///
/// `None` means unsorted: downstream iteration keeps store order, which is
/// not guaranteed stable across pages. At most one leading prefix is
/// stripped; `--name` therefore fails as field `-name`.
///
/// # Errors
///
/// [`DomainError::InvalidSortField`] when the field name is not in the
/// entity's allow-list.
pub fn parse_sort<F: SortField>(token: Option<&str>) -> DomainResult<Option<SortSpec<F>>> {
    let Some(token) = token else {
        return Ok(None);
    };

    let (direction, name) = match token.strip_prefix('-') {
        Some(rest) => (SortDirection::Descending, rest),
        None => (
            SortDirection::Ascending,
            token.strip_prefix('+').unwrap_or(token),
        ),
    };

    let normalized = name.to_lowercase();
    let field = F::from_name(&normalized)
        .ok_or_else(|| DomainError::InvalidSortField(normalized.clone()))?;

    Ok(Some(SortSpec { field, direction }))
}

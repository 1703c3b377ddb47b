//! Listing contracts shared by every list operation
//!
//! A list request flows through this module in a fixed order: the raw page
//! numbers are validated into a [`PageRequest`], the sort token is parsed
//! against the entity's allow-list into a [`SortSpec`], the entity filter
//! builds a [`Predicate`], and [`execute`] applies predicate, sort and page
//! to a snapshot of the store, yielding a [`Page`] envelope.

mod executor;
mod filter;
mod page;
mod sort;

pub use executor::{Listable, SortKey, execute};
pub use filter::{
    MAX_FILTER_VALUES, NameFilter, Predicate, ProjectFilter, SoilFormulaFilter,
};
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use sort::{SortDirection, SortField, SortSpec, parse_sort};

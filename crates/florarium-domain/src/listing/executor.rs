//! Query executor: predicate, then sort, then page
//!
//! Works on a snapshot of the store's rows. The filtered count is taken
//! before pagination so the envelope's `total` lets clients compute page
//! counts. Without an explicit sort the snapshot order is kept as-is; with
//! one, ties break on the row identifier ascending so repeated requests
//! paginate deterministically.

use super::filter::Predicate;
use super::page::{Page, PageRequest};
use super::sort::{SortDirection, SortField, SortSpec};
use std::cmp::Ordering;

/// Sort key resolved from an entity field.
///
/// A given field always yields the same variant across an entity set, so
/// cross-variant ordering never applies in practice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Numeric key (identifiers, volumes, item counts)
    Int(i64),
    /// Case-folded text key
    Text(String),
}

/// An entity the executor can sort and page.
pub trait Listable {
    /// The entity's allow-listed sort fields
    type Field: SortField;

    /// Resolve the key for one sortable field; text keys must already be
    /// case-folded
    fn sort_key(&self, field: Self::Field) -> SortKey;

    /// Raw identifier, used as the deterministic tie-break
    fn row_id(&self) -> i64;
}

/// Apply predicate, sort and page to a snapshot, producing a page envelope.
///
/// Requesting a page beyond the end yields empty items with the correct
/// `total`.
pub fn execute<T: Listable>(
    source: Vec<T>,
    predicate: &Predicate<T>,
    sort: Option<SortSpec<T::Field>>,
    page: &PageRequest,
) -> Page<T> {
    let mut filtered: Vec<T> = source
        .into_iter()
        .filter(|item| predicate.test(item))
        .collect();
    let total = filtered.len();

    if let Some(spec) = sort {
        filtered.sort_by(|a, b| {
            let primary = match spec.direction {
                SortDirection::Ascending => a.sort_key(spec.field).cmp(&b.sort_key(spec.field)),
                SortDirection::Descending => b.sort_key(spec.field).cmp(&a.sort_key(spec.field)),
            };
            match primary {
                Ordering::Equal => a.row_id().cmp(&b.row_id()),
                other => other,
            }
        });
    }

    let items: Vec<T> = filtered
        .into_iter()
        .skip(page.offset())
        .take(page.page_size() as usize)
        .collect();

    Page {
        items,
        page: page.page(),
        page_size: page.page_size(),
        total,
    }
}

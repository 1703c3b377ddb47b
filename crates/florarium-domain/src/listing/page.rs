//! Validated page request and the page envelope

use crate::{DomainError, DomainResult};
use serde::Serialize;

/// Page size applied when the client sends none
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Hard ceiling on the page size; larger requests fail, they are not clamped
pub const MAX_PAGE_SIZE: i64 = 25;

/// Validated `(page, page_size)` pair.
///
/// Pure validation with no side effects: defaults are filled in for missing
/// values, out-of-bounds values fail instead of being silently adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate raw page numbers, defaulting `page` to 1 and `page_size`
    /// to [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidPage`] for `page < 1` and
    /// [`DomainError::InvalidPageSize`] for `page_size` outside
    /// `1..=`[`MAX_PAGE_SIZE`].
    pub fn validate(page: Option<i64>, page_size: Option<i64>) -> DomainResult<Self> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(DomainError::InvalidPage(page));
        }
        // the raw value is i64; an out-of-range page must fail, not wrap
        let page = u32::try_from(page).map_err(|_| DomainError::InvalidPage(page))?;
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(DomainError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page,
            page_size: page_size as u32,
        })
    }

    /// 1-based page number
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page, `1..=25`
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip before this page starts
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

/// Page envelope returned by every list operation.
///
/// `total` counts the filtered set before pagination, so clients can compute
/// the page count. A page past the end carries empty `items` with the
/// correct `total`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items of this page, in listing order
    pub items: Vec<T>,
    /// 1-based page number echoed from the request
    pub page: u32,
    /// Page size echoed from the request
    pub page_size: u32,
    /// Filtered count before pagination
    pub total: usize,
}

impl<T> Page<T> {
    /// Map the item type while keeping the envelope metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }
}

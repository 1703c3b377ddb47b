//! Queries - read operations and their view models
//!
//! List queries carry the raw pagination/sort/filter values from the
//! endpoint layer; query handlers validate them into domain contracts
//! before touching the store.

use crate::ports::CatalogEntry;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// List plain catalog records with an optional name filter
#[derive(Debug, Clone)]
pub struct ListItems<E: CatalogEntry> {
    /// Case-insensitive substring filter on the name
    pub name: Option<String>,
    /// Raw sort token (`field`, `+field` or `-field`)
    pub sort_by: Option<String>,
    /// Raw 1-based page number
    pub page: Option<i64>,
    /// Raw page size
    pub page_size: Option<i64>,
    kind: PhantomData<E>,
}

impl<E: CatalogEntry> ListItems<E> {
    /// Query from the raw list parameters
    #[must_use]
    pub fn new(
        name: Option<String>,
        sort_by: Option<String>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        Self {
            name,
            sort_by,
            page,
            page_size,
            kind: PhantomData,
        }
    }
}

/// Fetch one plain catalog record by identifier
#[derive(Debug, Clone)]
pub struct GetItem<E: CatalogEntry> {
    /// Target identifier
    pub id: i64,
    kind: PhantomData<E>,
}

impl<E: CatalogEntry> GetItem<E> {
    /// Query for the given identifier
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            kind: PhantomData,
        }
    }
}

/// List soil formulas; the soil type filter has AND semantics
#[derive(Debug, Clone, Default)]
pub struct ListSoilFormulasQuery {
    /// Case-insensitive substring filter on the name
    pub name: Option<String>,
    /// Soil type IDs the formula's item set must cover entirely
    pub soil_type_ids: Vec<i64>,
    /// Raw sort token; allow-list is `name`, `itemcount`
    pub sort_by: Option<String>,
    /// Raw 1-based page number
    pub page: Option<i64>,
    /// Raw page size
    pub page_size: Option<i64>,
}

/// Fetch one formula with resolved soil type references
#[derive(Debug, Clone)]
pub struct GetSoilFormulaQuery {
    /// Target identifier
    pub id: i64,
}

/// List projects with optional name and container filters
#[derive(Debug, Clone, Default)]
pub struct ListProjectsQuery {
    /// Case-insensitive substring filter on the name
    pub name: Option<String>,
    /// Equality filter on the referenced container
    pub container_id: Option<i64>,
    /// Raw sort token; allow-list is `name`
    pub sort_by: Option<String>,
    /// Raw 1-based page number
    pub page: Option<i64>,
    /// Raw page size
    pub page_size: Option<i64>,
}

/// Resolved soil type reference carried by formula views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilTypeRef {
    /// Soil type identifier
    pub id: i64,
    /// Soil type display name at resolution time
    pub name: String,
}

/// One formula item with its soil type reference resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaItemView {
    /// Resolved `{ id, name }` pair instead of a bare identifier
    pub soil_type: SoilTypeRef,
    /// Share of this soil type
    pub percentage: u8,
    /// Display position within the formula
    pub order: u32,
}

/// Formula response shape produced by the query handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilFormulaView {
    /// Formula identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Items in stored order, soil types resolved
    pub items: Vec<FormulaItemView>,
}

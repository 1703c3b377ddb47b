//! Commands - write operations that change catalog state
//!
//! Field-level validation happens before a command is built (drafts carry
//! already-validated value objects); handlers add the cross-record checks.

use crate::ports::CatalogEntry;
use florarium_domain::aggregates::FormulaItem;
use florarium_domain::entities::ProjectDraft;
use florarium_domain::value_objects::EntityName;
use std::marker::PhantomData;

/// Create a plain catalog record from a validated draft
#[derive(Debug, Clone)]
pub struct CreateItem<E: CatalogEntry> {
    /// Field values of the new record
    pub draft: E::Draft,
}

/// Replace a catalog record's fields with a validated draft
#[derive(Debug, Clone)]
pub struct UpdateItem<E: CatalogEntry> {
    /// Target identifier
    pub id: i64,
    /// Replacement field values
    pub draft: E::Draft,
}

/// Delete a plain catalog record by identifier
#[derive(Debug, Clone)]
pub struct DeleteItem<E: CatalogEntry> {
    /// Target identifier
    pub id: i64,
    kind: PhantomData<E>,
}

impl<E: CatalogEntry> DeleteItem<E> {
    /// Command for the given identifier
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            kind: PhantomData,
        }
    }
}

/// Create a soil formula with an initial name and item list
#[derive(Debug, Clone)]
pub struct CreateSoilFormulaCommand {
    /// Formula name, unique case-insensitively across formulas
    pub name: EntityName,
    /// Validated items, at least one required
    pub items: Vec<FormulaItem>,
}

/// Replace a formula's name and entire item collection atomically
#[derive(Debug, Clone)]
pub struct UpdateSoilFormulaCommand {
    /// Target identifier
    pub id: i64,
    /// Replacement name
    pub name: EntityName,
    /// Replacement items; the old collection is discarded wholesale
    pub items: Vec<FormulaItem>,
}

/// Delete a formula, cascading its items
#[derive(Debug, Clone)]
pub struct DeleteSoilFormulaCommand {
    /// Target identifier
    pub id: i64,
}

/// Delete a soil type; fails while any formula still references it
#[derive(Debug, Clone)]
pub struct DeleteSoilTypeCommand {
    /// Target identifier
    pub id: i64,
}

/// Create a project; referenced container and placed items must exist
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    /// Field values of the new project
    pub draft: ProjectDraft,
}

/// Replace a project's fields; reference checks run again
#[derive(Debug, Clone)]
pub struct UpdateProjectCommand {
    /// Target identifier
    pub id: i64,
    /// Replacement field values
    pub draft: ProjectDraft,
}

//! Soil formula aggregate
//!
//! A formula is a named composition of weighted, ordered soil type
//! references. The aggregate exclusively owns its item list; soil types are
//! referenced, never owned, and survive formula deletion. Updates replace
//! the whole item collection in one operation - partial item edits do not
//! exist.
//!
//! Invariants held here: the item list is never empty, percentages stay in
//! `[1, 100]`, orders are non-negative and soil type references are
//! positive. The percentage sum is deliberately unconstrained and order
//! values may repeat.

use crate::listing::{Listable, SortField, SortKey};
use crate::value_objects::{EntityName, Percentage, SoilFormulaId, SoilTypeId};
use crate::{DomainError, DomainResult};
use serde::Serialize;
use std::collections::BTreeSet;

/// One weighted, ordered soil type reference within a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaItem {
    /// Referenced soil type
    pub soil_type_id: SoilTypeId,
    /// Share of this soil type
    pub percentage: Percentage,
    /// Display position within the formula
    pub order: u32,
}

impl FormulaItem {
    /// Validate one raw item.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] for a non-positive soil type reference,
    /// [`DomainError::InvalidPercentage`] outside `[1, 100]` and
    /// [`DomainError::InvalidOrder`] for a negative order.
    pub fn new(soil_type_id: i64, percentage: i64, order: i64) -> DomainResult<Self> {
        let soil_type_id = SoilTypeId::new(soil_type_id)?;
        let percentage = Percentage::new(percentage)?;
        let order = u32::try_from(order).map_err(|_| DomainError::InvalidOrder(order))?;
        Ok(Self {
            soil_type_id,
            percentage,
            order,
        })
    }
}

/// Named composition of weighted soil type references.
///
/// Lifecycle: built in memory, persisted by the store, deleted by
/// identifier with its items cascading. There is no publish state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilFormula {
    id: SoilFormulaId,
    name: EntityName,
    items: Vec<FormulaItem>,
}

impl SoilFormula {
    /// Assemble a formula from validated parts.
    ///
    /// # Errors
    ///
    /// [`DomainError::EmptyItemList`] when `items` is empty.
    pub fn new(
        id: SoilFormulaId,
        name: EntityName,
        items: Vec<FormulaItem>,
    ) -> DomainResult<Self> {
        if items.is_empty() {
            return Err(DomainError::EmptyItemList);
        }
        Ok(Self { id, name, items })
    }

    /// Replace the name and the entire item collection in one step.
    ///
    /// The old items are discarded wholesale; on failure nothing changes.
    ///
    /// # Errors
    ///
    /// [`DomainError::EmptyItemList`] when `items` is empty.
    pub fn replace(&mut self, name: EntityName, items: Vec<FormulaItem>) -> DomainResult<()> {
        if items.is_empty() {
            return Err(DomainError::EmptyItemList);
        }
        self.name = name;
        self.items = items;
        Ok(())
    }

    /// Identifier
    #[must_use]
    pub fn id(&self) -> SoilFormulaId {
        self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// Items in the order supplied at creation or last replace
    #[must_use]
    pub fn items(&self) -> &[FormulaItem] {
        &self.items
    }

    /// Number of items, the `itemcount` sort key
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Distinct soil types referenced by this formula
    #[must_use]
    pub fn soil_type_ids(&self) -> BTreeSet<SoilTypeId> {
        self.items.iter().map(|item| item.soil_type_id).collect()
    }

    /// Superset test backing the multi-value soil type filter: true only if
    /// every requested soil type appears among the items
    pub fn contains_all(&self, required: &[SoilTypeId]) -> bool {
        let present = self.soil_type_ids();
        required.iter().all(|id| present.contains(id))
    }
}

/// Sortable formula fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilFormulaSortField {
    /// Display name
    Name,
    /// Computed item count
    ItemCount,
}

impl SortField for SoilFormulaSortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "itemcount" => Some(Self::ItemCount),
            _ => None,
        }
    }
}

impl Listable for SoilFormula {
    type Field = SoilFormulaSortField;

    fn sort_key(&self, field: SoilFormulaSortField) -> SortKey {
        match field {
            SoilFormulaSortField::Name => SortKey::Text(self.name.normalized()),
            SoilFormulaSortField::ItemCount => SortKey::Int(self.item_count() as i64),
        }
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }
}

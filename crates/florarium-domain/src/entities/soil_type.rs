//! Soil type catalog record
//!
//! Soil types are referenced by formula items but never owned by a formula;
//! deleting a formula leaves its soil types untouched.

use crate::listing::{Listable, SortField, SortKey};
use crate::value_objects::{EntityName, SoilTypeId};
use serde::Serialize;

/// A soil component (substrate, sand, peat, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilType {
    /// Store-assigned identifier
    pub id: SoilTypeId,
    /// Display name
    pub name: EntityName,
    /// Free-form notes
    pub description: Option<String>,
}

/// Field values of a soil type before an identifier is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct SoilTypeDraft {
    /// Display name
    pub name: EntityName,
    /// Free-form notes
    pub description: Option<String>,
}

impl SoilType {
    /// Attach a store-assigned identifier to a draft
    #[must_use]
    pub fn from_draft(id: SoilTypeId, draft: SoilTypeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }
}

/// Sortable soil type fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilTypeSortField {
    /// Display name
    Name,
}

impl SortField for SoilTypeSortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

impl Listable for SoilType {
    type Field = SoilTypeSortField;

    fn sort_key(&self, field: SoilTypeSortField) -> SortKey {
        match field {
            SoilTypeSortField::Name => SortKey::Text(self.name.normalized()),
        }
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }
}

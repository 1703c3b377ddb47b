//! Plant catalog record

use crate::listing::{Listable, SortField, SortKey};
use crate::value_objects::{EntityName, PlantId};
use serde::Serialize;

/// A plant species in the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Store-assigned identifier
    pub id: PlantId,
    /// Common name
    pub name: EntityName,
    /// Latin (scientific) name
    pub name_latin: EntityName,
    /// Lower end of the tolerated temperature range, in °C
    pub min_temperature: Option<i32>,
    /// Upper end of the tolerated temperature range, in °C
    pub max_temperature: Option<i32>,
    /// Free-form care notes
    pub description: Option<String>,
}

/// Field values of a plant before an identifier is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct PlantDraft {
    /// Common name
    pub name: EntityName,
    /// Latin (scientific) name
    pub name_latin: EntityName,
    /// Lower end of the tolerated temperature range, in °C
    pub min_temperature: Option<i32>,
    /// Upper end of the tolerated temperature range, in °C
    pub max_temperature: Option<i32>,
    /// Free-form care notes
    pub description: Option<String>,
}

impl Plant {
    /// Attach a store-assigned identifier to a draft
    #[must_use]
    pub fn from_draft(id: PlantId, draft: PlantDraft) -> Self {
        Self {
            id,
            name: draft.name,
            name_latin: draft.name_latin,
            min_temperature: draft.min_temperature,
            max_temperature: draft.max_temperature,
            description: draft.description,
        }
    }
}

/// Sortable plant fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantSortField {
    /// Common name
    Name,
    /// Latin name
    NameLatin,
    /// Identifier
    Id,
}

impl SortField for PlantSortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "namelatin" => Some(Self::NameLatin),
            "id" => Some(Self::Id),
            _ => None,
        }
    }
}

impl Listable for Plant {
    type Field = PlantSortField;

    fn sort_key(&self, field: PlantSortField) -> SortKey {
        match field {
            PlantSortField::Name => SortKey::Text(self.name.normalized()),
            PlantSortField::NameLatin => SortKey::Text(self.name_latin.normalized()),
            PlantSortField::Id => SortKey::Int(self.id.get()),
        }
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }
}

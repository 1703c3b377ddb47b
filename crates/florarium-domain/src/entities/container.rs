//! Container catalog record

use crate::listing::{Listable, SortField, SortKey};
use crate::value_objects::{ContainerId, EntityName};
use serde::Serialize;

/// A tank, bowl or other vessel a project is built in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Store-assigned identifier
    pub id: ContainerId,
    /// Display name
    pub name: EntityName,
    /// Capacity in whole liters
    pub volume_liters: u32,
    /// Free-form notes
    pub description: Option<String>,
}

/// Field values of a container before an identifier is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDraft {
    /// Display name
    pub name: EntityName,
    /// Capacity in whole liters
    pub volume_liters: u32,
    /// Free-form notes
    pub description: Option<String>,
}

impl Container {
    /// Attach a store-assigned identifier to a draft
    #[must_use]
    pub fn from_draft(id: ContainerId, draft: ContainerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            volume_liters: draft.volume_liters,
            description: draft.description,
        }
    }
}

/// Sortable container fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSortField {
    /// Display name
    Name,
    /// Capacity
    Volume,
}

impl SortField for ContainerSortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "volume" => Some(Self::Volume),
            _ => None,
        }
    }
}

impl Listable for Container {
    type Field = ContainerSortField;

    fn sort_key(&self, field: ContainerSortField) -> SortKey {
        match field {
            ContainerSortField::Name => SortKey::Text(self.name.normalized()),
            ContainerSortField::Volume => SortKey::Int(i64::from(self.volume_liters)),
        }
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }
}

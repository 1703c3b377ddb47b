//! Decoration catalog record

use crate::listing::{Listable, SortField, SortKey};
use crate::value_objects::{DecorationId, EntityName};
use serde::Serialize;

/// Hardscape or ornament placed in a project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    /// Store-assigned identifier
    pub id: DecorationId,
    /// Display name
    pub name: EntityName,
    /// Free-form notes
    pub description: Option<String>,
}

/// Field values of a decoration before an identifier is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationDraft {
    /// Display name
    pub name: EntityName,
    /// Free-form notes
    pub description: Option<String>,
}

impl Decoration {
    /// Attach a store-assigned identifier to a draft
    #[must_use]
    pub fn from_draft(id: DecorationId, draft: DecorationDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }
}

/// Sortable decoration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationSortField {
    /// Display name
    Name,
}

impl SortField for DecorationSortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

impl Listable for Decoration {
    type Field = DecorationSortField;

    fn sort_key(&self, field: DecorationSortField) -> SortKey {
        match field {
            DecorationSortField::Name => SortKey::Text(self.name.normalized()),
        }
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }
}

//! Project record: a user-built layout placing catalog items on a canvas

use crate::listing::{Listable, SortField, SortKey};
use crate::value_objects::{ContainerId, EntityName, ProjectId};
use crate::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Kind of catalog item a placement refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    /// A plant from the catalog
    Plant,
    /// A decoration from the catalog
    Decoration,
}

/// One catalog item positioned on the project canvas.
///
/// The placement references the item; it never owns it. Coordinates are
/// canvas pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// What the placement points at
    pub kind: PlacementKind,
    /// Identifier of the referenced plant or decoration
    pub item_id: i64,
    /// Horizontal canvas position
    pub x: u32,
    /// Vertical canvas position
    pub y: u32,
}

impl Placement {
    /// Validate a raw placement.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] for a non-positive item identifier.
    pub fn new(kind: PlacementKind, item_id: i64, x: u32, y: u32) -> DomainResult<Self> {
        if item_id <= 0 {
            return Err(DomainError::InvalidId(item_id));
        }
        Ok(Self { kind, item_id, x, y })
    }
}

/// A user-built layout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Store-assigned identifier
    pub id: ProjectId,
    /// Display name
    pub name: EntityName,
    /// Container the layout is built in, if chosen
    pub container_id: Option<ContainerId>,
    /// Placed catalog items
    pub placements: Vec<Placement>,
}

/// Field values of a project before an identifier is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    /// Display name
    pub name: EntityName,
    /// Container the layout is built in, if chosen
    pub container_id: Option<ContainerId>,
    /// Placed catalog items
    pub placements: Vec<Placement>,
}

impl Project {
    /// Attach a store-assigned identifier to a draft
    #[must_use]
    pub fn from_draft(id: ProjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            container_id: draft.container_id,
            placements: draft.placements,
        }
    }
}

/// Sortable project fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSortField {
    /// Display name
    Name,
}

impl SortField for ProjectSortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

impl Listable for Project {
    type Field = ProjectSortField;

    fn sort_key(&self, field: ProjectSortField) -> SortKey {
        match field {
            ProjectSortField::Name => SortKey::Text(self.name.normalized()),
        }
    }

    fn row_id(&self) -> i64 {
        self.id.get()
    }
}

//! Catalog entities - records with identity
//!
//! These are the independently owned catalog records. The soil formula,
//! which owns child items, lives in [`crate::aggregates`].

pub mod container;
pub mod decoration;
pub mod plant;
pub mod project;
pub mod soil_type;

pub use container::{Container, ContainerDraft, ContainerSortField};
pub use decoration::{Decoration, DecorationDraft, DecorationSortField};
pub use plant::{Plant, PlantDraft, PlantSortField};
pub use project::{Placement, PlacementKind, Project, ProjectDraft, ProjectSortField};
pub use soil_type::{SoilType, SoilTypeDraft, SoilTypeSortField};

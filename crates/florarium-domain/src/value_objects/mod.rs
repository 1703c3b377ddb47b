//! Value objects - immutable, validated domain concepts

mod id;
mod name;
mod percentage;

pub use id::{
    ContainerId, ContainerMarker, DecorationId, DecorationMarker, Id, IdMarker, PlantId,
    PlantMarker, ProjectId, ProjectMarker, SoilFormulaId, SoilFormulaMarker, SoilTypeId,
    SoilTypeMarker,
};
pub use name::{EntityName, MAX_NAME_LEN};
pub use percentage::Percentage;

//! Repository ports for catalog persistence
//!
//! These ports define the application's requirements for data storage,
//! allowing infrastructure adapters to implement various backends. All
//! methods are async and return `DomainResult`; an adapter must never leave
//! partial state visible when a returned future is dropped before its
//! commit point.

use async_trait::async_trait;
use florarium_domain::DomainResult;
use florarium_domain::aggregates::{FormulaItem, SoilFormula};
use florarium_domain::entities::{
    Container, ContainerDraft, Decoration, DecorationDraft, Plant, PlantDraft, Project,
    ProjectDraft, SoilType, SoilTypeDraft,
};
use florarium_domain::listing::Listable;
use florarium_domain::value_objects::{
    ContainerId, DecorationId, EntityName, PlantId, ProjectId, SoilTypeId,
};

/// A catalog record the generic repository port can persist.
///
/// Binds an entity to its draft shape and names it for error messages, so
/// one repository implementation covers every plain catalog kind.
pub trait CatalogEntry: Listable + Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Field values before an identifier is assigned
    type Draft: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Entity kind for error messages, e.g. `"plant"`
    const KIND: &'static str;

    /// Attach a store-assigned identifier to a draft.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidId` if the store produced a non-positive
    /// identifier.
    fn assemble(id: i64, draft: Self::Draft) -> DomainResult<Self>;

    /// Display name of a persisted record
    fn name(&self) -> &EntityName;

    /// Display name of a draft, for the uniqueness guard
    fn draft_name(draft: &Self::Draft) -> &EntityName;
}

impl CatalogEntry for Plant {
    type Draft = PlantDraft;

    const KIND: &'static str = "plant";

    fn assemble(id: i64, draft: PlantDraft) -> DomainResult<Self> {
        Ok(Plant::from_draft(PlantId::new(id)?, draft))
    }

    fn name(&self) -> &EntityName {
        &self.name
    }

    fn draft_name(draft: &PlantDraft) -> &EntityName {
        &draft.name
    }
}

impl CatalogEntry for Container {
    type Draft = ContainerDraft;

    const KIND: &'static str = "container";

    fn assemble(id: i64, draft: ContainerDraft) -> DomainResult<Self> {
        Ok(Container::from_draft(ContainerId::new(id)?, draft))
    }

    fn name(&self) -> &EntityName {
        &self.name
    }

    fn draft_name(draft: &ContainerDraft) -> &EntityName {
        &draft.name
    }
}

impl CatalogEntry for Decoration {
    type Draft = DecorationDraft;

    const KIND: &'static str = "decoration";

    fn assemble(id: i64, draft: DecorationDraft) -> DomainResult<Self> {
        Ok(Decoration::from_draft(DecorationId::new(id)?, draft))
    }

    fn name(&self) -> &EntityName {
        &self.name
    }

    fn draft_name(draft: &DecorationDraft) -> &EntityName {
        &draft.name
    }
}

impl CatalogEntry for SoilType {
    type Draft = SoilTypeDraft;

    const KIND: &'static str = "soil type";

    fn assemble(id: i64, draft: SoilTypeDraft) -> DomainResult<Self> {
        Ok(SoilType::from_draft(SoilTypeId::new(id)?, draft))
    }

    fn name(&self) -> &EntityName {
        &self.name
    }

    fn draft_name(draft: &SoilTypeDraft) -> &EntityName {
        &draft.name
    }
}

impl CatalogEntry for Project {
    type Draft = ProjectDraft;

    const KIND: &'static str = "project";

    fn assemble(id: i64, draft: ProjectDraft) -> DomainResult<Self> {
        Ok(Project::from_draft(ProjectId::new(id)?, draft))
    }

    fn name(&self) -> &EntityName {
        &self.name
    }

    fn draft_name(draft: &ProjectDraft) -> &EntityName {
        &draft.name
    }
}

/// Repository port for plain catalog records.
///
/// `insert` and `update` must re-check name uniqueness inside the adapter's
/// commit boundary and surface a collision as `DomainError::DuplicateName`,
/// so the handler-level pre-check stays a fast path rather than the source
/// of truth.
#[async_trait]
pub trait CatalogRepository<E: CatalogEntry>: Send + Sync {
    /// Fetch one record by identifier
    async fn find(&self, id: i64) -> DomainResult<Option<E>>;

    /// Snapshot of every record, in storage order
    async fn list_all(&self) -> DomainResult<Vec<E>>;

    /// Persist a draft under a fresh identifier
    async fn insert(&self, draft: E::Draft) -> DomainResult<E>;

    /// Replace the record's fields with the draft's
    async fn update(&self, id: i64, draft: E::Draft) -> DomainResult<E>;

    /// Delete by identifier; `DomainError::NotFound` when absent
    async fn remove(&self, id: i64) -> DomainResult<()>;

    /// Lightweight existence check
    async fn exists(&self, id: i64) -> DomainResult<bool>;

    /// Uniqueness guard query: identifier of the record carrying this
    /// trimmed, case-folded name, optionally excluding one identifier for
    /// update-to-self checks
    async fn find_id_by_name(
        &self,
        normalized: &str,
        exclude: Option<i64>,
    ) -> DomainResult<Option<i64>>;
}

/// Repository port for the soil formula aggregate.
///
/// `replace_formula` swaps the name and the whole item collection in one
/// commit; a reader never observes a formula with zero items or a mixed
/// old/new item set.
#[async_trait]
pub trait SoilFormulaRepository: Send + Sync {
    /// Fetch one formula by identifier
    async fn find_formula(&self, id: i64) -> DomainResult<Option<SoilFormula>>;

    /// Snapshot of every formula, in storage order
    async fn list_formulas(&self) -> DomainResult<Vec<SoilFormula>>;

    /// Persist a new formula under a fresh identifier
    async fn insert_formula(
        &self,
        name: EntityName,
        items: Vec<FormulaItem>,
    ) -> DomainResult<SoilFormula>;

    /// Atomically replace the formula's name and entire item collection
    async fn replace_formula(
        &self,
        id: i64,
        name: EntityName,
        items: Vec<FormulaItem>,
    ) -> DomainResult<SoilFormula>;

    /// Delete by identifier, cascading the items; referenced soil types are
    /// untouched
    async fn remove_formula(&self, id: i64) -> DomainResult<()>;

    /// Uniqueness guard query over formula names
    async fn formula_id_by_name(
        &self,
        normalized: &str,
        exclude: Option<i64>,
    ) -> DomainResult<Option<i64>>;
}

//! Command handlers: uniqueness guard, reference checks, persistence

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use florarium_domain::DomainError;
use florarium_domain::aggregates::FormulaItem;
use florarium_domain::entities::{
    Container, Decoration, Plant, PlacementKind, Project, ProjectDraft, SoilType,
};
use florarium_domain::listing::Listable;
use tracing::{debug, info};

use crate::application::commands::{
    CreateItem, CreateProjectCommand, CreateSoilFormulaCommand, DeleteItem,
    DeleteSoilFormulaCommand, DeleteSoilTypeCommand, UpdateItem, UpdateProjectCommand,
    UpdateSoilFormulaCommand,
};
use crate::application::handlers::CommandHandler;
use crate::application::handlers::query_handlers::formula_view;
use crate::application::queries::SoilFormulaView;
use crate::application::{ApplicationError, ApplicationResult};
use crate::ports::{CatalogEntry, CatalogRepository, SoilFormulaRepository};

/// Generic create/update/delete handler for plain catalog records
pub struct CatalogCommandHandler<S> {
    repo: Arc<S>,
}

impl<S> CatalogCommandHandler<S> {
    /// Handler over the given store
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<E, S> CommandHandler<CreateItem<E>> for CatalogCommandHandler<S>
where
    E: CatalogEntry,
    S: CatalogRepository<E>,
{
    type Response = E;

    async fn handle(&self, command: CreateItem<E>) -> ApplicationResult<E> {
        let name = E::draft_name(&command.draft);
        if self
            .repo
            .find_id_by_name(&name.normalized(), None)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateName(name.as_str().to_string()).into());
        }

        let entity = self.repo.insert(command.draft).await?;
        info!(kind = E::KIND, id = entity.row_id(), "catalog record created");
        Ok(entity)
    }
}

#[async_trait]
impl<E, S> CommandHandler<UpdateItem<E>> for CatalogCommandHandler<S>
where
    E: CatalogEntry,
    S: CatalogRepository<E>,
{
    type Response = E;

    async fn handle(&self, command: UpdateItem<E>) -> ApplicationResult<E> {
        if !self.repo.exists(command.id).await? {
            return Err(ApplicationError::not_found(E::KIND, command.id));
        }

        let name = E::draft_name(&command.draft);
        if self
            .repo
            .find_id_by_name(&name.normalized(), Some(command.id))
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateName(name.as_str().to_string()).into());
        }

        let entity = self.repo.update(command.id, command.draft).await?;
        debug!(kind = E::KIND, id = command.id, "catalog record updated");
        Ok(entity)
    }
}

#[async_trait]
impl<E, S> CommandHandler<DeleteItem<E>> for CatalogCommandHandler<S>
where
    E: CatalogEntry,
    S: CatalogRepository<E>,
{
    type Response = ();

    async fn handle(&self, command: DeleteItem<E>) -> ApplicationResult<()> {
        self.repo.remove(command.id).await?;
        info!(kind = E::KIND, id = command.id, "catalog record deleted");
        Ok(())
    }
}

/// Soil type deletion with the referenced-by-formula guard.
///
/// Create and update go through [`CatalogCommandHandler`]; deletion is
/// special because a soil type still referenced by any formula item must
/// survive.
pub struct SoilTypeCommandHandler<S> {
    repo: Arc<S>,
}

impl<S> SoilTypeCommandHandler<S> {
    /// Handler over the given store
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<S> CommandHandler<DeleteSoilTypeCommand> for SoilTypeCommandHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    type Response = ();

    async fn handle(&self, command: DeleteSoilTypeCommand) -> ApplicationResult<()> {
        if !CatalogRepository::<SoilType>::exists(&*self.repo, command.id).await? {
            return Err(ApplicationError::not_found(SoilType::KIND, command.id));
        }

        let referenced = self
            .repo
            .list_formulas()
            .await?
            .iter()
            .any(|formula| formula.soil_type_ids().iter().any(|st| st.get() == command.id));
        if referenced {
            return Err(DomainError::SoilTypeInUse(command.id).into());
        }

        CatalogRepository::<SoilType>::remove(&*self.repo, command.id).await?;
        info!(id = command.id, "soil type deleted");
        Ok(())
    }
}

/// Command handler for the soil formula aggregate
pub struct SoilFormulaCommandHandler<S> {
    repo: Arc<S>,
}

impl<S> SoilFormulaCommandHandler<S> {
    /// Handler over the given store
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

impl<S> SoilFormulaCommandHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    /// Soil type existence is a hard precondition: a formula never persists
    /// a dangling reference. Returns the resolved names so the response view
    /// can be built from the write itself, without a re-read that could race
    /// a concurrent delete.
    async fn resolve_soil_types(
        &self,
        formula_items: &[FormulaItem],
    ) -> ApplicationResult<BTreeMap<i64, String>> {
        let distinct: BTreeSet<i64> = formula_items
            .iter()
            .map(|item| item.soil_type_id.get())
            .collect();
        let mut names = BTreeMap::new();
        for soil_type_id in distinct {
            let soil_type = CatalogRepository::<SoilType>::find(&*self.repo, soil_type_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found(SoilType::KIND, soil_type_id))?;
            names.insert(soil_type_id, soil_type.name.as_str().to_string());
        }
        Ok(names)
    }
}

#[async_trait]
impl<S> CommandHandler<CreateSoilFormulaCommand> for SoilFormulaCommandHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    type Response = SoilFormulaView;

    async fn handle(&self, command: CreateSoilFormulaCommand) -> ApplicationResult<SoilFormulaView> {
        if command.items.is_empty() {
            return Err(DomainError::EmptyItemList.into());
        }
        let names = self.resolve_soil_types(&command.items).await?;

        if self
            .repo
            .formula_id_by_name(&command.name.normalized(), None)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateName(command.name.as_str().to_string()).into());
        }

        let formula = self.repo.insert_formula(command.name, command.items).await?;
        info!(id = formula.id().get(), "soil formula created");
        Ok(formula_view(&formula, &names))
    }
}

#[async_trait]
impl<S> CommandHandler<UpdateSoilFormulaCommand> for SoilFormulaCommandHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    type Response = SoilFormulaView;

    async fn handle(&self, command: UpdateSoilFormulaCommand) -> ApplicationResult<SoilFormulaView> {
        if self.repo.find_formula(command.id).await?.is_none() {
            return Err(ApplicationError::not_found("soil formula", command.id));
        }
        if command.items.is_empty() {
            return Err(DomainError::EmptyItemList.into());
        }
        let names = self.resolve_soil_types(&command.items).await?;

        if self
            .repo
            .formula_id_by_name(&command.name.normalized(), Some(command.id))
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateName(command.name.as_str().to_string()).into());
        }

        let formula = self
            .repo
            .replace_formula(command.id, command.name, command.items)
            .await?;
        debug!(id = command.id, "soil formula replaced");
        Ok(formula_view(&formula, &names))
    }
}

#[async_trait]
impl<S> CommandHandler<DeleteSoilFormulaCommand> for SoilFormulaCommandHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    type Response = ();

    async fn handle(&self, command: DeleteSoilFormulaCommand) -> ApplicationResult<()> {
        self.repo.remove_formula(command.id).await?;
        info!(id = command.id, "soil formula deleted");
        Ok(())
    }
}

/// Command handler for projects; placements and the container reference
/// must point at existing catalog records
pub struct ProjectCommandHandler<S> {
    repo: Arc<S>,
}

impl<S> ProjectCommandHandler<S> {
    /// Handler over the given store
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

impl<S> ProjectCommandHandler<S>
where
    S: CatalogRepository<Project>
        + CatalogRepository<Plant>
        + CatalogRepository<Decoration>
        + CatalogRepository<Container>,
{
    async fn verify_references(&self, draft: &ProjectDraft) -> ApplicationResult<()> {
        if let Some(container_id) = draft.container_id {
            if !CatalogRepository::<Container>::exists(&*self.repo, container_id.get()).await? {
                return Err(ApplicationError::not_found(
                    Container::KIND,
                    container_id.get(),
                ));
            }
        }

        for placement in &draft.placements {
            let (kind, found) = match placement.kind {
                PlacementKind::Plant => (
                    Plant::KIND,
                    CatalogRepository::<Plant>::exists(&*self.repo, placement.item_id).await?,
                ),
                PlacementKind::Decoration => (
                    Decoration::KIND,
                    CatalogRepository::<Decoration>::exists(&*self.repo, placement.item_id).await?,
                ),
            };
            if !found {
                return Err(ApplicationError::not_found(kind, placement.item_id));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<S> CommandHandler<CreateProjectCommand> for ProjectCommandHandler<S>
where
    S: CatalogRepository<Project>
        + CatalogRepository<Plant>
        + CatalogRepository<Decoration>
        + CatalogRepository<Container>,
{
    type Response = Project;

    async fn handle(&self, command: CreateProjectCommand) -> ApplicationResult<Project> {
        self.verify_references(&command.draft).await?;

        let name = &command.draft.name;
        if CatalogRepository::<Project>::find_id_by_name(&*self.repo, &name.normalized(), None)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateName(name.as_str().to_string()).into());
        }

        let project = CatalogRepository::<Project>::insert(&*self.repo, command.draft).await?;
        info!(id = project.id.get(), "project created");
        Ok(project)
    }
}

#[async_trait]
impl<S> CommandHandler<UpdateProjectCommand> for ProjectCommandHandler<S>
where
    S: CatalogRepository<Project>
        + CatalogRepository<Plant>
        + CatalogRepository<Decoration>
        + CatalogRepository<Container>,
{
    type Response = Project;

    async fn handle(&self, command: UpdateProjectCommand) -> ApplicationResult<Project> {
        if !CatalogRepository::<Project>::exists(&*self.repo, command.id).await? {
            return Err(ApplicationError::not_found(Project::KIND, command.id));
        }
        self.verify_references(&command.draft).await?;

        let name = &command.draft.name;
        if CatalogRepository::<Project>::find_id_by_name(
            &*self.repo,
            &name.normalized(),
            Some(command.id),
        )
        .await?
        .is_some()
        {
            return Err(DomainError::DuplicateName(name.as_str().to_string()).into());
        }

        let project =
            CatalogRepository::<Project>::update(&*self.repo, command.id, command.draft).await?;
        debug!(id = command.id, "project updated");
        Ok(project)
    }
}

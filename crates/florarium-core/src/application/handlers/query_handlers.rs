//! Query handlers: list contracts and view resolution

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use florarium_domain::aggregates::{SoilFormula, SoilFormulaSortField};
use florarium_domain::entities::{Project, ProjectSortField, SoilType};
use florarium_domain::listing::{
    NameFilter, Page, PageRequest, Predicate, ProjectFilter, SoilFormulaFilter, execute,
    parse_sort,
};

use crate::application::handlers::QueryHandler;
use crate::application::queries::{
    FormulaItemView, GetItem, GetSoilFormulaQuery, ListItems, ListProjectsQuery,
    ListSoilFormulasQuery, SoilFormulaView, SoilTypeRef,
};
use crate::application::{ApplicationError, ApplicationResult};
use crate::ports::{CatalogEntry, CatalogRepository, SoilFormulaRepository};

/// Generic list/get handler for plain catalog records
pub struct CatalogQueryHandler<S> {
    repo: Arc<S>,
}

impl<S> CatalogQueryHandler<S> {
    /// Handler over the given store
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<E, S> QueryHandler<ListItems<E>> for CatalogQueryHandler<S>
where
    E: CatalogEntry,
    S: CatalogRepository<E>,
{
    type Response = Page<E>;

    async fn handle(&self, query: ListItems<E>) -> ApplicationResult<Page<E>> {
        let page = PageRequest::validate(query.page, query.page_size)?;
        let sort = parse_sort::<E::Field>(query.sort_by.as_deref())?;
        let name = NameFilter::new(query.name.as_deref());
        let predicate = Predicate::all().and(move |item: &E| name.matches(item.name()));

        let rows = self.repo.list_all().await?;
        Ok(execute(rows, &predicate, sort, &page))
    }
}

#[async_trait]
impl<E, S> QueryHandler<GetItem<E>> for CatalogQueryHandler<S>
where
    E: CatalogEntry,
    S: CatalogRepository<E>,
{
    type Response = E;

    async fn handle(&self, query: GetItem<E>) -> ApplicationResult<E> {
        self.repo
            .find(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(E::KIND, query.id))
    }
}

/// List/get handler for formulas; responses carry resolved soil type
/// `{ id, name }` pairs rather than bare identifiers
pub struct SoilFormulaQueryHandler<S> {
    repo: Arc<S>,
}

impl<S> SoilFormulaQueryHandler<S> {
    /// Handler over the given store
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

impl<S> SoilFormulaQueryHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    /// Resolve names for every soil type the given formulas reference.
    ///
    /// A reference to a vanished soil type is reported as not-found rather
    /// than silently dropped.
    async fn resolve_names(
        &self,
        formulas: &[SoilFormula],
    ) -> ApplicationResult<BTreeMap<i64, String>> {
        let mut names = BTreeMap::new();
        for formula in formulas {
            for soil_type_id in formula.soil_type_ids() {
                let id = soil_type_id.get();
                if names.contains_key(&id) {
                    continue;
                }
                let soil_type = CatalogRepository::<SoilType>::find(&*self.repo, id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found(SoilType::KIND, id))?;
                names.insert(id, soil_type.name.as_str().to_string());
            }
        }
        Ok(names)
    }
}

/// Project a formula onto its response shape using pre-resolved names
pub(crate) fn formula_view(formula: &SoilFormula, names: &BTreeMap<i64, String>) -> SoilFormulaView {
    SoilFormulaView {
        id: formula.id().get(),
        name: formula.name().as_str().to_string(),
        items: formula
            .items()
            .iter()
            .map(|item| FormulaItemView {
                soil_type: SoilTypeRef {
                    id: item.soil_type_id.get(),
                    name: names
                        .get(&item.soil_type_id.get())
                        .cloned()
                        .unwrap_or_default(),
                },
                percentage: item.percentage.get(),
                order: item.order,
            })
            .collect(),
    }
}

#[async_trait]
impl<S> QueryHandler<ListSoilFormulasQuery> for SoilFormulaQueryHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    type Response = Page<SoilFormulaView>;

    async fn handle(&self, query: ListSoilFormulasQuery) -> ApplicationResult<Page<SoilFormulaView>> {
        let page = PageRequest::validate(query.page, query.page_size)?;
        let sort = parse_sort::<SoilFormulaSortField>(query.sort_by.as_deref())?;
        let filter = SoilFormulaFilter::new(query.name.as_deref(), &query.soil_type_ids)?;

        let rows = self.repo.list_formulas().await?;
        let formulas = execute(rows, &filter.predicate(), sort, &page);

        let names = self.resolve_names(&formulas.items).await?;
        Ok(formulas.map(|formula| formula_view(&formula, &names)))
    }
}

#[async_trait]
impl<S> QueryHandler<GetSoilFormulaQuery> for SoilFormulaQueryHandler<S>
where
    S: CatalogRepository<SoilType> + SoilFormulaRepository,
{
    type Response = SoilFormulaView;

    async fn handle(&self, query: GetSoilFormulaQuery) -> ApplicationResult<SoilFormulaView> {
        let formula = self
            .repo
            .find_formula(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("soil formula", query.id))?;

        let names = self.resolve_names(std::slice::from_ref(&formula)).await?;
        Ok(formula_view(&formula, &names))
    }
}

/// List handler for projects; `GetItem<Project>` goes through
/// [`CatalogQueryHandler`]
pub struct ProjectQueryHandler<S> {
    repo: Arc<S>,
}

impl<S> ProjectQueryHandler<S> {
    /// Handler over the given store
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<S> QueryHandler<ListProjectsQuery> for ProjectQueryHandler<S>
where
    S: CatalogRepository<Project>,
{
    type Response = Page<Project>;

    async fn handle(&self, query: ListProjectsQuery) -> ApplicationResult<Page<Project>> {
        let page = PageRequest::validate(query.page, query.page_size)?;
        let sort = parse_sort::<ProjectSortField>(query.sort_by.as_deref())?;
        let filter = ProjectFilter::new(query.name.as_deref(), query.container_id)?;

        let rows = self.repo.list_all().await?;
        Ok(execute(rows, &filter.predicate(), sort, &page))
    }
}

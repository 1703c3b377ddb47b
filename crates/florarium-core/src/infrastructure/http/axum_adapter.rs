//! Axum HTTP adapter exposing the catalog under `/api`
//!
//! The endpoint layer parses raw query strings and request bodies into the
//! application's commands and queries; the core never sees HTTP. Every
//! validation-class failure maps to 400 with an `{ "error": ... }` body,
//! adapter failures to 500.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, Query, RawQuery, State},
    http::{Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use url::form_urlencoded;

use florarium_domain::DomainError;
use florarium_domain::aggregates::FormulaItem;
use florarium_domain::entities::{
    Container, ContainerDraft, Decoration, DecorationDraft, Placement, PlacementKind, Plant,
    PlantDraft, Project, ProjectDraft, SoilType, SoilTypeDraft,
};
use florarium_domain::listing::Page;
use florarium_domain::value_objects::{ContainerId, EntityName};

use crate::application::commands::{
    CreateItem, CreateProjectCommand, CreateSoilFormulaCommand, DeleteItem,
    DeleteSoilFormulaCommand, DeleteSoilTypeCommand, UpdateItem, UpdateProjectCommand,
    UpdateSoilFormulaCommand,
};
use crate::application::handlers::{
    CatalogCommandHandler, CatalogQueryHandler, CommandHandler, ProjectCommandHandler,
    ProjectQueryHandler, QueryHandler, SoilFormulaCommandHandler, SoilFormulaQueryHandler,
    SoilTypeCommandHandler,
};
use crate::application::queries::{
    GetItem, GetSoilFormulaQuery, ListItems, ListProjectsQuery, ListSoilFormulasQuery,
    SoilFormulaView,
};
use crate::application::ApplicationError;
use crate::ports::{CatalogRepository, SoilFormulaRepository};

/// Everything the HTTP layer needs from a store implementation
pub trait Store:
    CatalogRepository<Plant>
    + CatalogRepository<Container>
    + CatalogRepository<Decoration>
    + CatalogRepository<SoilType>
    + CatalogRepository<Project>
    + SoilFormulaRepository
    + 'static
{
}

impl<T> Store for T where
    T: CatalogRepository<Plant>
        + CatalogRepository<Container>
        + CatalogRepository<Decoration>
        + CatalogRepository<SoilType>
        + CatalogRepository<Project>
        + SoilFormulaRepository
        + 'static
{
}

/// Axum application state holding the CQRS handlers
pub struct ApiState<S: Store> {
    catalog_commands: Arc<CatalogCommandHandler<S>>,
    catalog_queries: Arc<CatalogQueryHandler<S>>,
    formula_commands: Arc<SoilFormulaCommandHandler<S>>,
    formula_queries: Arc<SoilFormulaQueryHandler<S>>,
    soil_type_commands: Arc<SoilTypeCommandHandler<S>>,
    project_commands: Arc<ProjectCommandHandler<S>>,
    project_queries: Arc<ProjectQueryHandler<S>>,
}

impl<S: Store> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            catalog_commands: self.catalog_commands.clone(),
            catalog_queries: self.catalog_queries.clone(),
            formula_commands: self.formula_commands.clone(),
            formula_queries: self.formula_queries.clone(),
            soil_type_commands: self.soil_type_commands.clone(),
            project_commands: self.project_commands.clone(),
            project_queries: self.project_queries.clone(),
        }
    }
}

impl<S: Store> ApiState<S> {
    /// Wire every handler over one shared store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            catalog_commands: Arc::new(CatalogCommandHandler::new(store.clone())),
            catalog_queries: Arc::new(CatalogQueryHandler::new(store.clone())),
            formula_commands: Arc::new(SoilFormulaCommandHandler::new(store.clone())),
            formula_queries: Arc::new(SoilFormulaQueryHandler::new(store.clone())),
            soil_type_commands: Arc::new(SoilTypeCommandHandler::new(store.clone())),
            project_commands: Arc::new(ProjectCommandHandler::new(store.clone())),
            project_queries: Arc::new(ProjectQueryHandler::new(store)),
        }
    }
}

/// Build the catalog router; supply an [`ApiState`] via `with_state`
pub fn create_api_router<S: Store>() -> Router<ApiState<S>> {
    Router::new()
        .route(
            "/api/plants",
            get(list_plants::<S>).post(create_plant::<S>),
        )
        .route(
            "/api/plants/{id}",
            get(get_plant::<S>)
                .put(update_plant::<S>)
                .delete(delete_plant::<S>),
        )
        .route(
            "/api/containers",
            get(list_containers::<S>).post(create_container::<S>),
        )
        .route(
            "/api/containers/{id}",
            get(get_container::<S>)
                .put(update_container::<S>)
                .delete(delete_container::<S>),
        )
        .route(
            "/api/decorations",
            get(list_decorations::<S>).post(create_decoration::<S>),
        )
        .route(
            "/api/decorations/{id}",
            get(get_decoration::<S>)
                .put(update_decoration::<S>)
                .delete(delete_decoration::<S>),
        )
        .route(
            "/api/soil-types",
            get(list_soil_types::<S>).post(create_soil_type::<S>),
        )
        .route(
            "/api/soil-types/{id}",
            get(get_soil_type::<S>)
                .put(update_soil_type::<S>)
                .delete(delete_soil_type::<S>),
        )
        .route(
            "/api/soil-formulas",
            get(list_soil_formulas::<S>).post(create_soil_formula::<S>),
        )
        .route(
            "/api/soil-formulas/{id}",
            get(get_soil_formula::<S>)
                .put(update_soil_formula::<S>)
                .delete(delete_soil_formula::<S>),
        )
        .route(
            "/api/projects",
            get(list_projects::<S>).post(create_project::<S>),
        )
        .route(
            "/api/projects/{id}",
            get(get_project::<S>)
                .put(update_project::<S>)
                .delete(delete_project::<S>),
        )
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

/// Query parameters shared by the plain list endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    page: Option<i64>,
    page_size: Option<i64>,
    sort_by: Option<String>,
    name: Option<String>,
}

/// Query parameters of the project list endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    page: Option<i64>,
    page_size: Option<i64>,
    sort_by: Option<String>,
    name: Option<String>,
    container_id: Option<i64>,
}

/// HTTP-facing errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Application failure, classified by [`ApplicationError::is_storage`]
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Malformed query string value
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Application(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Application(err) if err.is_storage() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// ---- request payloads -------------------------------------------------

/// Plant create/update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantPayload {
    name: String,
    name_latin: String,
    min_temperature: Option<i32>,
    max_temperature: Option<i32>,
    description: Option<String>,
}

impl PlantPayload {
    fn into_draft(self) -> Result<PlantDraft, ApiError> {
        Ok(PlantDraft {
            name: EntityName::new(&self.name)?,
            name_latin: EntityName::new(&self.name_latin)?,
            min_temperature: self.min_temperature,
            max_temperature: self.max_temperature,
            description: self.description,
        })
    }
}

/// Container create/update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPayload {
    name: String,
    volume_liters: u32,
    description: Option<String>,
}

impl ContainerPayload {
    fn into_draft(self) -> Result<ContainerDraft, ApiError> {
        Ok(ContainerDraft {
            name: EntityName::new(&self.name)?,
            volume_liters: self.volume_liters,
            description: self.description,
        })
    }
}

/// Decoration create/update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationPayload {
    name: String,
    description: Option<String>,
}

impl DecorationPayload {
    fn into_draft(self) -> Result<DecorationDraft, ApiError> {
        Ok(DecorationDraft {
            name: EntityName::new(&self.name)?,
            description: self.description,
        })
    }
}

/// Soil type create/update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilTypePayload {
    name: String,
    description: Option<String>,
}

impl SoilTypePayload {
    fn into_draft(self) -> Result<SoilTypeDraft, ApiError> {
        Ok(SoilTypeDraft {
            name: EntityName::new(&self.name)?,
            description: self.description,
        })
    }
}

/// One formula item in a create/update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaItemPayload {
    soil_type_id: i64,
    percentage: i64,
    order: i64,
}

/// Soil formula create/update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilFormulaPayload {
    name: String,
    items: Vec<FormulaItemPayload>,
}

impl SoilFormulaPayload {
    fn into_parts(self) -> Result<(EntityName, Vec<FormulaItem>), ApiError> {
        let name = EntityName::new(&self.name)?;
        let items = self
            .items
            .into_iter()
            .map(|item| FormulaItem::new(item.soil_type_id, item.percentage, item.order))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((name, items))
    }
}

/// One placement in a project body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementPayload {
    kind: PlacementKind,
    item_id: i64,
    x: u32,
    y: u32,
}

/// Project create/update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    name: String,
    container_id: Option<i64>,
    #[serde(default)]
    placements: Vec<PlacementPayload>,
}

impl ProjectPayload {
    fn into_draft(self) -> Result<ProjectDraft, ApiError> {
        Ok(ProjectDraft {
            name: EntityName::new(&self.name)?,
            container_id: self.container_id.map(ContainerId::new).transpose()?,
            placements: self
                .placements
                .into_iter()
                .map(|p| Placement::new(p.kind, p.item_id, p.x, p.y))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

// ---- plants -----------------------------------------------------------

async fn list_plants<S: Store>(
    State(state): State<ApiState<S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Plant>>, ApiError> {
    let query =
        ListItems::<Plant>::new(params.name, params.sort_by, params.page, params.page_size);
    Ok(Json(state.catalog_queries.handle(query).await?))
}

async fn get_plant<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<Plant>, ApiError> {
    Ok(Json(
        state.catalog_queries.handle(GetItem::<Plant>::new(id)).await?,
    ))
}

async fn create_plant<S: Store>(
    State(state): State<ApiState<S>>,
    Json(payload): Json<PlantPayload>,
) -> Result<(StatusCode, Json<Plant>), ApiError> {
    let command = CreateItem::<Plant> {
        draft: payload.into_draft()?,
    };
    let plant = state.catalog_commands.handle(command).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

async fn update_plant<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<PlantPayload>,
) -> Result<Json<Plant>, ApiError> {
    let command = UpdateItem::<Plant> {
        id,
        draft: payload.into_draft()?,
    };
    Ok(Json(state.catalog_commands.handle(command).await?))
}

async fn delete_plant<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog_commands
        .handle(DeleteItem::<Plant>::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- containers -------------------------------------------------------

async fn list_containers<S: Store>(
    State(state): State<ApiState<S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Container>>, ApiError> {
    let query =
        ListItems::<Container>::new(params.name, params.sort_by, params.page, params.page_size);
    Ok(Json(state.catalog_queries.handle(query).await?))
}

async fn get_container<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<Container>, ApiError> {
    Ok(Json(
        state
            .catalog_queries
            .handle(GetItem::<Container>::new(id))
            .await?,
    ))
}

async fn create_container<S: Store>(
    State(state): State<ApiState<S>>,
    Json(payload): Json<ContainerPayload>,
) -> Result<(StatusCode, Json<Container>), ApiError> {
    let command = CreateItem::<Container> {
        draft: payload.into_draft()?,
    };
    let container = state.catalog_commands.handle(command).await?;
    Ok((StatusCode::CREATED, Json(container)))
}

async fn update_container<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<ContainerPayload>,
) -> Result<Json<Container>, ApiError> {
    let command = UpdateItem::<Container> {
        id,
        draft: payload.into_draft()?,
    };
    Ok(Json(state.catalog_commands.handle(command).await?))
}

async fn delete_container<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog_commands
        .handle(DeleteItem::<Container>::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- decorations ------------------------------------------------------

async fn list_decorations<S: Store>(
    State(state): State<ApiState<S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Decoration>>, ApiError> {
    let query =
        ListItems::<Decoration>::new(params.name, params.sort_by, params.page, params.page_size);
    Ok(Json(state.catalog_queries.handle(query).await?))
}

async fn get_decoration<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<Decoration>, ApiError> {
    Ok(Json(
        state
            .catalog_queries
            .handle(GetItem::<Decoration>::new(id))
            .await?,
    ))
}

async fn create_decoration<S: Store>(
    State(state): State<ApiState<S>>,
    Json(payload): Json<DecorationPayload>,
) -> Result<(StatusCode, Json<Decoration>), ApiError> {
    let command = CreateItem::<Decoration> {
        draft: payload.into_draft()?,
    };
    let decoration = state.catalog_commands.handle(command).await?;
    Ok((StatusCode::CREATED, Json(decoration)))
}

async fn update_decoration<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<DecorationPayload>,
) -> Result<Json<Decoration>, ApiError> {
    let command = UpdateItem::<Decoration> {
        id,
        draft: payload.into_draft()?,
    };
    Ok(Json(state.catalog_commands.handle(command).await?))
}

async fn delete_decoration<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog_commands
        .handle(DeleteItem::<Decoration>::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- soil types -------------------------------------------------------

async fn list_soil_types<S: Store>(
    State(state): State<ApiState<S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<SoilType>>, ApiError> {
    let query =
        ListItems::<SoilType>::new(params.name, params.sort_by, params.page, params.page_size);
    Ok(Json(state.catalog_queries.handle(query).await?))
}

async fn get_soil_type<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<SoilType>, ApiError> {
    Ok(Json(
        state
            .catalog_queries
            .handle(GetItem::<SoilType>::new(id))
            .await?,
    ))
}

async fn create_soil_type<S: Store>(
    State(state): State<ApiState<S>>,
    Json(payload): Json<SoilTypePayload>,
) -> Result<(StatusCode, Json<SoilType>), ApiError> {
    let command = CreateItem::<SoilType> {
        draft: payload.into_draft()?,
    };
    let soil_type = state.catalog_commands.handle(command).await?;
    Ok((StatusCode::CREATED, Json(soil_type)))
}

async fn update_soil_type<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<SoilTypePayload>,
) -> Result<Json<SoilType>, ApiError> {
    let command = UpdateItem::<SoilType> {
        id,
        draft: payload.into_draft()?,
    };
    Ok(Json(state.catalog_commands.handle(command).await?))
}

async fn delete_soil_type<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .soil_type_commands
        .handle(DeleteSoilTypeCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- soil formulas ----------------------------------------------------

/// The `soilTypeIds` parameter is repeatable and additionally accepts
/// comma-separated values, so the query string is parsed by hand here.
fn parse_formula_list_params(raw: Option<&str>) -> Result<ListSoilFormulasQuery, ApiError> {
    let mut query = ListSoilFormulasQuery::default();
    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "page" => query.page = Some(parse_int(&value)?),
            "pageSize" => query.page_size = Some(parse_int(&value)?),
            "sortBy" => query.sort_by = Some(value.into_owned()),
            "name" => query.name = Some(value.into_owned()),
            "soilTypeIds" => {
                for part in value.split(',') {
                    query.soil_type_ids.push(parse_int(part)?);
                }
            }
            _ => {}
        }
    }
    Ok(query)
}

fn parse_int(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::InvalidQuery(format!("expected an integer, got `{}`", raw.trim())))
}

async fn list_soil_formulas<S: Store>(
    State(state): State<ApiState<S>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Page<SoilFormulaView>>, ApiError> {
    let query = parse_formula_list_params(raw.as_deref())?;
    Ok(Json(state.formula_queries.handle(query).await?))
}

async fn get_soil_formula<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<SoilFormulaView>, ApiError> {
    Ok(Json(
        state
            .formula_queries
            .handle(GetSoilFormulaQuery { id })
            .await?,
    ))
}

async fn create_soil_formula<S: Store>(
    State(state): State<ApiState<S>>,
    Json(payload): Json<SoilFormulaPayload>,
) -> Result<(StatusCode, Json<SoilFormulaView>), ApiError> {
    let (name, items) = payload.into_parts()?;
    let view = state
        .formula_commands
        .handle(CreateSoilFormulaCommand { name, items })
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_soil_formula<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<SoilFormulaPayload>,
) -> Result<Json<SoilFormulaView>, ApiError> {
    let (name, items) = payload.into_parts()?;
    let view = state
        .formula_commands
        .handle(UpdateSoilFormulaCommand { id, name, items })
        .await?;
    Ok(Json(view))
}

async fn delete_soil_formula<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .formula_commands
        .handle(DeleteSoilFormulaCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- projects ---------------------------------------------------------

async fn list_projects<S: Store>(
    State(state): State<ApiState<S>>,
    Query(params): Query<ProjectListParams>,
) -> Result<Json<Page<Project>>, ApiError> {
    let query = ListProjectsQuery {
        name: params.name,
        container_id: params.container_id,
        sort_by: params.sort_by,
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(state.project_queries.handle(query).await?))
}

async fn get_project<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(
        state
            .catalog_queries
            .handle(GetItem::<Project>::new(id))
            .await?,
    ))
}

async fn create_project<S: Store>(
    State(state): State<ApiState<S>>,
    Json(payload): Json<ProjectPayload>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let command = CreateProjectCommand {
        draft: payload.into_draft()?,
    };
    let project = state.project_commands.handle(command).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<Project>, ApiError> {
    let command = UpdateProjectCommand {
        id,
        draft: payload.into_draft()?,
    };
    Ok(Json(state.project_commands.handle(command).await?))
}

async fn delete_project<S: Store>(
    State(state): State<ApiState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog_commands
        .handle(DeleteItem::<Project>::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handler-level tests for the soil formula lifecycle against the
//! in-memory store

use std::sync::Arc;

use florarium_core::application::commands::{
    CreateItem, CreateSoilFormulaCommand, DeleteSoilFormulaCommand, DeleteSoilTypeCommand,
    UpdateSoilFormulaCommand,
};
use florarium_core::application::handlers::{
    CatalogCommandHandler, CatalogQueryHandler, CommandHandler, QueryHandler,
    SoilFormulaCommandHandler, SoilFormulaQueryHandler, SoilTypeCommandHandler,
};
use florarium_core::application::queries::{GetItem, GetSoilFormulaQuery, ListSoilFormulasQuery};
use florarium_core::application::ApplicationError;
use florarium_core::MemoryStore;
use florarium_domain::DomainError;
use florarium_domain::aggregates::FormulaItem;
use florarium_domain::entities::{SoilType, SoilTypeDraft};
use florarium_domain::value_objects::EntityName;

struct Fixture {
    commands: SoilFormulaCommandHandler<MemoryStore>,
    queries: SoilFormulaQueryHandler<MemoryStore>,
    soil_type_commands: SoilTypeCommandHandler<MemoryStore>,
    catalog_commands: CatalogCommandHandler<MemoryStore>,
    catalog_queries: CatalogQueryHandler<MemoryStore>,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            commands: SoilFormulaCommandHandler::new(store.clone()),
            queries: SoilFormulaQueryHandler::new(store.clone()),
            soil_type_commands: SoilTypeCommandHandler::new(store.clone()),
            catalog_commands: CatalogCommandHandler::new(store.clone()),
            catalog_queries: CatalogQueryHandler::new(store),
        }
    }

    /// Seed a soil type and return its id
    async fn seed_soil_type(&self, name: &str) -> i64 {
        let soil_type = self
            .catalog_commands
            .handle(CreateItem::<SoilType> {
                draft: SoilTypeDraft {
                    name: EntityName::new(name).unwrap(),
                    description: None,
                },
            })
            .await
            .unwrap();
        soil_type.id.get()
    }

    async fn create_formula(&self, name: &str, items: Vec<(i64, i64, i64)>) -> Result<i64, ApplicationError> {
        let items = items
            .into_iter()
            .map(|(st, pct, ord)| FormulaItem::new(st, pct, ord).unwrap())
            .collect();
        let view = self
            .commands
            .handle(CreateSoilFormulaCommand {
                name: EntityName::new(name).unwrap(),
                items,
            })
            .await?;
        Ok(view.id)
    }
}

#[tokio::test]
async fn test_create_then_fetch_resolves_soil_type_names() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    let peat = fx.seed_soil_type("Peat").await;

    let id = fx
        .create_formula("Tropical mix", vec![(sand, 60, 0), (peat, 40, 1)])
        .await
        .unwrap();

    let view = fx
        .queries
        .handle(GetSoilFormulaQuery { id })
        .await
        .unwrap();
    assert_eq!(view.name, "Tropical mix");
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].soil_type.name, "Sand");
    assert_eq!(view.items[1].soil_type.name, "Peat");
    assert_eq!(view.items[0].percentage, 60);
}

#[tokio::test]
async fn test_unknown_soil_type_is_a_hard_precondition() {
    let fx = Fixture::new();
    let err = fx
        .create_formula("Ghost mix", vec![(99, 100, 0)])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApplicationError::NotFound {
            kind: "soil type",
            id: 99
        }
    );
}

#[tokio::test]
async fn test_duplicate_name_is_case_insensitive_and_trimmed() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    fx.create_formula("Mix", vec![(sand, 100, 0)]).await.unwrap();

    for attempt in ["MIX", "  mix  "] {
        let err = fx
            .create_formula(attempt, vec![(sand, 100, 0)])
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApplicationError::Domain(DomainError::DuplicateName(_))),
            "expected duplicate-name for {attempt:?}, got {err:?}"
        );
    }
}

#[tokio::test]
async fn test_update_to_own_name_succeeds() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    let id = fx.create_formula("Mix", vec![(sand, 100, 0)]).await.unwrap();

    let updated = fx
        .commands
        .handle(UpdateSoilFormulaCommand {
            id,
            name: EntityName::new("Mix").unwrap(),
            items: vec![FormulaItem::new(sand, 100, 0).unwrap()],
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Mix");
}

#[tokio::test]
async fn test_write_responses_are_built_from_the_write_itself() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    let peat = fx.seed_soil_type("Peat").await;

    // Create and update both return a fully resolved view without a
    // follow-up read, so the response cannot miss a record that a
    // concurrent request deleted in between.
    let created = fx
        .commands
        .handle(CreateSoilFormulaCommand {
            name: EntityName::new("Mix").unwrap(),
            items: vec![FormulaItem::new(sand, 100, 0).unwrap()],
        })
        .await
        .unwrap();
    assert_eq!(created.items[0].soil_type.name, "Sand");

    let updated = fx
        .commands
        .handle(UpdateSoilFormulaCommand {
            id: created.id,
            name: EntityName::new("Mix").unwrap(),
            items: vec![
                FormulaItem::new(sand, 50, 0).unwrap(),
                FormulaItem::new(peat, 50, 1).unwrap(),
            ],
        })
        .await
        .unwrap();
    assert_eq!(updated.items.len(), 2);
    assert_eq!(updated.items[1].soil_type.name, "Peat");
}

#[tokio::test]
async fn test_list_query_runs_on_a_spawned_task() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    fx.create_formula("Mix", vec![(sand, 100, 0)]).await.unwrap();

    // tokio::spawn requires a Send future; the parsed sort spec is held
    // across the store read inside the handler.
    let Fixture { queries, .. } = fx;
    let page = tokio::spawn(async move {
        queries
            .handle(ListSoilFormulasQuery {
                sort_by: Some("name".to_string()),
                ..Default::default()
            })
            .await
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_update_replaces_entire_item_collection() {
    let fx = Fixture::new();
    let t1 = fx.seed_soil_type("Sand").await;
    let t2 = fx.seed_soil_type("Peat").await;
    let t3 = fx.seed_soil_type("Bark").await;

    let id = fx.create_formula("Mix", vec![(t1, 100, 0)]).await.unwrap();

    fx.commands
        .handle(UpdateSoilFormulaCommand {
            id,
            name: EntityName::new("Layered mix").unwrap(),
            items: vec![
                FormulaItem::new(t1, 40, 0).unwrap(),
                FormulaItem::new(t2, 35, 1).unwrap(),
                FormulaItem::new(t3, 25, 2).unwrap(),
            ],
        })
        .await
        .unwrap();

    let view = fx
        .queries
        .handle(GetSoilFormulaQuery { id })
        .await
        .unwrap();
    assert_eq!(view.name, "Layered mix");
    assert_eq!(view.items.len(), 3);
    let total: i64 = view.items.iter().map(|i| i64::from(i.percentage)).sum();
    assert_eq!(total, 100);
    assert!(view.items.iter().all(|i| i.percentage != 100));
}

#[tokio::test]
async fn test_delete_cascades_items_but_keeps_soil_types() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    let id = fx.create_formula("Mix", vec![(sand, 100, 0)]).await.unwrap();

    fx.commands
        .handle(DeleteSoilFormulaCommand { id })
        .await
        .unwrap();

    let err = fx
        .queries
        .handle(GetSoilFormulaQuery { id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));

    // The referenced soil type survives the cascade
    let soil_type = fx
        .catalog_queries
        .handle(GetItem::<SoilType>::new(sand))
        .await
        .unwrap();
    assert_eq!(soil_type.name.as_str(), "Sand");
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    let id = fx.create_formula("Mix", vec![(sand, 100, 0)]).await.unwrap();

    fx.commands
        .handle(DeleteSoilFormulaCommand { id })
        .await
        .unwrap();
    let err = fx
        .commands
        .handle(DeleteSoilFormulaCommand { id })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_referenced_soil_type_cannot_be_deleted() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    let loose = fx.seed_soil_type("Loose gravel").await;
    fx.create_formula("Mix", vec![(sand, 100, 0)]).await.unwrap();

    let err = fx
        .soil_type_commands
        .handle(DeleteSoilTypeCommand { id: sand })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApplicationError::Domain(DomainError::SoilTypeInUse(sand))
    );

    // Unreferenced soil types delete fine
    fx.soil_type_commands
        .handle(DeleteSoilTypeCommand { id: loose })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_and_filter_and_pagination_totals() {
    let fx = Fixture::new();
    let t1 = fx.seed_soil_type("Sand").await;
    let t2 = fx.seed_soil_type("Peat").await;
    let t3 = fx.seed_soil_type("Bark").await;

    // 7 formulas that all reference t1; only some cover {t1, t2}
    for n in 0..7 {
        let mut items = vec![(t1, 50, 0)];
        if n % 2 == 0 {
            items.push((t2, 30, 1));
        }
        if n == 6 {
            items.push((t3, 20, 2));
        }
        fx.create_formula(&format!("Formula {n}"), items).await.unwrap();
    }

    // AND semantics: {t1, t2} matches only the formulas carrying both
    let covered = fx
        .queries
        .handle(ListSoilFormulasQuery {
            soil_type_ids: vec![t1, t2],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(covered.total, 4);
    assert!(covered.items.iter().all(|view| {
        let ids: Vec<i64> = view.items.iter().map(|i| i.soil_type.id).collect();
        ids.contains(&t1) && ids.contains(&t2)
    }));

    // 7 matches over pages of 3: sizes 3, 3, 1 with total 7 everywhere
    let mut seen = Vec::new();
    for (page, expected_len) in [(1, 3), (2, 3), (3, 1)] {
        let result = fx
            .queries
            .handle(ListSoilFormulasQuery {
                sort_by: Some("name".to_string()),
                page: Some(page),
                page_size: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.total, 7);
        assert_eq!(result.items.len(), expected_len);
        seen.extend(result.items.iter().map(|view| view.id));
    }
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 7, "pages must not overlap");
}

#[tokio::test]
async fn test_item_count_sort_round_trip() {
    let fx = Fixture::new();
    let t1 = fx.seed_soil_type("Sand").await;
    let t2 = fx.seed_soil_type("Peat").await;
    let t3 = fx.seed_soil_type("Bark").await;

    fx.create_formula("Two", vec![(t1, 50, 0), (t2, 50, 1)])
        .await
        .unwrap();
    fx.create_formula("One", vec![(t1, 100, 0)]).await.unwrap();
    fx.create_formula("Three", vec![(t1, 40, 0), (t2, 30, 1), (t3, 30, 2)])
        .await
        .unwrap();

    let ascending = fx
        .queries
        .handle(ListSoilFormulasQuery {
            sort_by: Some("itemcount".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<&str> = ascending.items.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["One", "Two", "Three"]);

    let descending = fx
        .queries
        .handle(ListSoilFormulasQuery {
            sort_by: Some("-itemcount".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<&str> = descending.items.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Three", "Two", "One"]);
}

#[tokio::test]
async fn test_invalid_sort_and_page_inputs_fail() {
    let fx = Fixture::new();

    let err = fx
        .queries
        .handle(ListSoilFormulasQuery {
            sort_by: Some("bogus".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApplicationError::Domain(DomainError::InvalidSortField("bogus".to_string()))
    );

    let err = fx
        .queries
        .handle(ListSoilFormulasQuery {
            page_size: Some(26),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApplicationError::Domain(DomainError::InvalidPageSize(26))
    );
}

#[tokio::test]
async fn test_empty_item_list_rejected_on_create_and_update() {
    let fx = Fixture::new();
    let sand = fx.seed_soil_type("Sand").await;
    let id = fx.create_formula("Mix", vec![(sand, 100, 0)]).await.unwrap();

    let err = fx
        .commands
        .handle(CreateSoilFormulaCommand {
            name: EntityName::new("Empty").unwrap(),
            items: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::Domain(DomainError::EmptyItemList));

    let err = fx
        .commands
        .handle(UpdateSoilFormulaCommand {
            id,
            name: EntityName::new("Mix").unwrap(),
            items: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::Domain(DomainError::EmptyItemList));

    // The failed update left the formula untouched
    let view = fx
        .queries
        .handle(GetSoilFormulaQuery { id })
        .await
        .unwrap();
    assert_eq!(view.items.len(), 1);
}

//! End-to-end tests for the HTTP adapter using tower::ServiceExt::oneshot

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use florarium_core::{ApiState, MemoryStore, create_api_router};
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    create_api_router().with_state(ApiState::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn seed_soil_type(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/soil-types",
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seeding {name}: {body}");
    body["id"].as_i64().unwrap()
}

async fn seed_formula(app: &Router, name: &str, items: JsonValue) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/soil-formulas",
        Some(json!({ "name": name, "items": items })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seeding {name}: {body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_plant_crud_round_trip() {
    let app = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/plants",
        Some(json!({
            "name": "Java Fern",
            "nameLatin": "Microsorum pteropus",
            "minTemperature": 18,
            "maxTemperature": 28
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["nameLatin"], "Microsorum pteropus");

    let (status, fetched) = send(&app, "GET", &format!("/api/plants/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Java Fern");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/plants/{id}"),
        Some(json!({
            "name": "Java Fern (narrow)",
            "nameLatin": "Microsorum pteropus"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Java Fern (narrow)");
    assert_eq!(updated["minTemperature"], JsonValue::Null);

    let (status, _) = send(&app, "DELETE", &format!("/api/plants/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/plants/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_duplicate_plant_name_rejected() {
    let app = test_app();
    let payload = json!({ "name": "Moss", "nameLatin": "Taxiphyllum barbieri" });

    let (status, _) = send(&app, "POST", "/api/plants", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/plants",
        Some(json!({ "name": "  MOSS ", "nameLatin": "Taxiphyllum barbieri" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already in use"));
}

#[tokio::test]
async fn test_formula_listing_with_and_filter() {
    let app = test_app();
    let sand = seed_soil_type(&app, "Sand").await;
    let peat = seed_soil_type(&app, "Peat").await;
    let bark = seed_soil_type(&app, "Bark").await;

    // A covers {sand, peat}, B covers {sand}, C covers {sand, peat, bark}
    let a = seed_formula(
        &app,
        "A",
        json!([
            { "soilTypeId": sand, "percentage": 50, "order": 0 },
            { "soilTypeId": peat, "percentage": 50, "order": 1 }
        ]),
    )
    .await;
    seed_formula(
        &app,
        "B",
        json!([{ "soilTypeId": sand, "percentage": 100, "order": 0 }]),
    )
    .await;
    let c = seed_formula(
        &app,
        "C",
        json!([
            { "soilTypeId": sand, "percentage": 30, "order": 0 },
            { "soilTypeId": peat, "percentage": 30, "order": 1 },
            { "soilTypeId": bark, "percentage": 40, "order": 2 }
        ]),
    )
    .await;

    let uri = format!("/api/soil-formulas?soilTypeIds={sand}&soilTypeIds={peat}&sortBy=name");
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let ids: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, c]);

    // Items carry resolved { id, name } soil type pairs
    let first_item = &body["items"][0]["items"][0];
    assert_eq!(first_item["soilType"]["name"], "Sand");
    assert_eq!(first_item["soilType"]["id"], sand);
}

#[tokio::test]
async fn test_formula_pagination_envelope() {
    let app = test_app();
    let sand = seed_soil_type(&app, "Sand").await;
    for n in 0..7 {
        seed_formula(
            &app,
            &format!("Formula {n}"),
            json!([{ "soilTypeId": sand, "percentage": 100, "order": 0 }]),
        )
        .await;
    }

    let mut seen = Vec::new();
    for (page, expected) in [(1, 3), (2, 3), (3, 1)] {
        let uri = format!("/api/soil-formulas?sortBy=name&page={page}&pageSize=3");
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 7);
        assert_eq!(body["page"], page);
        assert_eq!(body["pageSize"], 3);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), expected);
        seen.extend(items.iter().map(|i| i["id"].as_i64().unwrap()));
    }
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 7);

    // A page past the end still reports the full total
    let (status, body) = send(&app, "GET", "/api/soil-formulas?page=9&pageSize=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 7);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_list_parameters_yield_bad_request() {
    let app = test_app();

    for uri in [
        "/api/soil-formulas?pageSize=26",
        "/api/soil-formulas?pageSize=0",
        "/api/soil-formulas?page=0",
        "/api/soil-formulas?sortBy=volume",
        "/api/soil-formulas?soilTypeIds=0",
        "/api/soil-formulas?soilTypeIds=1,2,3,4,5,6,7,8,9,10,11",
        "/api/containers?sortBy=itemcount",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} -> {body}");
        assert!(body["error"].is_string(), "{uri} -> {body}");
    }
}

#[tokio::test]
async fn test_container_volume_sort() {
    let app = test_app();
    for (name, volume) in [("Bowl", 5), ("Tank", 60), ("Cube", 30)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/containers",
            Some(json!({ "name": name, "volumeLiters": volume })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/containers?sortBy=-volume", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Tank", "Cube", "Bowl"]);
}

#[tokio::test]
async fn test_soil_type_delete_guard_over_http() {
    let app = test_app();
    let sand = seed_soil_type(&app, "Sand").await;
    seed_formula(
        &app,
        "Mix",
        json!([{ "soilTypeId": sand, "percentage": 100, "order": 0 }]),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/api/soil-types/{sand}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("referenced"));
}

#[tokio::test]
async fn test_formula_validation_errors_over_http() {
    let app = test_app();
    let sand = seed_soil_type(&app, "Sand").await;

    // Out-of-range percentage
    let (status, body) = send(
        &app,
        "POST",
        "/api/soil-formulas",
        Some(json!({
            "name": "Bad",
            "items": [{ "soilTypeId": sand, "percentage": 101, "order": 0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("percentage"));

    // Empty item list
    let (status, _) = send(
        &app,
        "POST",
        "/api/soil-formulas",
        Some(json!({ "name": "Empty", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown soil type reference
    let (status, body) = send(
        &app,
        "POST",
        "/api/soil-formulas",
        Some(json!({
            "name": "Ghost",
            "items": [{ "soilTypeId": 999, "percentage": 50, "order": 0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_project_references_are_validated() {
    let app = test_app();

    let (status, container) = send(
        &app,
        "POST",
        "/api/containers",
        Some(json!({ "name": "Cube", "volumeLiters": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let container_id = container["id"].as_i64().unwrap();

    let (status, plant) = send(
        &app,
        "POST",
        "/api/plants",
        Some(json!({ "name": "Moss", "nameLatin": "Taxiphyllum barbieri" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let plant_id = plant["id"].as_i64().unwrap();

    let (status, project) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({
            "name": "Forest floor",
            "containerId": container_id,
            "placements": [{ "kind": "plant", "itemId": plant_id, "x": 10, "y": 20 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{project}");
    assert_eq!(project["placements"][0]["itemId"], plant_id);

    // A placement pointing at a missing decoration fails
    let (status, body) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({
            "name": "Broken",
            "placements": [{ "kind": "decoration", "itemId": 42, "x": 0, "y": 0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("decoration"));

    // Filter projects by container
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/projects?containerId={container_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Forest floor");
}

#[tokio::test]
async fn test_name_filter_is_trimmed_and_case_insensitive() {
    let app = test_app();
    seed_soil_type(&app, "Tropical base").await;
    seed_soil_type(&app, "Desert sand").await;

    let (status, body) = send(&app, "GET", "/api/soil-types?name=%20TROPICAL%20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Tropical base");
}

//! HTTP-level tests of the place endpoints against the in-memory store.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use place_service::api;
use place_service::app_state::AppState;
use place_service::config::ServiceConfig;
use place_service::domain::{MessageId, PLACE_ADDED_TOPIC, Place, Publisher, Topic};
use place_service::error::PlaceError;
use place_service::persistence::InMemoryPlaceStore;
use place_service::service::PlaceService;

#[derive(Debug)]
struct RejectingPublisher;

#[async_trait]
impl Publisher<Place> for RejectingPublisher {
    fn topic(&self) -> &str {
        PLACE_ADDED_TOPIC
    }

    async fn publish(&self, _message: &Place) -> Result<MessageId, PlaceError> {
        Err(PlaceError::Publish {
            topic: PLACE_ADDED_TOPIC.to_string(),
            reason: "broker unavailable".to_string(),
        })
    }
}

fn in_memory_app() -> Router {
    api::app(AppState::in_memory(&ServiceConfig::default()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("failed to build request");
    };

    let Ok(response) = app.clone().oneshot(request).await else {
        panic!("router failed");
    };
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("failed to read body");
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn add(app: &Router, name: &str, address: &str) -> Value {
    let (status, body) = call(
        app,
        Method::POST,
        "/place",
        Some(json!({ "name": name, "address": address })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn cafe_roma_lifecycle() {
    let app = in_memory_app();

    let created = add(&app, "Cafe Roma", "12 Main St").await;
    let id = created["id"].as_i64().unwrap_or_default();
    assert_ne!(id, 0);
    assert_eq!(created["name"], "Cafe Roma");
    assert_eq!(created["address"], "12 Main St");

    let (status, fetched) = call(&app, Method::GET, &format!("/place/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = call(&app, Method::GET, "/place", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!({ "place": [created] }));

    let (status, _) = call(&app, Method::DELETE, &format!("/place/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, Method::GET, &format!("/place/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);

    let (status, _) = call(&app, Method::DELETE, &format!("/place/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn list_returns_exactly_the_added_places() {
    let app = in_memory_app();
    let mut added = Vec::new();
    for i in 0..5 {
        added.push(add(&app, &format!("place {i}"), &format!("{i} Oak Ave")).await);
    }

    let (status, body) = call(&app, Method::GET, "/place", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(listed) = body["place"].as_array() else {
        panic!("missing place array: {body}");
    };
    assert_eq!(listed.len(), added.len());
    for place in &added {
        assert!(listed.contains(place), "missing {place}");
    }
}

#[tokio::test]
async fn empty_table_lists_an_empty_array() {
    let app = in_memory_app();
    let (status, body) = call(&app, Method::GET, "/place", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "place": [] }));
}

#[tokio::test]
async fn list_pages_in_id_order() {
    let app = in_memory_app();
    for i in 0..4 {
        add(&app, &format!("p{i}"), "somewhere").await;
    }

    let (status, body) = call(&app, Method::GET, "/place?limit=2&offset=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["place"]
        .as_array()
        .map(|a| a.iter().filter_map(|p| p["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["p1", "p2"]);
}

#[tokio::test]
async fn unknown_place_is_not_found() {
    let app = in_memory_app();
    for uri in ["/place/4242", "/place/0", "/place/-3"] {
        let (status, body) = call(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"]["code"], 2001);
    }
}

#[tokio::test]
async fn deleting_a_never_created_place_succeeds() {
    let app = in_memory_app();
    let (status, _) = call(&app, Method::DELETE, "/place/777", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn empty_strings_are_accepted() {
    let app = in_memory_app();
    let created = add(&app, "", "").await;
    assert_eq!(created["name"], "");
    assert_ne!(created["id"].as_i64().unwrap_or_default(), 0);
}

#[tokio::test]
async fn malformed_input_is_a_validation_error() {
    let app = in_memory_app();

    let (status, body) = call(&app, Method::POST, "/place", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);

    let (status, body) = call(&app, Method::GET, "/place/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);

    let (status, _) = call(&app, Method::GET, "/place?limit=lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn publish_failure_is_reported_but_the_place_is_kept() {
    let service = PlaceService::new(
        Arc::new(InMemoryPlaceStore::new()),
        Arc::new(RejectingPublisher),
        Duration::from_secs(5),
    );
    let app = api::app(AppState {
        place_service: Arc::new(service),
        place_added: Topic::new(PLACE_ADDED_TOPIC, 8),
    });

    let (status, body) = call(
        &app,
        Method::POST,
        "/place",
        Some(json!({ "name": "Cafe Roma", "address": "12 Main St" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], 3002);

    let (_, listed) = call(&app, Method::GET, "/place", None).await;
    let Some(id) = listed["place"][0]["id"].as_i64() else {
        panic!("place should have been stored: {listed}");
    };
    let (status, fetched) = call(&app, Method::GET, &format!("/place/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Cafe Roma");
}

#[tokio::test]
async fn health_reports_version() {
    let app = in_memory_app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["subscribers"], 0);
}

#[cfg(feature = "swagger-ui")]
#[tokio::test]
async fn openapi_document_lists_place_paths() {
    let app = in_memory_app();
    let (status, body) = call(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/place").is_some());
    assert!(body["paths"].get("/place/{placeID}").is_some());
}

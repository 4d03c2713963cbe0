// HTTP API tests
//
// Drive the full router (prefix, health, event routes) with an in-memory engine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use eventdesk_core::{
    Event, EventEngine, EventError, EventInput, EventService, InMemoryEventStore, Result,
    StoreError,
};
use eventdesk_server::{build_app, HealthState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const PENDING: &str = "Pendiente%20por%20revisar";
const REQUIRES_ACTION: &str = "Requiere%20gesti%C3%B3n";
const NO_ACTION: &str = "Sin%20gesti%C3%B3n";

fn app_with(service: Arc<dyn EventService>) -> Router {
    build_app(
        service,
        HealthState { storage: "memory" },
        "/api",
        Vec::new(),
    )
}

fn app() -> Router {
    let engine = EventEngine::with_store(Arc::new(InMemoryEventStore::new()));
    app_with(Arc::new(engine))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn event_body(event_type: &str, status: &str) -> Value {
    json!({
        "name": "Server down",
        "type": event_type,
        "description": "x",
        "status": status,
    })
}

async fn create(app: &Router, event_type: &str, status: &str) -> String {
    let (code, body) = send(app, "POST", "/api/v1/events", Some(event_body(event_type, status))).await;
    assert_eq!(code, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_not_prefixed() {
    let app = app();
    let (code, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_create_and_get_event() {
    let app = app();
    let id = create(&app, "Incidente", "Pendiente por revisar").await;

    let (code, body) = send(&app, "GET", &format!("/api/v1/events/{id}"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["type"], "Incidente");
    assert_eq!(body["status"], "Pendiente por revisar");
    assert_eq!(body["needs_action"], false);
    assert!(body.get("category").is_none());
    assert!(body["date"].is_string());
}

#[tokio::test]
async fn test_create_event_validation_errors() {
    let app = app();

    let (code, body) = send(
        &app,
        "POST",
        "/api/v1/events",
        Some(json!({"type": "Incidente", "description": "x", "status": "Revisado"})),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (code, _) = send(
        &app,
        "POST",
        "/api/v1/events",
        Some(event_body("Incidente", "Bogus")),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_event_is_404() {
    let app = app();
    let (code, body) = send(&app, "GET", "/api/v1/events/not-an-id", None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_endpoints_wrap_data() {
    let app = app();
    let (code, body) = send(&app, "GET", "/api/v1/events", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    create(&app, "Informe", "Pendiente por revisar").await;
    create(&app, "Incidente", "Revisado").await;

    let (_, body) = send(&app, "GET", "/api/v1/events", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (code, body) = send(&app, "GET", &format!("/api/v1/events/status/{PENDING}"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["type"], "Informe");

    let (code, body) = send(&app, "GET", "/api/v1/events/status/Bogus", None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Bogus"));

    let (code, _) = send(&app, "GET", "/api/v1/events/category/Urgente", None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_classify_and_override_scenario() {
    let app = app();
    let id = create(&app, "Incidente", "Pendiente por revisar").await;

    // Classifying a pending event is rejected
    let (code, _) = send(&app, "PUT", &format!("/api/v1/events/{id}/classify"), None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    // Review without category: auto classification
    let (code, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/events/{id}"),
        Some(event_body("Incidente", "Revisado")),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["category"], "Requiere gestión");
    assert_eq!(body["needs_action"], true);

    let (_, body) = send(&app, "GET", "/api/v1/events/needs", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/v1/events/category/{REQUIRES_ACTION}"),
        None,
    )
    .await;
    assert_eq!(body["data"][0]["id"], id.as_str());

    // Classify is idempotent
    let (code, body) = send(&app, "PUT", &format!("/api/v1/events/{id}/classify"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["category"], "Requiere gestión");

    // Manual override
    let (code, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/events/{id}/manual-classify"),
        Some(json!({"category": "Sin gestión"})),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["needs_action"], false);

    let (_, body) = send(&app, "GET", "/api/v1/events/needs", None).await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/v1/events/category/{NO_ACTION}"),
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_manual_classify_rejects_unknown_category() {
    let app = app();
    let id = create(&app, "Incidente", "Revisado").await;

    let (code, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/events/{id}/manual-classify"),
        Some(json!({"category": "Urgente"})),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Urgente"));
}

#[tokio::test]
async fn test_update_missing_event_is_404() {
    let app = app();
    let (code, _) = send(
        &app,
        "PUT",
        "/api/v1/events/01936f0e-7b1c-7d3a-9c55-2f7f4c1d8a10",
        Some(event_body("Incidente", "Revisado")),
    )
    .await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_event_and_failures_are_400() {
    let app = app();
    let id = create(&app, "Informe", "Pendiente por revisar").await;

    let (code, body) = send(&app, "DELETE", &format!("/api/v1/events/{id}"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert!(body["message"].is_string());

    // Any delete failure, including not found, is a 400
    let (code, body) = send(&app, "DELETE", &format!("/api/v1/events/{id}"), None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_routes_require_prefix() {
    let app = app();
    let (code, _) = send(&app, "GET", "/v1/events", None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();
    let (code, body) = send(&app, "GET", "/api-doc/openapi.json", None).await;
    assert_eq!(code, StatusCode::OK);
    assert!(body["paths"]["/v1/events"].is_object());
    assert_eq!(body["servers"][0]["url"], "/api");
}

#[tokio::test]
async fn test_openapi_server_url_follows_custom_prefix() {
    let engine = EventEngine::with_store(Arc::new(InMemoryEventStore::new()));
    let app = build_app(
        Arc::new(engine),
        HealthState { storage: "memory" },
        "/events-api",
        Vec::new(),
    );

    let (code, body) = send(&app, "GET", "/api-doc/openapi.json", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["servers"][0]["url"], "/events-api");

    let (code, _) = send(&app, "GET", "/events-api/v1/events", None).await;
    assert_eq!(code, StatusCode::OK);
}

// ============================================================================
// Infrastructure failures
// ============================================================================

/// Service double whose every call fails with the given error
struct FailingService(fn() -> EventError);

#[async_trait]
impl EventService for FailingService {
    async fn create_event(&self, _input: EventInput) -> Result<Event> {
        Err((self.0)())
    }
    async fn get_event_by_id(&self, _id: &str) -> Result<Event> {
        Err((self.0)())
    }
    async fn get_all_events(&self) -> Result<Vec<Event>> {
        Err((self.0)())
    }
    async fn get_events_by_status(&self, _status: &str) -> Result<Vec<Event>> {
        Err((self.0)())
    }
    async fn get_events_by_category(&self, _category: &str) -> Result<Vec<Event>> {
        Err((self.0)())
    }
    async fn get_events_needing_action(&self) -> Result<Vec<Event>> {
        Err((self.0)())
    }
    async fn update_event(&self, _id: &str, _input: EventInput) -> Result<Event> {
        Err((self.0)())
    }
    async fn delete_event(&self, _id: &str) -> Result<()> {
        Err((self.0)())
    }
    async fn classify_event(&self, _id: &str) -> Result<Event> {
        Err((self.0)())
    }
    async fn manual_classify_event(&self, _id: &str, _category: &str) -> Result<Event> {
        Err((self.0)())
    }
}

#[tokio::test]
async fn test_store_failure_is_500_without_details() {
    let app = app_with(Arc::new(FailingService(|| {
        EventError::Store(StoreError::Database("password authentication failed".into()))
    })));

    let (code, body) = send(&app, "GET", "/api/v1/events", None).await;
    assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().contains("password"));

    // Delete still reports 400, with the same generic body
    let (code, body) = send(&app, "DELETE", "/api/v1/events/abc", None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("password"), "{message}");
    assert_eq!(message, "Internal server error");
}

#[tokio::test]
async fn test_deadline_is_504() {
    let app = app_with(Arc::new(FailingService(|| {
        EventError::DeadlineExceeded(Duration::from_millis(10))
    })));

    let (code, _) = send(&app, "GET", "/api/v1/events/needs", None).await;
    assert_eq!(code, StatusCode::GATEWAY_TIMEOUT);
}

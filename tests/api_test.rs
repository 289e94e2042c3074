//! HTTP-level tests for the contact routes
//!
//! Each test drives the router directly with `oneshot`, no socket involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use contacts::api::{create_router, create_store_router, AppState};
use contacts::service::ContactService;
use contacts::storage::local::LocalStore;
use contacts::storage::memory::MemoryStore;
use contacts::types::{Contact, ContactPayload};
use contacts::{Error, Result};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

fn app() -> Router {
    create_store_router(Arc::new(MemoryStore::new()))
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
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
        })
    };
    (status, value)
}

fn ada() -> Value {
    json!({
        "name": "Ada Lovelace",
        "phoneNumber": "+44 20 7946 0958",
        "email": "ada@example.com"
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, "POST", "/contact", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created
}

fn assert_error_body(body: &Value, status: StatusCode) {
    assert_eq!(body["status"], status.as_u16());
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = app();

    let (status, body) = send(&app, "GET", "/contact/all", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_then_get_returns_equivalent_contact() {
    let app = app();

    let created = create(&app, ada()).await;
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["phoneNumber"], "+44 20 7946 0958");
    assert_eq!(created["email"], "ada@example.com");

    let (status, fetched) = send(&app, "GET", &format!("/contact/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = app();

    let mut body = ada();
    body["id"] = json!("chosen-by-client");
    let created = create(&app, body).await;

    assert_ne!(created["id"], "chosen-by-client");
    let (status, _) = send(&app, "GET", "/contact/chosen-by-client", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let app = app();

    let first = create(&app, ada()).await;
    let second = create(
        &app,
        json!({ "name": "Grace Hopper", "phoneNumber": "(555) 123-4567" }),
    )
    .await;

    let (status, body) = send(&app, "GET", "/contact/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([first, second]));
}

#[tokio::test]
async fn update_then_get_returns_updated_fields() {
    let app = app();
    let created = create(&app, ada()).await;
    let id = created["id"].as_str().unwrap();

    let update = json!({
        "id": "ignored",
        "name": "Augusta Ada King",
        "phoneNumber": "555 987 6543"
    });
    let (status, updated) = send(&app, "PUT", &format!("/contact/{id}"), Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Augusta Ada King");
    assert_eq!(updated["phoneNumber"], "555 987 6543");
    assert!(updated.get("email").is_none());

    let (_, fetched) = send(&app, "GET", &format!("/contact/{id}"), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn delete_then_get_yields_not_found() {
    let app = app();
    let created = create(&app, ada()).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/contact/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", &format!("/contact/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_body(&body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_unknown_id_yields_structured_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/contact/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_body(&body, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected_without_side_effects() {
    let app = app();
    create(&app, ada()).await;

    let (status, body) = send(&app, "POST", "/contact", Some(json!({ "email": "x@y.io" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["name", "phoneNumber"]);

    let (_, all) = send(&app, "GET", "/contact/all", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/contact")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/contact")
        .body(Body::from(ada().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_with_invalid_payload_leaves_contact_untouched() {
    let app = app();
    let created = create(&app, ada()).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/contact/{id}"),
        Some(json!({ "name": "Ada", "phoneNumber": "12" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "phoneNumber");

    let (_, fetched) = send(&app, "GET", &format!("/contact/{id}"), None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn mutations_on_unknown_id_are_rejected() {
    let app = app();

    let (status, body) = send(&app, "PUT", "/contact/ghost", Some(ada())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "DELETE", "/contact/ghost", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, StatusCode::BAD_REQUEST);

    let (_, all) = send(&app, "GET", "/contact/all", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn health_reports_contact_count() {
    let app = app();
    create(&app, ada()).await;

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["contacts"], 1);
}

#[tokio::test]
async fn openapi_document_lists_contact_routes() {
    let app = app();

    let (status, doc) = send(&app, "GET", "/api-doc/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().unwrap();
    for path in ["/contact", "/contact/all", "/contact/{id}"] {
        assert!(paths.contains_key(path), "missing path {path}");
    }
    let item = &paths["/contact/{id}"];
    assert!(item.get("get").is_some());
    assert!(item.get("put").is_some());
    assert!(item.get("delete").is_some());
    assert!(doc["components"]["schemas"]["Contact"].is_object());
    assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
}

#[tokio::test]
async fn local_store_keeps_contacts_across_routers() {
    let temp_dir = TempDir::new().unwrap();

    let id = {
        let store = LocalStore::open(temp_dir.path()).await.unwrap();
        let app = create_store_router(Arc::new(store));
        let created = create(&app, ada()).await;
        created["id"].as_str().unwrap().to_string()
    };

    let store = LocalStore::open(temp_dir.path()).await.unwrap();
    let app = create_store_router(Arc::new(store));
    let (status, fetched) = send(&app, "GET", &format!("/contact/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Ada Lovelace");
}

#[tokio::test]
async fn mutations_on_all_segment_are_rejected_with_error_body() {
    let app = app();
    create(&app, ada()).await;

    let (status, body) = send(&app, "PUT", "/contact/all", Some(ada())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "DELETE", "/contact/all", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, StatusCode::BAD_REQUEST);

    let (status, all) = send(&app, "GET", "/contact/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn null_required_fields_are_reported_as_field_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/contact",
        Some(json!({ "name": null, "phoneNumber": "5551234567" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!([{ "field": "name", "message": "must not be blank" }]));
}

/// Counts every call; reads find nothing, writes succeed
#[derive(Default)]
struct RecordingService {
    calls: AtomicUsize,
}

impl RecordingService {
    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactService for RecordingService {
    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.record();
        Ok(Vec::new())
    }

    async fn get_by_id(&self, id: &str) -> Result<Contact> {
        self.record();
        Err(Error::not_found(id))
    }

    async fn save(&self, payload: ContactPayload) -> Result<Contact> {
        self.record();
        Ok(Contact::from_payload("recorded".to_string(), payload))
    }

    async fn update(&self, _id: &str, _payload: ContactPayload) -> Result<()> {
        self.record();
        Ok(())
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        self.record();
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        self.record();
        Ok(0)
    }
}

#[tokio::test]
async fn invalid_payloads_never_reach_the_service() {
    let service = Arc::new(RecordingService::default());
    let app = create_router(AppState::new(service.clone()));

    let invalid = [
        json!({}),
        json!({ "name": "   ", "phoneNumber": "5551234567" }),
        json!({ "name": "Ada", "phoneNumber": "12" }),
        json!({ "name": "Ada", "phoneNumber": "5551234567", "email": "nope" }),
    ];

    for body in invalid {
        let (status, _) = send(&app, "POST", "/contact", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "POST accepted {body}");

        let (status, _) = send(&app, "PUT", "/contact/some-id", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "PUT accepted {body}");
    }

    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn update_whose_record_vanishes_before_reread_is_rejected() {
    let service = Arc::new(RecordingService::default());
    let app = create_router(AppState::new(service.clone()));

    let (status, body) = send(&app, "PUT", "/contact/some-id", Some(ada())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, StatusCode::BAD_REQUEST);
    assert_eq!(service.calls(), 2);
}

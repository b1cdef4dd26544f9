//! Integration tests for lodge-import HTTP endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use lodge_common::db::init_memory_database;
use lodge_common::events::EventBus;
use serde_json::Value;
use tower::util::ServiceExt;
use uuid::Uuid;

const DOCUMENT: &str = r#"{"property":{"name":"Lake View Inn","country":"India","slug":"lake-view-inn"},"rooms":[{"name":"Deluxe"}],"pricing":[{"room_name":"Deluxe","base_rate":5000}]}"#;

/// Test helper: create test app with in-memory database
async fn create_test_app() -> (axum::Router, sqlx::SqlitePool) {
    let pool = init_memory_database()
        .await
        .expect("Failed to create in-memory database");

    let state = lodge_import::AppState::new(pool.clone(), EventBus::new(100), 5);
    let app = lodge_import::build_router(state);

    (app, pool)
}

fn import_request(tenant: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/properties/import")
        .header("content-type", "application/json");
    if let Some(tenant) = tenant {
        builder = builder.header("x-tenant-id", tenant);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "lodge-import");
    assert!(json.get("last_error").is_none());
}

#[tokio::test]
async fn test_import_success() {
    let (app, pool) = create_test_app().await;
    let tenant = Uuid::new_v4().to_string();

    let response = app.oneshot(import_request(Some(&tenant), DOCUMENT)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert!(json["propertyId"].is_string());
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Property \"Lake View Inn\" imported successfully"));
    assert!(json.get("error").is_none());

    let stored_tenant: String = sqlx::query_scalar("SELECT tenant_id FROM properties")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored_tenant, tenant);
}

#[tokio::test]
async fn test_import_validation_failure_is_422() {
    let (app, pool) = create_test_app().await;
    let tenant = Uuid::new_v4().to_string();

    let response = app
        .oneshot(import_request(Some(&tenant), r#"{"property":{"name":"Lake View Inn"}}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["message"], "property.country: is required");

    let properties: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(properties, 0);
}

#[tokio::test]
async fn test_non_utf8_body_is_422_with_result() {
    let (app, pool) = create_test_app().await;
    let tenant = Uuid::new_v4().to_string();

    let mut body = br#"{"property":{"name":"Caf"#.to_vec();
    body.push(0xff);
    body.extend_from_slice(br#"","country":"India"}}"#);

    let request = Request::builder()
        .method("POST")
        .uri("/properties/import")
        .header("content-type", "application/json")
        .header("x-tenant-id", tenant.as_str())
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Validation failed");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("document: invalid JSON"));

    let properties: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(properties, 0);
}

#[tokio::test]
async fn test_duplicate_slug_is_409_and_reported_in_health() {
    let (app, _pool) = create_test_app().await;
    let tenant = Uuid::new_v4().to_string();

    let first = app
        .clone()
        .oneshot(import_request(Some(&tenant), DOCUMENT))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(import_request(Some(&tenant), DOCUMENT))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = json_body(second).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("UNIQUE constraint failed"));
    assert!(json.get("propertyId").is_none());
    assert!(json.get("message").is_none());

    let health = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = json_body(health).await;
    assert!(json["last_error"]
        .as_str()
        .unwrap()
        .contains("UNIQUE constraint failed"));
}

#[tokio::test]
async fn test_missing_tenant_header_is_400() {
    let (app, _pool) = create_test_app().await;

    let response = app.oneshot(import_request(None, DOCUMENT)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_invalid_tenant_header_is_400() {
    let (app, _pool) = create_test_app().await;

    let response = app
        .oneshot(import_request(Some("not-a-uuid"), DOCUMENT))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_events_endpoint_is_sse() {
    let (app, _pool) = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
}

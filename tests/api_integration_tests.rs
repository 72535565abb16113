//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use book_cache::{api::create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(config: Config) -> Router {
    let (state, _expiry_handle) = AppState::from_config(&config).unwrap();
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_book(app: &Router, name: &str, author: &str) -> i64 {
    let body = format!(
        r#"{{"name":"{}","author":"{}","pages_amount":5}}"#,
        name, author
    );
    let (status, json) = send(app, "POST", "/books", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_i64().unwrap()
}

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_endpoint_success() {
    let app = create_test_app(Config::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/books")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name":"Dune","author":"Frank Herbert","pages_amount":412}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Dune");
    assert_eq!(json["pages_amount"], 412);
}

#[tokio::test]
async fn test_create_duplicate_name() {
    let app = create_test_app(Config::default());
    create_book(&app, "name", "me").await;

    let (status, json) = send(
        &app,
        "POST",
        "/books",
        Some(r#"{"name":"name","author":"other","pages_amount":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_create_empty_author_rejected() {
    let app = create_test_app(Config::default());

    let (status, json) = send(
        &app,
        "POST",
        "/books",
        Some(r#"{"name":"Dune","author":"","pages_amount":412}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("author"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(Config::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/books")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Get Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_reads_through_cache() {
    let app = create_test_app(Config::default());
    let id = create_book(&app, "name", "me").await;

    let (status, json) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["author"], "me");

    let (status, _) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["total_entries"], 1);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(Config::default());

    let (status, json) = send(&app, "GET", "/books/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

// == Delete Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app(Config::default());
    let id = create_book(&app, "name", "me").await;
    send(&app, "GET", &format!("/books/{}", id), None).await;

    let (status, _) = send(&app, "DELETE", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["total_entries"], 0);
}

#[tokio::test]
async fn test_delete_endpoint_not_found() {
    let app = create_test_app(Config::default());

    let (status, _) = send(&app, "DELETE", "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Cache Behaviour Through The API ==

#[tokio::test]
async fn test_cache_capacity_eviction_via_api() {
    let app = create_test_app(Config::default());
    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(create_book(&app, &format!("name{}", i), &format!("me{}", i)).await);
    }

    for id in &ids {
        send(&app, "GET", &format!("/books/{}", id), None).await;
    }

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["capacity"], 3);
    assert_eq!(stats["total_entries"], 3);
    assert_eq!(stats["evictions"], 1);
}

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app(Config {
        ttl_secs: 1,
        ..Config::default()
    });
    let id = create_book(&app, "name", "me").await;
    send(&app, "GET", &format!("/books/{}", id), None).await;

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["total_entries"], 0);
    assert_eq!(stats["expirations"], 1);

    // the record itself outlives its cache entry
    let (status, _) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_clear_cache_endpoint() {
    let app = create_test_app(Config::default());
    let id = create_book(&app, "name", "me").await;
    send(&app, "GET", &format!("/books/{}", id), None).await;

    let (status, json) = send(&app, "POST", "/cache/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], 1);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["total_entries"], 0);
}

// == Stats / Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(Config::default());

    let (status, json) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["hit_rate"], 0.0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(Config::default());

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

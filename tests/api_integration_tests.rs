//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use ttl_lru::{api::create_router, AppState, SharedCache};

// == Helper Functions ==

fn create_test_app(capacity: usize) -> Router {
    let cache = SharedCache::new(capacity).unwrap();
    create_router(AppState::new(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put_json(app: &Router, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/set")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_uri(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app(100);

    let response = put_json(&app, r#"{"key":"test_key","value":"test_value"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(100);

    let response = put_json(&app, r#"{"key":"missing_value"}"#).await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app(100);

    let response = put_json(&app, r#"{"key":"","value":"v"}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(100);

    put_json(&app, r#"{"key":"get_key","value":"get_value"}"#).await;
    let response = get_uri(&app, "/get/get_key").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(100);

    let response = get_uri(&app, "/get/nonexistent_key").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == Eviction Through The Service ==

#[tokio::test]
async fn test_read_refreshes_recency_via_api() {
    let app = create_test_app(2);

    put_json(&app, r#"{"key":"a","value":"1"}"#).await;
    put_json(&app, r#"{"key":"b","value":"2"}"#).await;
    get_uri(&app, "/get/a").await;
    put_json(&app, r#"{"key":"c","value":"3"}"#).await;

    assert_eq!(get_uri(&app, "/get/a").await.status(), StatusCode::OK);
    assert_eq!(get_uri(&app, "/get/b").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_uri(&app, "/get/c").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_size_endpoint() {
    let app = create_test_app(2);

    for body in [
        r#"{"key":"a","value":"1"}"#,
        r#"{"key":"b","value":"2"}"#,
        r#"{"key":"c","value":"3"}"#,
    ] {
        put_json(&app, body).await;
    }

    let response = get_uri(&app, "/size").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["size"], 2);
    assert_eq!(json["capacity"], 2);
}

// == Stats / Health ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(1);

    put_json(&app, r#"{"key":"stats_key","value":"v"}"#).await;
    get_uri(&app, "/get/stats_key").await;
    get_uri(&app, "/get/nonexistent").await;
    put_json(&app, r#"{"key":"other","value":"v"}"#).await;

    let response = get_uri(&app, "/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(100);

    let response = get_uri(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == TTL Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app(100);

    let response = put_json(&app, r#"{"key":"ttl_test","value":"v","ttl_ms":100}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(get_uri(&app, "/get/ttl_test").await.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(
        get_uri(&app, "/get/ttl_test").await.status(),
        StatusCode::NOT_FOUND
    );

    let json = body_to_json(get_uri(&app, "/stats").await.into_body()).await;
    assert_eq!(json["expirations"], 1);
}

#[tokio::test]
async fn test_zero_ttl_means_no_expiry_via_api() {
    let app = create_test_app(100);

    put_json(&app, r#"{"key":"forever","value":"v","ttl_ms":0}"#).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(get_uri(&app, "/get/forever").await.status(), StatusCode::OK);
}

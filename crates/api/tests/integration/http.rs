use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use storefront_api::app::build_router;
use tower::ServiceExt;

use crate::common::*;

async fn send(request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let app = build_router(setup_state());
    let response = app.oneshot(request).await.expect("Request failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    (status, headers, body)
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

#[tokio::test]
async fn test_post_query_returns_data() {
    let (status, _, body) = send(post_json(r#"{"query":"{ myCart { cartId } }"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).expect("Response should be JSON");
    assert_eq!(json["data"]["myCart"]["cartId"], "123");
    assert!(json.get("errors").is_none());
}

#[tokio::test]
async fn test_graphql_errors_use_ok_status() {
    let (status, _, body) = send(post_json(r#"{"query":"{ myCart { nope } }"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).expect("Response should be JSON");
    assert!(json["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_invalid_body_is_bad_request() {
    let (status, _, body) = send(post_json("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).expect("Error body should be JSON");
    assert!(json["error"]
        .as_str()
        .is_some_and(|e| e.starts_with("Invalid GraphQL request")));
}

#[tokio::test]
async fn test_batch_request() {
    let body = r#"[
        {"query": "{ users { id } }"},
        {"query": "{ product(id: \"1\") { product { name } } }"}
    ]"#;
    let (status, _, body) = send(post_json(body)).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).expect("Response should be JSON");
    let responses = json.as_array().expect("Batch response should be an array");
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["data"]["users"].as_array().map(Vec::len), Some(10));
    assert_eq!(responses[1]["data"]["product"]["product"]["name"], "Product A");
}

#[tokio::test]
async fn test_get_serves_graphiql() {
    let request = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("Failed to build request");
    let (status, headers, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .is_ok_and(|ct| ct.starts_with("text/html")));
    assert!(String::from_utf8_lossy(&body).to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("Failed to build request");
    let (status, _, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn test_schema_sdl_endpoint() {
    let request = Request::builder()
        .uri("/schema.graphql")
        .body(Body::empty())
        .expect("Failed to build request");
    let (status, _, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    let sdl = String::from_utf8_lossy(&body);
    assert!(sdl.contains("type Query {"));
    assert!(sdl.contains("type Mutation {"));
    assert_eq!(sdl.matches("type PaginationResponse {").count(), 1);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let mut request = post_json(r#"{"query":"{ users { id } }"}"#);
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://shop.example.com".parse().expect("valid header"));
    let (status, headers, _) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

//! HTTP routes exercised through the router without a socket.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use echodemo_server::{app_state::AppState, config::ServerConfig, router};

fn app() -> Router {
    router::build_router(AppState::new(ServerConfig::default()).unwrap())
}

async fn call(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => req
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = app().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 64 * 1024).await.unwrap();
    let v = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, v)
}

#[tokio::test]
async fn health_and_welcome() {
    let (s, v) = call(Method::GET, "/health", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, json!({"status": "ok"}));

    let (s, v) = call(Method::GET, "/", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, json!({"message": "Welcome to the Gin Demo Server!"}));
}

#[tokio::test]
async fn list_users_is_canned() {
    let (s, v) = call(Method::GET, "/api/v1/users", None).await;
    assert_eq!(s, StatusCode::OK);
    let data = v["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0], json!({"id": 1, "name": "Alice", "email": "alice@example.com"}));
    assert_eq!(data[1]["name"], "Bob");
    assert_eq!(data[2]["id"], 3);
}

#[tokio::test]
async fn get_user_echoes_id_as_string() {
    let (s, v) = call(Method::GET, "/api/v1/users/42", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(
        v,
        json!({"data": {"id": "42", "name": "Demo User", "email": "demo@example.com"}})
    );
}

#[tokio::test]
async fn create_user_validation() {
    let (s, v) = call(Method::POST, "/api/v1/users", Some(json!({"name": "Dana"}))).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert!(!v["error"].as_str().unwrap().is_empty());

    let (s, v) = call(
        Method::POST,
        "/api/v1/users",
        Some(json!({"name": "Dana", "email": "not-an-email"})),
    )
    .await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert!(v["error"].is_string());

    let (s, v) = call(
        Method::POST,
        "/api/v1/users",
        Some(json!({"name": "Dana", "email": "dana@x.com"})),
    )
    .await;
    assert_eq!(s, StatusCode::CREATED);
    assert_eq!(v["message"], "User created successfully");
    assert_eq!(v["data"], json!({"name": "Dana", "email": "dana@x.com"}));
}

#[tokio::test]
async fn create_user_rejects_malformed_body() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_user_reflects_body() {
    let (s, v) = call(Method::PUT, "/api/v1/users/7", Some(json!({"name": "Eve"}))).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v["message"], "User updated successfully");
    assert_eq!(v["data"], json!({"id": "7", "name": "Eve", "email": ""}));
}

#[tokio::test]
async fn delete_user_echoes_id() {
    let (s, v) = call(Method::DELETE, "/api/v1/users/9", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, json!({"message": "User deleted successfully", "id": "9"}));
}

#[tokio::test]
async fn plain_get_on_ws_is_not_upgraded() {
    let req = Request::builder().uri("/ws").body(Body::empty()).unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert!(res.status().is_client_error());
}

#[tokio::test]
async fn metrics_are_prometheus_text() {
    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = to_bytes(res.into_body(), 64 * 1024).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("# TYPE echodemo_ws_upgrades_total counter"));
}

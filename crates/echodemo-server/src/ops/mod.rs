//! Operational HTTP endpoints.
//!
//! - `/`        : welcome message
//! - `/health`  : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::app_state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the Gin Demo Server!";

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics().render(),
    )
        .into_response()
}

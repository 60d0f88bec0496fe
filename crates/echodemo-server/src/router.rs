//! Axum router wiring.
//!
//! Ops endpoints at the root, the WebSocket echo at `/ws`, and the demo user
//! resource under `/api/v1`.

use axum::{routing::get, Router};

use crate::{api, app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::welcome))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .route("/ws", get(transport::upgrade::ws_upgrade))
        .nest("/api/v1", api::routes())
        .with_state(state)
}

//! WebSocket upgrade handler for `GET /ws`.
//!
//! Responsibilities:
//! - Refuse the upgrade when the origin policy says no (403).
//! - Refuse malformed handshakes (axum's rejection status) and log them.
//! - Apply the configured read/write buffer sizes.
//! - Hand the upgraded socket to an echo session running in its own task,
//!   inside a `ws_session{id}` span.

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;
use tracing::Instrument;

use echodemo_core::error::EchoError;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::transport::session::Session;

pub async fn ws_upgrade(
    State(app): State<AppState>,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "failed to upgrade connection");
            app.metrics()
                .ws_upgrade_failures
                .inc(&[("reason", "handshake")]);
            return rejection.into_response();
        }
    };

    if !app.origin_policy().permits(&headers) {
        let origin = headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        tracing::warn!(%origin, "failed to upgrade connection: origin not allowed");
        app.metrics().ws_upgrade_failures.inc(&[("reason", "origin")]);
        return ApiError::from(EchoError::OriginRejected).into_response();
    }

    let id = app.next_session_id();
    let span = tracing::info_span!("ws_session", id);
    let read_buf = app.cfg().ws.read_buffer_size;
    let write_buf = app.cfg().ws.write_buffer_size;
    let failed = app.clone();

    ws.read_buffer_size(read_buf)
        .write_buffer_size(write_buf)
        .on_failed_upgrade(move |e| {
            tracing::warn!(session = id, error = %e, "failed to upgrade connection");
            failed.metrics().ws_upgrade_failures.inc(&[("reason", "io")]);
        })
        .on_upgrade(move |socket| run_session(app, id, socket).instrument(span))
}

async fn run_session(app: AppState, id: u64, socket: WebSocket) {
    let metrics = app.metrics_handle();
    metrics.ws_upgrades.inc(&[]);
    let _active = ActiveSession::enter(&app);
    tracing::info!("client connected");

    let (ws_tx, ws_rx) = socket.split();
    let summary = Session::new(id, ws_rx, ws_tx, metrics).run().await;

    app.metrics().ws_session_closes.inc(&[
        ("reason", summary.reason.as_label()),
        ("expected", if summary.reason.is_expected() { "true" } else { "false" }),
    ]);
    tracing::info!(echoed = summary.echoed, reason = %summary.reason, "client disconnected");
}

/// Keeps the active-session gauge honest on every exit path, unwinding included.
struct ActiveSession {
    app: AppState,
}

impl ActiveSession {
    fn enter(app: &AppState) -> Self {
        app.metrics().ws_sessions_active.inc(&[]);
        Self { app: app.clone() }
    }
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        self.app.metrics().ws_sessions_active.dec(&[]);
    }
}

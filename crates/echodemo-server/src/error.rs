//! HTTP mapping of `EchoError` for the JSON handlers.
//!
//! Every error body is `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use echodemo_core::error::{ClientCode, EchoError};

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub EchoError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest | ClientCode::Validation => StatusCode::BAD_REQUEST,
            ClientCode::OriginRejected => StatusCode::FORBIDDEN,
            ClientCode::Config | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

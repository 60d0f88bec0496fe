//! Demo user resource. Nothing is stored: writes are validated (create only)
//! and reflected back.
//!
//! Bodies are parsed from raw bytes so a missing or odd `Content-Type` does not
//! change the outcome; any parse failure is a 400.

use axum::{body::Bytes, extract::Path, http::StatusCode, Json};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use echodemo_core::error::EchoError;
use echodemo_core::protocol::user::{canned_users, CreateUser, UpdateUser, UserView};

use crate::error::ApiError;

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::from(EchoError::BadRequest(format!("invalid json body: {e}"))))
}

pub async fn list_users() -> Json<Value> {
    Json(json!({ "data": canned_users() }))
}

pub async fn get_user(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "data": UserView::demo(id) }))
}

pub async fn create_user(body: Bytes) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input: CreateUser = parse_json(&body)?;
    let user = input.validate()?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "data": user,
        })),
    ))
}

pub async fn update_user(Path(id): Path<String>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let input: UpdateUser = parse_json(&body)?;
    Ok(Json(json!({
        "message": "User updated successfully",
        "data": input.into_view(id),
    })))
}

pub async fn delete_user(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "message": "User deleted successfully",
        "id": id,
    }))
}

//! Raw log upload: persist the payload verbatim.

use crate::api::{validate::ValidationError, ApiError, AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

pub async fn upload(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.is_null() {
        return Err(ApiError::Validation(ValidationError::EmptyPayload));
    }
    state.store.save_raw_log(&payload.to_string())?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Log received successfully" })),
    ))
}

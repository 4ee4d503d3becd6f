//! Stored results listing.

use crate::api::{ApiError, AppState};
use crate::storage::StoredResult;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct ResultsResponse {
    pub count: usize,
    pub results: Vec<StoredResult>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<ResultsResponse>, ApiError> {
    let results = state.store.list_results()?;
    Ok(Json(ResultsResponse {
        count: results.len(),
        results,
    }))
}

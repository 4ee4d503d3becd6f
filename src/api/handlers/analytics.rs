//! Analytics over stored counts: the summary formula re-applied to the
//! per-verdict counts read back from storage.

use crate::api::{ApiError, AppState};
use crate::scoring::{BatchSummary, Verdict};
use axum::{extract::State, Json};

pub async fn analytics(State(state): State<AppState>) -> Result<Json<BatchSummary>, ApiError> {
    let normal = state.store.count_where(Verdict::Normal)?;
    let suspicious = state.store.count_where(Verdict::Suspicious)?;
    Ok(Json(BatchSummary::from_counts(normal, suspicious)))
}

//! Strict single-record prediction: validate, score, persist, respond.

use crate::api::{validate, ApiError, AppState};
use crate::features::{self, FeatureVector};
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

#[derive(Serialize)]
pub struct PredictResponse {
    /// Extracted features, echoed so callers can see what was scored.
    pub features: FeatureVector,
    pub prediction: &'static str,
    pub confidence: f64,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let record = validate::validate_record(&payload)?;

    let features = features::extract(record);
    let result = state.scorer.score_features(&features)?;
    state.store.save_result(&result)?;

    info!(
        prediction = result.prediction.label(),
        confidence = result.confidence,
        "session scored"
    );
    Ok(Json(PredictResponse {
        features,
        prediction: result.prediction.label(),
        confidence: result.confidence,
    }))
}

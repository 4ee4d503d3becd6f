//! CSV batch prediction: score and persist every row, respond with a summary.
//!
//! The body is a CSV document whose headers are the model feature columns
//! ([`FEATURE_COLUMNS`]). Cells flow through the extractor untyped — its
//! defaulting is the only safety net on this path.

use crate::api::{validate::REQUIRED_FIELDS, ApiError, AppState};
use crate::features::{RawLogRecord, FEATURE_COLUMNS};
use crate::scoring::BatchSummary;
use axum::{extract::State, Json};
use csv::StringRecord;
use serde_json::Value;
use tracing::info;

/// Map one CSV row to a raw log record by header name. Missing columns
/// simply leave the key absent; the extractor defaults it downstream.
pub fn record_from_csv_row(headers: &StringRecord, row: &StringRecord) -> RawLogRecord {
    let mut record = RawLogRecord::new();
    for (key, column) in REQUIRED_FIELDS.iter().zip(FEATURE_COLUMNS.iter()) {
        if let Some(idx) = headers.iter().position(|h| h.trim() == *column) {
            if let Some(cell) = row.get(idx) {
                record.insert(key.to_string(), Value::String(cell.to_string()));
            }
        }
    }
    record
}

pub async fn predict_csv(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<BatchSummary>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| ApiError::BadCsv(e.to_string()))?
        .clone();

    let mut results = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ApiError::BadCsv(e.to_string()))?;
        let record = record_from_csv_row(&headers, &row);
        let result = state.scorer.score(&record)?;
        state.store.save_result(&result)?;
        results.push(result);
    }

    let summary = BatchSummary::from_results(&results);
    info!(
        total = summary.total,
        suspicious = summary.suspicious_count,
        "csv batch scored"
    );
    Ok(Json(summary))
}

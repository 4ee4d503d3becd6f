//! Simulated website analysis: generate synthetic sessions, score and
//! persist each, respond with the batch summary.

use crate::api::{ApiError, AppState};
use crate::features::RawLogRecord;
use crate::scoring::BatchSummary;
use axum::{extract::State, Json};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Protocol labels the simulator draws from.
pub const SIMULATED_PROTOCOLS: [&str; 3] = ["HTTPS", "SSH", "TOR"];

const SIMULATION_NOTE: &str = "Results based on simulated behavioral patterns";

/// Generate one synthetic session log: hour 0-23, duration 1-60 minutes,
/// 5-120 commands, 0-5 failed logins, typing speed 30-140.
pub fn simulated_session<R: Rng>(rng: &mut R) -> RawLogRecord {
    let record = serde_json::json!({
        "login_time": format!("{}:00", rng.gen_range(0..=23)),
        "session_duration": rng.gen_range(1..=60),
        "commands": vec!["cmd"; rng.gen_range(5..=120)],
        "failed_logins": rng.gen_range(0..=5),
        "protocol": *SIMULATED_PROTOCOLS.choose(rng).unwrap_or(&"HTTPS"),
        "typing_speed": rng.gen_range(30..=140),
    });
    match record {
        Value::Object(map) => map,
        _ => RawLogRecord::new(),
    }
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub website: String,
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub note: &'static str,
}

pub async fn analyze_website(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let website = payload
        .get("website")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let num_users = requested_users(&payload).unwrap_or(state.simulation.default_users);

    let mut rng = rand::thread_rng();
    let mut results = Vec::with_capacity(num_users as usize);
    for _ in 0..num_users {
        let record = simulated_session(&mut rng);
        let result = state.scorer.score(&record)?;
        state.store.save_result(&result)?;
        results.push(result);
    }

    let summary = BatchSummary::from_results(&results);
    info!(
        website = %website,
        total = summary.total,
        suspicious = summary.suspicious_count,
        "simulated batch scored"
    );
    Ok(Json(AnalyzeResponse {
        website,
        summary,
        note: SIMULATION_NOTE,
    }))
}

/// `num_users` may arrive as a number or a numeric string.
fn requested_users(payload: &Value) -> Option<u32> {
    match payload.get("num_users") {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as u32),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

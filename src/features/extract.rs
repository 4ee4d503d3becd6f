//! Feature extraction: one raw log record in, one complete vector out.
//!
//! Extraction is total. The strict single-record endpoint validates types
//! before calling in, but the CSV and simulated batch paths do not, so every
//! field coercion here lands on a value; missing or unparseable input
//! degrades to zero (or `"UNKNOWN"` for the protocol) instead of erroring.

use super::{FeatureVector, RawLogRecord, UNKNOWN_PROTOCOL};
use serde_json::Value;

/// Normalize a raw log record into the fixed feature schema.
pub fn extract(record: &RawLogRecord) -> FeatureVector {
    FeatureVector {
        login_hour: login_hour(record.get("login_time")),
        session_duration: count_field(record.get("session_duration")),
        commands_count: commands_count(record.get("commands")),
        failed_logins: count_field(record.get("failed_logins")),
        protocol: protocol(record.get("protocol")),
        typing_speed: typing_speed(record.get("typing_speed")),
    }
}

/// `"HH:MM"` strings take the segment before the colon; bare numeric strings
/// parse whole (no colon still yields the full segment). Numbers truncate.
/// Anything else, or a failed parse, is hour zero. The result is clamped to
/// the 0-23 range the schema promises.
fn login_hour(value: Option<&Value>) -> u32 {
    let hour = match value {
        Some(Value::String(s)) => s
            .split(':')
            .next()
            .and_then(|segment| segment.trim().parse::<i64>().ok())
            .unwrap_or(0),
        Some(Value::Number(n)) => n.as_f64().map(|f| f as i64).unwrap_or(0),
        _ => 0,
    };
    hour.clamp(0, 23) as u32
}

/// Integer coercion for counts: JSON numbers truncate, numeric strings parse
/// (falling back to float-and-truncate so CSV cells like `"34.5"` behave
/// like their typed counterparts). Negatives clamp to zero.
fn count_field(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    };
    n.max(0) as u32
}

/// The JSON path sends `commands` as a sequence of opaque tokens; the CSV
/// path sends a pre-counted integer. Both shapes are accepted: a sequence
/// counts its elements, anything else coerces like the other count fields.
fn commands_count(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Array(commands)) => commands.len() as u32,
        Some(other) => count_field(Some(other)),
        None => 0,
    }
}

fn protocol(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => UNKNOWN_PROTOCOL.to_string(),
    }
}

/// Float coercion; non-finite and negative values clamp to zero.
fn typing_speed(value: Option<&Value>) -> f64 {
    let speed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if speed.is_finite() {
        speed.max(0.0)
    } else {
        0.0
    }
}

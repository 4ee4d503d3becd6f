//! Strict input validation for the single-record prediction endpoint.
//!
//! This boundary rejects malformed input before the scoring core runs; the
//! batch and simulated paths skip it and rely on the extractor's defaulting
//! instead.

use crate::features::RawLogRecord;
use serde_json::Value;
use thiserror::Error;

/// Fields a strict single-record payload must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "login_time",
    "session_duration",
    "commands",
    "failed_logins",
    "protocol",
    "typing_speed",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No log data provided")]
    EmptyPayload,
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid login_time format. Expected HH:MM")]
    BadLoginTime,
    #[error("Invalid numeric value in input")]
    BadNumeric,
    #[error("Commands must be a list")]
    CommandsNotList,
}

/// Check a strict payload and hand back the record on success.
pub fn validate_record(payload: &Value) -> Result<&RawLogRecord, ValidationError> {
    let record = payload
        .as_object()
        .filter(|m| !m.is_empty())
        .ok_or(ValidationError::EmptyPayload)?;

    for field in REQUIRED_FIELDS {
        if !record.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    match record.get("login_time") {
        Some(Value::String(s)) if s.contains(':') => {}
        _ => return Err(ValidationError::BadLoginTime),
    }

    if !integer_like(record.get("session_duration")) || !integer_like(record.get("failed_logins"))
    {
        return Err(ValidationError::BadNumeric);
    }
    if !float_like(record.get("typing_speed")) {
        return Err(ValidationError::BadNumeric);
    }

    if !record.get("commands").map(Value::is_array).unwrap_or(false) {
        return Err(ValidationError::CommandsNotList);
    }

    Ok(record)
}

fn integer_like(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn float_like(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

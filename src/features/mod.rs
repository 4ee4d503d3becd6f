//! Normalization of raw session logs into the fixed model feature schema.

mod extract;

pub use extract::extract;

use serde::{Deserialize, Serialize};

/// Untyped session log as received from clients: JSON object with optional,
/// loosely-typed fields. Single-record, CSV, and simulated paths all funnel
/// their rows into this shape before extraction.
pub type RawLogRecord = serde_json::Map<String, serde_json::Value>;

/// Sentinel protocol label substituted when a record carries none.
pub const UNKNOWN_PROTOCOL: &str = "UNKNOWN";

/// Model input columns, in the exact order the classifier was trained on.
/// CSV batch uploads use the same names as headers.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "LoginHour",
    "SessionDuration",
    "CommandsCount",
    "FailedLogins",
    "Protocol",
    "TypingSpeed",
];

/// Fixed-schema feature vector for one session log. Numeric fields are
/// never negative; extraction defaults them to zero instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Hour of login, 0-23 (best effort from `"HH:MM"` or a numeric hour).
    pub login_hour: u32,
    /// Session length in minutes.
    pub session_duration: u32,
    /// Number of commands issued during the session.
    pub commands_count: u32,
    /// Failed login attempts preceding the session.
    pub failed_logins: u32,
    /// Connection protocol label, pre-encoding (`"UNKNOWN"` when absent).
    pub protocol: String,
    /// Typing speed, characters per minute.
    pub typing_speed: f64,
}

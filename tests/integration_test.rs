//! Integration tests: config load, feature extraction, protocol encoding,
//! classifier load failures, batch summaries, storage, strict validation.

use behaviord::api::handlers::analyze::{simulated_session, SIMULATED_PROTOCOLS};
use behaviord::api::handlers::predict_csv::record_from_csv_row;
use behaviord::api::validate::{validate_record, ValidationError};
use behaviord::config::ServiceConfig;
use behaviord::features::{extract, RawLogRecord, UNKNOWN_PROTOCOL};
use behaviord::model::{input_row, BehaviorClassifier, ModelError, ProtocolEncoder};
use behaviord::scoring::{round2, round3, BatchSummary, ScoredResult, Verdict};
use behaviord::storage::ResultStore;
use serde_json::json;
use std::path::Path;

fn record(value: serde_json::Value) -> RawLogRecord {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected JSON object, got {:?}", other),
    }
}

fn scored(prediction: Verdict, confidence: f64) -> ScoredResult {
    ScoredResult {
        prediction,
        confidence,
    }
}

#[test]
fn config_load_default() {
    let c = ServiceConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.server.port, 5000);
    assert_eq!(c.server.host, "0.0.0.0");
    assert_eq!(c.data_dir, Path::new(".behaviord"));
    assert_eq!(c.simulation.default_users, 100);
    assert!(c.log.json);
}

#[test]
fn config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut config = ServiceConfig::default();
    config.server.port = 8088;
    config.log.json = false;
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let loaded = ServiceConfig::load(&path);
    assert_eq!(loaded.server.port, 8088);
    assert!(!loaded.log.json);
}

#[test]
fn extract_empty_record_defaults() {
    let fv = extract(&RawLogRecord::new());
    assert_eq!(fv.login_hour, 0);
    assert_eq!(fv.session_duration, 0);
    assert_eq!(fv.commands_count, 0);
    assert_eq!(fv.failed_logins, 0);
    assert_eq!(fv.protocol, UNKNOWN_PROTOCOL);
    assert_eq!(fv.typing_speed, 0.0);
}

#[test]
fn extract_hhmm_and_command_list() {
    let fv = extract(&record(json!({
        "login_time": "14:30",
        "commands": ["a", "b", "c"],
    })));
    assert_eq!(fv.login_hour, 14);
    assert_eq!(fv.commands_count, 3);
}

#[test]
fn extract_login_hour_shapes() {
    // Numeric hours truncate; strings split on the colon.
    let cases = [
        (json!({ "login_time": 14.7 }), 14),
        (json!({ "login_time": 7 }), 7),
        (json!({ "login_time": "7" }), 7),
        (json!({ "login_time": "ab:cd" }), 0),
        (json!({ "login_time": [7] }), 0),
        // Out-of-range hours clamp to the schema's 0-23.
        (json!({ "login_time": "99:30" }), 23),
        (json!({ "login_time": -3 }), 0),
    ];
    for (input, expected) in cases {
        let fv = extract(&record(input.clone()));
        assert_eq!(fv.login_hour, expected, "for {}", input);
    }
}

#[test]
fn extract_count_coercion() {
    let fv = extract(&record(json!({
        "session_duration": "34",
        "failed_logins": "2",
    })));
    assert_eq!(fv.session_duration, 34);
    assert_eq!(fv.failed_logins, 2);

    // Float cells truncate like their typed counterparts; negatives clamp.
    let fv = extract(&record(json!({
        "session_duration": "34.9",
        "failed_logins": -5,
    })));
    assert_eq!(fv.session_duration, 34);
    assert_eq!(fv.failed_logins, 0);

    let fv = extract(&record(json!({ "session_duration": true })));
    assert_eq!(fv.session_duration, 0);
}

#[test]
fn extract_commands_both_shapes() {
    // Sequence counts its elements; the CSV path sends a pre-counted value.
    assert_eq!(
        extract(&record(json!({ "commands": ["ls", "cd"] }))).commands_count,
        2
    );
    assert_eq!(extract(&record(json!({ "commands": [] }))).commands_count, 0);
    assert_eq!(extract(&record(json!({ "commands": 42 }))).commands_count, 42);
    assert_eq!(
        extract(&record(json!({ "commands": "42" }))).commands_count,
        42
    );
    assert_eq!(
        extract(&record(json!({ "commands": {"n": 3} }))).commands_count,
        0
    );
}

#[test]
fn extract_protocol_passthrough() {
    assert_eq!(extract(&record(json!({ "protocol": "SSH" }))).protocol, "SSH");
    // Empty strings pass through; the encoder's fallback handles them.
    assert_eq!(extract(&record(json!({ "protocol": "" }))).protocol, "");
    assert_eq!(
        extract(&record(json!({ "protocol": 6 }))).protocol,
        UNKNOWN_PROTOCOL
    );
}

#[test]
fn extract_typing_speed_coercion() {
    assert_eq!(
        extract(&record(json!({ "typing_speed": 88.5 }))).typing_speed,
        88.5
    );
    assert_eq!(
        extract(&record(json!({ "typing_speed": "88.5" }))).typing_speed,
        88.5
    );
    assert_eq!(
        extract(&record(json!({ "typing_speed": -12.0 }))).typing_speed,
        0.0
    );
    assert_eq!(
        extract(&record(json!({ "typing_speed": "NaN" }))).typing_speed,
        0.0
    );
}

#[test]
fn encoder_encode_and_unseen_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("protocol_classes.json");
    std::fs::write(&path, r#"["HTTPS", "SSH", "FTP"]"#).unwrap();

    let encoder = ProtocolEncoder::load(&path).unwrap();
    assert_eq!(encoder.classes().len(), 3);
    assert_eq!(encoder.encode("HTTPS"), 0);
    assert_eq!(encoder.encode("SSH"), 1);
    assert_eq!(encoder.encode("FTP"), 2);
    // Unseen labels take the fallback code instead of erroring.
    assert_eq!(encoder.encode("TOR"), 0);
    assert_eq!(encoder.encode(""), 0);
    assert_eq!(encoder.encode(UNKNOWN_PROTOCOL), 0);
}

#[test]
fn encoder_load_failures_are_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.json");
    assert!(matches!(
        ProtocolEncoder::load(&missing),
        Err(ModelError::ArtifactMissing(_))
    ));

    let malformed = dir.path().join("bad.json");
    std::fs::write(&malformed, "not json").unwrap();
    assert!(matches!(
        ProtocolEncoder::load(&malformed),
        Err(ModelError::MalformedClasses(_))
    ));

    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "[]").unwrap();
    assert!(matches!(
        ProtocolEncoder::load(&empty),
        Err(ModelError::MalformedClasses(_))
    ));
}

#[test]
fn classifier_missing_artifact_fails_load() {
    let err = BehaviorClassifier::load(Path::new("nonexistent.onnx")).unwrap_err();
    assert!(matches!(err, ModelError::ArtifactMissing(_)));
}

#[test]
fn classifier_input_row_order() {
    let fv = extract(&record(json!({
        "login_time": "14:30",
        "session_duration": 34,
        "commands": ["a", "b", "c"],
        "failed_logins": 2,
        "protocol": "SSH",
        "typing_speed": 88.5,
    })));
    assert_eq!(input_row(&fv, 1), [14.0, 34.0, 3.0, 2.0, 1.0, 88.5]);
}

#[test]
fn summary_empty_batch_is_all_zero() {
    let summary = BatchSummary::from_results(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.normal_count, 0);
    assert_eq!(summary.suspicious_count, 0);
    assert_eq!(summary.normal_percent, 0.0);
    assert_eq!(summary.suspicious_percent, 0.0);
}

#[test]
fn summary_counts_and_percentages() {
    let results = vec![
        scored(Verdict::Suspicious, 0.9),
        scored(Verdict::Normal, 0.8),
        scored(Verdict::Suspicious, 0.7),
        scored(Verdict::Suspicious, 0.6),
    ];
    let summary = BatchSummary::from_results(&results);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.normal_count, 1);
    assert_eq!(summary.suspicious_count, 3);
    assert_eq!(summary.normal_percent, 25.0);
    assert_eq!(summary.suspicious_percent, 75.0);
}

#[test]
fn summary_rounds_to_two_decimals() {
    let summary = BatchSummary::from_counts(2, 1);
    assert_eq!(summary.normal_percent, 66.67);
    assert_eq!(summary.suspicious_percent, 33.33);
}

#[test]
fn summary_from_counts_matches_from_results() {
    let results = vec![
        scored(Verdict::Normal, 0.9),
        scored(Verdict::Normal, 0.9),
        scored(Verdict::Suspicious, 0.9),
    ];
    let by_results = BatchSummary::from_results(&results);
    let by_counts = BatchSummary::from_counts(2, 1);
    assert_eq!(by_results.total, by_counts.total);
    assert_eq!(by_results.normal_percent, by_counts.normal_percent);
    assert_eq!(by_results.suspicious_percent, by_counts.suspicious_percent);
}

#[test]
fn summary_percentages_sum_to_hundred() {
    let total = 7u64;
    for suspicious in 0..=total {
        let summary = BatchSummary::from_counts(total - suspicious, suspicious);
        let sum = summary.normal_percent + summary.suspicious_percent;
        assert!(
            (sum - 100.0).abs() < 0.02,
            "{} + {} drifted from 100",
            summary.normal_percent,
            summary.suspicious_percent
        );
    }
}

#[test]
fn rounding_helpers() {
    assert_eq!(round2(33.333333), 33.33);
    assert_eq!(round2(66.666666), 66.67);
    assert_eq!(round3(0.87654), 0.877);
    assert_eq!(round3(0.1234), 0.123);
    assert_eq!(round3(1.0), 1.0);
}

#[test]
fn storage_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ResultStore::open(&dir.path().join("store.db")).unwrap();

    let id1 = store.save_result(&scored(Verdict::Suspicious, 0.91)).unwrap();
    let id2 = store.save_result(&scored(Verdict::Normal, 0.64)).unwrap();
    assert!(id2 > id1);

    let rows = store.list_results().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, id1);
    assert_eq!(rows[0].prediction, 1);
    assert_eq!(rows[0].confidence, 0.91);
    assert!(!rows[0].created_at.is_empty());
    assert_eq!(rows[1].prediction, 0);
}

#[test]
fn storage_counts_by_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let store = ResultStore::open(&dir.path().join("store.db")).unwrap();

    for _ in 0..3 {
        store.save_result(&scored(Verdict::Suspicious, 0.9)).unwrap();
    }
    store.save_result(&scored(Verdict::Normal, 0.8)).unwrap();

    assert_eq!(store.count_where(Verdict::Suspicious).unwrap(), 3);
    assert_eq!(store.count_where(Verdict::Normal).unwrap(), 1);

    let summary = BatchSummary::from_counts(
        store.count_where(Verdict::Normal).unwrap(),
        store.count_where(Verdict::Suspicious).unwrap(),
    );
    assert_eq!(summary.total, 4);
    assert_eq!(summary.suspicious_percent, 75.0);
}

#[test]
fn storage_raw_logs() {
    let dir = tempfile::tempdir().unwrap();
    let store = ResultStore::open(&dir.path().join("store.db")).unwrap();
    let id = store.save_raw_log(r#"{"session":"x1"}"#).unwrap();
    assert_eq!(id, 1);
}

#[test]
fn validate_accepts_well_formed_record() {
    let payload = json!({
        "login_time": "23:59",
        "session_duration": 30,
        "commands": ["ls"],
        "failed_logins": "0",
        "protocol": "SSH",
        "typing_speed": "77.2",
    });
    assert!(validate_record(&payload).is_ok());
}

#[test]
fn validate_rejects_malformed_records() {
    assert_eq!(
        validate_record(&json!({})).unwrap_err(),
        ValidationError::EmptyPayload
    );
    assert_eq!(
        validate_record(&json!([1, 2])).unwrap_err(),
        ValidationError::EmptyPayload
    );

    let missing = validate_record(&json!({ "login_time": "10:00" })).unwrap_err();
    assert_eq!(missing, ValidationError::MissingField("session_duration"));
    assert_eq!(missing.to_string(), "Missing field: session_duration");

    let base = json!({
        "login_time": "1030",
        "session_duration": 30,
        "commands": ["ls"],
        "failed_logins": 0,
        "protocol": "SSH",
        "typing_speed": 77.2,
    });
    assert_eq!(
        validate_record(&base).unwrap_err(),
        ValidationError::BadLoginTime
    );

    let mut bad_duration = base.clone();
    bad_duration["login_time"] = json!("10:30");
    bad_duration["session_duration"] = json!("thirty");
    assert_eq!(
        validate_record(&bad_duration).unwrap_err(),
        ValidationError::BadNumeric
    );
    assert_eq!(
        validate_record(&bad_duration).unwrap_err().to_string(),
        "Invalid numeric value in input"
    );

    let mut bad_commands = base.clone();
    bad_commands["login_time"] = json!("10:30");
    bad_commands["commands"] = json!("ls, cd");
    assert_eq!(
        validate_record(&bad_commands).unwrap_err(),
        ValidationError::CommandsNotList
    );
}

#[test]
fn csv_rows_map_by_header_name() {
    let csv_body = "LoginHour,SessionDuration,CommandsCount,FailedLogins,Protocol,TypingSpeed\n\
                    14,34,57,2,SSH,88.5\n\
                    3,5, 12 ,0,TOR,40\n";
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_body.as_bytes());
    let headers = reader.headers().unwrap().clone();
    let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();

    let fv = extract(&record_from_csv_row(&headers, &rows[0]));
    assert_eq!(fv.login_hour, 14);
    assert_eq!(fv.session_duration, 34);
    assert_eq!(fv.commands_count, 57);
    assert_eq!(fv.failed_logins, 2);
    assert_eq!(fv.protocol, "SSH");
    assert_eq!(fv.typing_speed, 88.5);

    let fv = extract(&record_from_csv_row(&headers, &rows[1]));
    assert_eq!(fv.commands_count, 12);
    assert_eq!(fv.protocol, "TOR");
}

#[test]
fn csv_missing_column_defaults_downstream() {
    let csv_body = "LoginHour,Protocol\n22,SSH\n";
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_body.as_bytes());
    let headers = reader.headers().unwrap().clone();
    let row = reader.records().next().unwrap().unwrap();

    let fv = extract(&record_from_csv_row(&headers, &row));
    assert_eq!(fv.login_hour, 22);
    assert_eq!(fv.protocol, "SSH");
    assert_eq!(fv.session_duration, 0);
    assert_eq!(fv.commands_count, 0);
    assert_eq!(fv.typing_speed, 0.0);
}

#[test]
fn simulated_sessions_stay_in_range() {
    use rand::{rngs::StdRng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let fv = extract(&simulated_session(&mut rng));
        assert!(fv.login_hour <= 23);
        assert!((1..=60).contains(&fv.session_duration));
        assert!((5..=120).contains(&fv.commands_count));
        assert!(fv.failed_logins <= 5);
        assert!(SIMULATED_PROTOCOLS.contains(&fv.protocol.as_str()));
        assert!((30.0..=140.0).contains(&fv.typing_speed));
    }
}

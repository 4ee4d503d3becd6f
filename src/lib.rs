//! behaviord — session-log behavior scoring service.
//!
//! Modular structure:
//! - [`features`] — Raw log normalization into the fixed feature schema
//! - [`model`] — Protocol encoder and ONNX behavior classifier artifacts
//! - [`scoring`] — Per-record scorer and batch summaries
//! - [`storage`] — SQLite persistence for results and raw logs
//! - [`api`] — HTTP routes, strict validation, error mapping
//! - [`logging`] — Structured JSON logging

pub mod api;
pub mod config;
pub mod features;
pub mod model;
pub mod scoring;
pub mod storage;
pub mod logging;

pub use config::ServiceConfig;
pub use features::{FeatureVector, RawLogRecord};
pub use model::{BehaviorClassifier, ModelError, ProtocolEncoder};
pub use scoring::{BatchSummary, ScoredResult, SessionScorer, Verdict};
pub use storage::ResultStore;
pub use logging::StructuredLogger;

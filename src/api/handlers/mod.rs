//! HTTP handlers, one module per route.

pub mod analytics;
pub mod analyze;
pub mod health;
pub mod logs;
pub mod predict;
pub mod predict_csv;
pub mod results;

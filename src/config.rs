//! Service configuration: JSON file with per-section defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Data directory (SQLite store)
    pub data_dir: PathBuf,
    /// Model artifact locations
    pub model: ModelConfig,
    /// HTTP bind address
    pub server: ServerConfig,
    /// Simulated-batch parameters
    pub simulation: SimulationConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX behavior classifier
    pub classifier_path: PathBuf,
    /// Path to the fitted protocol classes (JSON array, fitted order)
    pub protocol_classes_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Sessions generated per analyze call when the request names no count
    pub default_users: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".behaviord"),
            model: ModelConfig::default(),
            server: ServerConfig::default(),
            simulation: SimulationConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            classifier_path: PathBuf::from("models/behavior.onnx"),
            protocol_classes_path: PathBuf::from("models/protocol_classes.json"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { default_users: 100 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<ServiceConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}

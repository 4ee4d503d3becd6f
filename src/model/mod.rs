//! Pre-trained model artifacts: protocol encoder and ONNX behavior classifier.
//!
//! Both artifacts are loaded once at process start and shared read-only for
//! the life of the process. A missing or malformed artifact is a fatal
//! startup error, never a per-request one.

mod encoder;
mod onnx;

pub use encoder::{ProtocolEncoder, UNSEEN_PROTOCOL_CODE};
pub use onnx::{input_row, BehaviorClassifier};

use sha2::{Digest, Sha256};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    ArtifactMissing(PathBuf),
    #[error("failed to read model artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed protocol classes artifact: {0}")]
    MalformedClasses(String),
    #[error("onnx runtime: {0}")]
    Onnx(#[from] ort::Error),
    #[error("malformed classifier output: {0}")]
    MalformedOutput(String),
}

/// SHA-256 fingerprint of an artifact, logged at load for provenance.
fn artifact_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn read_artifact(path: &std::path::Path) -> Result<Vec<u8>, ModelError> {
    if !path.exists() {
        return Err(ModelError::ArtifactMissing(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|source| ModelError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })
}

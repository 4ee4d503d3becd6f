//! Categorical protocol encoding backed by the fitted encoder artifact.

use super::{artifact_sha256, read_artifact, ModelError};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Code substituted for labels the encoder never saw during training.
///
/// The fallback shares its value with the first fitted class. That is a
/// deliberate approximation carried over from the training setup: inference
/// stays available for unseen protocol strings at the cost of a possibly
/// misleading encoding.
pub const UNSEEN_PROTOCOL_CODE: i64 = 0;

/// Maps protocol labels to the numeric codes the classifier was trained on.
///
/// The artifact is a JSON array of class labels in fitted order; a label's
/// index is its code. Exported by the offline training step alongside the
/// classifier.
pub struct ProtocolEncoder {
    classes: Vec<String>,
    index: HashMap<String, i64>,
}

impl ProtocolEncoder {
    /// Load the fitted classes from `path`. Missing, unreadable, empty, or
    /// malformed artifacts are load errors; the caller treats them as fatal.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = read_artifact(path)?;
        let classes: Vec<String> = serde_json::from_slice(&bytes)
            .map_err(|e| ModelError::MalformedClasses(e.to_string()))?;
        if classes.is_empty() {
            return Err(ModelError::MalformedClasses(
                "no fitted classes in artifact".to_string(),
            ));
        }

        let index = classes
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i as i64))
            .collect();

        info!(
            path = %path.display(),
            classes = classes.len(),
            sha256 = %artifact_sha256(&bytes),
            "protocol encoder loaded"
        );
        Ok(Self { classes, index })
    }

    /// Encode a protocol label. Unseen labels take [`UNSEEN_PROTOCOL_CODE`]
    /// rather than erroring.
    pub fn encode(&self, label: &str) -> i64 {
        match self.index.get(label) {
            Some(code) => *code,
            None => {
                debug!(label, "protocol label not in fitted classes, using fallback code");
                UNSEEN_PROTOCOL_CODE
            }
        }
    }

    /// Fitted class labels in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

//! ONNX Runtime inference for the behavior classifier.
//!
//! Input: `[1, 6]` f32 tensor in [`FEATURE_COLUMNS`] order, with the encoded
//! protocol in the `Protocol` column. The artifact must expose a label
//! output (int64) and a per-class probability output (f32, binary), in that
//! order — the shape the offline export produces.

use super::{artifact_sha256, read_artifact, ModelError};
use crate::features::{self, FeatureVector, RawLogRecord, FEATURE_COLUMNS};
use crate::scoring::{round3, ScoredResult, Verdict};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Assemble the model input row for one vector: the numeric features plus
/// the encoded protocol, in training column order.
pub fn input_row(features: &FeatureVector, protocol_code: i64) -> [f32; FEATURE_COLUMNS.len()] {
    [
        features.login_hour as f32,
        features.session_duration as f32,
        features.commands_count as f32,
        features.failed_logins as f32,
        protocol_code as f32,
        features.typing_speed as f32,
    ]
}

/// Pre-trained binary behavior classifier, loaded once at startup.
///
/// The session sits behind a mutex because the runtime requires exclusive
/// access per inference call; the model weights themselves never change.
#[derive(Debug)]
pub struct BehaviorClassifier {
    session: Mutex<Session>,
    input_name: String,
    label_output: String,
    probability_output: String,
}

impl BehaviorClassifier {
    /// Load the classifier from `path` and run a warmup inference so shape
    /// or type mismatches surface at startup instead of on the first
    /// request. Any failure here is fatal to the process.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = read_artifact(path)?;
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_memory(&bytes)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "input".to_string());
        if session.outputs.len() < 2 {
            return Err(ModelError::MalformedOutput(format!(
                "classifier must expose label and probability outputs, found {}",
                session.outputs.len()
            )));
        }
        let label_output = session.outputs[0].name.clone();
        let probability_output = session.outputs[1].name.clone();

        info!(
            path = %path.display(),
            sha256 = %artifact_sha256(&bytes),
            input = %input_name,
            "behavior classifier loaded"
        );

        let classifier = Self {
            session: Mutex::new(session),
            input_name,
            label_output,
            probability_output,
        };
        let warmup = classifier.classify(&features::extract(&RawLogRecord::new()), 0)?;
        debug!(
            prediction = warmup.prediction.label(),
            confidence = warmup.confidence,
            "classifier warmup inference ok"
        );
        Ok(classifier)
    }

    /// Classify one vector. Returns the predicted verdict and the posterior
    /// probability of that class, clamped to [0, 1] and rounded to three
    /// decimals.
    pub fn classify(
        &self,
        features: &FeatureVector,
        protocol_code: i64,
    ) -> Result<ScoredResult, ModelError> {
        let row = input_row(features, protocol_code);
        let array = Array2::from_shape_vec((1, row.len()), row.to_vec())
            .map_err(|e| ModelError::MalformedOutput(e.to_string()))?;
        let input = Value::from_array(array)?;

        let mut session = self.session.lock().unwrap();
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input])?;

        let label_value = outputs.get(self.label_output.as_str()).ok_or_else(|| {
            ModelError::MalformedOutput(format!("missing label output {:?}", self.label_output))
        })?;
        let (_, labels) = label_value.try_extract_tensor::<i64>()?;
        let label = labels.first().copied().ok_or_else(|| {
            ModelError::MalformedOutput("empty label output".to_string())
        })?;
        let prediction = Verdict::from_code(label);

        let prob_value = outputs.get(self.probability_output.as_str()).ok_or_else(|| {
            ModelError::MalformedOutput(format!(
                "missing probability output {:?}",
                self.probability_output
            ))
        })?;
        let (_, probabilities) = prob_value.try_extract_tensor::<f32>()?;
        let confidence = probabilities
            .get(prediction.code() as usize)
            .copied()
            .ok_or_else(|| {
                ModelError::MalformedOutput(format!(
                    "probability output has {} entries, need one per class",
                    probabilities.len()
                ))
            })?;

        Ok(ScoredResult {
            prediction,
            confidence: round3((confidence as f64).clamp(0.0, 1.0)),
        })
    }
}

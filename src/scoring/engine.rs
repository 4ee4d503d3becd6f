//! Per-record scorer: extraction → protocol encoding → classification.

use super::ScoredResult;
use crate::features::{self, FeatureVector, RawLogRecord};
use crate::model::{BehaviorClassifier, ModelError, ProtocolEncoder};
use std::sync::Arc;

/// Orchestrates one scoring call. Holds shared handles to the immutable
/// model artifacts only, so cloning is cheap and concurrent calls are safe.
#[derive(Clone)]
pub struct SessionScorer {
    encoder: Arc<ProtocolEncoder>,
    classifier: Arc<BehaviorClassifier>,
}

impl SessionScorer {
    pub fn new(encoder: Arc<ProtocolEncoder>, classifier: Arc<BehaviorClassifier>) -> Self {
        Self {
            encoder,
            classifier,
        }
    }

    /// Score one raw record end to end.
    pub fn score(&self, record: &RawLogRecord) -> Result<ScoredResult, ModelError> {
        self.score_features(&features::extract(record))
    }

    /// Score an already-extracted vector (the strict endpoint extracts first
    /// so it can echo the features back in its response).
    pub fn score_features(&self, features: &FeatureVector) -> Result<ScoredResult, ModelError> {
        let protocol_code = self.encoder.encode(&features.protocol);
        self.classifier.classify(features, protocol_code)
    }
}

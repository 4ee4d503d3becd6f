//! Scoring: verdict types, the per-record scorer, and batch summaries.

mod engine;
mod summary;

pub use engine::SessionScorer;
pub use summary::{round2, round3, BatchSummary};

use serde::{Deserialize, Serialize};

/// Binary classification outcome for one session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Normal,
    Suspicious,
}

impl Verdict {
    /// Numeric class code as persisted and as emitted by the classifier.
    pub fn code(self) -> i64 {
        match self {
            Verdict::Normal => 0,
            Verdict::Suspicious => 1,
        }
    }

    /// Class code 1 is suspicious; everything else is normal.
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Verdict::Suspicious
        } else {
            Verdict::Normal
        }
    }

    /// Human-readable label used in API responses.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Normal => "Normal",
            Verdict::Suspicious => "Suspicious",
        }
    }
}

/// One scored session log. Immutable once produced; persistence (id and
/// creation timestamp) is the storage layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub prediction: Verdict,
    /// Posterior probability of the predicted class, in [0, 1], rounded to
    /// three decimals.
    pub confidence: f64,
}

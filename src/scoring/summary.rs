//! Batch aggregation: verdict counts and percentage shares.

use super::{ScoredResult, Verdict};
use serde::{Deserialize, Serialize};

/// Round to two decimal places (percentages).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to three decimal places (confidences).
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Aggregate counts and percentages over a set of scored records. Derived,
/// never persisted; recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: u64,
    pub normal_count: u64,
    pub suspicious_count: u64,
    pub normal_percent: f64,
    pub suspicious_percent: f64,
}

impl BatchSummary {
    /// Summarize results produced within one batch call.
    pub fn from_results(results: &[ScoredResult]) -> Self {
        let suspicious = results
            .iter()
            .filter(|r| r.prediction == Verdict::Suspicious)
            .count() as u64;
        let normal = results.len() as u64 - suspicious;
        Self::from_counts(normal, suspicious)
    }

    /// Apply the summary formula to externally supplied counts, e.g. counts
    /// read back from storage by the analytics route. Percentages are
    /// defined as zero for an empty population.
    pub fn from_counts(normal_count: u64, suspicious_count: u64) -> Self {
        let total = normal_count + suspicious_count;
        let (normal_percent, suspicious_percent) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                round2(normal_count as f64 / total as f64 * 100.0),
                round2(suspicious_count as f64 / total as f64 * 100.0),
            )
        };
        Self {
            total,
            normal_count,
            suspicious_count,
            normal_percent,
            suspicious_percent,
        }
    }
}

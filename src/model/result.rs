//! Per-call scoring output.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Named sub-scores, ordered by name so output is stable.
pub type SubScores = BTreeMap<String, f64>;

/// Outcome of scoring one candidate.
///
/// `L` is the scorer's label type (alignment level, risk level, ...).
/// Scale of `composite_score` depends on the scorer: alignment is 0–100,
/// risk and impact are 0–1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult<L> {
    pub candidate_id: String,
    pub composite_score: f64,
    pub sub_scores: SubScores,
    pub label: L,
    pub generated_at: DateTime<Utc>,
}

impl<L> ScoreResult<L> {
    pub(crate) fn new(candidate_id: &str, composite_score: f64, sub_scores: SubScores, label: L) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            composite_score,
            sub_scores,
            label,
            generated_at: Utc::now(),
        }
    }

    /// Looks up one sub-score by name.
    pub fn sub_score(&self, name: &str) -> Option<f64> {
        self.sub_scores.get(name).copied()
    }
}

impl<L: PartialEq> ScoreResult<L> {
    /// Equality ignoring `generated_at`.
    pub fn same_outcome(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id
            && self.composite_score == other.composite_score
            && self.sub_scores == other.sub_scores
            && self.label == other.label
    }
}

/// A batch entry that could not be scored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedCandidate {
    /// Position in the input slice.
    pub index: usize,
    /// Empty when the id itself was missing.
    pub candidate_id: String,
    pub reason: String,
}

/// Output of a batch scoring call: ranked results plus what was skipped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedBatch<T> {
    pub ranked: Vec<T>,
    pub skipped: Vec<SkippedCandidate>,
}

impl<T> RankedBatch<T> {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

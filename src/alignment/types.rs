//! Alignment labels and report.

use crate::model::ScoreResult;

/// Sub-score key: share of the requester's priority categories covered.
pub const CATEGORY_ALIGNMENT: &str = "category_alignment";
/// Sub-score key: location against the requester's geographies.
pub const GEOGRAPHIC_FIT: &str = "geographic_fit";
/// Sub-score key: requested budget against the requester's envelope.
pub const BUDGET_ALIGNMENT: &str = "budget_alignment";
/// Sub-score key: sector relevance of the matched categories.
pub const CATEGORY_RELEVANCE: &str = "category_relevance";
/// Sub-score key: track-record rating.
pub const CREDIBILITY: &str = "credibility";

/// All alignment sub-score keys.
pub const ALIGNMENT_KEYS: [&str; 5] = [
    CATEGORY_ALIGNMENT,
    GEOGRAPHIC_FIT,
    BUDGET_ALIGNMENT,
    CATEGORY_RELEVANCE,
    CREDIBILITY,
];

/// Ordinal fit between a candidate and a requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentLevel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl AlignmentLevel {
    /// Fixed recommendation text for this level.
    ///
    /// Keyed by the label itself, so text and label always agree.
    pub fn recommendation(self) -> &'static str {
        match self {
            AlignmentLevel::Excellent => {
                "Highly recommended: strong alignment with the funder's priorities"
            }
            AlignmentLevel::Good => "Recommended: good alignment with most priorities",
            AlignmentLevel::Fair => "Consider: partial alignment, review the gaps before committing",
            AlignmentLevel::Poor => "Not recommended: limited alignment with the funder's priorities",
        }
    }
}

/// Alignment outcome for one candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentReport {
    /// Composite on a 0–100 scale.
    pub score: ScoreResult<AlignmentLevel>,
    pub recommendation: String,
    /// Candidate categories that are also requester priorities (canonical form).
    pub matched_categories: Vec<String>,
    /// Budget parsed from the candidate's free text, if any.
    pub parsed_budget: Option<f64>,
}

impl AlignmentReport {
    pub fn candidate_id(&self) -> &str {
        &self.score.candidate_id
    }

    pub fn composite(&self) -> f64 {
        self.score.composite_score
    }

    pub fn level(&self) -> AlignmentLevel {
        self.score.label
    }
}

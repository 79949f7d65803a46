//! Full evaluation output.

use crate::alignment::AlignmentReport;
use crate::impact::ImpactAssessment;
use crate::risk::RiskAssessment;

/// Alignment, risk, and impact for one candidate against one requester.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateEvaluation {
    pub candidate_id: String,
    pub alignment: AlignmentReport,
    pub risk: RiskAssessment,
    pub impact: ImpactAssessment,
    /// Whether the risk level is within the requester's tolerance.
    pub within_risk_tolerance: bool,
}

impl CandidateEvaluation {
    /// Equality ignoring every `generated_at` timestamp.
    pub fn same_outcome(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id
            && self.within_risk_tolerance == other.within_risk_tolerance
            && self.alignment.score.same_outcome(&other.alignment.score)
            && self.alignment.matched_categories == other.alignment.matched_categories
            && self.risk.score.same_outcome(&other.risk.score)
            && self.risk.categories == other.risk.categories
            && self.impact.score.same_outcome(&other.impact.score)
            && self.impact.categories == other.impact.categories
    }
}

//! Allocation inputs, constraints, and portfolio output.

use crate::engine::CandidateEvaluation;
use crate::error::InputValidationError;
use crate::impact::ImpactCategory;
use crate::model::{Candidate, SkippedCandidate, SubScores};
use crate::risk::RiskCategory;

pub const ROI: &str = "roi";
pub const IMPACT: &str = "impact";
pub const RISK: &str = "risk";
pub const ALIGNMENT: &str = "alignment";
pub const FEASIBILITY: &str = "feasibility";

/// All performance keys, in weight-map order.
pub const PERFORMANCE_KEYS: [&str; 5] = [ROI, IMPACT, RISK, ALIGNMENT, FEASIBILITY];

/// Per-candidate performance on a 0–1 scale.
///
/// `risk` is a safety score: higher means less risky.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceScores {
    pub roi: f64,
    pub impact: f64,
    pub risk: f64,
    pub alignment: f64,
    pub feasibility: f64,
}

impl PerformanceScores {
    /// Every dimension set to `score`.
    pub fn uniform(score: f64) -> Self {
        Self {
            roi: score,
            impact: score,
            risk: score,
            alignment: score,
            feasibility: score,
        }
    }

    /// Named view for weighted aggregation.
    pub fn to_sub_scores(&self) -> SubScores {
        [
            (ROI, self.roi),
            (IMPACT, self.impact),
            (RISK, self.risk),
            (ALIGNMENT, self.alignment),
            (FEASIBILITY, self.feasibility),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn first_out_of_range(&self) -> Option<(&'static str, f64)> {
        [
            (ROI, self.roi),
            (IMPACT, self.impact),
            (RISK, self.risk),
            (ALIGNMENT, self.alignment),
            (FEASIBILITY, self.feasibility),
        ]
        .into_iter()
        .find(|(_, v)| !(0.0..=1.0).contains(v))
    }
}

/// An already-scored candidate offered to the allocator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationCandidate {
    pub id: String,
    /// Funding the candidate needs if selected.
    pub cost: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Vec<String>,
    pub scores: PerformanceScores,
}

impl AllocationCandidate {
    pub fn new(id: impl Into<String>, cost: f64, scores: PerformanceScores) -> Self {
        Self {
            id: id.into(),
            cost,
            location: None,
            categories: Vec::new(),
            scores,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Builds an allocation candidate from a full evaluation.
    ///
    /// - `impact`: impact composite
    /// - `risk`: `1 - risk composite`
    /// - `alignment`: alignment composite / 100
    /// - `roi`: economic impact category score
    /// - `feasibility`: `1 - operational risk`
    ///
    /// The cost is the budget parsed from the candidate's request; a
    /// candidate without a parsable budget cannot be allocated.
    pub fn from_evaluation(
        candidate: &Candidate,
        evaluation: &CandidateEvaluation,
    ) -> Result<Self, InputValidationError> {
        let cost = evaluation
            .alignment
            .parsed_budget
            .ok_or_else(|| InputValidationError::MissingField {
                candidate_id: candidate.id.clone(),
                field: "budget",
            })?;

        let roi = evaluation
            .impact
            .category(ImpactCategory::Economic)
            .map(|c| c.score)
            .unwrap_or_else(|| evaluation.impact.composite());
        let operational = evaluation
            .risk
            .category(RiskCategory::Operational)
            .map(|c| c.score)
            .unwrap_or_else(|| evaluation.risk.composite());

        let scores = PerformanceScores {
            roi: roi.clamp(0.0, 1.0),
            impact: evaluation.impact.composite().clamp(0.0, 1.0),
            risk: (1.0 - evaluation.risk.composite()).clamp(0.0, 1.0),
            alignment: (evaluation.alignment.composite() / 100.0).clamp(0.0, 1.0),
            feasibility: (1.0 - operational).clamp(0.0, 1.0),
        };

        Ok(Self {
            id: candidate.id.clone(),
            cost,
            location: candidate.location.clone(),
            categories: candidate.categories.clone(),
            scores,
        })
    }

    /// Checks identity, cost, and score ranges.
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if self.id.trim().is_empty() {
            return Err(InputValidationError::MissingId);
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(InputValidationError::InvalidField {
                candidate_id: self.id.clone(),
                field: "cost",
                reason: format!("must be finite and non-negative, got {}", self.cost),
            });
        }
        if let Some((field, value)) = self.scores.first_out_of_range() {
            return Err(InputValidationError::InvalidField {
                candidate_id: self.id.clone(),
                field,
                reason: format!("must lie within 0..=1, got {value}"),
            });
        }
        Ok(())
    }
}

/// Portfolio dimension the diversity score measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiversityDimension {
    Location,
    Category,
}

/// Hard limits on one allocation.
///
/// # Examples
///
/// ```
/// use u_fundmatch::allocation::AllocationConstraints;
///
/// let constraints = AllocationConstraints::new(250_000.0)
///     .with_candidate_range(2, 5)
///     .with_per_candidate_range(10_000.0, 100_000.0);
/// assert_eq!(constraints.max_candidates, Some(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationConstraints {
    pub total_budget: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_candidates: usize,
    /// `None` means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_candidates: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_per_candidate: f64,
    /// `None` means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_per_candidate: Option<f64>,
    /// Dimensions averaged into the diversity score; empty means all.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_diversity_dims: Vec<DiversityDimension>,
}

impl AllocationConstraints {
    /// Budget only; no cardinality or per-candidate limits.
    pub fn new(total_budget: f64) -> Self {
        Self {
            total_budget,
            min_candidates: 0,
            max_candidates: None,
            min_per_candidate: 0.0,
            max_per_candidate: None,
            required_diversity_dims: Vec::new(),
        }
    }

    pub fn with_candidate_range(mut self, min: usize, max: usize) -> Self {
        self.min_candidates = min;
        self.max_candidates = Some(max);
        self
    }

    pub fn with_per_candidate_range(mut self, min: f64, max: f64) -> Self {
        self.min_per_candidate = min;
        self.max_per_candidate = Some(max);
        self
    }

    pub fn with_diversity_dims(mut self, dims: impl IntoIterator<Item = DiversityDimension>) -> Self {
        self.required_diversity_dims = dims.into_iter().collect();
        self
    }

    /// Whether `cost` respects the per-candidate bounds.
    pub fn admits_cost(&self, cost: f64) -> bool {
        cost >= self.min_per_candidate && self.max_per_candidate.map_or(true, |max| cost <= max)
    }

    /// Reasons these constraints can never yield a selection.
    pub fn infeasibility(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if !self.total_budget.is_finite() || self.total_budget <= 0.0 {
            reasons.push(format!(
                "total budget must be positive, got {}",
                self.total_budget
            ));
        }
        if self.max_candidates == Some(0) {
            reasons.push("max_candidates is zero".to_string());
        }
        if let Some(max) = self.max_candidates {
            if self.min_candidates > max {
                reasons.push(format!(
                    "min_candidates ({}) exceeds max_candidates ({max})",
                    self.min_candidates
                ));
            }
        }
        if !self.min_per_candidate.is_finite() || self.min_per_candidate < 0.0 {
            reasons.push(format!(
                "min_per_candidate must be finite and non-negative, got {}",
                self.min_per_candidate
            ));
        }
        if let Some(max) = self.max_per_candidate {
            if max.is_nan() || max < self.min_per_candidate {
                reasons.push(format!(
                    "max_per_candidate ({max}) is below min_per_candidate ({})",
                    self.min_per_candidate
                ));
            }
        }
        reasons
    }
}

/// One admitted candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedCandidate {
    pub candidate_id: String,
    pub allocated_amount: f64,
    pub overall_score: f64,
    pub cost_effectiveness: f64,
    /// The performance scores that produced `overall_score`.
    pub breakdown: SubScores,
    /// Admitted by the top-up pass rather than the main pass.
    pub top_up: bool,
}

/// Allocation outcome.
///
/// An infeasible request is an empty `selected` with `reasons` populated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioResult {
    /// In admission order.
    pub selected: Vec<SelectedCandidate>,
    pub total_allocated: f64,
    pub remaining_budget: f64,
    /// 0–1.
    pub diversity_score: f64,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
    /// Candidates that failed validation.
    pub skipped: Vec<SkippedCandidate>,
}

impl PortfolioResult {
    pub(crate) fn infeasible(total_budget: f64, reasons: Vec<String>, skipped: Vec<SkippedCandidate>) -> Self {
        let remaining_budget = if total_budget.is_finite() {
            total_budget.max(0.0)
        } else {
            0.0
        };
        Self {
            selected: Vec::new(),
            total_allocated: 0.0,
            remaining_budget,
            diversity_score: 0.0,
            reasons,
            recommendations: Vec::new(),
            skipped,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(|s| s.candidate_id.as_str()).collect()
    }

    /// Share of the budget allocated, 0–1.
    pub fn utilization(&self) -> f64 {
        let total = self.total_allocated + self.remaining_budget;
        if total > 0.0 {
            self.total_allocated / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_cost_and_scores() {
        let ok = AllocationCandidate::new("a", 10.0, PerformanceScores::uniform(0.5));
        assert!(ok.validate().is_ok());

        let negative = AllocationCandidate::new("a", -1.0, PerformanceScores::uniform(0.5));
        assert!(matches!(
            negative.validate(),
            Err(InputValidationError::InvalidField { field: "cost", .. })
        ));

        let nan = AllocationCandidate::new("a", f64::NAN, PerformanceScores::uniform(0.5));
        assert!(nan.validate().is_err());

        let mut scores = PerformanceScores::uniform(0.5);
        scores.alignment = 1.5;
        let off = AllocationCandidate::new("a", 10.0, scores);
        assert!(matches!(
            off.validate(),
            Err(InputValidationError::InvalidField { field: "alignment", .. })
        ));

        let anonymous = AllocationCandidate::new("", 10.0, PerformanceScores::uniform(0.5));
        assert_eq!(anonymous.validate(), Err(InputValidationError::MissingId));
    }

    #[test]
    fn test_constraints_infeasibility() {
        assert!(AllocationConstraints::new(100.0).infeasibility().is_empty());
        assert_eq!(AllocationConstraints::new(0.0).infeasibility().len(), 1);
        assert_eq!(
            AllocationConstraints::new(100.0)
                .with_candidate_range(3, 2)
                .infeasibility()
                .len(),
            1
        );
        assert_eq!(
            AllocationConstraints::new(100.0)
                .with_per_candidate_range(50.0, 10.0)
                .infeasibility()
                .len(),
            1
        );
    }

    #[test]
    fn test_admits_cost() {
        let c = AllocationConstraints::new(100.0).with_per_candidate_range(10.0, 50.0);
        assert!(c.admits_cost(10.0));
        assert!(c.admits_cost(50.0));
        assert!(!c.admits_cost(9.99));
        assert!(!c.admits_cost(50.01));
        assert!(AllocationConstraints::new(100.0).admits_cost(1e12));
    }

    #[test]
    fn test_sub_scores_named() {
        let subs = PerformanceScores::uniform(0.25).to_sub_scores();
        assert_eq!(subs.len(), 5);
        assert_eq!(subs.get(FEASIBILITY), Some(&0.25));
    }
}

//! Engine façade.

use super::config::EngineConfig;
use super::types::CandidateEvaluation;
use crate::aggregate::rank_descending;
use crate::alignment::{AlignmentReport, AlignmentScorer};
use crate::allocation::{
    AllocationCandidate, AllocationConstraints, ConstrainedAllocator, PortfolioResult,
};
use crate::batch::score_batch;
use crate::error::{ConfigurationError, EngineError};
use crate::impact::ImpactScorer;
use crate::model::{Candidate, RankedBatch, RequesterProfile};
use crate::risk::RiskScorer;

/// Entry point for the surrounding application.
///
/// Holds one validated scorer per concern. Every call is pure: no state is
/// carried between calls, so a shared `Engine` needs no locking.
///
/// # Examples
///
/// ```
/// use u_fundmatch::allocation::{AllocationCandidate, AllocationConstraints, PerformanceScores};
/// use u_fundmatch::engine::{Engine, EngineConfig};
/// use u_fundmatch::model::{Candidate, RequesterProfile};
///
/// let engine = Engine::new(EngineConfig::default()).unwrap();
///
/// let requester = RequesterProfile::new().with_categories(["water"]);
/// let candidates = vec![
///     Candidate::new("wells").with_categories(["water"]),
///     Candidate::new("murals").with_categories(["arts"]),
/// ];
/// let ranked = engine.rank_candidates(&candidates, &requester).unwrap();
/// assert_eq!(ranked.ranked[0].candidate_id(), "wells");
///
/// let offers = vec![AllocationCandidate::new("wells", 40_000.0, PerformanceScores::uniform(0.8))];
/// let portfolio = engine
///     .allocate_budget(&offers, &AllocationConstraints::new(50_000.0))
///     .unwrap();
/// assert_eq!(portfolio.selected_ids(), vec!["wells"]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    alignment: AlignmentScorer,
    risk: RiskScorer,
    impact: ImpactScorer,
    allocator: ConstrainedAllocator,
    parallel: bool,
}

impl Engine {
    /// Builds every component, failing on the first invalid configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigurationError> {
        let parallel = config.parallel;
        Ok(Self {
            alignment: AlignmentScorer::new(config.alignment)?,
            risk: RiskScorer::new(config.risk)?,
            impact: ImpactScorer::new(config.impact)?,
            allocator: ConstrainedAllocator::new(config.allocator)?,
            parallel,
        })
    }

    pub fn alignment(&self) -> &AlignmentScorer {
        &self.alignment
    }

    pub fn risk(&self) -> &RiskScorer {
        &self.risk
    }

    pub fn impact(&self) -> &ImpactScorer {
        &self.impact
    }

    pub fn allocator(&self) -> &ConstrainedAllocator {
        &self.allocator
    }

    /// Ranks candidates by alignment with `requester`, best first.
    pub fn rank_candidates(
        &self,
        candidates: &[Candidate],
        requester: &RequesterProfile,
    ) -> Result<RankedBatch<AlignmentReport>, ConfigurationError> {
        self.alignment.score_all(candidates, requester)
    }

    /// Ranks with some alignment weights replaced for this call only.
    ///
    /// The overridden map must still sum to 1.0 and name only known
    /// sub-scores, otherwise nothing is scored.
    pub fn rank_candidates_with_overrides<'a>(
        &self,
        candidates: &[Candidate],
        requester: &RequesterProfile,
        overrides: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<RankedBatch<AlignmentReport>, ConfigurationError> {
        let weights = self.alignment.config().weights.with_overrides(overrides)?;
        let scorer = AlignmentScorer::new(self.alignment.config().clone().with_weights(weights))?;
        scorer.score_all(candidates, requester)
    }

    /// Runs the greedy allocator over already-scored candidates.
    pub fn allocate_budget(
        &self,
        candidates: &[AllocationCandidate],
        constraints: &AllocationConstraints,
    ) -> Result<PortfolioResult, ConfigurationError> {
        self.allocator.allocate(candidates, constraints)
    }

    /// Alignment, risk, and impact for one candidate.
    pub fn evaluate(
        &self,
        candidate: &Candidate,
        requester: &RequesterProfile,
    ) -> Result<CandidateEvaluation, EngineError> {
        let alignment = self.alignment.score(candidate, requester)?;
        let risk = self.risk.score(candidate)?;
        let impact = self.impact.score(candidate)?;
        let within_risk_tolerance = !risk.exceeds_tolerance(requester.risk_tolerance);

        Ok(CandidateEvaluation {
            candidate_id: candidate.id.clone(),
            alignment,
            risk,
            impact,
            within_risk_tolerance,
        })
    }

    /// Evaluates every candidate, ranked by alignment.
    pub fn evaluate_all(
        &self,
        candidates: &[Candidate],
        requester: &RequesterProfile,
    ) -> Result<RankedBatch<CandidateEvaluation>, ConfigurationError> {
        let outcome = score_batch(
            candidates,
            self.parallel,
            |c| c.id.as_str(),
            |c| self.evaluate(c, requester),
        )?;

        let order = rank_descending(
            &outcome.scored,
            |e| e.alignment.composite(),
            |e| e.candidate_id.as_str(),
        );
        let mut slots: Vec<Option<CandidateEvaluation>> =
            outcome.scored.into_iter().map(Some).collect();
        let ranked = order.into_iter().filter_map(|i| slots[i].take()).collect();

        Ok(RankedBatch {
            ranked,
            skipped: outcome.skipped,
        })
    }

    /// Evaluates raw candidates and allocates the budget among them.
    ///
    /// Candidates that cannot be evaluated (no id, no parsable budget) are
    /// skipped. Candidates above the requester's risk tolerance are left
    /// out with a reason.
    pub fn allocate_for_requester(
        &self,
        candidates: &[Candidate],
        requester: &RequesterProfile,
        constraints: &AllocationConstraints,
    ) -> Result<PortfolioResult, ConfigurationError> {
        let outcome = score_batch(
            candidates,
            self.parallel,
            |c| c.id.as_str(),
            |c| {
                let evaluation = self.evaluate(c, requester)?;
                let offer = AllocationCandidate::from_evaluation(c, &evaluation)?;
                Ok((offer, evaluation.within_risk_tolerance))
            },
        )?;

        let mut reasons: Vec<String> = outcome
            .skipped
            .iter()
            .map(|s| format!("skipped candidate at index {}: {}", s.index, s.reason))
            .collect();
        let mut offers = Vec::with_capacity(outcome.scored.len());
        for (offer, within_tolerance) in outcome.scored {
            if within_tolerance {
                offers.push(offer);
            } else {
                tracing::debug!(candidate_id = %offer.id, "above risk tolerance, excluded");
                reasons.push(format!(
                    "candidate `{}` exceeds the {:?} risk tolerance",
                    offer.id, requester.risk_tolerance
                ));
            }
        }

        if offers.is_empty() {
            // Skips and tolerance exclusions already explain a non-empty input.
            if candidates.is_empty() {
                reasons.push("no candidates supplied".to_string());
            }
            reasons.extend(constraints.infeasibility());
            tracing::debug!(reasons = ?reasons, "no offers left to allocate");
            return Ok(PortfolioResult::infeasible(
                constraints.total_budget,
                reasons,
                outcome.skipped,
            ));
        }

        let mut portfolio = self.allocator.allocate(&offers, constraints)?;
        reasons.append(&mut portfolio.reasons);
        portfolio.reasons = reasons;
        let mut skipped = outcome.skipped;
        skipped.append(&mut portfolio.skipped);
        portfolio.skipped = skipped;
        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BudgetEnvelope, RiskDescriptors, RiskTolerance};

    fn engine() -> Engine {
        Engine::new(EngineConfig::default().with_parallel(false)).unwrap()
    }

    fn requester() -> RequesterProfile {
        RequesterProfile::new()
            .with_categories(["water"])
            .with_geographies(["Kenya"])
            .with_budget(BudgetEnvelope::new(50_000.0, 150_000.0))
    }

    fn wells() -> Candidate {
        Candidate::new("wells")
            .with_categories(["water"])
            .with_location("Kenya")
            .with_budget("100000")
            .with_rating(5.0)
    }

    #[test]
    fn test_new_rejects_invalid_component() {
        let config = EngineConfig::default().with_alignment(
            crate::alignment::AlignmentConfig::default().with_neutral(-1.0),
        );
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_evaluate_runs_all_scorers() {
        let evaluation = engine().evaluate(&wells(), &requester()).unwrap();
        // 0.3·100 + 0.2·100 + 0.2·100 + 0.15·90 + 0.15·100
        assert!((evaluation.alignment.composite() - 98.5).abs() < 1e-9);
        // budget of 100k lowers financial risk to 0.44, everything else neutral
        assert!((evaluation.risk.composite() - 0.485).abs() < 1e-9);
        assert!((evaluation.impact.composite() - 0.5).abs() < 1e-9);
        assert!(evaluation.within_risk_tolerance);
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let e = engine();
        let first = e.evaluate(&wells(), &requester()).unwrap();
        let second = e.evaluate(&wells(), &requester()).unwrap();
        assert!(first.same_outcome(&second));

        let other = e.evaluate(&Candidate::new("wells"), &requester()).unwrap();
        assert!(!first.same_outcome(&other));
    }

    #[test]
    fn test_from_evaluation_bridge() {
        let candidate = wells();
        let evaluation = engine().evaluate(&candidate, &requester()).unwrap();
        let offer = AllocationCandidate::from_evaluation(&candidate, &evaluation).unwrap();

        assert_eq!(offer.cost, 100_000.0);
        assert!((offer.scores.alignment - 0.985).abs() < 1e-9);
        assert!((offer.scores.risk - 0.515).abs() < 1e-9);
        assert!((offer.scores.impact - 0.5).abs() < 1e-9);
        assert!((offer.scores.feasibility - 0.5).abs() < 1e-9);
        assert_eq!(offer.location.as_deref(), Some("Kenya"));
    }

    #[test]
    fn test_from_evaluation_requires_budget() {
        let candidate = Candidate::new("nobudget");
        let evaluation = engine().evaluate(&candidate, &requester()).unwrap();
        assert!(AllocationCandidate::from_evaluation(&candidate, &evaluation).is_err());
    }

    #[test]
    fn test_rank_candidates_with_overrides() {
        let candidates = vec![
            Candidate::new("near").with_location("Kenya"),
            Candidate::new("rated").with_rating(5.0),
        ];
        let e = engine();
        let default = e.rank_candidates(&candidates, &requester()).unwrap();
        assert_eq!(default.ranked[0].candidate_id(), "near");

        let tilted = e
            .rank_candidates_with_overrides(
                &candidates,
                &requester(),
                [("geographic_fit", 0.05), ("credibility", 0.30)],
            )
            .unwrap();
        assert_eq!(tilted.ranked[0].candidate_id(), "rated");

        let broken = e.rank_candidates_with_overrides(
            &candidates,
            &requester(),
            [("credibility", 0.9)],
        );
        assert!(matches!(broken, Err(ConfigurationError::WeightSum { .. })));
    }

    #[test]
    fn test_evaluate_all_isolates_invalid() {
        let candidates = vec![Candidate::new("a"), Candidate::new(""), wells()];
        let batch = engine().evaluate_all(&candidates, &requester()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.ranked[0].candidate_id, "wells");
        assert_eq!(batch.skipped[0].index, 1);
    }

    #[test]
    fn test_allocate_for_requester() {
        let risky = RiskDescriptors {
            permit_status: Some("denied".into()),
            legal_framework: Some("unstable".into()),
            compliance_history: Some("major issues".into()),
            community_support: Some("opposed".into()),
            funding_source: Some("single source".into()),
            complexity: Some("high".into()),
            climate_exposure: Some("high".into()),
            ..RiskDescriptors::default()
        };
        let candidates = vec![
            wells(),
            Candidate::new("nobudget"),
            Candidate::new("risky").with_budget("20000").with_risk(risky),
        ];
        let requester = requester().with_risk_tolerance(RiskTolerance::Medium);
        let portfolio = engine()
            .allocate_for_requester(&candidates, &requester, &AllocationConstraints::new(200_000.0))
            .unwrap();

        assert_eq!(portfolio.selected_ids(), vec!["wells"]);
        assert_eq!(portfolio.skipped.len(), 1);
        assert_eq!(portfolio.skipped[0].candidate_id, "nobudget");
        assert!(portfolio.reasons.iter().any(|r| r.contains("`risky`")));
    }

    #[test]
    fn test_engine_parallel_flag_is_its_own() {
        assert!(Engine::new(EngineConfig::default()).unwrap().parallel);

        let mut config = EngineConfig::default();
        config.alignment.parallel = false;
        assert!(Engine::new(config).unwrap().parallel);

        let mut config = EngineConfig::default();
        config.parallel = false;
        assert!(config.alignment.parallel);
        assert!(!Engine::new(config).unwrap().parallel);

        assert!(!engine().parallel);
    }

    #[test]
    fn test_allocate_for_requester_explains_empty_pool() {
        let risky = RiskDescriptors {
            permit_status: Some("denied".into()),
            legal_framework: Some("unstable".into()),
            compliance_history: Some("major issues".into()),
            community_support: Some("opposed".into()),
            funding_source: Some("single source".into()),
            complexity: Some("high".into()),
            climate_exposure: Some("high".into()),
            ..RiskDescriptors::default()
        };
        let candidates = vec![
            Candidate::new("nobudget"),
            Candidate::new("risky").with_budget("20000").with_risk(risky),
        ];
        let requester = requester().with_risk_tolerance(RiskTolerance::Medium);
        let portfolio = engine()
            .allocate_for_requester(&candidates, &requester, &AllocationConstraints::new(200_000.0))
            .unwrap();

        assert!(portfolio.selected.is_empty());
        assert_eq!(portfolio.remaining_budget, 200_000.0);
        assert_eq!(portfolio.skipped.len(), 1);
        assert_eq!(portfolio.reasons.len(), 2);
        assert!(portfolio.reasons.iter().any(|r| r.contains("`risky`")));
        assert!(!portfolio.reasons.iter().any(|r| r.contains("no candidates supplied")));
    }

    #[test]
    fn test_allocate_for_requester_without_candidates() {
        let portfolio = engine()
            .allocate_for_requester(&[], &requester(), &AllocationConstraints::new(1_000.0))
            .unwrap();
        assert_eq!(portfolio.reasons, vec!["no candidates supplied".to_string()]);
    }

    #[test]
    fn test_abbreviated_currency_budget_reaches_allocation() {
        let requester = requester().with_budget(BudgetEnvelope::new(500_000.0, 2_000_000.0));
        let candidate = wells().with_budget("Ksh. 1,000,000");
        let e = engine();
        let evaluation = e.evaluate(&candidate, &requester).unwrap();
        assert_eq!(evaluation.alignment.parsed_budget, Some(1_000_000.0));
        assert_eq!(
            evaluation.alignment.score.sub_score(crate::alignment::BUDGET_ALIGNMENT),
            Some(100.0)
        );

        let offer = AllocationCandidate::from_evaluation(&candidate, &evaluation).unwrap();
        assert_eq!(offer.cost, 1_000_000.0);
        let portfolio = e
            .allocate_budget(&[offer], &AllocationConstraints::new(1_500_000.0))
            .unwrap();
        assert_eq!(portfolio.total_allocated, 1_000_000.0);
    }
}

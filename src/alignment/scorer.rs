//! Candidate-to-requester alignment scoring.
//!
//! # Sub-scores (0–100)
//!
//! 1. **Category alignment**: `coverage = |match| / |priorities| × 100`
//!    plus `min(extra × 5, 20)` for categories beyond the priorities
//!    (only once something matches), capped at 100. An extra category
//!    never earns more than a matched one (`100 / |priorities|`).
//! 2. **Geographic fit**: exact or substring match → 100, shared token
//!    → 70, otherwise 0.
//! 3. **Budget alignment**: single amount or `min-max` midpoint against
//!    the requester envelope: inside → 100, below → 30, above → 20.
//! 4. **Category relevance**: highest sector relevance among matched
//!    categories.
//! 5. **Credibility**: `rating × 20`, capped at 100.
//!
//! Missing inputs (no categories on either side, no location, no parsable
//! budget, no rating) fall back to the configured neutral score (50).

use super::config::AlignmentConfig;
use super::types::{
    AlignmentReport, BUDGET_ALIGNMENT, CATEGORY_ALIGNMENT, CATEGORY_RELEVANCE, CREDIBILITY,
    GEOGRAPHIC_FIT,
};
use crate::aggregate::{aggregate, rank_descending};
use crate::batch::score_batch;
use crate::error::{ConfigurationError, EngineError};
use crate::model::{Candidate, RankedBatch, RequesterProfile, ScoreResult, SubScores};
use crate::normalize::text::{key_set, normalize_key, parse_budget, tokens};

/// Scores how well candidates fit a requester's priorities.
///
/// # Examples
///
/// ```
/// use u_fundmatch::alignment::{AlignmentConfig, AlignmentLevel, AlignmentScorer};
/// use u_fundmatch::model::{BudgetEnvelope, Candidate, RequesterProfile};
///
/// let scorer = AlignmentScorer::new(AlignmentConfig::default()).unwrap();
/// let requester = RequesterProfile::new()
///     .with_categories(["water", "health"])
///     .with_geographies(["Kenya"])
///     .with_budget(BudgetEnvelope::new(50_000.0, 150_000.0));
/// let candidate = Candidate::new("wells")
///     .with_categories(["water", "health"])
///     .with_location("Kisumu, Kenya")
///     .with_budget("100000")
///     .with_rating(5.0);
///
/// let report = scorer.score(&candidate, &requester).unwrap();
/// assert_eq!(report.level(), AlignmentLevel::Excellent);
/// ```
#[derive(Debug, Clone)]
pub struct AlignmentScorer {
    config: AlignmentConfig,
}

impl AlignmentScorer {
    /// Creates a scorer, validating the configuration up front.
    pub fn new(config: AlignmentConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Scores one candidate against `requester`.
    pub fn score(
        &self,
        candidate: &Candidate,
        requester: &RequesterProfile,
    ) -> Result<AlignmentReport, EngineError> {
        candidate.validate()?;

        let wanted = key_set(&requester.categories);
        let offered = key_set(&candidate.categories);
        let matched: Vec<String> = offered.intersection(&wanted).cloned().collect();
        let parsed_budget = candidate.budget.as_deref().and_then(parse_budget);

        let mut sub_scores = SubScores::new();
        sub_scores.insert(
            CATEGORY_ALIGNMENT.to_string(),
            self.category_alignment(
                candidate,
                requester,
                matched.len(),
                offered.len(),
                wanted.len(),
            ),
        );
        sub_scores.insert(
            GEOGRAPHIC_FIT.to_string(),
            self.geographic_fit(candidate.location.as_deref(), &requester.geographies),
        );
        sub_scores.insert(
            BUDGET_ALIGNMENT.to_string(),
            self.budget_alignment(candidate, parsed_budget, requester),
        );
        sub_scores.insert(
            CATEGORY_RELEVANCE.to_string(),
            self.category_relevance(&matched, wanted.is_empty() || offered.is_empty()),
        );
        sub_scores.insert(
            CREDIBILITY.to_string(),
            self.config.credibility.score(candidate.rating),
        );

        let composite = aggregate(&sub_scores, &self.config.weights)?;
        let level = *self.config.cutpoints.classify(composite);

        tracing::debug!(
            candidate_id = %candidate.id,
            composite,
            ?level,
            matched = matched.len(),
            "scored alignment"
        );

        Ok(AlignmentReport {
            score: ScoreResult::new(&candidate.id, composite, sub_scores, level),
            recommendation: level.recommendation().to_string(),
            matched_categories: matched,
            parsed_budget,
        })
    }

    /// Scores every candidate and ranks them.
    ///
    /// Results are sorted by composite descending, ties by candidate id
    /// ascending. Candidates failing input validation are skipped and
    /// reported rather than aborting the batch.
    pub fn score_all(
        &self,
        candidates: &[Candidate],
        requester: &RequesterProfile,
    ) -> Result<RankedBatch<AlignmentReport>, ConfigurationError> {
        let outcome = score_batch(
            candidates,
            self.config.parallel,
            |c| c.id.as_str(),
            |c| self.score(c, requester),
        )?;

        let order = rank_descending(&outcome.scored, |r| r.composite(), |r| r.candidate_id());
        let mut slots: Vec<Option<AlignmentReport>> = outcome.scored.into_iter().map(Some).collect();
        let ranked = order.into_iter().filter_map(|i| slots[i].take()).collect();

        Ok(RankedBatch {
            ranked,
            skipped: outcome.skipped,
        })
    }

    fn category_alignment(
        &self,
        candidate: &Candidate,
        requester: &RequesterProfile,
        matched: usize,
        offered: usize,
        wanted: usize,
    ) -> f64 {
        if offered == 0 {
            return self.config.neutral;
        }
        let coverage = self
            .config
            .category_overlap
            .score(&candidate.categories, &requester.categories)
            * 100.0;

        let extra = offered - matched;
        let bonus = if matched > 0 {
            let per_extra = self.config.extra_category_bonus.min(100.0 / wanted as f64);
            (extra as f64 * per_extra).min(self.config.max_extra_bonus)
        } else {
            0.0
        };

        (coverage + bonus).min(100.0)
    }

    fn geographic_fit(&self, location: Option<&str>, geographies: &[String]) -> f64 {
        let geo = &self.config.geography;
        let location = location.map(normalize_key).unwrap_or_default();
        let regions: Vec<String> = geographies
            .iter()
            .map(|g| normalize_key(g))
            .filter(|g| !g.is_empty())
            .collect();

        if regions.is_empty() {
            return self.config.neutral;
        }
        let is_global = regions
            .iter()
            .any(|r| geo.global_regions.iter().any(|g| normalize_key(g) == *r));
        if is_global {
            return geo.exact;
        }
        if location.is_empty() {
            return self.config.neutral;
        }

        let exact = regions
            .iter()
            .any(|r| location.contains(r.as_str()) || r.contains(location.as_str()));
        if exact {
            return geo.exact;
        }

        let location_tokens = tokens(&location);
        if regions
            .iter()
            .any(|r| !tokens(r).is_disjoint(&location_tokens))
        {
            geo.partial
        } else {
            geo.none
        }
    }

    fn budget_alignment(
        &self,
        candidate: &Candidate,
        amount: Option<f64>,
        requester: &RequesterProfile,
    ) -> f64 {
        let Some(envelope) = requester.budget.as_ref().filter(|e| e.is_usable()) else {
            return self.config.neutral;
        };
        let Some(amount) = amount else {
            return self.config.neutral;
        };

        if let (Some(theirs), Some(ours)) = (candidate.currency.as_deref(), envelope.currency.as_deref()) {
            if normalize_key(theirs) != normalize_key(ours) {
                tracing::debug!(
                    candidate_id = %candidate.id,
                    candidate_currency = theirs,
                    requester_currency = ours,
                    "currencies differ, budget alignment is neutral"
                );
                return self.config.neutral;
            }
        }

        let fit = &self.config.budget;
        if amount < envelope.min {
            fit.below
        } else if amount > envelope.max {
            fit.above
        } else {
            fit.inside
        }
    }

    fn category_relevance(&self, matched: &[String], either_empty: bool) -> f64 {
        if either_empty {
            return self.config.neutral;
        }
        matched
            .iter()
            .map(|category| self.config.relevance.score(Some(category)))
            .reduce(f64::max)
            .unwrap_or(self.config.off_priority_relevance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignmentLevel;
    use crate::model::BudgetEnvelope;

    fn scorer() -> AlignmentScorer {
        AlignmentScorer::new(AlignmentConfig::default().with_parallel(false)).unwrap()
    }

    fn requester() -> RequesterProfile {
        RequesterProfile::new()
            .with_categories(["A", "B", "C"])
            .with_geographies(["Kenya", "Uganda"])
            .with_budget(BudgetEnvelope::new(1_000_000.0, 1_500_000.0))
    }

    #[test]
    fn test_category_alignment_with_extra_bonus() {
        let candidate = Candidate::new("c1").with_categories(["A", "B", "D", "E"]);
        let report = scorer().score(&candidate, &requester()).unwrap();
        let category = report.score.sub_score(CATEGORY_ALIGNMENT).unwrap();
        // coverage 66.67 + bonus 10
        assert!((category - 76.666_666_666_666_67).abs() < 1e-9);
        assert_eq!(report.matched_categories, vec!["a", "b"]);
    }

    #[test]
    fn test_category_alignment_caps_at_100() {
        let candidate = Candidate::new("c1").with_categories(["a", "b", "c", "x", "y", "z", "w", "v"]);
        let report = scorer().score(&candidate, &requester()).unwrap();
        assert_eq!(report.score.sub_score(CATEGORY_ALIGNMENT), Some(100.0));
    }

    #[test]
    fn test_extra_never_outscores_a_match() {
        let priorities: Vec<String> = (0..25).map(|i| format!("p{i}")).collect();
        let requester = RequesterProfile::new().with_categories(priorities);
        let s = scorer();

        let with_extra = s
            .score(&Candidate::new("x").with_categories(["p0", "x"]), &requester)
            .unwrap();
        let with_match = s
            .score(&Candidate::new("m").with_categories(["p0", "p1"]), &requester)
            .unwrap();
        let extra = with_extra.score.sub_score(CATEGORY_ALIGNMENT).unwrap();
        let matched = with_match.score.sub_score(CATEGORY_ALIGNMENT).unwrap();
        // 4 + min(5, 4) vs 8
        assert!((extra - 8.0).abs() < 1e-9);
        assert!((matched - 8.0).abs() < 1e-9);
        assert!(extra <= matched);
    }

    #[test]
    fn test_no_match_gets_no_bonus() {
        let candidate = Candidate::new("c1").with_categories(["x", "y", "z"]);
        let report = scorer().score(&candidate, &requester()).unwrap();
        assert_eq!(report.score.sub_score(CATEGORY_ALIGNMENT), Some(0.0));
        assert_eq!(report.score.sub_score(CATEGORY_RELEVANCE), Some(20.0));
    }

    #[test]
    fn test_requester_without_priorities_is_neutral() {
        let candidate = Candidate::new("c1").with_categories(["x"]);
        let report = scorer().score(&candidate, &RequesterProfile::new()).unwrap();
        assert_eq!(report.score.sub_score(CATEGORY_ALIGNMENT), Some(50.0));
        assert_eq!(report.score.sub_score(CATEGORY_RELEVANCE), Some(50.0));
        assert_eq!(report.score.sub_score(GEOGRAPHIC_FIT), Some(50.0));
        assert_eq!(report.score.sub_score(BUDGET_ALIGNMENT), Some(50.0));
    }

    #[test]
    fn test_candidate_without_categories_is_neutral() {
        let report = scorer().score(&Candidate::new("c1"), &requester()).unwrap();
        assert_eq!(report.score.sub_score(CATEGORY_ALIGNMENT), Some(50.0));
        assert_eq!(report.score.sub_score(CATEGORY_RELEVANCE), Some(50.0));
        assert!(report.matched_categories.is_empty());
    }

    #[test]
    fn test_budget_range_midpoint_inside() {
        let candidate = Candidate::new("c1").with_budget("800000-1200000");
        let report = scorer().score(&candidate, &requester()).unwrap();
        assert_eq!(report.parsed_budget, Some(1_000_000.0));
        assert_eq!(report.score.sub_score(BUDGET_ALIGNMENT), Some(100.0));
    }

    #[test]
    fn test_budget_below_above_and_unparseable() {
        let s = scorer();
        let r = requester();
        let below = s.score(&Candidate::new("a").with_budget("500000"), &r).unwrap();
        let above = s.score(&Candidate::new("b").with_budget("2M"), &r).unwrap();
        let junk = s.score(&Candidate::new("c").with_budget("on request"), &r).unwrap();
        assert_eq!(below.score.sub_score(BUDGET_ALIGNMENT), Some(30.0));
        assert_eq!(above.score.sub_score(BUDGET_ALIGNMENT), Some(20.0));
        assert_eq!(junk.score.sub_score(BUDGET_ALIGNMENT), Some(50.0));
    }

    #[test]
    fn test_budget_currency_mismatch_is_neutral() {
        let r = RequesterProfile::new()
            .with_budget(BudgetEnvelope::new(10.0, 20.0).with_currency("USD"));
        let c = Candidate::new("a").with_budget("15").with_currency("eur");
        let report = scorer().score(&c, &r).unwrap();
        assert_eq!(report.score.sub_score(BUDGET_ALIGNMENT), Some(50.0));

        let c = Candidate::new("a").with_budget("15").with_currency("usd");
        let report = scorer().score(&c, &r).unwrap();
        assert_eq!(report.score.sub_score(BUDGET_ALIGNMENT), Some(100.0));
    }

    #[test]
    fn test_geographic_fit_levels() {
        let s = scorer();
        let geos = vec!["Kenya Coast".to_string(), "Uganda".to_string()];
        assert_eq!(s.geographic_fit(Some("Kampala, Uganda"), &geos), 100.0);
        assert_eq!(s.geographic_fit(Some("uganda"), &geos), 100.0);
        assert_eq!(s.geographic_fit(Some("West Kenya Highlands"), &geos), 70.0);
        assert_eq!(s.geographic_fit(Some("Peru"), &geos), 0.0);
        assert_eq!(s.geographic_fit(None, &geos), 50.0);
        assert_eq!(s.geographic_fit(Some("Peru"), &["Global".to_string()]), 100.0);
    }

    #[test]
    fn test_credibility_from_rating() {
        let s = scorer();
        let report = s.score(&Candidate::new("a").with_rating(4.0), &requester()).unwrap();
        assert_eq!(report.score.sub_score(CREDIBILITY), Some(80.0));
        let report = s.score(&Candidate::new("a"), &requester()).unwrap();
        assert_eq!(report.score.sub_score(CREDIBILITY), Some(50.0));
    }

    #[test]
    fn test_recommendation_matches_label() {
        let s = scorer();
        for rating in [0.0, 1.0, 2.5, 4.0, 5.0] {
            let c = Candidate::new("a")
                .with_categories(["a"])
                .with_rating(rating)
                .with_location("Kenya");
            let report = s.score(&c, &requester()).unwrap();
            assert_eq!(report.recommendation, report.level().recommendation());
        }
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let err = scorer().score(&Candidate::new(""), &requester()).unwrap_err();
        assert!(matches!(err, EngineError::InputValidation(_)));
    }

    #[test]
    fn test_score_all_sorted_with_id_tiebreak() {
        let candidates = vec![
            Candidate::new("b").with_categories(["a"]),
            Candidate::new("a").with_categories(["a"]),
            Candidate::new(""),
            Candidate::new("z")
                .with_categories(["a", "b", "c"])
                .with_location("Kenya")
                .with_rating(5.0),
        ];
        let batch = scorer().score_all(&candidates, &requester()).unwrap();

        let ids: Vec<&str> = batch.ranked.iter().map(|r| r.candidate_id()).collect();
        assert_eq!(ids, vec!["z", "a", "b"]);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].index, 2);
        assert_eq!(batch.ranked[0].level(), AlignmentLevel::Excellent);
    }
}

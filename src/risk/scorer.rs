//! Candidate risk scoring.
//!
//! Each factor is normalized to 0–1 (higher is riskier), each category is
//! the weighted sum of its three factors, and the composite is the
//! weighted sum of the five categories. Absent descriptors resolve to the
//! neutral bucket, so a candidate with no descriptors at all scores 0.5.

use super::config::RiskConfig;
use super::types::{
    CategoryRisk, RiskAssessment, RiskCategory, BUDGET_RISK, CLIMATE_EXPOSURE, COMMUNITY_SUPPORT,
    COMPLEXITY, COMPLIANCE_HISTORY, CULTURAL_SENSITIVITY, CURRENCY_VOLATILITY,
    ENVIRONMENTAL_SENSITIVITY, FUNDING_SOURCE, LEGAL_FRAMEWORK, LOCAL_PARTNERSHIPS, PERMIT_STATUS,
    RESOURCE_DEPENDENCY, TEAM_EXPERIENCE, TIMELINE,
};
use crate::aggregate::{aggregate, rank_descending};
use crate::batch::score_batch;
use crate::error::{ConfigurationError, EngineError};
use crate::model::{Candidate, RankedBatch, ScoreResult, SubScores};
use crate::normalize::text::parse_budget;
use crate::normalize::{normalize, RawValue, NEUTRAL};

/// Scores candidate risk across the five [`RiskCategory`] dimensions.
///
/// # Examples
///
/// ```
/// use u_fundmatch::model::Candidate;
/// use u_fundmatch::risk::{RiskConfig, RiskLevel, RiskScorer};
///
/// let scorer = RiskScorer::new(RiskConfig::default()).unwrap();
/// let assessment = scorer.score(&Candidate::new("unknown-everything")).unwrap();
/// assert!((assessment.composite() - 0.5).abs() < 1e-9);
/// assert_eq!(assessment.level(), RiskLevel::Medium);
/// ```
#[derive(Debug, Clone)]
pub struct RiskScorer {
    config: RiskConfig,
}

impl RiskScorer {
    /// Creates a scorer, validating the configuration up front.
    pub fn new(config: RiskConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Scores one candidate.
    pub fn score(&self, candidate: &Candidate) -> Result<RiskAssessment, EngineError> {
        candidate.validate()?;

        let budget = candidate.budget.as_deref().and_then(parse_budget);
        let mut categories = Vec::with_capacity(RiskCategory::ALL.len());
        let mut sub_scores = SubScores::new();

        for category in RiskCategory::ALL {
            let risk = self.score_category(candidate, budget, category)?;
            sub_scores.insert(category.key().to_string(), risk.score);
            categories.push(risk);
        }

        let composite = aggregate(&sub_scores, &self.config.category_weights)?;
        let level = *self.config.cutpoints.classify(composite);

        tracing::debug!(
            candidate_id = %candidate.id,
            composite,
            ?level,
            "scored risk"
        );

        Ok(RiskAssessment {
            score: ScoreResult::new(&candidate.id, composite, sub_scores, level),
            categories,
        })
    }

    /// Scores every candidate, riskiest last.
    ///
    /// Sorted by composite ascending (safest first), ties by candidate id.
    /// Candidates failing input validation are skipped and reported.
    pub fn score_all(
        &self,
        candidates: &[Candidate],
    ) -> Result<RankedBatch<RiskAssessment>, ConfigurationError> {
        let outcome = score_batch(
            candidates,
            self.config.parallel,
            |c| c.id.as_str(),
            |c| self.score(c),
        )?;

        let order = rank_descending(
            &outcome.scored,
            |a| 1.0 - a.composite(),
            |a| a.candidate_id(),
        );
        let mut slots: Vec<Option<RiskAssessment>> = outcome.scored.into_iter().map(Some).collect();
        let ranked = order.into_iter().filter_map(|i| slots[i].take()).collect();

        Ok(RankedBatch {
            ranked,
            skipped: outcome.skipped,
        })
    }

    fn score_category(
        &self,
        candidate: &Candidate,
        budget: Option<f64>,
        category: RiskCategory,
    ) -> Result<CategoryRisk, ConfigurationError> {
        let config = self.config.category(category);

        let factors: SubScores = category
            .factor_keys()
            .iter()
            .map(|&key| {
                let score = config
                    .factors
                    .get(key)
                    .map(|normalizer| normalize(normalizer, factor_input(candidate, budget, key)))
                    .unwrap_or(NEUTRAL);
                (key.to_string(), score)
            })
            .collect();

        let score = aggregate(&factors, &config.weights)?;
        Ok(CategoryRisk {
            category,
            score,
            level: *self.config.cutpoints.classify(score),
            factors,
            mitigations: category.mitigations().iter().map(|m| m.to_string()).collect(),
        })
    }
}

/// Raw candidate attribute feeding factor `key`.
fn factor_input<'a>(candidate: &'a Candidate, budget: Option<f64>, key: &str) -> RawValue<'a> {
    let risk = &candidate.risk;
    match key {
        BUDGET_RISK => RawValue::Number(budget),
        FUNDING_SOURCE => RawValue::Text(risk.funding_source.as_deref()),
        CURRENCY_VOLATILITY => RawValue::Text(candidate.currency.as_deref()),
        TEAM_EXPERIENCE => RawValue::Number(risk.team_experience_years),
        TIMELINE => RawValue::Number(candidate.duration_months.map(f64::from)),
        COMPLEXITY => RawValue::Text(risk.complexity.as_deref()),
        CLIMATE_EXPOSURE => RawValue::Text(risk.climate_exposure.as_deref()),
        ENVIRONMENTAL_SENSITIVITY => RawValue::Text(risk.environmental_sensitivity.as_deref()),
        RESOURCE_DEPENDENCY => RawValue::Text(risk.resource_dependency.as_deref()),
        COMMUNITY_SUPPORT => RawValue::Text(risk.community_support.as_deref()),
        LOCAL_PARTNERSHIPS => RawValue::Number(risk.local_partners.map(f64::from)),
        CULTURAL_SENSITIVITY => RawValue::Text(risk.cultural_sensitivity.as_deref()),
        PERMIT_STATUS => RawValue::Text(risk.permit_status.as_deref()),
        LEGAL_FRAMEWORK => RawValue::Text(risk.legal_framework.as_deref()),
        COMPLIANCE_HISTORY => RawValue::Text(risk.compliance_history.as_deref()),
        _ => RawValue::Number(None),
    }
}

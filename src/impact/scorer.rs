//! Candidate impact scoring.

use super::config::ImpactConfig;
use super::types::{
    CategoryImpact, ImpactAssessment, ImpactCategory, BENEFICIARIES, BUSINESSES_SUPPORTED,
    CO2_REDUCTION, COMMUNITIES_REACHED, HECTARES_RESTORED, JOBS_CREATED, LOCAL_ECONOMIC_VALUE,
    PEOPLE_TRAINED, TREES_PLANTED,
};
use crate::aggregate::{aggregate, rank_descending};
use crate::batch::score_batch;
use crate::error::{ConfigurationError, EngineError};
use crate::model::{Candidate, ImpactMetrics, RankedBatch, ScoreResult, SubScores};
use crate::normalize::NEUTRAL;

/// Scores expected social, environmental, and economic impact.
///
/// ```
/// use u_fundmatch::impact::{ImpactConfig, ImpactLevel, ImpactScorer};
/// use u_fundmatch::model::{Candidate, ImpactMetrics};
///
/// let scorer = ImpactScorer::new(ImpactConfig::default()).unwrap();
/// let candidate = Candidate::new("reforest").with_impact(ImpactMetrics {
///     hectares_restored: Some(5_000.0),
///     trees_planted: Some(2_000_000),
///     co2_reduction_tonnes: Some(50_000.0),
///     ..ImpactMetrics::default()
/// });
/// let assessment = scorer.score(&candidate).unwrap();
/// assert_eq!(assessment.strongest().unwrap().category.key(), "environmental");
/// assert_eq!(assessment.level(), ImpactLevel::High);
/// ```
#[derive(Debug, Clone)]
pub struct ImpactScorer {
    config: ImpactConfig,
}

impl ImpactScorer {
    pub fn new(config: ImpactConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ImpactConfig {
        &self.config
    }

    /// Scores one candidate. Missing metrics score 0.5.
    pub fn score(&self, candidate: &Candidate) -> Result<ImpactAssessment, EngineError> {
        candidate.validate()?;

        let mut categories = Vec::with_capacity(ImpactCategory::ALL.len());
        let mut sub_scores = SubScores::new();
        for category in ImpactCategory::ALL {
            let impact = self.score_category(&candidate.impact, category)?;
            sub_scores.insert(category.key().to_string(), impact.score);
            categories.push(impact);
        }

        let composite = aggregate(&sub_scores, &self.config.category_weights)?;
        let level = *self.config.cutpoints.classify(composite);

        tracing::debug!(candidate_id = %candidate.id, composite, ?level, "scored impact");

        Ok(ImpactAssessment {
            score: ScoreResult::new(&candidate.id, composite, sub_scores, level),
            categories,
        })
    }

    /// Scores and ranks every candidate, highest impact first.
    pub fn score_all(
        &self,
        candidates: &[Candidate],
    ) -> Result<RankedBatch<ImpactAssessment>, ConfigurationError> {
        let outcome = score_batch(
            candidates,
            self.config.parallel,
            |c| c.id.as_str(),
            |c| self.score(c),
        )?;

        let order = rank_descending(&outcome.scored, |a| a.composite(), |a| a.candidate_id());
        let mut slots: Vec<Option<ImpactAssessment>> = outcome.scored.into_iter().map(Some).collect();
        let ranked = order.into_iter().filter_map(|i| slots[i].take()).collect();

        Ok(RankedBatch {
            ranked,
            skipped: outcome.skipped,
        })
    }

    fn score_category(
        &self,
        metrics: &ImpactMetrics,
        category: ImpactCategory,
    ) -> Result<CategoryImpact, ConfigurationError> {
        let config = self.config.category(category);
        let scores: SubScores = category
            .metric_keys()
            .iter()
            .map(|&key| {
                let score = config
                    .metrics
                    .get(key)
                    .map(|buckets| buckets.score(metric_value(metrics, key)))
                    .unwrap_or(NEUTRAL);
                (key.to_string(), score)
            })
            .collect();

        Ok(CategoryImpact {
            category,
            score: aggregate(&scores, &config.weights)?,
            metrics: scores,
        })
    }
}

fn metric_value(metrics: &ImpactMetrics, key: &str) -> Option<f64> {
    let count = |v: Option<u64>| v.map(|n| n as f64);
    match key {
        BENEFICIARIES => count(metrics.beneficiaries),
        COMMUNITIES_REACHED => count(metrics.communities_reached),
        PEOPLE_TRAINED => count(metrics.people_trained),
        CO2_REDUCTION => metrics.co2_reduction_tonnes,
        HECTARES_RESTORED => metrics.hectares_restored,
        TREES_PLANTED => count(metrics.trees_planted),
        JOBS_CREATED => count(metrics.jobs_created),
        LOCAL_ECONOMIC_VALUE => metrics.local_economic_value,
        BUSINESSES_SUPPORTED => count(metrics.businesses_supported),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::ImpactLevel;

    fn scorer() -> ImpactScorer {
        ImpactScorer::new(ImpactConfig::default().with_parallel(false)).unwrap()
    }

    fn community_program() -> Candidate {
        Candidate::new("program").with_impact(ImpactMetrics {
            beneficiaries: Some(5_000),
            communities_reached: Some(10),
            people_trained: Some(100),
            jobs_created: Some(100),
            local_economic_value: Some(50_000.0),
            ..ImpactMetrics::default()
        })
    }

    #[test]
    fn test_missing_metrics_are_neutral() {
        let assessment = scorer().score(&Candidate::new("blank")).unwrap();
        assert!((assessment.composite() - 0.5).abs() < 1e-9);
        assert_eq!(assessment.level(), ImpactLevel::Moderate);
    }

    #[test]
    fn test_weighted_categories() {
        let assessment = scorer().score(&community_program()).unwrap();

        let social = assessment.category(ImpactCategory::Social).unwrap();
        // 0.5 × 0.8 + 0.3 × 0.8 + 0.2 × 0.6
        assert!((social.score - 0.76).abs() < 1e-10);
        let economic = assessment.category(ImpactCategory::Economic).unwrap();
        assert!((economic.score - 0.68).abs() < 1e-10);
        assert_eq!(economic.metrics.get(BUSINESSES_SUPPORTED), Some(&0.5));

        // 0.4 × 0.76 + 0.35 × 0.5 + 0.25 × 0.68
        assert!((assessment.composite() - 0.649).abs() < 1e-10);
        assert_eq!(assessment.level(), ImpactLevel::High);
        assert_eq!(
            assessment.strongest().map(|c| c.category),
            Some(ImpactCategory::Social)
        );
    }

    #[test]
    fn test_maximum_impact() {
        let candidate = Candidate::new("max").with_impact(ImpactMetrics {
            beneficiaries: Some(1_000_000),
            communities_reached: Some(100),
            people_trained: Some(10_000),
            co2_reduction_tonnes: Some(1e6),
            hectares_restored: Some(1e4),
            trees_planted: Some(1_000_000),
            jobs_created: Some(1_000),
            local_economic_value: Some(1e7),
            businesses_supported: Some(500),
        });
        let assessment = scorer().score(&candidate).unwrap();
        assert!((assessment.composite() - 1.0).abs() < 1e-10);
        assert_eq!(assessment.level(), ImpactLevel::Transformational);
    }

    #[test]
    fn test_score_all_ranks_by_impact() {
        let candidates = vec![Candidate::new("blank"), Candidate::new(" "), community_program()];
        let batch = scorer().score_all(&candidates).unwrap();
        let ids: Vec<&str> = batch.ranked.iter().map(|a| a.candidate_id()).collect();
        assert_eq!(ids, vec!["program", "blank"]);
        assert_eq!(batch.skipped[0].index, 1);
    }
}

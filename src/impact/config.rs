//! Impact scorer configuration.

use super::types::{
    ImpactCategory, ImpactLevel, BENEFICIARIES, BUSINESSES_SUPPORTED, CO2_REDUCTION,
    COMMUNITIES_REACHED, HECTARES_RESTORED, JOBS_CREATED, LOCAL_ECONOMIC_VALUE, PEOPLE_TRAINED,
    TREES_PLANTED,
};
use crate::aggregate::WeightMap;
use crate::classify::Cutpoints;
use crate::error::ConfigurationError;
use crate::normalize::ThresholdBuckets;
use std::collections::BTreeMap;

/// Metric weights and bucket tables for one impact category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactCategoryConfig {
    pub weights: WeightMap,
    pub metrics: BTreeMap<String, ThresholdBuckets>,
}

impl ImpactCategoryConfig {
    fn build(metrics: [(&str, f64, [f64; 3]); 3]) -> Self {
        let weights = WeightMap::new(metrics.iter().map(|(key, weight, _)| (*key, *weight)))
            .unwrap_or_else(|err| unreachable!("default impact metric weights: {err}"));
        let metrics = metrics
            .into_iter()
            .map(|(key, _, [low, mid, high])| {
                let buckets = ThresholdBuckets::new(vec![(low, 0.3), (mid, 0.6), (high, 0.8)], 1.0);
                (key.to_string(), buckets)
            })
            .collect();
        Self { weights, metrics }
    }

    /// Replaces one metric's bucket table.
    pub fn with_metric(mut self, key: &str, buckets: ThresholdBuckets) -> Self {
        self.metrics.insert(key.to_string(), buckets);
        self
    }

    pub fn with_weights(mut self, weights: WeightMap) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self, category: ImpactCategory) -> Result<(), ConfigurationError> {
        let expected = category.metric_keys();
        self.weights.validate()?;
        self.weights.require_keys(&expected)?;

        let mut wanted: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
        wanted.sort();
        let actual: Vec<String> = self.metrics.keys().cloned().collect();
        if actual != wanted {
            return Err(ConfigurationError::WeightKeys {
                expected: wanted,
                actual,
            });
        }
        for buckets in self.metrics.values() {
            buckets.validate()?;
            buckets.validate_scale(1.0)?;
        }
        Ok(())
    }
}

/// Configuration for the impact scorer.
///
/// Every metric uses four buckets scoring 0.3 / 0.6 / 0.8 / 1.0, with
/// missing metrics at 0.5:
///
/// | Metric | ≤ 0.3 | ≤ 0.6 | ≤ 0.8 |
/// |--------|-------|-------|-------|
/// | beneficiaries | 100 | 1 000 | 10 000 |
/// | communities reached | 1 | 5 | 20 |
/// | people trained | 50 | 500 | 5 000 |
/// | CO₂ reduction (t) | 100 | 1 000 | 10 000 |
/// | hectares restored | 10 | 100 | 1 000 |
/// | trees planted | 1 000 | 10 000 | 100 000 |
/// | jobs created | 10 | 50 | 200 |
/// | local economic value | 10 000 | 100 000 | 1 000 000 |
/// | businesses supported | 5 | 25 | 100 |
///
/// ```
/// use u_fundmatch::impact::ImpactConfig;
///
/// let config = ImpactConfig::default();
/// assert_eq!(config.category_weights.get("social"), Some(0.40));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpactConfig {
    /// Weights over the three category scores.
    pub category_weights: WeightMap,

    /// Composite → level tiers: ≥0.8 Transformational, ≥0.6 High,
    /// ≥0.4 Moderate, else Limited.
    pub cutpoints: Cutpoints<ImpactLevel>,

    pub social: ImpactCategoryConfig,
    pub environmental: ImpactCategoryConfig,
    pub economic: ImpactCategoryConfig,

    /// Whether batch scoring fans out over rayon (`parallel` feature).
    pub parallel: bool,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        let category_weights =
            WeightMap::new([("social", 0.40), ("environmental", 0.35), ("economic", 0.25)])
                .unwrap_or_else(|err| unreachable!("default impact category weights: {err}"));

        let cutpoints = Cutpoints::new(
            vec![
                (0.8, ImpactLevel::Transformational),
                (0.6, ImpactLevel::High),
                (0.4, ImpactLevel::Moderate),
            ],
            ImpactLevel::Limited,
        )
        .unwrap_or_else(|err| unreachable!("default impact cutpoints: {err}"));

        Self {
            category_weights,
            cutpoints,
            social: ImpactCategoryConfig::build([
                (BENEFICIARIES, 0.5, [100.0, 1_000.0, 10_000.0]),
                (COMMUNITIES_REACHED, 0.3, [1.0, 5.0, 20.0]),
                (PEOPLE_TRAINED, 0.2, [50.0, 500.0, 5_000.0]),
            ]),
            environmental: ImpactCategoryConfig::build([
                (CO2_REDUCTION, 0.5, [100.0, 1_000.0, 10_000.0]),
                (HECTARES_RESTORED, 0.3, [10.0, 100.0, 1_000.0]),
                (TREES_PLANTED, 0.2, [1_000.0, 10_000.0, 100_000.0]),
            ]),
            economic: ImpactCategoryConfig::build([
                (JOBS_CREATED, 0.5, [10.0, 50.0, 200.0]),
                (LOCAL_ECONOMIC_VALUE, 0.3, [10_000.0, 100_000.0, 1_000_000.0]),
                (BUSINESSES_SUPPORTED, 0.2, [5.0, 25.0, 100.0]),
            ]),
            parallel: true,
        }
    }
}

impl ImpactConfig {
    pub fn with_category_weights(mut self, weights: WeightMap) -> Self {
        self.category_weights = weights;
        self
    }

    pub fn with_cutpoints(mut self, cutpoints: Cutpoints<ImpactLevel>) -> Self {
        self.cutpoints = cutpoints;
        self
    }

    /// Replaces one category's metric configuration.
    pub fn with_category(mut self, category: ImpactCategory, config: ImpactCategoryConfig) -> Self {
        match category {
            ImpactCategory::Social => self.social = config,
            ImpactCategory::Environmental => self.environmental = config,
            ImpactCategory::Economic => self.economic = config,
        }
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn category(&self, category: ImpactCategory) -> &ImpactCategoryConfig {
        match category {
            ImpactCategory::Social => &self.social,
            ImpactCategory::Environmental => &self.environmental,
            ImpactCategory::Economic => &self.economic,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.category_weights.validate()?;
        let keys: Vec<&str> = ImpactCategory::ALL.iter().map(|c| c.key()).collect();
        self.category_weights.require_keys(&keys)?;
        self.cutpoints.validate()?;
        ImpactCategory::ALL
            .iter()
            .try_for_each(|&c| self.category(c).validate(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ImpactConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.social.weights.get(BENEFICIARIES), Some(0.5));
        assert_eq!(config.economic.metrics.len(), 3);
    }

    #[test]
    fn test_beneficiary_buckets() {
        let buckets = &ImpactConfig::default().social.metrics[BENEFICIARIES];
        assert_eq!(buckets.score(Some(100.0)), 0.3);
        assert_eq!(buckets.score(Some(101.0)), 0.6);
        assert_eq!(buckets.score(Some(10_000.0)), 0.8);
        assert_eq!(buckets.score(Some(10_001.0)), 1.0);
        assert_eq!(buckets.score(None), 0.5);
    }

    #[test]
    fn test_validate_rejects_unordered_buckets() {
        let social = ImpactConfig::default().social.with_metric(
            BENEFICIARIES,
            ThresholdBuckets::new(vec![(1_000.0, 0.3), (100.0, 0.6)], 1.0),
        );
        let config = ImpactConfig::default().with_category(ImpactCategory::Social, social);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::BucketsNotAscending { index: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_bucket_scores_off_unit_scale() {
        let social = ImpactConfig::default().social.with_metric(
            BENEFICIARIES,
            ThresholdBuckets::new(vec![(100.0, 0.3), (1_000.0, 2.0)], 1.0),
        );
        let config = ImpactConfig::default().with_category(ImpactCategory::Social, social);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::OutOfScale { what: "bucket score", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_category_weight() {
        let weights = WeightMap::new([("social", 0.5), ("economic", 0.5)]).unwrap();
        let config = ImpactConfig::default().with_category_weights(weights);
        assert!(config.validate().is_err());
    }
}

//! Risk scorer configuration.
//!
//! Each category owns a weight map over its factors and one normalizer per
//! factor. Every factor normalizes onto 0–1 (higher is riskier) and sends
//! absent or unrecognised input to the neutral 0.5 bucket.

use super::types::{
    RiskCategory, RiskLevel, BUDGET_RISK, CLIMATE_EXPOSURE, COMMUNITY_SUPPORT, COMPLEXITY,
    COMPLIANCE_HISTORY, CULTURAL_SENSITIVITY, CURRENCY_VOLATILITY, ENVIRONMENTAL_SENSITIVITY,
    FUNDING_SOURCE, LEGAL_FRAMEWORK, LOCAL_PARTNERSHIPS, PERMIT_STATUS, RESOURCE_DEPENDENCY,
    TEAM_EXPERIENCE, TIMELINE,
};
use crate::aggregate::WeightMap;
use crate::classify::{Comparison, Cutpoints};
use crate::error::ConfigurationError;
use crate::normalize::{CategoricalTable, Normalizer, ThresholdBuckets, NEUTRAL};
use std::collections::BTreeMap;

/// Factor weights and normalizers for one risk category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskCategoryConfig {
    pub weights: WeightMap,
    pub factors: BTreeMap<String, Normalizer>,
}

impl RiskCategoryConfig {
    fn build(weights: &[(&str, f64)], factors: Vec<(&str, Normalizer)>) -> Self {
        let weights = WeightMap::new(weights.iter().copied())
            .unwrap_or_else(|err| unreachable!("default risk factor weights: {err}"));
        Self {
            weights,
            factors: factors
                .into_iter()
                .map(|(key, normalizer)| (key.to_string(), normalizer))
                .collect(),
        }
    }

    /// Replaces one factor's normalizer.
    pub fn with_factor(mut self, key: &str, normalizer: Normalizer) -> Self {
        self.factors.insert(key.to_string(), normalizer);
        self
    }

    pub fn with_weights(mut self, weights: WeightMap) -> Self {
        self.weights = weights;
        self
    }

    /// Validates against the factor keys `category` expects.
    pub fn validate(&self, category: RiskCategory) -> Result<(), ConfigurationError> {
        let expected = category.factor_keys();
        self.weights.validate()?;
        self.weights.require_keys(&expected)?;

        let mut actual: Vec<String> = self.factors.keys().cloned().collect();
        actual.sort();
        let mut wanted: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
        wanted.sort();
        if actual != wanted {
            return Err(ConfigurationError::WeightKeys {
                expected: wanted,
                actual,
            });
        }
        self.factors.values().try_for_each(|normalizer| {
            normalizer.validate()?;
            normalizer.validate_scale(1.0)
        })
    }
}

/// Configuration for the risk scorer.
///
/// # Defaults
///
/// ```
/// use u_fundmatch::risk::RiskConfig;
///
/// let config = RiskConfig::default();
/// assert_eq!(config.category_weights.get("financial"), Some(0.25));
/// assert_eq!(config.category_weights.get("regulatory"), Some(0.15));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskConfig {
    /// Weights over the five category scores.
    pub category_weights: WeightMap,

    /// Composite (and per-category) score → level. Upper bounds inclusive:
    /// ≤0.3 Low, ≤0.6 Medium, ≤0.8 High, else VeryHigh.
    pub cutpoints: Cutpoints<RiskLevel>,

    pub financial: RiskCategoryConfig,
    pub operational: RiskCategoryConfig,
    pub environmental: RiskCategoryConfig,
    pub social: RiskCategoryConfig,
    pub regulatory: RiskCategoryConfig,

    /// Whether batch scoring fans out over rayon (`parallel` feature).
    pub parallel: bool,
}

fn low_medium_high() -> Normalizer {
    Normalizer::Lookup(CategoricalTable::from_pairs(
        NEUTRAL,
        [("low", 0.2), ("medium", 0.5), ("moderate", 0.5), ("high", 0.8)],
    ))
}

fn buckets(bounds: Vec<(f64, f64)>, overflow: f64) -> Normalizer {
    Normalizer::Buckets(ThresholdBuckets::new(bounds, overflow))
}

fn lookup<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Normalizer {
    Normalizer::Lookup(CategoricalTable::from_pairs(NEUTRAL, pairs))
}

impl Default for RiskConfig {
    fn default() -> Self {
        let category_weights = WeightMap::new(RiskCategory::ALL.iter().map(|c| {
            let weight = match c {
                RiskCategory::Financial | RiskCategory::Operational => 0.25,
                RiskCategory::Environmental => 0.20,
                RiskCategory::Social | RiskCategory::Regulatory => 0.15,
            };
            (c.key(), weight)
        }))
        .unwrap_or_else(|err| unreachable!("default risk category weights: {err}"));

        let cutpoints = Cutpoints::new(
            vec![
                (0.8, RiskLevel::VeryHigh),
                (0.6, RiskLevel::High),
                (0.3, RiskLevel::Medium),
            ],
            RiskLevel::Low,
        )
        .unwrap_or_else(|err| unreachable!("default risk cutpoints: {err}"))
        .with_comparison(Comparison::Above);

        let financial = RiskCategoryConfig::build(
            &[(BUDGET_RISK, 0.4), (FUNDING_SOURCE, 0.4), (CURRENCY_VOLATILITY, 0.2)],
            vec![
                (
                    BUDGET_RISK,
                    buckets(
                        vec![
                            (50_000.0, 0.2),
                            (250_000.0, 0.35),
                            (1_000_000.0, 0.5),
                            (5_000_000.0, 0.7),
                        ],
                        0.85,
                    ),
                ),
                (
                    FUNDING_SOURCE,
                    lookup([
                        ("secured", 0.15),
                        ("committed", 0.2),
                        ("diversified", 0.25),
                        ("multiple sources", 0.25),
                        ("self-funded", 0.4),
                        ("pending", 0.6),
                        ("single source", 0.7),
                        ("none", 0.9),
                    ]),
                ),
                (
                    CURRENCY_VOLATILITY,
                    lookup([
                        ("usd", 0.1),
                        ("eur", 0.1),
                        ("chf", 0.1),
                        ("gbp", 0.15),
                        ("cad", 0.15),
                        ("jpy", 0.2),
                        ("aud", 0.2),
                        ("inr", 0.4),
                        ("brl", 0.55),
                        ("kes", 0.55),
                        ("ngn", 0.75),
                        ("ars", 0.85),
                    ]),
                ),
            ],
        );

        let operational = RiskCategoryConfig::build(
            &[(TEAM_EXPERIENCE, 0.35), (TIMELINE, 0.35), (COMPLEXITY, 0.30)],
            vec![
                (
                    TEAM_EXPERIENCE,
                    buckets(vec![(1.0, 0.8), (3.0, 0.6), (7.0, 0.4)], 0.2),
                ),
                (
                    TIMELINE,
                    buckets(vec![(12.0, 0.3), (24.0, 0.45), (48.0, 0.6)], 0.75),
                ),
                (COMPLEXITY, low_medium_high()),
            ],
        );

        let environmental = RiskCategoryConfig::build(
            &[
                (CLIMATE_EXPOSURE, 0.4),
                (ENVIRONMENTAL_SENSITIVITY, 0.3),
                (RESOURCE_DEPENDENCY, 0.3),
            ],
            vec![
                (CLIMATE_EXPOSURE, low_medium_high()),
                (ENVIRONMENTAL_SENSITIVITY, low_medium_high()),
                (RESOURCE_DEPENDENCY, low_medium_high()),
            ],
        );

        let social = RiskCategoryConfig::build(
            &[
                (COMMUNITY_SUPPORT, 0.4),
                (LOCAL_PARTNERSHIPS, 0.3),
                (CULTURAL_SENSITIVITY, 0.3),
            ],
            vec![
                (
                    COMMUNITY_SUPPORT,
                    lookup([
                        ("strong", 0.15),
                        ("moderate", 0.4),
                        ("weak", 0.7),
                        ("opposed", 0.9),
                    ]),
                ),
                (
                    LOCAL_PARTNERSHIPS,
                    buckets(vec![(0.0, 0.8), (2.0, 0.55), (5.0, 0.35)], 0.2),
                ),
                (CULTURAL_SENSITIVITY, low_medium_high()),
            ],
        );

        let regulatory = RiskCategoryConfig::build(
            &[
                (PERMIT_STATUS, 0.4),
                (LEGAL_FRAMEWORK, 0.35),
                (COMPLIANCE_HISTORY, 0.25),
            ],
            vec![
                (
                    PERMIT_STATUS,
                    lookup([
                        ("approved", 0.1),
                        ("not required", 0.1),
                        ("in progress", 0.5),
                        ("pending", 0.5),
                        ("not started", 0.8),
                        ("denied", 0.95),
                    ]),
                ),
                (
                    LEGAL_FRAMEWORK,
                    lookup([("stable", 0.2), ("developing", 0.5), ("unstable", 0.85)]),
                ),
                (
                    COMPLIANCE_HISTORY,
                    lookup([("clean", 0.1), ("minor issues", 0.5), ("major issues", 0.9)]),
                ),
            ],
        );

        Self {
            category_weights,
            cutpoints,
            financial,
            operational,
            environmental,
            social,
            regulatory,
            parallel: true,
        }
    }
}

impl RiskConfig {
    /// Sets the category weights.
    pub fn with_category_weights(mut self, weights: WeightMap) -> Self {
        self.category_weights = weights;
        self
    }

    pub fn with_cutpoints(mut self, cutpoints: Cutpoints<RiskLevel>) -> Self {
        self.cutpoints = cutpoints;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replaces one category's factor configuration.
    pub fn with_category(mut self, category: RiskCategory, config: RiskCategoryConfig) -> Self {
        *self.category_mut(category) = config;
        self
    }

    pub fn category(&self, category: RiskCategory) -> &RiskCategoryConfig {
        match category {
            RiskCategory::Financial => &self.financial,
            RiskCategory::Operational => &self.operational,
            RiskCategory::Environmental => &self.environmental,
            RiskCategory::Social => &self.social,
            RiskCategory::Regulatory => &self.regulatory,
        }
    }

    fn category_mut(&mut self, category: RiskCategory) -> &mut RiskCategoryConfig {
        match category {
            RiskCategory::Financial => &mut self.financial,
            RiskCategory::Operational => &mut self.operational,
            RiskCategory::Environmental => &mut self.environmental,
            RiskCategory::Social => &mut self.social,
            RiskCategory::Regulatory => &mut self.regulatory,
        }
    }

    /// Validates weights, cut points, and every factor normalizer.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.category_weights.validate()?;
        let keys: Vec<&str> = RiskCategory::ALL.iter().map(|c| c.key()).collect();
        self.category_weights.require_keys(&keys)?;
        self.cutpoints.validate()?;
        RiskCategory::ALL
            .iter()
            .try_for_each(|&c| self.category(c).validate(c))
    }
}

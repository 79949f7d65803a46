//! Allocator configuration.

use super::types::{ALIGNMENT, FEASIBILITY, IMPACT, PERFORMANCE_KEYS, RISK, ROI};
use crate::aggregate::WeightMap;
use crate::error::{check_scale, ConfigurationError};

/// Utilization and diversity thresholds that trigger recommendations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommendationThresholds {
    /// Below this share of the budget allocated, the portfolio is thin.
    pub low_utilization: f64,
    /// Above this share, no reserve is left.
    pub high_utilization: f64,
    pub low_diversity: f64,
    pub high_diversity: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            low_utilization: 0.5,
            high_utilization: 0.95,
            low_diversity: 0.5,
            high_diversity: 0.8,
        }
    }
}

/// Configuration for the greedy allocator.
///
/// # Examples
///
/// ```
/// use u_fundmatch::allocation::AllocatorConfig;
///
/// let config = AllocatorConfig::default();
/// assert_eq!(config.weights.get("roi"), Some(0.25));
/// assert_eq!(config.weights.get("feasibility"), Some(0.15));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AllocatorConfig {
    /// Weights over roi, impact, risk (safety), alignment, feasibility.
    pub weights: WeightMap,

    /// Floor applied to cost in the cost-effectiveness denominator.
    pub min_cost_divisor: f64,

    pub thresholds: RecommendationThresholds,

    /// Whether per-candidate scoring fans out over rayon (`parallel` feature).
    /// Selection is always sequential.
    pub parallel: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        let weights = WeightMap::new([
            (ROI, 0.25),
            (IMPACT, 0.25),
            (RISK, 0.20),
            (ALIGNMENT, 0.15),
            (FEASIBILITY, 0.15),
        ])
        .unwrap_or_else(|err| unreachable!("default allocator weights: {err}"));

        Self {
            weights,
            min_cost_divisor: 1.0,
            thresholds: RecommendationThresholds::default(),
            parallel: true,
        }
    }
}

impl AllocatorConfig {
    pub fn with_weights(mut self, weights: WeightMap) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_thresholds(mut self, thresholds: RecommendationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.weights.validate()?;
        self.weights.require_keys(&PERFORMANCE_KEYS)?;
        if !self.min_cost_divisor.is_finite() || self.min_cost_divisor <= 0.0 {
            return Err(ConfigurationError::NonFinite {
                what: "min_cost_divisor",
                value: self.min_cost_divisor,
            });
        }
        let t = &self.thresholds;
        check_scale("thresholds.low_utilization", t.low_utilization, 1.0)?;
        check_scale("thresholds.high_utilization", t.high_utilization, 1.0)?;
        check_scale("thresholds.low_diversity", t.low_diversity, 1.0)?;
        check_scale("thresholds.high_diversity", t.high_diversity, 1.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AllocatorConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.sum() - 1.0).abs() < 1e-12);
        assert!(config.parallel);
    }

    #[test]
    fn test_validate_rejects_partial_weights() {
        let weights = WeightMap::new([(ROI, 0.5), (IMPACT, 0.5)]).unwrap();
        let config = AllocatorConfig::default().with_weights(weights);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::WeightKeys { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_thresholds_off_scale() {
        let config = AllocatorConfig::default().with_thresholds(RecommendationThresholds {
            high_diversity: 1.2,
            ..RecommendationThresholds::default()
        });
        assert!(config.validate().is_err());
    }
}

//! Weighted aggregation of named sub-scores.
//!
//! The composite is `Σ sub_scores[k] × weights[k]` over the keys of the
//! [`WeightMap`]. Every weight key must have a sub-score: a gap is a
//! [`ConfigurationError`], never a silent zero, so missing upstream data
//! cannot be masked.
//!
//! The result is not re-clamped. Callers keep the sub-score scale
//! consistent (all 0–1 or all 0–100); with weights summing to one, the
//! composite then stays on that scale.

mod rank;
mod weights;

pub use rank::rank_descending;
pub use weights::WeightMap;

use crate::error::ConfigurationError;
use crate::model::SubScores;

/// Weighted sum of `sub_scores` under `weights`.
///
/// Sub-scores the map does not name are ignored.
///
/// # Examples
///
/// ```
/// use u_fundmatch::aggregate::{aggregate, WeightMap};
/// use u_fundmatch::model::SubScores;
///
/// let weights = WeightMap::new([("budget", 0.4), ("funding", 0.6)]).unwrap();
/// let mut subs = SubScores::new();
/// subs.insert("budget".into(), 0.5);
/// subs.insert("funding".into(), 1.0);
/// assert!((aggregate(&subs, &weights).unwrap() - 0.8).abs() < 1e-12);
/// ```
pub fn aggregate(sub_scores: &SubScores, weights: &WeightMap) -> Result<f64, ConfigurationError> {
    weights.iter().try_fold(0.0, |total, (key, weight)| {
        sub_scores
            .get(key)
            .map(|score| total + score * weight)
            .ok_or_else(|| ConfigurationError::MissingSubScore {
                key: key.to_string(),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&str, f64)]) -> SubScores {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_weighted_sum() {
        let w = WeightMap::new([("a", 0.25), ("b", 0.75)]).unwrap();
        let total = aggregate(&subs(&[("a", 100.0), ("b", 20.0)]), &w).unwrap();
        assert!((total - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_missing_key_is_error() {
        let w = WeightMap::new([("a", 0.5), ("b", 0.5)]).unwrap();
        assert_eq!(
            aggregate(&subs(&[("a", 1.0)]), &w),
            Err(ConfigurationError::MissingSubScore { key: "b".into() })
        );
    }

    #[test]
    fn test_extra_sub_scores_ignored() {
        let w = WeightMap::new([("a", 1.0)]).unwrap();
        let total = aggregate(&subs(&[("a", 0.3), ("z", 99.0)]), &w).unwrap();
        assert!((total - 0.3).abs() < 1e-12);
    }
}

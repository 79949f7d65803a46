//! Validated weight maps.

use crate::error::{ConfigurationError, WEIGHT_SUM_TOLERANCE};
use std::collections::BTreeMap;

/// Name → weight map whose weights are finite, non-negative, and sum to
/// 1.0 (± 1e-9).
///
/// # Examples
///
/// ```
/// use u_fundmatch::aggregate::WeightMap;
///
/// let weights = WeightMap::new([("social", 0.4), ("environmental", 0.35), ("economic", 0.25)]).unwrap();
/// assert_eq!(weights.get("social"), Some(0.4));
///
/// assert!(WeightMap::new([("a", 0.5), ("b", 0.4)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeightMap {
    weights: BTreeMap<String, f64>,
}

impl WeightMap {
    /// Builds and validates a weight map.
    pub fn new<I, K>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let map = Self {
            weights: pairs.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        };
        map.validate()?;
        Ok(map)
    }

    /// Checks every weight and the sum-to-one invariant.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.weights.is_empty() {
            return Err(ConfigurationError::EmptyWeights);
        }
        for (key, &weight) in &self.weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    key: key.clone(),
                    weight,
                });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigurationError::WeightSum { sum });
        }
        Ok(())
    }

    /// Checks that the map names exactly `expected`.
    pub fn require_keys(&self, expected: &[&str]) -> Result<(), ConfigurationError> {
        let mut wanted: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
        wanted.sort();
        let actual: Vec<String> = self.weights.keys().cloned().collect();
        if wanted != actual {
            return Err(ConfigurationError::WeightKeys {
                expected: wanted,
                actual,
            });
        }
        Ok(())
    }

    /// Returns a copy with some weights replaced, validated as a whole.
    ///
    /// Used for one-off per-call overrides: the result must still sum to
    /// 1.0 and may not introduce unknown keys.
    pub fn with_overrides<'a>(
        &self,
        overrides: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, ConfigurationError> {
        let mut weights = self.weights.clone();
        for (key, weight) in overrides {
            match weights.get_mut(key) {
                Some(slot) => *slot = weight,
                None => {
                    return Err(ConfigurationError::WeightKeys {
                        expected: self.weights.keys().cloned().collect(),
                        actual: vec![key.to_string()],
                    })
                }
            }
        }
        let map = Self { weights };
        map.validate()?;
        Ok(map)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.weights.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_map() {
        let w = WeightMap::new([("a", 0.3), ("b", 0.7)]).unwrap();
        assert_eq!(w.len(), 2);
        assert!((w.sum() - 1.0).abs() < 1e-12);
        assert!(w.require_keys(&["b", "a"]).is_ok());
    }

    #[test]
    fn test_sum_tolerance() {
        // 0.1 + 0.2 + 0.7 is not exactly 1.0 in binary
        assert!(WeightMap::new([("a", 0.1), ("b", 0.2), ("c", 0.7)]).is_ok());
        assert!(matches!(
            WeightMap::new([("a", 0.5), ("b", 0.5 + 1e-6)]),
            Err(ConfigurationError::WeightSum { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert_eq!(
            WeightMap::new(Vec::<(String, f64)>::new()),
            Err(ConfigurationError::EmptyWeights)
        );
        assert!(matches!(
            WeightMap::new([("a", 1.5), ("b", -0.5)]),
            Err(ConfigurationError::InvalidWeight { .. })
        ));
        assert!(matches!(
            WeightMap::new([("a", f64::NAN)]),
            Err(ConfigurationError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_require_keys_mismatch() {
        let w = WeightMap::new([("a", 1.0)]).unwrap();
        assert!(matches!(
            w.require_keys(&["a", "b"]),
            Err(ConfigurationError::WeightKeys { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let w = WeightMap::new([("a", 0.5), ("b", 0.5)]).unwrap();
        let shifted = w.with_overrides([("a", 0.8), ("b", 0.2)]).unwrap();
        assert_eq!(shifted.get("a"), Some(0.8));
        assert_eq!(w.get("a"), Some(0.5));

        assert!(matches!(
            w.with_overrides([("a", 0.9)]),
            Err(ConfigurationError::WeightSum { .. })
        ));
        assert!(matches!(
            w.with_overrides([("c", 0.0)]),
            Err(ConfigurationError::WeightKeys { .. })
        ));
    }
}

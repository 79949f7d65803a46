//! The four normalizer kinds.
//!
//! Each kind maps one raw attribute onto a bounded score and substitutes a
//! documented default when the attribute is absent. None of them can fail
//! or produce NaN once constructed.

use super::text::{key_set, normalize_key};
use super::NEUTRAL;
use crate::error::{check_scale, ConfigurationError};
use std::collections::BTreeMap;

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn check_finite(what: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NonFinite { what, value })
    }
}

// ---------------------------------------------------------------------------
// Ratio against target
// ---------------------------------------------------------------------------

/// `value / target × scale`, capped at `cap` and floored at zero.
///
/// A five-star rating on a 0–100 scale is
/// `RatioTarget::new(5.0, 100.0)` (i.e. `rating × 20`, capped at 100).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatioTarget {
    target: f64,
    scale: f64,
    cap: f64,
    missing: f64,
}

impl RatioTarget {
    /// Ratio against `target`, reported on `0..=scale`.
    ///
    /// The cap defaults to `scale`; the missing-value default to half of it.
    pub fn new(target: f64, scale: f64) -> Self {
        Self {
            target,
            scale,
            cap: scale,
            missing: scale * NEUTRAL,
        }
    }

    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_missing(mut self, missing: f64) -> Self {
        self.missing = missing;
        self
    }

    pub fn missing(&self) -> f64 {
        self.missing
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_finite("ratio scale", self.scale)?;
        check_finite("ratio cap", self.cap)?;
        check_finite("ratio missing default", self.missing)?;
        if !self.target.is_finite() || self.target <= 0.0 {
            return Err(ConfigurationError::InvalidTarget {
                target: self.target,
            });
        }
        Ok(())
    }

    /// Checks that every score this ratio can produce lies on `0..=max`.
    pub fn validate_scale(&self, max: f64) -> Result<(), ConfigurationError> {
        check_scale("ratio scale", self.scale, f64::INFINITY)?;
        check_scale("ratio cap", self.cap, max)?;
        check_scale("ratio missing default", self.missing, max)
    }

    pub fn score(&self, value: Option<f64>) -> f64 {
        let Some(value) = finite(value) else {
            return self.missing;
        };
        if self.target.is_nan() || self.target <= 0.0 {
            return self.missing;
        }
        (value.max(0.0) / self.target * self.scale).min(self.cap)
    }
}

// ---------------------------------------------------------------------------
// Threshold buckets
// ---------------------------------------------------------------------------

/// Ordered breakpoints mapping a magnitude to a discrete score.
///
/// Bounds are inclusive upper limits checked in ascending order; values
/// above the last bound receive `overflow`.
///
/// ```
/// use u_fundmatch::normalize::ThresholdBuckets;
///
/// let reach = ThresholdBuckets::new(vec![(10.0, 0.3), (100.0, 0.6), (1000.0, 0.8)], 1.0);
/// assert_eq!(reach.score(Some(10.0)), 0.3);
/// assert_eq!(reach.score(Some(11.0)), 0.6);
/// assert_eq!(reach.score(Some(5000.0)), 1.0);
/// assert_eq!(reach.score(None), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdBuckets {
    bounds: Vec<(f64, f64)>,
    overflow: f64,
    missing: f64,
}

impl ThresholdBuckets {
    /// Buckets with the neutral 0.5 missing-value default.
    pub fn new(bounds: Vec<(f64, f64)>, overflow: f64) -> Self {
        Self {
            bounds,
            overflow,
            missing: NEUTRAL,
        }
    }

    pub fn with_missing(mut self, missing: f64) -> Self {
        self.missing = missing;
        self
    }

    pub fn missing(&self) -> f64 {
        self.missing
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_finite("bucket overflow score", self.overflow)?;
        check_finite("bucket missing default", self.missing)?;
        let mut previous = f64::NEG_INFINITY;
        for (index, &(bound, score)) in self.bounds.iter().enumerate() {
            if !bound.is_finite() || bound <= previous {
                return Err(ConfigurationError::BucketsNotAscending { index });
            }
            check_finite("bucket score", score)?;
            previous = bound;
        }
        Ok(())
    }

    /// Checks that every bucket score and both defaults lie on `0..=max`.
    pub fn validate_scale(&self, max: f64) -> Result<(), ConfigurationError> {
        check_scale("bucket overflow score", self.overflow, max)?;
        check_scale("bucket missing default", self.missing, max)?;
        self.bounds
            .iter()
            .try_for_each(|&(_, score)| check_scale("bucket score", score, max))
    }

    pub fn score(&self, value: Option<f64>) -> f64 {
        let Some(value) = finite(value) else {
            return self.missing;
        };
        self.bounds
            .iter()
            .find(|(bound, _)| value <= *bound)
            .map(|(_, score)| *score)
            .unwrap_or(self.overflow)
    }

    /// Convenience for integer counts.
    pub fn score_count(&self, value: Option<u64>) -> f64 {
        self.score(value.map(|v| v as f64))
    }
}

// ---------------------------------------------------------------------------
// Categorical lookup
// ---------------------------------------------------------------------------

/// Fixed string → score table with a default for unknown or absent values.
///
/// Keys are stored in canonical form (trimmed, lowercase), so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoricalTable {
    entries: BTreeMap<String, f64>,
    default: f64,
}

impl CategoricalTable {
    pub fn new(default: f64) -> Self {
        Self {
            entries: BTreeMap::new(),
            default,
        }
    }

    /// Builds a table from `(key, score)` pairs.
    pub fn from_pairs<'a>(default: f64, pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(default), |table, (key, score)| {
                table.with_entry(key, score)
            })
    }

    pub fn with_entry(mut self, key: &str, score: f64) -> Self {
        self.entries.insert(normalize_key(key), score);
        self
    }

    pub fn default_score(&self) -> f64 {
        self.default
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_finite("lookup default", self.default)?;
        self.entries
            .values()
            .try_for_each(|&score| check_finite("lookup score", score))
    }

    /// Checks that every entry and the default lie on `0..=max`.
    pub fn validate_scale(&self, max: f64) -> Result<(), ConfigurationError> {
        check_scale("lookup default", self.default, max)?;
        self.entries
            .values()
            .try_for_each(|&score| check_scale("lookup score", score, max))
    }

    /// Score for a known key, `None` when the key is not in the table.
    pub fn get(&self, value: &str) -> Option<f64> {
        let key = normalize_key(value);
        self.entries.get(&key).copied().or_else(|| {
            // tables deserialized from external config may carry raw keys
            self.entries
                .iter()
                .find(|(k, _)| normalize_key(k) == key)
                .map(|(_, score)| *score)
        })
    }

    pub fn score(&self, value: Option<&str>) -> f64 {
        value.and_then(|v| self.get(v)).unwrap_or(self.default)
    }
}

// ---------------------------------------------------------------------------
// Set overlap
// ---------------------------------------------------------------------------

/// Which denominator a set-overlap score uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlapMode {
    /// `|A ∩ B| / |A ∪ B|`.
    Jaccard,
    /// `|A ∩ B| / |B|`: how much of the reference set `B` is covered.
    /// Used for "coverage of requester priorities".
    Coverage,
}

/// Set-overlap score on `0..=1`, comparing canonical keys.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetOverlap {
    mode: OverlapMode,
    empty: f64,
}

impl SetOverlap {
    /// Overlap with the neutral default for an empty denominator.
    pub fn new(mode: OverlapMode) -> Self {
        Self {
            mode,
            empty: NEUTRAL,
        }
    }

    pub fn with_empty(mut self, empty: f64) -> Self {
        self.empty = empty;
        self
    }

    pub fn mode(&self) -> OverlapMode {
        self.mode
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_finite("overlap empty default", self.empty)
    }

    /// Overlap ratios sit on `0..=1`; only the empty default is configurable.
    pub fn validate_scale(&self, max: f64) -> Result<(), ConfigurationError> {
        check_scale("overlap empty default", self.empty, max.min(1.0))
    }

    /// Scores `candidate` (A) against `reference` (B).
    pub fn score<S: AsRef<str>>(&self, candidate: &[S], reference: &[S]) -> f64 {
        let a = key_set(candidate);
        let b = key_set(reference);
        let shared = a.intersection(&b).count();

        let denominator = match self.mode {
            OverlapMode::Jaccard => a.union(&b).count(),
            OverlapMode::Coverage => b.len(),
        };
        if denominator == 0 {
            return self.empty;
        }
        shared as f64 / denominator as f64
    }
}

//! Normalizers: raw heterogeneous attributes → bounded scores.
//!
//! Four kinds are provided:
//!
//! - **Ratio against target** ([`RatioTarget`]): `value / target`, scaled
//!   and capped.
//! - **Threshold buckets** ([`ThresholdBuckets`]): ordered breakpoints →
//!   discrete scores.
//! - **Categorical lookup** ([`CategoricalTable`]): string → fixed score.
//! - **Set overlap** ([`SetOverlap`]): Jaccard or coverage of a reference set.
//!
//! # Neutral defaults
//!
//! Absent input never fails and never yields NaN. Every kind carries an
//! explicit fallback (by default [`NEUTRAL`], scaled for ratio targets)
//! returned when the raw value is missing, non-finite, or when the
//! denominator would be empty.

mod kinds;
pub mod text;

pub use kinds::{CategoricalTable, OverlapMode, RatioTarget, SetOverlap, ThresholdBuckets};

/// Fallback score on the unit scale for absent data.
pub const NEUTRAL: f64 = 0.5;

/// A normalizer of any kind, for call sites that pick the kind at runtime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Normalizer {
    Ratio(RatioTarget),
    Buckets(ThresholdBuckets),
    Lookup(CategoricalTable),
    Overlap(SetOverlap),
}

/// Raw attribute handed to [`normalize`].
#[derive(Debug, Clone, Copy)]
pub enum RawValue<'a> {
    Number(Option<f64>),
    Text(Option<&'a str>),
    Sets {
        candidate: &'a [String],
        reference: &'a [String],
    },
}

impl Normalizer {
    /// Default returned when the raw value is absent or of the wrong shape.
    pub fn neutral(&self) -> f64 {
        match self {
            Normalizer::Ratio(r) => r.missing(),
            Normalizer::Buckets(b) => b.missing(),
            Normalizer::Lookup(t) => t.default_score(),
            Normalizer::Overlap(_) => NEUTRAL,
        }
    }

    pub fn validate(&self) -> Result<(), crate::error::ConfigurationError> {
        match self {
            Normalizer::Ratio(r) => r.validate(),
            Normalizer::Buckets(b) => b.validate(),
            Normalizer::Lookup(t) => t.validate(),
            Normalizer::Overlap(o) => o.validate(),
        }
    }

    /// Checks that every score the normalizer can produce lies on `0..=max`.
    pub fn validate_scale(&self, max: f64) -> Result<(), crate::error::ConfigurationError> {
        match self {
            Normalizer::Ratio(r) => r.validate_scale(max),
            Normalizer::Buckets(b) => b.validate_scale(max),
            Normalizer::Lookup(t) => t.validate_scale(max),
            Normalizer::Overlap(o) => o.validate_scale(max),
        }
    }
}

/// Normalizes `raw` with `kind`.
///
/// A raw value whose shape does not fit the kind (e.g. text for a bucket
/// table) resolves to the kind's neutral default.
///
/// ```
/// use u_fundmatch::normalize::{normalize, Normalizer, RatioTarget, RawValue};
///
/// let credibility = Normalizer::Ratio(RatioTarget::new(5.0, 100.0));
/// assert_eq!(normalize(&credibility, RawValue::Number(Some(4.5))), 90.0);
/// assert_eq!(normalize(&credibility, RawValue::Text(Some("five"))), 50.0);
/// ```
pub fn normalize(kind: &Normalizer, raw: RawValue<'_>) -> f64 {
    match (kind, raw) {
        (Normalizer::Ratio(r), RawValue::Number(value)) => r.score(value),
        (Normalizer::Buckets(b), RawValue::Number(value)) => b.score(value),
        (Normalizer::Lookup(t), RawValue::Text(value)) => t.score(value),
        (
            Normalizer::Overlap(o),
            RawValue::Sets {
                candidate,
                reference,
            },
        ) => o.score(candidate, reference),
        (kind, raw) => {
            tracing::debug!(?raw, "raw value does not fit normalizer kind, using neutral default");
            kind.neutral()
        }
    }
}

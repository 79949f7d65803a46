//! Error types shared by every scorer and the allocator.
//!
//! Two families exist:
//!
//! - [`ConfigurationError`]: the weights, cut points, or lookup tables
//!   handed to a scorer are unusable. Raised eagerly, before any candidate
//!   is touched.
//! - [`InputValidationError`]: one candidate record lacks something a
//!   scorer cannot default (its identity). Batch operations skip and report
//!   these instead of aborting.
//!
//! An infeasible allocation is not an error; see
//! [`PortfolioResult::reasons`](crate::allocation::PortfolioResult).

use thiserror::Error;

/// Tolerance for the weight-sum invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// A weight map, cut point list, or bucket table is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("weight map is empty")]
    EmptyWeights,

    #[error("weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },

    #[error("weight `{key}` must be finite and non-negative, got {weight}")]
    InvalidWeight { key: String, weight: f64 },

    #[error("weight `{key}` has no matching sub-score")]
    MissingSubScore { key: String },

    #[error("expected weight keys {expected:?}, got {actual:?}")]
    WeightKeys {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("cut point {index} must be finite and strictly below the previous one")]
    CutpointsNotDescending { index: usize },

    #[error("bucket bound {index} must be finite and strictly above the previous one")]
    BucketsNotAscending { index: usize },

    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("ratio target must be positive, got {target}")]
    InvalidTarget { target: f64 },

    #[error("{what} must lie within 0..={max}, got {value}")]
    OutOfScale {
        what: &'static str,
        value: f64,
        max: f64,
    },
}

/// Checks that a configured score sits on the `0..=max` scale.
pub(crate) fn check_scale(what: &'static str, value: f64, max: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::OutOfScale { what, value, max })
    }
}

/// A candidate record cannot be scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputValidationError {
    #[error("candidate is missing its id")]
    MissingId,

    #[error("candidate `{candidate_id}`: {field} is required")]
    MissingField {
        candidate_id: String,
        field: &'static str,
    },

    #[error("candidate `{candidate_id}`: {field} is invalid ({reason})")]
    InvalidField {
        candidate_id: String,
        field: &'static str,
        reason: String,
    },
}

/// Any failure surfaced by a single-candidate engine call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InputValidation(#[from] InputValidationError),
}

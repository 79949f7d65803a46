//! Ordinal classification of composite scores.
//!
//! A [`Cutpoints`] table is an ordered list of `(threshold, label)` tiers
//! evaluated top-down, terminating in a default label, so every score
//! (including NaN) maps to exactly one label.

mod cutpoints;

pub use cutpoints::{Comparison, Cutpoints};

/// Classifies `score` against `cutpoints`.
///
/// Free-function form of [`Cutpoints::classify`].
///
/// ```
/// use u_fundmatch::classify::{classify, Cutpoints};
///
/// let bands = Cutpoints::new(vec![(0.6, "high"), (0.3, "medium")], "low").unwrap();
/// assert_eq!(*classify(0.45, &bands), "medium");
/// ```
pub fn classify<L>(score: f64, cutpoints: &Cutpoints<L>) -> &L {
    cutpoints.classify(score)
}

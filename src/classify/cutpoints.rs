//! Cut point tables.

use crate::error::ConfigurationError;

/// How a score is compared against a tier threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// `score >= threshold` selects the tier.
    #[default]
    AtLeast,
    /// `score > threshold` selects the tier. Expresses bands whose upper
    /// bound is inclusive, e.g. "≤ 0.3 is Low".
    Above,
}

impl Comparison {
    fn admits(self, score: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => score >= threshold,
            Comparison::Above => score > threshold,
        }
    }
}

/// Ordered `(threshold, label)` tiers plus a default label.
///
/// Thresholds must be finite and strictly descending; the first tier the
/// score reaches wins, otherwise the default applies.
///
/// # Examples
///
/// ```
/// use u_fundmatch::classify::Cutpoints;
///
/// let grades = Cutpoints::new(vec![(90.0, 'A'), (75.0, 'B'), (50.0, 'C')], 'F').unwrap();
/// assert_eq!(*grades.classify(90.0), 'A');
/// assert_eq!(*grades.classify(74.9), 'C');
/// assert_eq!(*grades.classify(f64::NAN), 'F');
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cutpoints<L> {
    tiers: Vec<(f64, L)>,
    default: L,
    #[cfg_attr(feature = "serde", serde(default))]
    comparison: Comparison,
}

impl<L> Cutpoints<L> {
    /// Builds a validated table using [`Comparison::AtLeast`].
    pub fn new(tiers: Vec<(f64, L)>, default: L) -> Result<Self, ConfigurationError> {
        let cutpoints = Self {
            tiers,
            default,
            comparison: Comparison::AtLeast,
        };
        cutpoints.validate()?;
        Ok(cutpoints)
    }

    /// Switches the tier comparison.
    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut previous = f64::INFINITY;
        for (index, (threshold, _)) in self.tiers.iter().enumerate() {
            if !threshold.is_finite() || *threshold >= previous {
                return Err(ConfigurationError::CutpointsNotDescending { index });
            }
            previous = *threshold;
        }
        Ok(())
    }

    pub fn classify(&self, score: f64) -> &L {
        self.tiers
            .iter()
            .find(|(threshold, _)| self.comparison.admits(score, *threshold))
            .map(|(_, label)| label)
            .unwrap_or(&self.default)
    }

    /// Index of the tier `score` falls into; the default is `tiers().len()`.
    ///
    /// Lets parallel tables (e.g. recommendation texts) key off the same
    /// decision as the label.
    pub fn tier_index(&self, score: f64) -> usize {
        self.tiers
            .iter()
            .position(|(threshold, _)| self.comparison.admits(score, *threshold))
            .unwrap_or(self.tiers.len())
    }

    pub fn tiers(&self) -> &[(f64, L)] {
        &self.tiers
    }

    pub fn default_label(&self) -> &L {
        &self.default
    }
}

//! Requester (funder) priorities.

/// How much risk a requester is willing to carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

/// Funding range a requester is prepared to commit to one candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetEnvelope {
    pub min: f64,
    pub max: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub currency: Option<String>,
}

impl BudgetEnvelope {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Whether the envelope describes a usable range.
    pub fn is_usable(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// The party seeking a match: categories, geographies, budget, risk appetite.
///
/// # Examples
///
/// ```
/// use u_fundmatch::model::{BudgetEnvelope, RequesterProfile, RiskTolerance};
///
/// let requester = RequesterProfile::new()
///     .with_categories(["education", "health"])
///     .with_geographies(["Kenya"])
///     .with_budget(BudgetEnvelope::new(100_000.0, 500_000.0))
///     .with_risk_tolerance(RiskTolerance::Low);
/// assert_eq!(requester.categories.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RequesterProfile {
    pub categories: Vec<String>,
    pub geographies: Vec<String>,
    pub budget: Option<BudgetEnvelope>,
    pub risk_tolerance: RiskTolerance,
}

impl RequesterProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_geographies<I, S>(mut self, geographies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.geographies = geographies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_budget(mut self, budget: BudgetEnvelope) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_risk_tolerance(mut self, tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_usable() {
        assert!(BudgetEnvelope::new(1.0, 1.0).is_usable());
        assert!(!BudgetEnvelope::new(2.0, 1.0).is_usable());
        assert!(!BudgetEnvelope::new(f64::NAN, 1.0).is_usable());
    }

    #[test]
    fn test_default_tolerance_is_medium() {
        assert_eq!(RequesterProfile::new().risk_tolerance, RiskTolerance::Medium);
    }
}

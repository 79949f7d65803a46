//! Candidate initiative record.

use crate::error::InputValidationError;

/// An initiative being scored or considered for funding.
///
/// Only `id` is mandatory. Every other field may be absent; each scorer
/// documents the neutral value it substitutes.
///
/// # Examples
///
/// ```
/// use u_fundmatch::model::Candidate;
///
/// let candidate = Candidate::new("school-solar")
///     .with_categories(["education", "energy"])
///     .with_budget("800000-1200000")
///     .with_location("Nairobi, Kenya")
///     .with_rating(4.5);
/// assert!(candidate.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Candidate {
    pub id: String,
    pub name: Option<String>,
    /// Category tags, e.g. `"education"`, `"clean water"`.
    pub categories: Vec<String>,
    /// Requested funding as free text: `"250000"`, `"$800,000 - 1,200,000"`, `"1.2M"`.
    pub budget: Option<String>,
    pub currency: Option<String>,
    pub location: Option<String>,
    /// Track-record rating on a 0–5 scale.
    pub rating: Option<f64>,
    /// Planned delivery timeline.
    pub duration_months: Option<u32>,
    pub risk: RiskDescriptors,
    pub impact: ImpactMetrics,
}

impl Candidate {
    /// Creates a candidate with only its identity set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_duration_months(mut self, months: u32) -> Self {
        self.duration_months = Some(months);
        self
    }

    pub fn with_risk(mut self, risk: RiskDescriptors) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_impact(mut self, impact: ImpactMetrics) -> Self {
        self.impact = impact;
        self
    }

    /// Checks the fields no scorer is allowed to default.
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if self.id.trim().is_empty() {
            return Err(InputValidationError::MissingId);
        }
        Ok(())
    }
}

/// Qualitative risk inputs. Free text is matched case-insensitively
/// against the risk scorer's lookup tables; anything unrecognised
/// (including `"unknown"`) lands in the neutral bucket.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskDescriptors {
    /// `"secured"`, `"diversified"`, `"pending"`, `"single source"`, ...
    pub funding_source: Option<String>,
    /// `"low"`, `"medium"`, `"high"`.
    pub complexity: Option<String>,
    pub team_experience_years: Option<f64>,
    /// `"low"`, `"medium"`, `"high"`.
    pub climate_exposure: Option<String>,
    pub environmental_sensitivity: Option<String>,
    pub resource_dependency: Option<String>,
    /// `"strong"`, `"moderate"`, `"weak"`, `"opposed"`.
    pub community_support: Option<String>,
    pub local_partners: Option<u32>,
    pub cultural_sensitivity: Option<String>,
    /// `"approved"`, `"in progress"`, `"not started"`, `"not required"`.
    pub permit_status: Option<String>,
    /// `"stable"`, `"developing"`, `"unstable"`.
    pub legal_framework: Option<String>,
    /// `"clean"`, `"minor issues"`, `"major issues"`.
    pub compliance_history: Option<String>,
}

/// Quantitative outcome projections used by the impact scorer.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpactMetrics {
    pub beneficiaries: Option<u64>,
    pub communities_reached: Option<u64>,
    pub people_trained: Option<u64>,
    pub co2_reduction_tonnes: Option<f64>,
    pub hectares_restored: Option<f64>,
    pub trees_planted: Option<u64>,
    pub jobs_created: Option<u64>,
    /// Local income generated, in the candidate's currency.
    pub local_economic_value: Option<f64>,
    pub businesses_supported: Option<u64>,
}

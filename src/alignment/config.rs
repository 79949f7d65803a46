//! Alignment scorer configuration.
//!
//! [`AlignmentConfig`] carries every weight, cut point, and fixed score the
//! alignment scorer uses. All scores are on the 0–100 scale.

use super::types::{
    AlignmentLevel, ALIGNMENT_KEYS, BUDGET_ALIGNMENT, CATEGORY_ALIGNMENT, CATEGORY_RELEVANCE,
    CREDIBILITY, GEOGRAPHIC_FIT,
};
use crate::aggregate::WeightMap;
use crate::classify::Cutpoints;
use crate::error::{check_scale, ConfigurationError};
use crate::normalize::{CategoricalTable, OverlapMode, RatioTarget, SetOverlap};

/// Top of the alignment scale.
pub const ALIGNMENT_SCALE: f64 = 100.0;

/// Fixed scores for the budget comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetFitScores {
    pub inside: f64,
    pub below: f64,
    pub above: f64,
}

impl Default for BudgetFitScores {
    fn default() -> Self {
        Self {
            inside: 100.0,
            below: 30.0,
            above: 20.0,
        }
    }
}

/// Fixed scores for the geography comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeographyScores {
    /// Exact or substring match.
    pub exact: f64,
    /// At least one shared location token.
    pub partial: f64,
    pub none: f64,
    /// Requester geographies that match any location.
    pub global_regions: Vec<String>,
}

impl Default for GeographyScores {
    fn default() -> Self {
        Self {
            exact: 100.0,
            partial: 70.0,
            none: 0.0,
            global_regions: vec![
                "global".to_string(),
                "worldwide".to_string(),
                "international".to_string(),
            ],
        }
    }
}

/// Configuration for the alignment scorer.
///
/// # Defaults
///
/// ```
/// use u_fundmatch::alignment::AlignmentConfig;
///
/// let config = AlignmentConfig::default();
/// assert_eq!(config.weights.get("category_alignment"), Some(0.30));
/// assert_eq!(config.neutral, 50.0);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_fundmatch::aggregate::WeightMap;
/// use u_fundmatch::alignment::AlignmentConfig;
///
/// let weights = WeightMap::new([
///     ("category_alignment", 0.5),
///     ("geographic_fit", 0.2),
///     ("budget_alignment", 0.1),
///     ("category_relevance", 0.1),
///     ("credibility", 0.1),
/// ])
/// .unwrap();
/// let config = AlignmentConfig::default()
///     .with_weights(weights)
///     .with_extra_category_bonus(2.5, 10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlignmentConfig {
    /// Weights over the five alignment sub-scores.
    pub weights: WeightMap,

    /// Composite → label tiers.
    pub cutpoints: Cutpoints<AlignmentLevel>,

    /// How requester priorities are compared. Coverage by default; the
    /// empty-denominator default applies when the requester names none.
    pub category_overlap: SetOverlap,

    /// Bonus per candidate category beyond the requester's priorities.
    /// Never more than one matched category is worth.
    pub extra_category_bonus: f64,

    /// Ceiling on the extra-category bonus.
    pub max_extra_bonus: f64,

    pub geography: GeographyScores,

    pub budget: BudgetFitScores,

    /// Sector relevance per category, consulted for matched categories.
    pub relevance: CategoricalTable,

    /// Relevance when none of the candidate's categories are priorities.
    pub off_priority_relevance: f64,

    /// Rating → credibility (rating × 20 by default).
    pub credibility: RatioTarget,

    /// Score used whenever the inputs for a sub-score are absent.
    pub neutral: f64,

    /// Whether batch scoring fans out over rayon (`parallel` feature).
    pub parallel: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            cutpoints: default_cutpoints(),
            category_overlap: SetOverlap::new(OverlapMode::Coverage),
            extra_category_bonus: 5.0,
            max_extra_bonus: 20.0,
            geography: GeographyScores::default(),
            budget: BudgetFitScores::default(),
            relevance: default_relevance(),
            off_priority_relevance: 20.0,
            credibility: RatioTarget::new(5.0, ALIGNMENT_SCALE),
            neutral: 50.0,
            parallel: true,
        }
    }
}

fn default_weights() -> WeightMap {
    let weights = [
        (CATEGORY_ALIGNMENT, 0.30),
        (GEOGRAPHIC_FIT, 0.20),
        (BUDGET_ALIGNMENT, 0.20),
        (CATEGORY_RELEVANCE, 0.15),
        (CREDIBILITY, 0.15),
    ];
    WeightMap::new(weights).unwrap_or_else(|err| unreachable!("default alignment weights: {err}"))
}

fn default_cutpoints() -> Cutpoints<AlignmentLevel> {
    let tiers = vec![
        (80.0, AlignmentLevel::Excellent),
        (60.0, AlignmentLevel::Good),
        (40.0, AlignmentLevel::Fair),
    ];
    Cutpoints::new(tiers, AlignmentLevel::Poor)
        .unwrap_or_else(|err| unreachable!("default alignment cutpoints: {err}"))
}

fn default_relevance() -> CategoricalTable {
    CategoricalTable::from_pairs(
        60.0,
        [
            ("clean water", 90.0),
            ("water", 90.0),
            ("health", 85.0),
            ("education", 85.0),
            ("disaster relief", 85.0),
            ("food security", 80.0),
            ("climate", 80.0),
            ("environment", 80.0),
            ("renewable energy", 80.0),
            ("gender equality", 80.0),
            ("agriculture", 75.0),
            ("energy", 75.0),
            ("housing", 70.0),
            ("economic development", 70.0),
            ("technology", 65.0),
            ("arts", 55.0),
            ("culture", 55.0),
        ],
    )
}

impl AlignmentConfig {
    /// Sets the sub-score weights.
    pub fn with_weights(mut self, weights: WeightMap) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the label cut points.
    pub fn with_cutpoints(mut self, cutpoints: Cutpoints<AlignmentLevel>) -> Self {
        self.cutpoints = cutpoints;
        self
    }

    /// Sets the per-category bonus and its ceiling.
    pub fn with_extra_category_bonus(mut self, per_category: f64, max: f64) -> Self {
        self.extra_category_bonus = per_category;
        self.max_extra_bonus = max;
        self
    }

    pub fn with_geography(mut self, geography: GeographyScores) -> Self {
        self.geography = geography;
        self
    }

    pub fn with_budget_scores(mut self, budget: BudgetFitScores) -> Self {
        self.budget = budget;
        self
    }

    /// Replaces the sector relevance table.
    pub fn with_relevance(mut self, relevance: CategoricalTable) -> Self {
        self.relevance = relevance;
        self
    }

    pub fn with_credibility(mut self, credibility: RatioTarget) -> Self {
        self.credibility = credibility;
        self
    }

    pub fn with_neutral(mut self, neutral: f64) -> Self {
        self.neutral = neutral;
        self
    }

    /// Enables or disables parallel batch scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Every fixed score must sit on the 0–100 scale so the composite does.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.weights.validate()?;
        self.weights.require_keys(&ALIGNMENT_KEYS)?;
        self.cutpoints.validate()?;
        self.category_overlap.validate()?;
        self.relevance.validate()?;
        self.credibility.validate()?;

        let s = ALIGNMENT_SCALE;
        self.category_overlap.validate_scale(1.0)?;
        self.relevance.validate_scale(s)?;
        self.credibility.validate_scale(s)?;
        check_scale("extra_category_bonus", self.extra_category_bonus, s)?;
        check_scale("max_extra_bonus", self.max_extra_bonus, s)?;
        check_scale("geography.exact", self.geography.exact, s)?;
        check_scale("geography.partial", self.geography.partial, s)?;
        check_scale("geography.none", self.geography.none, s)?;
        check_scale("budget.inside", self.budget.inside, s)?;
        check_scale("budget.below", self.budget.below, s)?;
        check_scale("budget.above", self.budget.above, s)?;
        check_scale("off_priority_relevance", self.off_priority_relevance, s)?;
        check_scale("neutral", self.neutral, s)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AlignmentConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.sum() - 1.0).abs() < 1e-12);
        assert_eq!(config.weights.get(GEOGRAPHIC_FIT), Some(0.20));
        assert_eq!(config.budget, BudgetFitScores::default());
        assert_eq!(config.geography.partial, 70.0);
        assert_eq!(config.off_priority_relevance, 20.0);
        assert!(config.parallel);
    }

    #[test]
    fn test_validate_rejects_foreign_weight_keys() {
        let weights = WeightMap::new([("category_alignment", 0.5), ("popularity", 0.5)]).unwrap();
        let config = AlignmentConfig::default().with_weights(weights);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::WeightKeys { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_off_scale_scores() {
        let config = AlignmentConfig::default().with_neutral(150.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::OutOfScale { what: "neutral", .. })
        ));

        let config = AlignmentConfig::default().with_budget_scores(BudgetFitScores {
            inside: 100.0,
            below: -1.0,
            above: 20.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_off_scale_normalizers() {
        let config = AlignmentConfig::default()
            .with_credibility(RatioTarget::new(5.0, ALIGNMENT_SCALE).with_cap(400.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::OutOfScale { what: "ratio cap", .. })
        ));

        let config = AlignmentConfig::default()
            .with_relevance(CategoricalTable::from_pairs(60.0, [("water", 140.0)]));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::OutOfScale { what: "lookup score", .. })
        ));
    }

    #[test]
    fn test_builder_chain() {
        let config = AlignmentConfig::default()
            .with_extra_category_bonus(1.0, 4.0)
            .with_parallel(false);
        assert_eq!(config.extra_category_bonus, 1.0);
        assert_eq!(config.max_extra_bonus, 4.0);
        assert!(!config.parallel);
    }
}

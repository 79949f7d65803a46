//! Impact categories, levels, and assessment output.

use crate::model::{ScoreResult, SubScores};

pub const BENEFICIARIES: &str = "beneficiaries";
pub const COMMUNITIES_REACHED: &str = "communities_reached";
pub const PEOPLE_TRAINED: &str = "people_trained";
pub const CO2_REDUCTION: &str = "co2_reduction";
pub const HECTARES_RESTORED: &str = "hectares_restored";
pub const TREES_PLANTED: &str = "trees_planted";
pub const JOBS_CREATED: &str = "jobs_created";
pub const LOCAL_ECONOMIC_VALUE: &str = "local_economic_value";
pub const BUSINESSES_SUPPORTED: &str = "businesses_supported";

/// The three impact dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpactCategory {
    Social,
    Environmental,
    Economic,
}

impl ImpactCategory {
    pub const ALL: [ImpactCategory; 3] = [
        ImpactCategory::Social,
        ImpactCategory::Environmental,
        ImpactCategory::Economic,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ImpactCategory::Social => "social",
            ImpactCategory::Environmental => "environmental",
            ImpactCategory::Economic => "economic",
        }
    }

    /// Metric keys belonging to this category.
    pub fn metric_keys(self) -> [&'static str; 3] {
        match self {
            ImpactCategory::Social => [BENEFICIARIES, COMMUNITIES_REACHED, PEOPLE_TRAINED],
            ImpactCategory::Environmental => [CO2_REDUCTION, HECTARES_RESTORED, TREES_PLANTED],
            ImpactCategory::Economic => [JOBS_CREATED, LOCAL_ECONOMIC_VALUE, BUSINESSES_SUPPORTED],
        }
    }
}

/// Ordinal impact band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpactLevel {
    Limited,
    Moderate,
    High,
    Transformational,
}

/// Impact within one category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryImpact {
    pub category: ImpactCategory,
    /// 0–1, higher is better.
    pub score: f64,
    pub metrics: SubScores,
}

/// Full impact assessment for one candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactAssessment {
    /// Composite on 0–1; sub-scores are the category scores.
    pub score: ScoreResult<ImpactLevel>,
    /// In [`ImpactCategory::ALL`] order.
    pub categories: Vec<CategoryImpact>,
}

impl ImpactAssessment {
    pub fn candidate_id(&self) -> &str {
        &self.score.candidate_id
    }

    pub fn level(&self) -> ImpactLevel {
        self.score.label
    }

    pub fn composite(&self) -> f64 {
        self.score.composite_score
    }

    pub fn category(&self, category: ImpactCategory) -> Option<&CategoryImpact> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Category with the highest score, earliest category on ties.
    pub fn strongest(&self) -> Option<&CategoryImpact> {
        self.categories
            .iter()
            .reduce(|best, c| if c.score > best.score { c } else { best })
    }
}

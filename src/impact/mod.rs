//! Impact scoring.
//!
//! Three categories, each the weighted aggregate of three bucketed
//! metrics. Composite = social × 0.40 + environmental × 0.35 +
//! economic × 0.25, labelled ≥0.8 Transformational, ≥0.6 High,
//! ≥0.4 Moderate, else Limited.

mod config;
mod scorer;
mod types;

pub use config::{ImpactCategoryConfig, ImpactConfig};
pub use scorer::ImpactScorer;
pub use types::{
    CategoryImpact, ImpactAssessment, ImpactCategory, ImpactLevel, BENEFICIARIES,
    BUSINESSES_SUPPORTED, CO2_REDUCTION, COMMUNITIES_REACHED, HECTARES_RESTORED, JOBS_CREATED,
    LOCAL_ECONOMIC_VALUE, PEOPLE_TRAINED, TREES_PLANTED,
};

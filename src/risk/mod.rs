//! Risk scoring.
//!
//! Five categories, each the weighted aggregate of three normalized
//! factors:
//!
//! | Category      | Weight | Factors |
//! |---------------|--------|---------|
//! | financial     | 0.25   | budget size .4, funding source .4, currency volatility .2 |
//! | operational   | 0.25   | team experience .35, timeline .35, complexity .30 |
//! | environmental | 0.20   | climate exposure .4, sensitivity .3, resource dependency .3 |
//! | social        | 0.15   | community support .4, local partners .3, cultural sensitivity .3 |
//! | regulatory    | 0.15   | permit status .4, legal framework .35, compliance history .25 |
//!
//! Bands: ≤0.3 Low, ≤0.6 Medium, ≤0.8 High, else VeryHigh. Every category
//! carries a fixed catalog of mitigation strategies.

mod config;
mod scorer;
mod types;

pub use config::{RiskCategoryConfig, RiskConfig};
pub use scorer::RiskScorer;
pub use types::{
    CategoryRisk, RiskAssessment, RiskCategory, RiskLevel, BUDGET_RISK, CLIMATE_EXPOSURE,
    COMMUNITY_SUPPORT, COMPLEXITY, COMPLIANCE_HISTORY, CULTURAL_SENSITIVITY, CURRENCY_VOLATILITY,
    ENVIRONMENTAL_SENSITIVITY, FUNDING_SOURCE, LEGAL_FRAMEWORK, LOCAL_PARTNERSHIPS, PERMIT_STATUS,
    RESOURCE_DEPENDENCY, TEAM_EXPERIENCE, TIMELINE,
};

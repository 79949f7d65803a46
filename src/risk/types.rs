//! Risk categories, levels, and assessment output.

use crate::model::{RiskTolerance, ScoreResult, SubScores};

pub const BUDGET_RISK: &str = "budget_risk";
pub const FUNDING_SOURCE: &str = "funding_source";
pub const CURRENCY_VOLATILITY: &str = "currency_volatility";
pub const TEAM_EXPERIENCE: &str = "team_experience";
pub const TIMELINE: &str = "timeline";
pub const COMPLEXITY: &str = "complexity";
pub const CLIMATE_EXPOSURE: &str = "climate_exposure";
pub const ENVIRONMENTAL_SENSITIVITY: &str = "environmental_sensitivity";
pub const RESOURCE_DEPENDENCY: &str = "resource_dependency";
pub const COMMUNITY_SUPPORT: &str = "community_support";
pub const LOCAL_PARTNERSHIPS: &str = "local_partnerships";
pub const CULTURAL_SENSITIVITY: &str = "cultural_sensitivity";
pub const PERMIT_STATUS: &str = "permit_status";
pub const LEGAL_FRAMEWORK: &str = "legal_framework";
pub const COMPLIANCE_HISTORY: &str = "compliance_history";

/// The five risk dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskCategory {
    Financial,
    Operational,
    Environmental,
    Social,
    Regulatory,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Financial,
        RiskCategory::Operational,
        RiskCategory::Environmental,
        RiskCategory::Social,
        RiskCategory::Regulatory,
    ];

    /// Key used in the category weight map and in sub-scores.
    pub fn key(self) -> &'static str {
        match self {
            RiskCategory::Financial => "financial",
            RiskCategory::Operational => "operational",
            RiskCategory::Environmental => "environmental",
            RiskCategory::Social => "social",
            RiskCategory::Regulatory => "regulatory",
        }
    }

    /// Sub-factor keys belonging to this category.
    pub fn factor_keys(self) -> [&'static str; 3] {
        match self {
            RiskCategory::Financial => [BUDGET_RISK, FUNDING_SOURCE, CURRENCY_VOLATILITY],
            RiskCategory::Operational => [TEAM_EXPERIENCE, TIMELINE, COMPLEXITY],
            RiskCategory::Environmental => [
                CLIMATE_EXPOSURE,
                ENVIRONMENTAL_SENSITIVITY,
                RESOURCE_DEPENDENCY,
            ],
            RiskCategory::Social => [COMMUNITY_SUPPORT, LOCAL_PARTNERSHIPS, CULTURAL_SENSITIVITY],
            RiskCategory::Regulatory => [PERMIT_STATUS, LEGAL_FRAMEWORK, COMPLIANCE_HISTORY],
        }
    }

    /// Fixed mitigation catalog for this category.
    pub fn mitigations(self) -> &'static [&'static str] {
        match self {
            RiskCategory::Financial => &[
                "Release funds in milestone-based tranches",
                "Require quarterly financial reporting and audited accounts",
                "Secure co-funding commitments before disbursement",
            ],
            RiskCategory::Operational => &[
                "Agree a detailed implementation plan with milestones",
                "Pair the team with an experienced technical partner",
                "Schedule regular progress reviews with clear escalation paths",
            ],
            RiskCategory::Environmental => &[
                "Conduct an environmental impact assessment before launch",
                "Build climate contingencies into the schedule and budget",
                "Diversify critical resource suppliers",
            ],
            RiskCategory::Social => &[
                "Run community consultations before and during delivery",
                "Formalise agreements with local partner organisations",
                "Establish a grievance and feedback mechanism",
            ],
            RiskCategory::Regulatory => &[
                "Confirm all permits and licences before disbursement",
                "Engage local legal counsel on compliance requirements",
                "Add compliance checkpoints to the reporting cycle",
            ],
        }
    }
}

/// Ordinal risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Highest level a requester with `tolerance` accepts.
    pub fn ceiling_for(tolerance: RiskTolerance) -> RiskLevel {
        match tolerance {
            RiskTolerance::Low => RiskLevel::Low,
            RiskTolerance::Medium => RiskLevel::Medium,
            RiskTolerance::High => RiskLevel::High,
        }
    }
}

/// Risk within one category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryRisk {
    pub category: RiskCategory,
    /// 0–1, higher is riskier.
    pub score: f64,
    pub level: RiskLevel,
    pub factors: SubScores,
    pub mitigations: Vec<String>,
}

/// Full risk assessment for one candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskAssessment {
    /// Composite on 0–1; sub-scores are the category scores.
    pub score: ScoreResult<RiskLevel>,
    /// In [`RiskCategory::ALL`] order.
    pub categories: Vec<CategoryRisk>,
}

impl RiskAssessment {
    pub fn candidate_id(&self) -> &str {
        &self.score.candidate_id
    }

    pub fn level(&self) -> RiskLevel {
        self.score.label
    }

    pub fn composite(&self) -> f64 {
        self.score.composite_score
    }

    pub fn category(&self, category: RiskCategory) -> Option<&CategoryRisk> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Whether the overall level is above what `tolerance` accepts.
    pub fn exceeds_tolerance(&self, tolerance: RiskTolerance) -> bool {
        self.level() > RiskLevel::ceiling_for(tolerance)
    }

    /// Categories at or above `level`, riskiest first.
    pub fn categories_at_least(&self, level: RiskLevel) -> Vec<&CategoryRisk> {
        let mut hits: Vec<&CategoryRisk> =
            self.categories.iter().filter(|c| c.level >= level).collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.category.cmp(&b.category)));
        hits
    }
}

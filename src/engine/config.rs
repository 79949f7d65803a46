//! Engine configuration bundle.

use crate::alignment::AlignmentConfig;
use crate::allocation::AllocatorConfig;
use crate::error::ConfigurationError;
use crate::impact::ImpactConfig;
use crate::risk::RiskConfig;

/// Every scorer's configuration in one value.
///
/// With the `serde` feature this is the shape a tenant supplies; absent
/// sections fall back to their defaults.
///
/// ```
/// use u_fundmatch::engine::EngineConfig;
///
/// let config = EngineConfig::default().with_parallel(false);
/// assert!(!config.parallel);
/// assert!(!config.alignment.parallel);
/// assert!(!config.allocator.parallel);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub alignment: AlignmentConfig,
    pub risk: RiskConfig,
    pub impact: ImpactConfig,
    pub allocator: AllocatorConfig,
    /// Governs the engine's own batches (`evaluate_all`,
    /// `allocate_for_requester`). Component flags govern their own calls.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alignment: AlignmentConfig::default(),
            risk: RiskConfig::default(),
            impact: ImpactConfig::default(),
            allocator: AllocatorConfig::default(),
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn with_alignment(mut self, alignment: AlignmentConfig) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_risk(mut self, risk: RiskConfig) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_impact(mut self, impact: ImpactConfig) -> Self {
        self.impact = impact;
        self
    }

    pub fn with_allocator(mut self, allocator: AllocatorConfig) -> Self {
        self.allocator = allocator;
        self
    }

    /// Sets the parallel flag on the engine and every component.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self.alignment.parallel = parallel;
        self.risk.parallel = parallel;
        self.impact.parallel = parallel;
        self.allocator.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.alignment.validate()?;
        self.risk.validate()?;
        self.impact.validate()?;
        self.allocator.validate()
    }
}

//! Greedy budget allocation over scored candidates.
//!
//! [`ConstrainedAllocator`] ranks [`AllocationCandidate`]s by weighted
//! performance per unit cost and admits them in order under
//! [`AllocationConstraints`]. It is a heuristic: deterministic and
//! O(n log n), never optimal by construction.
//!
//! An infeasible request (no budget, no candidates, nothing affordable) is
//! not an error: the [`PortfolioResult`] comes back empty with its
//! `reasons` populated.

mod allocator;
mod config;
mod types;

pub use allocator::ConstrainedAllocator;
pub use config::{AllocatorConfig, RecommendationThresholds};
pub use types::{
    AllocationCandidate, AllocationConstraints, DiversityDimension, PerformanceScores,
    PortfolioResult, SelectedCandidate, ALIGNMENT, FEASIBILITY, IMPACT, PERFORMANCE_KEYS, RISK,
    ROI,
};

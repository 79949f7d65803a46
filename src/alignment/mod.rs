//! Alignment between a candidate and a requester's priorities.
//!
//! Produces a 0–100 composite from five weighted sub-scores (category
//! coverage, geography, budget fit, sector relevance, credibility) and
//! buckets it into an [`AlignmentLevel`]. The recommendation text is keyed
//! by the level, so the two never disagree.

mod config;
mod scorer;
mod types;

pub use config::{AlignmentConfig, BudgetFitScores, GeographyScores, ALIGNMENT_SCALE};
pub use scorer::AlignmentScorer;
pub use types::{
    AlignmentLevel, AlignmentReport, ALIGNMENT_KEYS, BUDGET_ALIGNMENT, CATEGORY_ALIGNMENT,
    CATEGORY_RELEVANCE, CREDIBILITY, GEOGRAPHIC_FIT,
};

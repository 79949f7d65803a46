//! Input and output records.
//!
//! Inputs ([`Candidate`], [`RequesterProfile`]) are plain immutable data;
//! the engine only ever borrows them. Outputs ([`ScoreResult`]) are built
//! fresh per call and carry no references back into the inputs.

mod candidate;
mod profile;
mod result;

pub use candidate::{Candidate, ImpactMetrics, RiskDescriptors};
pub use profile::{BudgetEnvelope, RequesterProfile, RiskTolerance};
pub use result::{RankedBatch, ScoreResult, SkippedCandidate, SubScores};

//! Engine façade: "rank candidates" and "allocate budget".
//!
//! [`Engine`] bundles one validated scorer per concern, configured through
//! a single [`EngineConfig`]. Besides the two headline operations it runs
//! full evaluations ([`CandidateEvaluation`]) and can feed them straight
//! into the allocator.

mod config;
mod runner;
mod types;

pub use config::EngineConfig;
pub use runner::Engine;
pub use types::CandidateEvaluation;

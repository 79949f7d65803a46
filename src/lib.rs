//! Deterministic scoring and greedy budget allocation for matching funders
//! with initiatives.
//!
//! Provides the primitives and the scorers built on them:
//!
//! - **Normalizers** ([`normalize`]): ratio-to-target, threshold buckets,
//!   categorical lookup, and set overlap, each with an explicit neutral
//!   default for absent data.
//! - **Classifier** ([`classify`]): ordered cut points mapping a score to
//!   an ordinal label.
//! - **Weighted aggregator** ([`aggregate`]): composite from named
//!   sub-scores under a weight map that must sum to 1.0, plus
//!   deterministic ranking.
//! - **Alignment scorer** ([`alignment`]): candidate vs. requester fit on
//!   a 0–100 scale.
//! - **Risk scorer** ([`risk`]): five risk categories on a 0–1 scale with
//!   fixed mitigation catalogs.
//! - **Impact scorer** ([`impact`]): social, environmental, and economic
//!   impact on a 0–1 scale.
//! - **Constrained allocator** ([`allocation`]): greedy cost-effectiveness
//!   selection under a budget and cardinality limits.
//! - **Engine** ([`engine`]): the "rank candidates" and "allocate budget"
//!   entry points.
//!
//! # Design
//!
//! Every operation is a pure function of its inputs and an explicit
//! configuration value. Configurations are validated once, when a scorer
//! is built; a bad weight map or cut point table is a
//! [`ConfigurationError`](error::ConfigurationError), never a silent zero.
//! Missing candidate data falls back to documented neutral scores; only a
//! missing identity is an [`InputValidationError`](error::InputValidationError),
//! and batch calls skip and report such candidates rather than failing.
//!
//! # Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` on inputs, outputs, and
//!   configurations.
//! - `parallel`: batch scoring fans out over rayon. Results are identical
//!   with and without it.

pub mod aggregate;
pub mod alignment;
pub mod allocation;
pub mod classify;
pub mod engine;
pub mod error;
pub mod impact;
pub mod model;
pub mod normalize;
pub mod risk;

mod batch;

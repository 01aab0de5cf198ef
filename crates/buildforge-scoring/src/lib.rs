//! BuildForge Scoring - the search objective and best-of-K selection
//!
//! This crate defines what "best" means for a build:
//! - [`ScoreSpec`] declares hard minimum-requirement floors and the stat (or
//!   weighted stat combination) to maximize, by name
//! - [`ResolvedScoreSpec`] is the same objective bound to a run's stat order,
//!   produced before enumeration starts so unknown names fail fast
//! - [`TopKAccumulator`] keeps the K best-scoring complete builds seen so far

pub mod spec;
pub mod top_k;

pub use spec::{ResolvedScoreSpec, ScoreSpec};
pub use top_k::{TopEntry, TopKAccumulator};

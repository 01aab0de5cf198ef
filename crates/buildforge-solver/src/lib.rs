//! BuildForge Solver - the constrained combinatorial search engine
//!
//! The solver enumerates every legal 9-slot build (weapon, helmet,
//! chestplate, leggings, boots, two rings, bracelet, necklace) with an
//! enter/undo depth-first walk, prunes subtrees that provably cannot
//! satisfy the budget caps or the hard stat floors, and keeps the K
//! best-scoring survivors. The outermost slot is partitioned across
//! worker threads; worker-local results are merged after the join.
//!
//! Logging levels:
//! - **INFO**: search start/end with problem scale and result counts
//! - **DEBUG**: per-partition progress
//!
//! The inner enumeration never logs; cancellation is polled only at
//! partition-unit boundaries.

pub mod budget;
pub mod driver;
pub mod engine;
pub mod options;
pub mod stats;

pub use budget::BudgetModel;
pub use driver::{search, RankedBuild, SearchOutcome};
pub use engine::SearchEngine;
pub use options::{SearchOptions, WorkerCount};
pub use stats::SearchStatistics;

//! BuildForge - best-loadout search for RPG equipment catalogs
//!
//! Given a catalog of items split across 9 equipment slot uses (weapon,
//! helmet, chestplate, leggings, boots, two rings, bracelet, necklace),
//! BuildForge enumerates every legal combination under a skill-point
//! budget and returns the top-K builds for a configurable objective.
//!
//! # Example
//!
//! ```no_run
//! use buildforge::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = buildforge::items::load_catalog("items.json")?;
//! let budget = BudgetModel::unconstrained();
//! let spec = ScoreSpec::maximize("hp").with_minimum("strength", 50);
//! let outcome = search(&catalog, &budget, &spec, &SearchOptions::new().with_top_k(10))?;
//!
//! for build in &outcome.builds {
//!     println!("{} -> {}", build.score, build.name);
//! }
//! # Ok(())
//! # }
//! ```

// Core domain types
pub use buildforge_core::{
    Build, BuildForgeError, Item, RawCatalog, RawItem, Result, Slot, SlotCatalog, StatId,
    StatOrder, StatVector, BUILD_SLOTS,
};

// Objective and top-K selection
pub use buildforge_scoring::{ResolvedScoreSpec, ScoreSpec, TopEntry, TopKAccumulator};

// Search engine
pub use buildforge_solver::{
    search, BudgetModel, RankedBuild, SearchEngine, SearchOptions, SearchOutcome,
    SearchStatistics, WorkerCount,
};

// Configuration
pub use buildforge_config::{
    BudgetConfig, BuildForgeConfig, ConfigError, ResourceConfig, SearchConfig, WorkerCountConfig,
};

/// Catalog ingestion (JSON item databases).
pub mod items {
    pub use buildforge_items::{coerce_stat_value, load_catalog, parse_items, CatalogError};
}

mod run;
pub use run::{run, run_with_config};


pub mod prelude {
    pub use super::{search, BudgetModel, ScoreSpec, SearchOptions, SlotCatalog, WorkerCount};
    pub use super::{BuildForgeConfig, BuildForgeError};
}

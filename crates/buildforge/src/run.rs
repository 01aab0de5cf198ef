//! Configuration-driven search entry points.
//!
//! These wrappers tie the configuration layer to the engine the same way a
//! front end would: load caps and search settings, build the budget model
//! against the catalog, run the search.

use buildforge_config::BuildForgeConfig;
use buildforge_core::{BuildForgeError, Result, SlotCatalog};
use buildforge_scoring::ScoreSpec;
use buildforge_solver::{search, BudgetModel, SearchOptions, SearchOutcome};

/// Runs a search with settings from `buildforge.toml` in the working
/// directory when present, falling back to the stock defaults.
///
/// The default budget tracks the five skill-point stats, so the catalog
/// must carry them; pass an explicit config (or call [`search`] directly
/// with [`BudgetModel::unconstrained`]) for catalogs that don't.
pub fn run(catalog: &SlotCatalog, spec: &ScoreSpec) -> Result<SearchOutcome> {
    let config = BuildForgeConfig::load("buildforge.toml").unwrap_or_default();
    run_with_config(catalog, spec, &config)
}

/// Runs a search with an explicit configuration.
pub fn run_with_config(
    catalog: &SlotCatalog,
    spec: &ScoreSpec,
    config: &BuildForgeConfig,
) -> Result<SearchOutcome> {
    config
        .validate()
        .map_err(|e| BuildForgeError::Config(e.to_string()))?;
    let budget = BudgetModel::from_config(catalog, &config.budget)?;
    let options = SearchOptions::from_config(&config.search);
    search(catalog, &budget, spec, &options)
}

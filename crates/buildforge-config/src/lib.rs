//! Configuration system for BuildForge.
//!
//! Load budget caps and search settings from TOML or YAML files so a
//! deployment can retune the skill-point budget without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use buildforge_config::BuildForgeConfig;
//!
//! let config = BuildForgeConfig::from_toml_str(r#"
//!     [search]
//!     top_k = 25
//!
//!     [budget]
//!     combined_cap = 595
//!
//!     [[budget.resources]]
//!     stat = "strength"
//!     cap = 320
//! "#).unwrap();
//!
//! assert_eq!(config.search.top_k, 25);
//! assert_eq!(config.budget.resources.len(), 1);
//! ```
//!
//! Use the defaults when no file is present:
//!
//! ```
//! use buildforge_config::BuildForgeConfig;
//!
//! let config = BuildForgeConfig::load("buildforge.toml").unwrap_or_default();
//! // Proceeds with the stock skill-point budget if the file doesn't exist.
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main BuildForge configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BuildForgeConfig {
    /// Resource budget caps.
    #[serde(default)]
    pub budget: BudgetConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

impl BuildForgeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the result count.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.search.top_k = top_k;
        self
    }

    /// Sets the worker count.
    pub fn with_worker_count(mut self, workers: WorkerCountConfig) -> Self {
        self.search.worker_count = workers;
        self
    }

    /// Appends a tracked resource cap.
    pub fn with_resource(mut self, stat: impl Into<String>, cap: i64) -> Self {
        self.budget.resources.push(ResourceConfig {
            stat: stat.into(),
            cap,
        });
        self
    }

    /// Sets the combined cap over all resources.
    pub fn with_combined_cap(mut self, cap: Option<i64>) -> Self {
        self.budget.combined_cap = cap;
        self
    }

    /// Checks cross-field consistency the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.top_k == 0 {
            return Err(ConfigError::Invalid(
                "search.top_k must be at least 1".to_string(),
            ));
        }
        if let WorkerCountConfig::Count(0) = self.search.worker_count {
            return Err(ConfigError::Invalid(
                "search.worker_count must be at least 1".to_string(),
            ));
        }
        for resource in &self.budget.resources {
            if resource.stat.is_empty() {
                return Err(ConfigError::Invalid(
                    "budget resource with empty stat name".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// One tracked resource stat with its per-resource cap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceConfig {
    /// Stat name, as it appears in the item catalog.
    pub stat: String,
    /// Maximum total a build may accumulate for this stat.
    pub cap: i64,
}

/// Resource budget configuration.
///
/// The defaults are the stock character skill-point budget: five cost
/// stats with individual caps and a combined 595-point pool.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetConfig {
    /// Tracked resource stats with their caps.
    #[serde(default = "BudgetConfig::default_resources")]
    pub resources: Vec<ResourceConfig>,

    /// Cap on the sum over all tracked resources.
    #[serde(default = "BudgetConfig::default_combined_cap")]
    pub combined_cap: Option<i64>,
}

impl BudgetConfig {
    fn default_resources() -> Vec<ResourceConfig> {
        [
            ("strength", 320),
            ("dexterity", 317),
            ("intelligence", 283),
            ("defense", 284),
            ("agility", 333),
        ]
        .into_iter()
        .map(|(stat, cap)| ResourceConfig {
            stat: stat.to_string(),
            cap,
        })
        .collect()
    }

    fn default_combined_cap() -> Option<i64> {
        Some(595)
    }

    /// Appends a tracked resource.
    pub fn push_resource(&mut self, stat: impl Into<String>, cap: i64) {
        self.resources.push(ResourceConfig {
            stat: stat.into(),
            cap,
        });
    }

    /// A budget that tracks nothing (useful for unconstrained searches).
    pub fn unconstrained() -> Self {
        BudgetConfig {
            resources: Vec::new(),
            combined_cap: None,
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        BudgetConfig {
            resources: Self::default_resources(),
            combined_cap: Self::default_combined_cap(),
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// How many top builds to report.
    #[serde(default = "SearchConfig::default_top_k")]
    pub top_k: usize,

    /// Worker count for the partition driver.
    #[serde(default)]
    pub worker_count: WorkerCountConfig,
}

impl SearchConfig {
    fn default_top_k() -> usize {
        10
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            top_k: Self::default_top_k(),
            worker_count: WorkerCountConfig::default(),
        }
    }
}

/// Worker count configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCountConfig {
    /// Automatically determine worker count.
    #[default]
    Auto,

    /// Use all available CPU cores.
    Unlimited,

    /// Specific number of workers.
    Count(usize),
}

#[cfg(test)]
mod tests;

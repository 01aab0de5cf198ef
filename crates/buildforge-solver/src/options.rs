//! Search invocation options.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use buildforge_config::{SearchConfig, WorkerCountConfig};
use buildforge_core::{BuildForgeError, Result};

/// Default number of results kept when the caller does not say otherwise.
pub const DEFAULT_TOP_K: usize = 10;

/// Worker count configuration for the partition driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerCount {
    /// Automatically determine based on available CPU cores.
    #[default]
    Auto,
    /// Use all available CPU cores.
    Unlimited,
    /// Use a specific number of workers (must be at least 1).
    Specific(usize),
}

impl WorkerCount {
    /// Resolves the worker count to an actual number, never exceeding the
    /// number of partition units and never dropping below 1.
    pub fn resolve(&self, unit_count: usize) -> usize {
        let raw = match self {
            WorkerCount::Auto | WorkerCount::Unlimited => {
                std::thread::available_parallelism()
                    .map(|p| p.get())
                    .unwrap_or(1)
            }
            WorkerCount::Specific(n) => *n,
        };
        raw.min(unit_count).max(1)
    }
}

impl From<WorkerCountConfig> for WorkerCount {
    fn from(config: WorkerCountConfig) -> Self {
        match config {
            WorkerCountConfig::Auto => WorkerCount::Auto,
            WorkerCountConfig::Unlimited => WorkerCount::Unlimited,
            WorkerCountConfig::Count(n) => WorkerCount::Specific(n),
        }
    }
}

impl std::fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerCount::Auto => write!(f, "Auto"),
            WorkerCount::Unlimited => write!(f, "Unlimited"),
            WorkerCount::Specific(n) => write!(f, "{}", n),
        }
    }
}

/// Options for one `search` invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    top_k: Option<usize>,
    workers: WorkerCount,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchOptions {
    /// Options keeping the default number of results.
    pub fn new() -> Self {
        SearchOptions::default()
    }

    /// Options taken from a loaded configuration section.
    pub fn from_config(config: &SearchConfig) -> Self {
        SearchOptions::new()
            .with_top_k(config.top_k)
            .with_workers(config.worker_count.into())
    }

    /// Sets how many top builds to keep (`K >= 1`).
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets the worker count configuration.
    pub fn with_workers(mut self, workers: WorkerCount) -> Self {
        self.workers = workers;
        self
    }

    /// Shorthand for a specific worker count.
    pub fn with_worker_count(self, count: usize) -> Self {
        self.with_workers(WorkerCount::Specific(count))
    }

    /// Installs a cooperative cancellation flag. The driver polls it only
    /// between partition units, never inside the deep enumeration.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The configured result count.
    pub fn top_k(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_TOP_K)
    }

    /// The configured worker count.
    pub fn workers(&self) -> WorkerCount {
        self.workers
    }

    /// The installed cancellation flag, if any.
    pub fn cancel_flag(&self) -> Option<&Arc<AtomicBool>> {
        self.cancel.as_ref()
    }

    /// Rejects option values the engine cannot honor. Runs before any
    /// enumeration, so bad options never cost a partial search.
    pub fn validate(&self) -> Result<()> {
        if self.top_k() == 0 {
            return Err(BuildForgeError::Config(
                "top_k must be at least 1".to_string(),
            ));
        }
        if matches!(self.workers, WorkerCount::Specific(0)) {
            return Err(BuildForgeError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

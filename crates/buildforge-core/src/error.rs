//! Error types for BuildForge

use thiserror::Error;

use crate::catalog::Slot;

/// Main error type for BuildForge operations
#[derive(Debug, Error)]
pub enum BuildForgeError {
    /// Error in search configuration: an unknown stat name, a zero
    /// result count, a zero worker count. Always raised before the
    /// enumeration starts, never mid-search.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A slot catalog holds zero items, so no complete build exists.
    /// Detected at the top of `search`, before any enumeration.
    #[error("Slot '{0}' has no items; no build can be completed")]
    EmptySlot(Slot),

    /// Search was cancelled before completion
    #[error("Search was cancelled")]
    Cancelled,

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for BuildForge operations
pub type Result<T> = std::result::Result<T, BuildForgeError>;

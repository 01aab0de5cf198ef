//! BuildForge Core - Core types for loadout search
//!
//! This crate provides the fundamental building blocks shared by the
//! scoring and solver crates:
//! - Stat types: a run-wide stat name ordering and dense stat vectors
//! - Catalog types: equipment slots, items, and the per-slot catalogs
//! - Error types shared across the workspace

pub mod catalog;
pub mod error;
pub mod stat;

pub use catalog::{Build, Item, RawCatalog, RawItem, Slot, SlotCatalog, BUILD_SLOTS};
pub use error::{BuildForgeError, Result};
pub use stat::{StatId, StatOrder, StatVector};

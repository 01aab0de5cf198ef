//! Item-catalog ingestion: the collaborator feeding the core.
//!
//! Reads an item database of the form `{"items": [ ... ]}` where each item
//! is a flat JSON object carrying a `type` (or `category`) slot label, a
//! `name`, a handful of metadata keys, and arbitrarily named stat fields.
//! Everything numeric-ish is coerced to a single `i64` here, at the
//! boundary, so the core only ever sees fixed-width integer vectors:
//!
//! - integers and floats become integers (fractions truncated)
//! - booleans become 0/1
//! - arrays become the sum of their integer-coercible entries
//! - strings and anything else become 0
//!
//! Items whose slot label matches none of the 8 equipment slots are
//! skipped (the database also carries materials, consumables, and the
//! like).

use std::path::Path;

use buildforge_core::{RawCatalog, RawItem, Slot, SlotCatalog};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Ingestion error
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("item database has no \"items\" array")]
    MissingItems,
}

/// Keys that describe an item rather than contribute stats.
const METADATA_KEYS: &[&str] = &[
    "name",
    "id",
    "category",
    "type",
    "drop",
    "lore",
    "icon",
    "tier",
    "displayName",
    "dropInfo",
];

/// Loads and densifies a catalog from a JSON file on disk.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<SlotCatalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(SlotCatalog::from_raw(parse_items(&contents)?))
}

/// Parses a JSON item database into per-slot raw item lists.
pub fn parse_items(json: &str) -> Result<RawCatalog, CatalogError> {
    let data: Value = serde_json::from_str(json)?;
    let items = data
        .get("items")
        .and_then(Value::as_array)
        .ok_or(CatalogError::MissingItems)?;

    let mut catalog = RawCatalog::new();
    let mut per_slot_counts = [0usize; 8];

    for item in items {
        let Some(fields) = item.as_object() else {
            debug!(event = "item_skipped", reason = "not an object");
            continue;
        };
        let Some(slot) = slot_of(fields) else {
            debug!(
                event = "item_skipped",
                reason = "no slot label",
                name = fields.get("name").and_then(serde_json::Value::as_str).unwrap_or("?"),
            );
            continue;
        };

        let index = per_slot_counts[slot.catalog_index()];
        per_slot_counts[slot.catalog_index()] += 1;
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{slot}_{index}"));

        let stats = fields
            .iter()
            .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), coerce_stat_value(value)))
            .collect();

        catalog.push(slot, RawItem::new(name, stats));
    }

    Ok(catalog)
}

/// The slot an item belongs to, from its `type` or `category` field.
fn slot_of(fields: &Map<String, Value>) -> Option<Slot> {
    ["type", "category"]
        .into_iter()
        .filter_map(|key| fields.get(key).and_then(Value::as_str))
        .find_map(Slot::parse)
}

/// Collapses any JSON stat value into a single integer.
pub fn coerce_stat_value(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => number_to_i64(n),
        Value::Array(entries) => entries.iter().filter_map(coerce_array_entry).sum(),
        // Strings and nested objects carry no stat value.
        Value::String(_) | Value::Object(_) => 0,
    }
}

/// Array entries additionally accept integer-formatted strings (range
/// fields like `["3", "7"]` occur in the wild).
fn coerce_array_entry(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => Some(number_to_i64(n)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn number_to_i64(n: &serde_json::Number) -> i64 {
    n.as_i64()
        .unwrap_or_else(|| n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0))
}

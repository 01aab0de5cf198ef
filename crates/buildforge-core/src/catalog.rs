//! Equipment slots, items, and the per-slot catalogs.
//!
//! A build picks exactly one item from each of the 8 slot catalogs, with the
//! ring catalog consulted twice (two independent ring picks, repeats allowed).
//! The canonical 9-entry use order drives enumeration, display names, and
//! tie-breaking everywhere in the engine.

use std::fmt;
use std::sync::Arc;

use crate::stat::{StatOrder, StatVector};

/// Number of slot uses in a complete build (ring counted twice).
pub const BUILD_SLOTS: usize = 9;

/// An equipment slot category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Slot {
    Weapon,
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    Ring,
    Bracelet,
    Necklace,
}

impl Slot {
    /// All 8 distinct slot catalogs.
    pub const ALL: [Slot; 8] = [
        Slot::Weapon,
        Slot::Helmet,
        Slot::Chestplate,
        Slot::Leggings,
        Slot::Boots,
        Slot::Ring,
        Slot::Bracelet,
        Slot::Necklace,
    ];

    /// The canonical slot-major use order: ring appears twice, ring1 before
    /// ring2. Enumeration, build tuples and display names all follow this.
    pub const USE_ORDER: [Slot; BUILD_SLOTS] = [
        Slot::Weapon,
        Slot::Helmet,
        Slot::Chestplate,
        Slot::Leggings,
        Slot::Boots,
        Slot::Ring,
        Slot::Ring,
        Slot::Bracelet,
        Slot::Necklace,
    ];

    /// Index of this slot within [`Slot::ALL`].
    #[inline]
    pub const fn catalog_index(self) -> usize {
        match self {
            Slot::Weapon => 0,
            Slot::Helmet => 1,
            Slot::Chestplate => 2,
            Slot::Leggings => 3,
            Slot::Boots => 4,
            Slot::Ring => 5,
            Slot::Bracelet => 6,
            Slot::Necklace => 7,
        }
    }

    /// Lowercase slot name as used by item data files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Slot::Weapon => "weapon",
            Slot::Helmet => "helmet",
            Slot::Chestplate => "chestplate",
            Slot::Leggings => "leggings",
            Slot::Boots => "boots",
            Slot::Ring => "ring",
            Slot::Bracelet => "bracelet",
            Slot::Necklace => "necklace",
        }
    }

    /// Parses a slot name as found in item data files.
    pub fn parse(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of equipment with its dense stat vector.
#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    stats: StatVector,
}

impl Item {
    /// Creates an item; the vector width must match the catalog's stat order.
    pub fn new(name: impl Into<String>, stats: StatVector) -> Self {
        Item {
            name: name.into(),
            stats,
        }
    }

    /// Item display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The item's stat vector.
    #[inline]
    pub fn stats(&self) -> &StatVector {
        &self.stats
    }
}

/// An item as produced by the ingestion collaborator: a name plus a sparse
/// stat mapping over an arbitrary subset of stat names.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawItem {
    /// Item display name.
    pub name: String,
    /// Sparse `(stat name, value)` pairs; absent stats default to 0.
    pub stats: Vec<(String, i64)>,
}

impl RawItem {
    /// Creates a raw item from a name and sparse stat pairs.
    pub fn new(name: impl Into<String>, stats: Vec<(String, i64)>) -> Self {
        RawItem {
            name: name.into(),
            stats,
        }
    }
}

/// Per-slot raw item lists, the hand-off format between the ingestion
/// collaborator and the core.
#[derive(Debug, Clone, Default)]
pub struct RawCatalog {
    slots: [Vec<RawItem>; 8],
}

impl RawCatalog {
    /// Creates an empty raw catalog.
    pub fn new() -> Self {
        RawCatalog::default()
    }

    /// Appends an item to a slot.
    pub fn push(&mut self, slot: Slot, item: RawItem) {
        self.slots[slot.catalog_index()].push(item);
    }

    /// Items collected so far for a slot.
    pub fn items(&self, slot: Slot) -> &[RawItem] {
        &self.slots[slot.catalog_index()]
    }
}

/// A complete build: one item index per slot use, in canonical use order
/// `(weapon, helmet, chestplate, leggings, boots, ring1, ring2, bracelet,
/// necklace)`. Ring indices point into the same ring catalog and may repeat.
///
/// Canonical enumeration order is exactly the lexicographic order of these
/// tuples, which makes them double as discovery-order tie-breakers.
pub type Build = [usize; BUILD_SLOTS];

/// The immutable per-slot item catalogs plus the run-wide stat order.
///
/// Built once per query from the ingestion collaborator's output and
/// read-only afterwards, so it can be shared freely across search workers.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    stat_order: Arc<StatOrder>,
    slots: [Vec<Item>; 8],
}

impl SlotCatalog {
    /// Builds the catalog: computes the lexicographic union stat order and
    /// materializes a dense vector for every item (0 for absent stats).
    pub fn from_raw(raw: RawCatalog) -> Self {
        let names = raw
            .slots
            .iter()
            .flatten()
            .flat_map(|item| item.stats.iter().map(|(name, _)| name.clone()));
        let stat_order = Arc::new(StatOrder::from_names(names));

        let slots = raw.slots.map(|items| {
            items
                .into_iter()
                .map(|raw_item| {
                    let mut stats = StatVector::zeros(stat_order.len());
                    for (name, value) in &raw_item.stats {
                        // Infallible: the order was built from these names.
                        if let Some(id) = stat_order.get(name) {
                            stats.set(id, stats.get(id) + value);
                        }
                    }
                    Item::new(raw_item.name, stats)
                })
                .collect()
        });

        SlotCatalog { stat_order, slots }
    }

    /// Builds a catalog directly from dense items, for callers that already
    /// agreed on a stat order (primarily tests and synthetic catalogs).
    pub fn from_parts(stat_order: Arc<StatOrder>, slots: [Vec<Item>; 8]) -> Self {
        SlotCatalog { stat_order, slots }
    }

    /// The run-wide stat order.
    #[inline]
    pub fn stat_order(&self) -> &Arc<StatOrder> {
        &self.stat_order
    }

    /// Items available in a slot, in catalog order.
    #[inline]
    pub fn items(&self, slot: Slot) -> &[Item] {
        &self.slots[slot.catalog_index()]
    }

    /// The first slot with zero items, if any. The engine refuses to
    /// enumerate while this returns `Some`.
    pub fn first_empty_slot(&self) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.items(*slot).is_empty())
    }

    /// Exact number of complete builds (ring catalog counted twice).
    pub fn total_combinations(&self) -> u128 {
        Slot::USE_ORDER
            .iter()
            .map(|slot| self.items(*slot).len() as u128)
            .product()
    }

    /// Element-wise stat total of a complete build.
    pub fn aggregate(&self, build: &Build) -> StatVector {
        let mut total = StatVector::zeros(self.stat_order.len());
        for (use_idx, slot) in Slot::USE_ORDER.iter().enumerate() {
            total += self.items(*slot)[build[use_idx]].stats();
        }
        total
    }

    /// Human-readable build name: the 9 chosen item names in canonical use
    /// order, joined by `" + "`.
    pub fn build_name(&self, build: &Build) -> String {
        let mut name = String::new();
        for (use_idx, slot) in Slot::USE_ORDER.iter().enumerate() {
            if use_idx > 0 {
                name.push_str(" + ");
            }
            name.push_str(self.items(*slot)[build[use_idx]].name());
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, stats: &[(&str, i64)]) -> RawItem {
        RawItem::new(
            name,
            stats.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
        )
    }

    fn one_item_per_slot() -> RawCatalog {
        let mut catalog = RawCatalog::new();
        for slot in Slot::ALL {
            catalog.push(slot, raw(slot.as_str(), &[("hp", 10)]));
        }
        catalog
    }

    #[test]
    fn test_use_order_counts_ring_twice() {
        assert_eq!(Slot::USE_ORDER.len(), BUILD_SLOTS);
        let rings = Slot::USE_ORDER.iter().filter(|s| **s == Slot::Ring).count();
        assert_eq!(rings, 2);
    }

    #[test]
    fn test_slot_parse_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::parse(slot.as_str()), Some(slot));
        }
        assert_eq!(Slot::parse("shield"), None);
    }

    #[test]
    fn test_from_raw_densifies_and_orders() {
        let mut catalog = RawCatalog::new();
        catalog.push(Slot::Weapon, raw("Sword", &[("hp", 5), ("agility", 1)]));
        catalog.push(Slot::Helmet, raw("Cap", &[("defense", 2)]));
        let catalog = SlotCatalog::from_raw(catalog);

        let order = catalog.stat_order();
        assert_eq!(order.names(), &["agility", "defense", "hp"]);

        let sword = &catalog.items(Slot::Weapon)[0];
        assert_eq!(sword.stats().values(), &[1, 0, 5]);
        let cap = &catalog.items(Slot::Helmet)[0];
        assert_eq!(cap.stats().values(), &[0, 2, 0]);
    }

    #[test]
    fn test_first_empty_slot() {
        let catalog = SlotCatalog::from_raw(one_item_per_slot());
        assert_eq!(catalog.first_empty_slot(), None);

        let mut missing_boots = RawCatalog::new();
        for slot in Slot::ALL {
            if slot != Slot::Boots {
                missing_boots.push(slot, raw("x", &[("hp", 1)]));
            }
        }
        let catalog = SlotCatalog::from_raw(missing_boots);
        assert_eq!(catalog.first_empty_slot(), Some(Slot::Boots));
    }

    #[test]
    fn test_total_combinations_squares_rings() {
        let mut catalog = one_item_per_slot();
        catalog.push(Slot::Ring, raw("Second Ring", &[("hp", 3)]));
        let catalog = SlotCatalog::from_raw(catalog);
        // Every slot has 1 item except ring with 2, used twice.
        assert_eq!(catalog.total_combinations(), 4);
    }

    #[test]
    fn test_aggregate_and_build_name() {
        let catalog = SlotCatalog::from_raw(one_item_per_slot());
        let build: Build = [0; BUILD_SLOTS];
        let total = catalog.aggregate(&build);
        let hp = catalog.stat_order().get("hp").unwrap();
        assert_eq!(total.get(hp), 90);

        let name = catalog.build_name(&build);
        assert_eq!(
            name,
            "weapon + helmet + chestplate + leggings + boots + ring + ring + bracelet + necklace"
        );
    }
}

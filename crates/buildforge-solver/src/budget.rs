//! Resource budget model and its admissible cap bounds.
//!
//! A build consumes a small fixed set of "resource" stats (typically the
//! five skill-point costs). The budget constrains them two ways: each
//! resource total must stay at or below its own cap, and the sum of all
//! resource totals must stay at or below one combined cap.
//!
//! For pruning, the model precomputes, per resource and per slot use, the
//! MINIMUM value any item in that slot can contribute, plus suffix sums of
//! those minima by enumeration depth. A partial build is infeasible once
//! even the cheapest possible completion would exceed a cap; this bound
//! never rejects a completable build. The mirror-image maximum tables (for
//! minimum-requirement floors) live in the engine's prune bounds, fed by
//! the score spec.

use buildforge_core::{Result, Slot, SlotCatalog, StatId, StatVector, BUILD_SLOTS};
use smallvec::SmallVec;

/// Per-slot-use minima for one tracked value, suffixed by depth.
///
/// `suffix[d]` is the least the uses `d..9` can add in total; `suffix[9]`
/// is 0, so a full aggregate checked at depth 9 is checked exactly.
type SuffixMin = [i64; BUILD_SLOTS + 1];

/// The resource-budget constraint for one query.
///
/// Immutable after construction and safely shared across search workers.
#[derive(Debug, Clone)]
pub struct BudgetModel {
    resources: SmallVec<[StatId; 8]>,
    caps: SmallVec<[i64; 8]>,
    combined_cap: Option<i64>,
    suffix_min: Vec<SuffixMin>,
    combined_suffix_min: SuffixMin,
}

impl BudgetModel {
    /// Builds the budget model against a catalog.
    ///
    /// `resource_caps` pairs resource stat names with their per-resource
    /// caps; `combined_cap` bounds the sum over all resources. Unknown
    /// stat names fail fast with a configuration error.
    pub fn new(
        catalog: &SlotCatalog,
        resource_caps: &[(&str, i64)],
        combined_cap: Option<i64>,
    ) -> Result<Self> {
        let order = catalog.stat_order();
        let mut resources: SmallVec<[StatId; 8]> = SmallVec::new();
        let mut caps: SmallVec<[i64; 8]> = SmallVec::new();
        for (name, cap) in resource_caps {
            resources.push(order.resolve(name)?);
            caps.push(*cap);
        }

        let suffix_min = resources
            .iter()
            .map(|id| suffix_sums(catalog, |stats| stats.get(*id)))
            .collect();
        let combined_suffix_min = suffix_sums(catalog, |stats| {
            resources.iter().map(|id| stats.get(*id)).sum()
        });

        Ok(BudgetModel {
            resources,
            caps,
            combined_cap,
            suffix_min,
            combined_suffix_min,
        })
    }

    /// Builds the budget model from a loaded configuration section.
    pub fn from_config(
        catalog: &SlotCatalog,
        config: &buildforge_config::BudgetConfig,
    ) -> Result<Self> {
        let resource_caps: Vec<(&str, i64)> = config
            .resources
            .iter()
            .map(|resource| (resource.stat.as_str(), resource.cap))
            .collect();
        BudgetModel::new(catalog, &resource_caps, config.combined_cap)
    }

    /// A budget that tracks nothing and constrains nothing.
    pub fn unconstrained() -> Self {
        BudgetModel {
            resources: SmallVec::new(),
            caps: SmallVec::new(),
            combined_cap: None,
            suffix_min: Vec::new(),
            combined_suffix_min: [0; BUILD_SLOTS + 1],
        }
    }

    /// The tracked resource stats.
    pub fn resources(&self) -> &[StatId] {
        &self.resources
    }

    /// The combined cap, if one applies.
    pub fn combined_cap(&self) -> Option<i64> {
        self.combined_cap
    }

    /// Admissible feasibility check for a partial build with the slot uses
    /// `depth..9` still open. Returns false only when every completion of
    /// the partial build would exceed a cap.
    #[inline]
    pub fn feasible(&self, partial: &StatVector, depth: usize) -> bool {
        for (i, (id, cap)) in self.resources.iter().zip(self.caps.iter()).enumerate() {
            if partial.get(*id) + self.suffix_min[i][depth] > *cap {
                return false;
            }
        }
        if let Some(cap) = self.combined_cap {
            let spent = partial.sum_of(&self.resources);
            if spent + self.combined_suffix_min[depth] > cap {
                return false;
            }
        }
        true
    }

    /// Exact cap check for a complete aggregate.
    #[inline]
    pub fn within_caps(&self, total: &StatVector) -> bool {
        self.feasible(total, BUILD_SLOTS)
    }
}

/// Per-use minima of `cost` over a slot's items, suffix-summed by depth.
/// An empty slot contributes 0 (the engine refuses to enumerate one anyway).
fn suffix_sums(catalog: &SlotCatalog, cost: impl Fn(&StatVector) -> i64) -> SuffixMin {
    let mut per_use = [0i64; BUILD_SLOTS];
    for (use_idx, slot) in Slot::USE_ORDER.iter().enumerate() {
        per_use[use_idx] = catalog
            .items(*slot)
            .iter()
            .map(|item| cost(item.stats()))
            .min()
            .unwrap_or(0);
    }
    let mut suffix = [0i64; BUILD_SLOTS + 1];
    for d in (0..BUILD_SLOTS).rev() {
        suffix[d] = suffix[d + 1] + per_use[d];
    }
    suffix
}

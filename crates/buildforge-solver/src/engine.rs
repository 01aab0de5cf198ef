//! The 9-level enumeration with admissible bound pruning.
//!
//! Enumeration is slot-major in the canonical use order (weapon, helmet,
//! chestplate, leggings, boots, ring1, ring2, bracelet, necklace), each
//! slot iterated in catalog order, ring1 before ring2. The running partial
//! sum is maintained incrementally: add the chosen item's vector on
//! entering a level, subtract it on leaving. After every placement the
//! engine checks two admissible bounds:
//!
//! - budget caps against the cheapest possible completion (see
//!   [`BudgetModel::feasible`])
//! - hard stat floors against the richest possible completion
//!   (`FloorBounds` below)
//!
//! Either failing proves the whole subtree illegal, so it is skipped with
//! no deeper recursion. Bounds may still admit builds that turn out
//! illegal, so every leaf is re-validated exactly before scoring.

use buildforge_core::{Build, Item, Slot, SlotCatalog, StatId, StatVector, BUILD_SLOTS};
use buildforge_scoring::{ResolvedScoreSpec, TopKAccumulator};
use smallvec::SmallVec;

use crate::budget::BudgetModel;
use crate::stats::SearchStatistics;

type SuffixMax = [i64; BUILD_SLOTS + 1];

/// One hard floor with the most any remaining slots can still add.
#[derive(Debug, Clone)]
struct FloorBound {
    id: StatId,
    min: i64,
    suffix_max: SuffixMax,
}

/// Admissible upper bounds for the hard minimum-requirement floors.
///
/// `suffix_max[d]` is the most the uses `d..9` can add for the stat (sum of
/// per-slot maxima, ring counted twice, empty slot contributing 0). A
/// partial build whose value plus that bound still misses the floor cannot
/// be completed legally; the bound never rejects a completable build.
#[derive(Debug, Clone)]
pub(crate) struct FloorBounds {
    floors: SmallVec<[FloorBound; 8]>,
}

impl FloorBounds {
    fn new(catalog: &SlotCatalog, floors: &[(StatId, i64)]) -> Self {
        let floors = floors
            .iter()
            .map(|(id, min)| {
                let mut per_use = [0i64; BUILD_SLOTS];
                for (use_idx, slot) in Slot::USE_ORDER.iter().enumerate() {
                    per_use[use_idx] = catalog
                        .items(*slot)
                        .iter()
                        .map(|item| item.stats().get(*id))
                        .max()
                        .unwrap_or(0);
                }
                let mut suffix_max = [0i64; BUILD_SLOTS + 1];
                for d in (0..BUILD_SLOTS).rev() {
                    suffix_max[d] = suffix_max[d + 1] + per_use[d];
                }
                FloorBound {
                    id: *id,
                    min: *min,
                    suffix_max,
                }
            })
            .collect();
        FloorBounds { floors }
    }

    #[inline]
    fn feasible(&self, partial: &StatVector, depth: usize) -> bool {
        self.floors
            .iter()
            .all(|f| partial.get(f.id) + f.suffix_max[depth] >= f.min)
    }
}

/// The pruned depth-first enumeration over one catalog.
///
/// Holds only shared read-only state, so one engine serves every worker
/// concurrently; all mutable search state (partial sum, build tuple,
/// accumulator, counters) is owned by the caller.
pub struct SearchEngine<'a> {
    budget: &'a BudgetModel,
    spec: &'a ResolvedScoreSpec,
    floors: FloorBounds,
    uses: [&'a [Item]; BUILD_SLOTS],
    stat_count: usize,
}

impl<'a> SearchEngine<'a> {
    /// Prepares an engine: resolves the per-use item slices and precomputes
    /// the floor bounds. The catalog must be the one the budget and spec
    /// were resolved against.
    pub fn new(
        catalog: &'a SlotCatalog,
        budget: &'a BudgetModel,
        spec: &'a ResolvedScoreSpec,
    ) -> Self {
        let floors = FloorBounds::new(catalog, spec.floors());
        let uses = Slot::USE_ORDER.map(|slot| catalog.items(slot));
        SearchEngine {
            budget,
            spec,
            floors,
            uses,
            stat_count: catalog.stat_order().len(),
        }
    }

    /// Number of partition units: the size of the outermost slot.
    pub fn unit_count(&self) -> usize {
        self.uses[0].len()
    }

    /// Enumerates every build under one outermost-slot choice, feeding
    /// qualifying leaves into the caller's accumulator.
    pub fn search_unit(
        &self,
        outer_index: usize,
        acc: &mut TopKAccumulator,
        stats: &mut SearchStatistics,
    ) {
        let mut partial = StatVector::zeros(self.stat_count);
        let mut build: Build = [0; BUILD_SLOTS];

        build[0] = outer_index;
        partial += self.uses[0][outer_index].stats();
        stats.nodes_entered += 1;
        if self.feasible(&partial, 1) {
            self.descend(1, &mut partial, &mut build, acc, stats);
        } else {
            stats.subtrees_pruned += 1;
        }
    }

    #[inline]
    fn feasible(&self, partial: &StatVector, depth: usize) -> bool {
        self.budget.feasible(partial, depth) && self.floors.feasible(partial, depth)
    }

    fn descend(
        &self,
        depth: usize,
        partial: &mut StatVector,
        build: &mut Build,
        acc: &mut TopKAccumulator,
        stats: &mut SearchStatistics,
    ) {
        if depth == BUILD_SLOTS {
            self.evaluate_leaf(partial, build, acc, stats);
            return;
        }
        for (index, item) in self.uses[depth].iter().enumerate() {
            build[depth] = index;
            *partial += item.stats();
            stats.nodes_entered += 1;
            if self.feasible(partial, depth + 1) {
                self.descend(depth + 1, partial, build, acc, stats);
            } else {
                stats.subtrees_pruned += 1;
            }
            *partial -= item.stats();
        }
    }

    /// Exact evaluation of a complete build: re-check the caps and floors
    /// on exact totals (the bounds only ever admit optimistically), then
    /// score and offer. Rejections here are control flow, never errors.
    fn evaluate_leaf(
        &self,
        total: &StatVector,
        build: &Build,
        acc: &mut TopKAccumulator,
        stats: &mut SearchStatistics,
    ) {
        stats.leaves_evaluated += 1;
        if !self.budget.within_caps(total) || !self.spec.meets_floors(total) {
            stats.leaves_rejected += 1;
            return;
        }
        if acc.offer(self.spec.score(total), *build) {
            stats.offers_retained += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildforge_core::{RawCatalog, RawItem};
    use buildforge_scoring::ScoreSpec;

    fn item(name: &str, stats: &[(&str, i64)]) -> RawItem {
        RawItem::new(
            name,
            stats.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
        )
    }

    /// 2 items in every slot: one with hp 1 / strength 1, one with
    /// hp 10 / strength 5.
    fn two_by_two_catalog() -> SlotCatalog {
        let mut raw = RawCatalog::new();
        for slot in Slot::ALL {
            raw.push(
                slot,
                item(
                    &format!("{slot} light"),
                    &[("hp", 1), ("strength", 1)],
                ),
            );
            raw.push(
                slot,
                item(
                    &format!("{slot} heavy"),
                    &[("hp", 10), ("strength", 5)],
                ),
            );
        }
        SlotCatalog::from_raw(raw)
    }

    fn run_full(
        catalog: &SlotCatalog,
        budget: &BudgetModel,
        spec: &ResolvedScoreSpec,
        k: usize,
    ) -> (TopKAccumulator, SearchStatistics) {
        let engine = SearchEngine::new(catalog, budget, spec);
        let mut acc = TopKAccumulator::new(k);
        let mut stats = SearchStatistics::new();
        for outer in 0..engine.unit_count() {
            engine.search_unit(outer, &mut acc, &mut stats);
        }
        (acc, stats)
    }

    #[test]
    fn test_unpruned_search_visits_every_combination() {
        let catalog = two_by_two_catalog();
        let budget = BudgetModel::unconstrained();
        let spec = ScoreSpec::maximize("hp")
            .resolve(catalog.stat_order())
            .unwrap();

        let (_, stats) = run_full(&catalog, &budget, &spec, 4);
        assert_eq!(stats.leaves_evaluated as u128, catalog.total_combinations());
        assert_eq!(stats.leaves_evaluated, 512); // 2^9
        assert_eq!(stats.subtrees_pruned, 0);
        assert_eq!(stats.leaves_rejected, 0);
    }

    #[test]
    fn test_best_build_is_all_heavy() {
        let catalog = two_by_two_catalog();
        let budget = BudgetModel::unconstrained();
        let spec = ScoreSpec::maximize("hp")
            .resolve(catalog.stat_order())
            .unwrap();

        let (acc, _) = run_full(&catalog, &budget, &spec, 1);
        let ranked = acc.into_ranked();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 90);
        assert_eq!(ranked[0].build, [1; BUILD_SLOTS]);
    }

    #[test]
    fn test_budget_prunes_without_losing_legal_builds() {
        let catalog = two_by_two_catalog();
        // Strength cost per use: light 1, heavy 5. A build with h heavy
        // picks costs 9 + 4h, so cap 13 allows at most one heavy pick:
        // C(9,0) + C(9,1) = 10 legal builds.
        let budget = BudgetModel::new(&catalog, &[("strength", 13)], None).unwrap();
        let spec = ScoreSpec::maximize("hp")
            .resolve(catalog.stat_order())
            .unwrap();

        let (acc, stats) = run_full(&catalog, &budget, &spec, 16);
        assert!(stats.subtrees_pruned > 0);
        assert_eq!(acc.len(), 10);
        assert_eq!(stats.qualifying_builds(), 10);
    }

    #[test]
    fn test_unreachable_floor_prunes_at_first_slot() {
        let catalog = two_by_two_catalog();
        let budget = BudgetModel::unconstrained();
        // Max reachable hp is 90; a floor of 1000 is unreachable.
        let spec = ScoreSpec::maximize("hp")
            .with_minimum("hp", 1000)
            .resolve(catalog.stat_order())
            .unwrap();

        let (acc, stats) = run_full(&catalog, &budget, &spec, 4);
        assert!(acc.is_empty());
        assert_eq!(stats.leaves_evaluated, 0);
        // Every weapon choice is pruned immediately; no deeper nodes.
        assert_eq!(stats.nodes_entered, 2);
        assert_eq!(stats.subtrees_pruned, 2);
    }

    #[test]
    fn test_leaf_recheck_rejects_bound_survivors() {
        // Floors can be admitted by the optimistic bound yet fail exactly;
        // a floor on hp at 85 admits partials that only heavy completions
        // could satisfy, and the leaf check must reject the rest.
        let catalog = two_by_two_catalog();
        let budget = BudgetModel::unconstrained();
        let spec = ScoreSpec::maximize("hp")
            .with_minimum("hp", 85)
            .resolve(catalog.stat_order())
            .unwrap();

        let (acc, stats) = run_full(&catalog, &budget, &spec, 64);
        // Only all-heavy (90) qualifies: 9 light picks lose 9 each.
        let ranked = acc.into_ranked();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].build, [1; BUILD_SLOTS]);
        assert_eq!(stats.qualifying_builds(), 1);
    }
}

//! The search entry point and its parallel partition driver.
//!
//! The outermost slot's index range is split into contiguous per-worker
//! partitions. Each worker owns a private accumulator and counters and runs
//! to completion independently; the only synchronization point is the final
//! join-and-merge. Catalog, budget, and spec are read-only throughout, so
//! nothing is locked during the search.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use buildforge_core::{BuildForgeError, Result, SlotCatalog};
use buildforge_scoring::{ResolvedScoreSpec, ScoreSpec, TopEntry, TopKAccumulator};
use tracing::{debug, info};

use crate::budget::BudgetModel;
use crate::engine::SearchEngine;
use crate::options::SearchOptions;
use crate::stats::SearchStatistics;

/// One ranked result: the chosen item names, the aggregate stat totals for
/// every stat the query references, and the scalar score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedBuild {
    /// The 9 item names in canonical use order, joined by `" + "`.
    pub name: String,
    /// Aggregate totals for the stats referenced by the spec or budget.
    pub stats: BTreeMap<String, i64>,
    /// Scalar score under the query's objective.
    pub score: i64,
}

/// The outcome of one search: ranked builds plus run counters.
///
/// An empty `builds` list after a completed run means zero qualifying
/// builds: a legitimate answer, not a failure.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Qualifying builds, best first, at most `top_k` entries.
    pub builds: Vec<RankedBuild>,
    /// Counters aggregated over all workers.
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    /// True when no build satisfied the hard constraints.
    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

/// Finds the top-K builds for a catalog under a budget and score spec.
///
/// Validation order (all before any enumeration): options, spec resolution
/// against the catalog's stat order, empty-slot detection. Per-build
/// constraint violations during the search are pruned silently; they are
/// never errors.
pub fn search(
    catalog: &SlotCatalog,
    budget: &BudgetModel,
    spec: &ScoreSpec,
    options: &SearchOptions,
) -> Result<SearchOutcome> {
    options.validate()?;
    let resolved = spec.resolve(catalog.stat_order())?;
    if let Some(slot) = catalog.first_empty_slot() {
        return Err(BuildForgeError::EmptySlot(slot));
    }

    let engine = SearchEngine::new(catalog, budget, &resolved);
    let unit_count = engine.unit_count();
    let worker_count = options.workers().resolve(unit_count);
    let top_k = options.top_k();
    let cancel = options.cancel_flag().map(|flag| flag.as_ref());

    info!(
        event = "search_start",
        combinations = %catalog.total_combinations(),
        units = unit_count,
        workers = worker_count,
        top_k = top_k,
    );

    let partitions = partition_units(unit_count, worker_count);
    let results: Vec<PartitionResult> = if worker_count == 1 {
        partitions
            .into_iter()
            .map(|range| run_partition(&engine, range, cancel, top_k))
            .collect()
    } else {
        let engine = &engine;
        thread::scope(|scope| {
            let handles: Vec<_> = partitions
                .into_iter()
                .map(|range| scope.spawn(move || run_partition(engine, range, cancel, top_k)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("search worker panicked"))
                .collect()
        })
    };

    let mut statistics = SearchStatistics::new();
    let mut completed = true;
    let mut locals = Vec::with_capacity(results.len());
    for result in results {
        statistics.absorb(&result.stats);
        completed &= result.completed;
        locals.push(result.top_k);
    }
    if !completed {
        return Err(BuildForgeError::Cancelled);
    }

    let merged = TopKAccumulator::merge(locals, top_k);
    let builds = materialize(catalog, budget, &resolved, &merged);

    info!(
        event = "search_end",
        leaves = statistics.leaves_evaluated,
        pruned = statistics.subtrees_pruned,
        qualifying = statistics.qualifying_builds(),
        results = builds.len(),
    );

    Ok(SearchOutcome { builds, statistics })
}

/// One worker's private results, handed back at the join.
struct PartitionResult {
    top_k: TopKAccumulator,
    stats: SearchStatistics,
    completed: bool,
}

/// Splits `0..unit_count` into `worker_count` contiguous ranges whose sizes
/// differ by at most one, preserving canonical order across partitions.
fn partition_units(unit_count: usize, worker_count: usize) -> Vec<Range<usize>> {
    let base = unit_count / worker_count;
    let extra = unit_count % worker_count;
    let mut ranges = Vec::with_capacity(worker_count);
    let mut start = 0;
    for worker in 0..worker_count {
        let len = base + usize::from(worker < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Runs one partition to completion (or until the cancellation flag trips;
/// the flag is polled only between outermost units).
fn run_partition(
    engine: &SearchEngine<'_>,
    range: Range<usize>,
    cancel: Option<&AtomicBool>,
    top_k: usize,
) -> PartitionResult {
    let mut acc = TopKAccumulator::new(top_k);
    let mut stats = SearchStatistics::new();
    stats.partitions = 1;
    let range_end = range.end;

    for outer in range {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return PartitionResult {
                top_k: acc,
                stats,
                completed: false,
            };
        }
        engine.search_unit(outer, &mut acc, &mut stats);
    }

    debug!(
        event = "partition_done",
        range_end = range_end,
        leaves = stats.leaves_evaluated,
        retained = acc.len(),
    );

    PartitionResult {
        top_k: acc,
        stats,
        completed: true,
    }
}

/// Reconstructs the human-readable result list from the merged entries.
fn materialize(
    catalog: &SlotCatalog,
    budget: &BudgetModel,
    spec: &ResolvedScoreSpec,
    entries: &[TopEntry],
) -> Vec<RankedBuild> {
    let order = catalog.stat_order();
    let mut reported: Vec<_> = spec
        .referenced_stats()
        .iter()
        .chain(budget.resources().iter())
        .copied()
        .collect();
    reported.sort();
    reported.dedup();

    entries
        .iter()
        .map(|entry| {
            let total = catalog.aggregate(&entry.build);
            let stats = reported
                .iter()
                .map(|id| (order.name(*id).to_string(), total.get(*id)))
                .collect();
            RankedBuild {
                name: catalog.build_name(&entry.build),
                stats,
                score: entry.score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildforge_core::{RawCatalog, RawItem, Slot};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn item(name: &str, stats: &[(&str, i64)]) -> RawItem {
        RawItem::new(
            name,
            stats.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
        )
    }

    fn singleton_catalog_with_rings(ring_hps: &[i64]) -> SlotCatalog {
        let mut raw = RawCatalog::new();
        for slot in Slot::ALL {
            if slot == Slot::Ring {
                for (i, hp) in ring_hps.iter().enumerate() {
                    raw.push(slot, item(&format!("Ring {}", i), &[("hp", *hp)]));
                }
            } else {
                raw.push(slot, item(slot.as_str(), &[("hp", 1)]));
            }
        }
        SlotCatalog::from_raw(raw)
    }

    #[test]
    fn test_partition_units_are_contiguous_and_balanced() {
        let ranges = partition_units(10, 3);
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
        let ranges = partition_units(2, 2);
        assert_eq!(ranges, vec![0..1, 1..2]);
    }

    #[test]
    fn test_empty_slot_is_detected_before_enumeration() {
        let mut raw = RawCatalog::new();
        raw.push(Slot::Weapon, item("Sword", &[("hp", 1)]));
        let catalog = SlotCatalog::from_raw(raw);
        let budget = BudgetModel::unconstrained();

        let err = search(
            &catalog,
            &budget,
            &ScoreSpec::maximize("hp"),
            &SearchOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BuildForgeError::EmptySlot(Slot::Helmet)));
    }

    #[test]
    fn test_two_rings_produce_both_orders() {
        let catalog = singleton_catalog_with_rings(&[5, 7]);
        let budget = BudgetModel::unconstrained();
        let outcome = search(
            &catalog,
            &budget,
            &ScoreSpec::maximize("hp"),
            &SearchOptions::new().with_top_k(3),
        )
        .unwrap();

        // Ring picks are independent index tuples: (0,1) and (1,0) are
        // distinct builds with the same aggregate, plus (0,0) and (1,1).
        assert_eq!(outcome.statistics.leaves_evaluated, 4);
        assert_eq!(outcome.builds.len(), 3);
        // 7 singleton pieces at 1 hp plus the doubled 7-hp ring.
        assert_eq!(outcome.builds[0].score, 21);
        // The mixed-ring builds tie at 19; both orders exist, and the
        // canonical order puts ring1=0, ring2=1 first.
        assert_eq!(outcome.builds[1].score, 19);
        assert_eq!(outcome.builds[2].score, 19);
        assert!(outcome.builds[1].name.contains("Ring 0 + Ring 1"));
        assert!(outcome.builds[2].name.contains("Ring 1 + Ring 0"));
    }

    #[test]
    fn test_cancellation_surfaces_as_error() {
        let catalog = singleton_catalog_with_rings(&[1, 2]);
        let budget = BudgetModel::unconstrained();
        let cancel = Arc::new(AtomicBool::new(true));
        let err = search(
            &catalog,
            &budget,
            &ScoreSpec::maximize("hp"),
            &SearchOptions::new().with_cancel_flag(cancel),
        )
        .unwrap_err();
        assert!(matches!(err, BuildForgeError::Cancelled));
    }

    #[test]
    fn test_stats_report_referenced_and_budget_stats() {
        let catalog = singleton_catalog_with_rings(&[5, 7]);
        let budget = BudgetModel::unconstrained();
        let outcome = search(
            &catalog,
            &budget,
            &ScoreSpec::maximize("hp"),
            &SearchOptions::new().with_top_k(1),
        )
        .unwrap();
        let best = &outcome.builds[0];
        assert_eq!(best.stats.get("hp"), Some(&21));
        assert_eq!(best.score, 21);
    }
}

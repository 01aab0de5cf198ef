//! Score specification: hard floors plus a maximization objective.
//!
//! A [`ScoreSpec`] is declared against stat *names*; [`ScoreSpec::resolve`]
//! binds it to a concrete [`StatOrder`] and is the single place where a
//! requested stat that does not exist in the catalog is rejected. Resolution
//! always happens before enumeration, so a bad objective never scores a
//! build as zero silently and never fails mid-search.

use std::collections::BTreeMap;

use buildforge_core::{Result, StatId, StatOrder, StatVector};
use smallvec::SmallVec;

/// Declarative search objective, keyed by stat name.
///
/// The hard filter and the two maximization modes are additive: a build must
/// meet every minimum requirement, and its score is the weighted sum of the
/// `with_weight` entries with the `maximize` target counted at weight 1 on
/// top of any explicit weight it already has.
#[derive(Debug, Clone, Default)]
pub struct ScoreSpec {
    min_requirements: BTreeMap<String, i64>,
    maximize_single: Option<String>,
    weights: BTreeMap<String, i64>,
}

impl ScoreSpec {
    /// An empty spec: no floors, score 0 for every build.
    pub fn new() -> Self {
        ScoreSpec::default()
    }

    /// Convenience constructor for the common single-stat objective.
    pub fn maximize(stat: impl Into<String>) -> Self {
        ScoreSpec::new().with_maximize(stat)
    }

    /// Adds a hard floor: builds whose aggregate falls below `min` for this
    /// stat are rejected outright.
    pub fn with_minimum(mut self, stat: impl Into<String>, min: i64) -> Self {
        self.min_requirements.insert(stat.into(), min);
        self
    }

    /// Sets the single stat to maximize (counted with weight 1, additive
    /// with any explicit weights).
    pub fn with_maximize(mut self, stat: impl Into<String>) -> Self {
        self.maximize_single = Some(stat.into());
        self
    }

    /// Adds a weighted term to the objective; unspecified stats weigh 0.
    pub fn with_weight(mut self, stat: impl Into<String>, weight: i64) -> Self {
        self.weights.insert(stat.into(), weight);
        self
    }

    /// The declared hard floors.
    pub fn min_requirements(&self) -> &BTreeMap<String, i64> {
        &self.min_requirements
    }

    /// Binds the spec to a run's stat order.
    ///
    /// Fails with a configuration error if any referenced stat name is
    /// absent from the order. With no maximization declared at all, the
    /// objective falls back to the sum of the floor stats, so a
    /// floors-only spec still ranks qualifying builds meaningfully.
    pub fn resolve(&self, order: &StatOrder) -> Result<ResolvedScoreSpec> {
        let mut floors: SmallVec<[(StatId, i64); 8]> = SmallVec::new();
        for (name, min) in &self.min_requirements {
            floors.push((order.resolve(name)?, *min));
        }

        let mut weights: BTreeMap<StatId, i64> = BTreeMap::new();
        for (name, weight) in &self.weights {
            weights.insert(order.resolve(name)?, *weight);
        }
        if let Some(name) = &self.maximize_single {
            *weights.entry(order.resolve(name)?).or_insert(0) += 1;
        }
        if weights.is_empty() {
            for (id, _) in &floors {
                weights.insert(*id, 1);
            }
        }

        let mut referenced: Vec<StatId> = floors
            .iter()
            .map(|(id, _)| *id)
            .chain(weights.keys().copied())
            .collect();
        referenced.sort();
        referenced.dedup();

        Ok(ResolvedScoreSpec {
            floors,
            weights: weights.into_iter().collect(),
            referenced,
        })
    }
}

/// A [`ScoreSpec`] bound to a concrete stat order.
#[derive(Debug, Clone)]
pub struct ResolvedScoreSpec {
    floors: SmallVec<[(StatId, i64); 8]>,
    weights: Vec<(StatId, i64)>,
    referenced: Vec<StatId>,
}

impl ResolvedScoreSpec {
    /// The resolved hard floors.
    pub fn floors(&self) -> &[(StatId, i64)] {
        &self.floors
    }

    /// The resolved objective weights, sorted by stat index.
    pub fn weights(&self) -> &[(StatId, i64)] {
        &self.weights
    }

    /// Every stat the spec references (floors and weights), deduplicated.
    pub fn referenced_stats(&self) -> &[StatId] {
        &self.referenced
    }

    /// Exact hard-filter check against a complete aggregate.
    #[inline]
    pub fn meets_floors(&self, total: &StatVector) -> bool {
        self.floors.iter().all(|(id, min)| total.get(*id) >= *min)
    }

    /// Scalar score of a complete aggregate.
    #[inline]
    pub fn score(&self, total: &StatVector) -> i64 {
        self.weights
            .iter()
            .map(|(id, weight)| total.get(*id) * weight)
            .sum()
    }
}

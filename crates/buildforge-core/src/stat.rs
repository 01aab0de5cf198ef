//! Stat ordering and dense stat vectors.
//!
//! Every run agrees on a single [`StatOrder`]: an immutable, lexicographically
//! sorted list of stat names built from the union of stat keys present in the
//! item catalog. A [`StatVector`] is a dense `i64` vector over that ordering,
//! representing either one item's effect or an aggregate build total.

use std::collections::HashMap;
use std::fmt;
use std::ops::{AddAssign, SubAssign};

use crate::error::{BuildForgeError, Result};

/// Index of a stat within a [`StatOrder`].
///
/// Valid only for the `StatOrder` it was resolved against; the ordering is
/// stable for the duration of a run but not across runs on different inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatId(pub usize);

impl StatId {
    /// Returns the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The run-wide ordered list of stat names.
///
/// Construction sorts the names lexicographically and removes duplicates,
/// so the index assignment is reproducible across runs on the same input.
#[derive(Debug, Clone, Default)]
pub struct StatOrder {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl StatOrder {
    /// Builds a stat order from an arbitrary collection of stat names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        StatOrder { names, index }
    }

    /// Number of tracked stats.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true when no stats are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The name at the given stat index.
    #[inline]
    pub fn name(&self, id: StatId) -> &str {
        &self.names[id.0]
    }

    /// All stat names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Looks up a stat name, returning `None` when absent.
    pub fn get(&self, name: &str) -> Option<StatId> {
        self.index.get(name).copied().map(StatId)
    }

    /// Looks up a stat name, failing fast with a configuration error when
    /// the name is not part of this run's catalog.
    pub fn resolve(&self, name: &str) -> Result<StatId> {
        self.get(name).ok_or_else(|| {
            BuildForgeError::Config(format!("unknown stat name '{name}' (not present in catalog)"))
        })
    }
}

/// A dense `i64` vector over a shared [`StatOrder`].
///
/// Aggregation is element-wise addition; the search engine maintains a
/// running partial sum with `+=` on entering a slot and `-=` on leaving it.
#[derive(Clone, PartialEq, Eq)]
pub struct StatVector {
    values: Vec<i64>,
}

impl StatVector {
    /// Creates a zeroed vector of the given width.
    pub fn zeros(len: usize) -> Self {
        StatVector {
            values: vec![0; len],
        }
    }

    /// Creates a vector from dense values.
    pub fn from_values(values: Vec<i64>) -> Self {
        StatVector { values }
    }

    /// Vector width (equals the stat order length).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for a zero-width vector.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for the given stat.
    #[inline]
    pub fn get(&self, id: StatId) -> i64 {
        self.values[id.0]
    }

    /// Raw values slice.
    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Sets the value for the given stat.
    pub fn set(&mut self, id: StatId, value: i64) {
        self.values[id.0] = value;
    }

    /// Sums the values at the given stat indices.
    pub fn sum_of(&self, ids: &[StatId]) -> i64 {
        ids.iter().map(|id| self.values[id.0]).sum()
    }
}

impl AddAssign<&StatVector> for StatVector {
    fn add_assign(&mut self, rhs: &StatVector) {
        debug_assert_eq!(self.values.len(), rhs.values.len());
        for (a, b) in self.values.iter_mut().zip(rhs.values.iter()) {
            *a += *b;
        }
    }
}

impl SubAssign<&StatVector> for StatVector {
    fn sub_assign(&mut self, rhs: &StatVector) {
        debug_assert_eq!(self.values.len(), rhs.values.len());
        for (a, b) in self.values.iter_mut().zip(rhs.values.iter()) {
            *a -= *b;
        }
    }
}

impl fmt::Debug for StatVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StatVector").field(&self.values).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_order_is_sorted_and_deduplicated() {
        let order = StatOrder::from_names(["hp", "agility", "hp", "defense"]);
        assert_eq!(order.len(), 3);
        assert_eq!(order.names(), &["agility", "defense", "hp"]);
        assert_eq!(order.get("hp"), Some(StatId(2)));
    }

    #[test]
    fn test_stat_order_resolve_unknown_fails() {
        let order = StatOrder::from_names(["hp"]);
        let err = order.resolve("mana").unwrap_err();
        assert!(err.to_string().contains("mana"));
    }

    #[test]
    fn test_vector_add_sub_roundtrip() {
        let mut acc = StatVector::zeros(3);
        let item = StatVector::from_values(vec![1, -2, 3]);
        acc += &item;
        assert_eq!(acc.values(), &[1, -2, 3]);
        acc += &item;
        acc -= &item;
        assert_eq!(acc.values(), &[1, -2, 3]);
        acc -= &item;
        assert_eq!(acc.values(), &[0, 0, 0]);
    }

    #[test]
    fn test_sum_of() {
        let v = StatVector::from_values(vec![5, 7, 11]);
        assert_eq!(v.sum_of(&[StatId(0), StatId(2)]), 16);
        assert_eq!(v.sum_of(&[]), 0);
    }
}

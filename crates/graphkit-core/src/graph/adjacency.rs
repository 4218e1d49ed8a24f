//! Per-vertex adjacency lists.
//!
//! Entries keep insertion order and are never deduplicated, so parallel
//! edges are separate entries. Most vertices have a handful of neighbors,
//! which stay inline without a heap allocation.

use graphkit_common::{Vertex, Weight};
use smallvec::SmallVec;

use super::Neighbor;

/// Number of entries stored inline before spilling to the heap.
const INLINE_NEIGHBORS: usize = 4;

/// Adjacency list for a single vertex.
#[derive(Debug, Clone)]
pub(crate) struct AdjacencyList<V> {
    entries: SmallVec<[Neighbor<V>; INLINE_NEIGHBORS]>,
}

impl<V: Vertex> AdjacencyList<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, target: V, weight: Weight) {
        self.entries.push(Neighbor::new(target, weight));
    }

    /// Removes every entry pointing at `target`, returning how many went.
    pub(crate) fn remove_all(&mut self, target: &V) -> usize {
        let before = self.entries.len();
        self.entries.retain(|n| n.target != *target);
        before - self.entries.len()
    }

    pub(crate) fn contains(&self, target: &V) -> bool {
        self.entries.iter().any(|n| n.target == *target)
    }

    /// Weight of the first entry pointing at `target`.
    pub(crate) fn weight_to(&self, target: &V) -> Option<Weight> {
        self.entries
            .iter()
            .find(|n| n.target == *target)
            .map(|n| n.weight)
    }

    pub(crate) fn count_to(&self, target: &V) -> usize {
        self.entries.iter().filter(|n| n.target == *target).count()
    }

    pub(crate) fn as_slice(&self) -> &[Neighbor<V>] {
        &self.entries
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Neighbor<V>> + '_ {
        self.entries.iter()
    }

    pub(crate) fn degree(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut list = AdjacencyList::new();
        list.push("b", 1.0);
        list.push("c", 2.0);
        list.push("b", 3.0);

        let targets: Vec<_> = list.iter().map(|n| n.target).collect();
        assert_eq!(targets, vec!["b", "c", "b"]);
        assert_eq!(list.degree(), 3);
    }

    #[test]
    fn test_remove_all() {
        let mut list = AdjacencyList::new();
        list.push(1, 1.0);
        list.push(2, 1.0);
        list.push(1, 5.0);

        assert_eq!(list.remove_all(&1), 2);
        assert_eq!(list.degree(), 1);
        assert!(!list.contains(&1));
        assert_eq!(list.remove_all(&9), 0);
    }

    #[test]
    fn test_weight_to_first_match() {
        let mut list = AdjacencyList::new();
        list.push('x', 4.0);
        list.push('x', 7.0);

        assert_eq!(list.weight_to(&'x'), Some(4.0));
        assert_eq!(list.weight_to(&'y'), None);
        assert_eq!(list.count_to(&'x'), 2);
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let mut list = AdjacencyList::new();
        for i in 0..10 {
            list.push(i, f64::from(i));
        }
        assert_eq!(list.as_slice().len(), 10);
        assert_eq!(list.weight_to(&9), Some(9.0));
    }
}

//! Shared building blocks for the algorithms: heap entries and the visitor
//! protocol used by the traversal functions.

use std::cmp::Ordering;

use graphkit_common::Weight;

/// Decision returned by a traversal visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep going.
    Continue,
    /// Do not expand past the vertex or edge just reported.
    Prune,
    /// Stop the traversal immediately.
    Break,
}

/// Event reported to a traversal visitor.
///
/// Vertex references borrow from the traversed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent<'g, V> {
    /// A vertex is reached for the first time.
    Discover(&'g V),
    /// An edge leads to an undiscovered vertex and becomes a tree edge.
    TreeEdge(&'g V, &'g V),
    /// An edge leads to a vertex that was already discovered.
    NonTreeEdge(&'g V, &'g V),
    /// Every edge of a vertex has been examined.
    Finish(&'g V),
}

/// Min-heap entry for [`std::collections::BinaryHeap`].
///
/// Orders by score ascending (reversed so the max-heap pops the smallest),
/// then by payload ascending so ties pop deterministically. Scores compare
/// with `total_cmp`, which gives NaN a fixed place instead of breaking the
/// heap.
#[derive(Debug, Clone, Copy)]
pub struct MinScored<T>(pub Weight, pub T);

impl<T: Ord> PartialEq for MinScored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for MinScored<T> {}

impl<T: Ord> PartialOrd for MinScored<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for MinScored<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .total_cmp(&self.0)
            .then_with(|| other.1.cmp(&self.1))
    }
}

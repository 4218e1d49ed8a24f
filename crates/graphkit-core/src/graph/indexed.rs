//! Dense, index-based adjacency snapshots.
//!
//! Layout (compressed sparse row):
//!
//! ```text
//! offsets[0]     = 0
//! offsets[u + 1] = offsets[u] + out_degree(u)
//! arcs(u)        = targets[offsets[u] .. offsets[u + 1]]
//! ```
//!
//! Vertex `u` is the graph's vertex at index `u`, so results computed on the
//! snapshot map back to labels with [`Graph::vertex_at`]. Arc order within a
//! vertex matches the graph's adjacency order.

use graphkit_common::{Vertex, Weight};

use super::Graph;

/// Immutable CSR view of a graph's arcs.
///
/// An undirected edge appears as two arcs (one per direction); a self-loop
/// appears once, exactly as in the source adjacency lists.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedAdjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    weights: Vec<Weight>,
    directed: bool,
}

impl IndexedAdjacency {
    /// Takes a snapshot of `graph`.
    #[must_use]
    pub fn from_graph<V: Vertex>(graph: &Graph<V>) -> Self {
        let n = graph.vertex_count();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut targets = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for u in 0..n {
            for neighbor in graph.neighbors_at(u) {
                if let Some(v) = graph.index_of(&neighbor.target) {
                    targets.push(v);
                    weights.push(neighbor.weight);
                }
            }
            offsets.push(targets.len());
        }

        Self {
            offsets,
            targets,
            weights,
            directed: graph.is_directed(),
        }
    }

    /// Builds a snapshot from per-vertex arc lists.
    #[must_use]
    pub fn from_arcs(directed: bool, arcs: &[Vec<(usize, Weight)>]) -> Self {
        let mut offsets = Vec::with_capacity(arcs.len() + 1);
        let mut targets = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for list in arcs {
            for &(v, w) in list {
                targets.push(v);
                weights.push(w);
            }
            offsets.push(targets.len());
        }

        Self {
            offsets,
            targets,
            weights,
            directed,
        }
    }

    /// Returns the snapshot with every arc reversed.
    ///
    /// Arcs into `v` are listed in the order their sources appear, which
    /// matches [`Graph::transpose`].
    #[must_use]
    pub fn transpose(&self) -> Self {
        if !self.directed {
            return self.clone();
        }
        let n = self.vertex_count();
        let mut reversed: Vec<Vec<(usize, Weight)>> = vec![Vec::new(); n];
        for u in 0..n {
            for (v, w) in self.arcs(u) {
                reversed[v].push((u, w));
            }
        }
        Self::from_arcs(true, &reversed)
    }

    /// Returns a view where every arc also exists in the other direction.
    ///
    /// Used for weak connectivity on directed graphs. Undirected snapshots
    /// are returned unchanged.
    #[must_use]
    pub fn symmetrize(&self) -> Self {
        if !self.directed {
            return self.clone();
        }
        let n = self.vertex_count();
        let mut both: Vec<Vec<(usize, Weight)>> = vec![Vec::new(); n];
        for u in 0..n {
            for (v, w) in self.arcs(u) {
                both[u].push((v, w));
                if u != v {
                    both[v].push((u, w));
                }
            }
        }
        Self::from_arcs(false, &both)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of stored arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if the source graph was directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Arc targets of `u`, in adjacency order.
    #[must_use]
    pub fn targets(&self, u: usize) -> &[usize] {
        &self.targets[self.offsets[u]..self.offsets[u + 1]]
    }

    /// Arc weights of `u`, parallel to [`targets`](Self::targets).
    #[must_use]
    pub fn weights(&self, u: usize) -> &[Weight] {
        &self.weights[self.offsets[u]..self.offsets[u + 1]]
    }

    /// Iterates over `(target, weight)` arcs of `u`.
    pub fn arcs(&self, u: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        self.targets(u)
            .iter()
            .copied()
            .zip(self.weights(u).iter().copied())
    }

    /// Returns the number of arcs leaving `u`.
    #[must_use]
    pub fn out_degree(&self, u: usize) -> usize {
        self.offsets[u + 1] - self.offsets[u]
    }

    /// Returns the number of arcs entering each vertex.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut in_degree = vec![0; self.vertex_count()];
        for &v in &self.targets {
            in_degree[v] += 1;
        }
        in_degree
    }
}

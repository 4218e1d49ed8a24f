//! Minimum spanning tree algorithms: Prim and Kruskal.
//!
//! Both accept disconnected graphs and return a minimum spanning forest,
//! one tree per connected component.

use std::collections::BinaryHeap;

use graphkit_common::{Error, Result, Vertex, Weight};
use graphkit_core::{DisjointSet, Edge, Graph, IndexedAdjacency};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{MinScored, label};

/// Result of an MST computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstResult<V> {
    /// Edges in the order the algorithm accepted them.
    pub edges: Vec<Edge<V>>,
    /// Sum of the accepted edge weights.
    pub total_weight: Weight,
    /// Number of trees in the forest (one per connected component).
    pub trees: usize,
}

impl<V> MstResult<V> {
    fn new(edges: Vec<Edge<V>>, trees: usize) -> Self {
        let total_weight = edges.iter().map(|e| e.weight).sum();
        Self {
            edges,
            total_weight,
            trees,
        }
    }

    /// Number of edges in the tree or forest.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if the result is a single tree spanning `vertex_count` vertices.
    #[must_use]
    pub fn is_spanning_tree(&self, vertex_count: usize) -> bool {
        self.edges.len() + 1 == vertex_count
    }
}

fn check_input<V: Vertex>(graph: &Graph<V>, algorithm: &'static str) -> Result<()> {
    if graph.is_directed() {
        return Err(Error::precondition(algorithm, "graph must be undirected"));
    }
    if !graph.is_weighted() {
        return Err(Error::precondition(algorithm, "graph must be weighted"));
    }
    Ok(())
}

fn log_forest(algorithm: &'static str, trees: usize, total_weight: Weight) {
    if trees > 1 {
        debug!(algorithm, trees, "graph is disconnected, returning a spanning forest");
    }
    debug!(algorithm, total_weight, "minimum spanning tree complete");
}

/// Minimum spanning tree with Prim's algorithm.
///
/// Grows a tree from the first vertex, always taking the cheapest edge that
/// leaves it. When a component is exhausted the search restarts from the
/// next unvisited vertex in insertion order.
///
/// Time complexity: O(E log V)
///
/// # Errors
///
/// Returns [`Error::Precondition`] unless the graph is undirected and
/// weighted.
pub fn prim_mst<V: Vertex>(graph: &Graph<V>) -> Result<MstResult<V>> {
    check_input(graph, "prim_mst")?;
    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();

    let mut in_tree = vec![false; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    let mut trees = 0;
    // Entries are (weight, (candidate, tree vertex)).
    let mut heap: BinaryHeap<MinScored<(usize, usize)>> = BinaryHeap::new();

    for root in 0..n {
        if in_tree[root] {
            continue;
        }
        trees += 1;
        in_tree[root] = true;
        heap.extend(adj.arcs(root).map(|(v, w)| MinScored(w, (v, root))));

        while let Some(MinScored(w, (v, from))) = heap.pop() {
            if in_tree[v] {
                continue;
            }
            in_tree[v] = true;
            if let (Some(source), Some(target)) = (label(graph, from), label(graph, v)) {
                edges.push(Edge::new(source, target, w));
            }
            heap.extend(
                adj.arcs(v)
                    .filter(|&(next, _)| !in_tree[next])
                    .map(|(next, weight)| MinScored(weight, (next, v))),
            );
        }
    }

    let result = MstResult::new(edges, trees);
    log_forest("prim_mst", trees, result.total_weight);
    Ok(result)
}

/// Minimum spanning tree with Kruskal's algorithm.
///
/// Edges are stably sorted by weight, so equal weights keep their listing
/// order, and accepted when they join two different sets of a
/// [`DisjointSet`].
///
/// Time complexity: O(E log E)
///
/// # Errors
///
/// Returns [`Error::Precondition`] unless the graph is undirected and
/// weighted.
pub fn kruskal_mst<V: Vertex>(graph: &Graph<V>) -> Result<MstResult<V>> {
    check_input(graph, "kruskal_mst")?;

    let mut candidates = graph.edges();
    candidates.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut sets = DisjointSet::from_elements(graph.vertices().cloned());
    let target_edges = graph.vertex_count().saturating_sub(1);
    let mut edges = Vec::with_capacity(target_edges);

    for edge in candidates {
        if sets.union(&edge.source, &edge.target)? {
            edges.push(edge);
            if edges.len() == target_edges {
                break;
            }
        }
    }

    let result = MstResult::new(edges, sets.set_count());
    log_forest("kruskal_mst", result.trees, result.total_weight);
    Ok(result)
}

//! Maximum flow: Ford-Fulkerson and Edmonds-Karp.
//!
//! Edge weights are read as capacities. Both algorithms work on a residual
//! network where arc `i ^ 1` is the reverse of arc `i`, so pushing flow is
//! two array updates and parallel edges keep separate arcs.

use std::collections::VecDeque;

use graphkit_common::{Error, Result, Vertex, Weight};
use graphkit_core::{Edge, Graph, IndexedAdjacency};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{NONE, label, labels};

/// Residual capacities at or below this are treated as saturated.
const FLOW_EPSILON: Weight = 1e-12;

/// Result of a maximum flow computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult<V> {
    /// Total flow from source to sink.
    pub max_flow: Weight,
    /// Positive flow on each original edge, carried in `weight`.
    pub flows: Vec<Edge<V>>,
    /// Number of augmenting paths used.
    pub augmentations: usize,
    source_side: Vec<V>,
    cut: Vec<Edge<V>>,
}

impl<V> MaxFlowResult<V> {
    /// Vertices reachable from the source in the final residual network.
    ///
    /// This is the source side of a minimum cut.
    #[must_use]
    pub fn min_cut_source_side(&self) -> &[V] {
        &self.source_side
    }

    /// Original edges crossing the minimum cut, with their capacities.
    ///
    /// Their capacities sum to [`max_flow`](Self::max_flow).
    #[must_use]
    pub fn min_cut_edges(&self) -> &[Edge<V>] {
        &self.cut
    }
}

#[derive(Clone, Copy)]
enum PathSearch {
    DepthFirst,
    BreadthFirst,
}

struct ResidualNetwork {
    head: Vec<Vec<usize>>,
    to: Vec<usize>,
    residual: Vec<Weight>,
    capacity: Vec<Weight>,
}

impl ResidualNetwork {
    fn new(adj: &IndexedAdjacency) -> Self {
        let n = adj.vertex_count();
        let arcs = adj.arc_count() * 2;
        let mut network = Self {
            head: vec![Vec::new(); n],
            to: Vec::with_capacity(arcs),
            residual: Vec::with_capacity(arcs),
            capacity: Vec::with_capacity(arcs),
        };
        for u in 0..n {
            for (v, c) in adj.arcs(u) {
                network.add_arc(u, v, c);
            }
        }
        network
    }

    fn add_arc(&mut self, u: usize, v: usize, capacity: Weight) {
        self.head[u].push(self.to.len());
        self.to.push(v);
        self.residual.push(capacity);
        self.capacity.push(capacity);

        self.head[v].push(self.to.len());
        self.to.push(u);
        self.residual.push(0.0);
        self.capacity.push(0.0);
    }

    fn tail(&self, arc: usize) -> usize {
        self.to[arc ^ 1]
    }

    fn open(&self, arc: usize) -> bool {
        self.residual[arc] > FLOW_EPSILON
    }

    /// Arc used to reach each vertex, or `None` if `t` is unreachable.
    fn find_path(&self, s: usize, t: usize, search: PathSearch) -> Option<Vec<usize>> {
        match search {
            PathSearch::BreadthFirst => self.bfs_path(s, t),
            PathSearch::DepthFirst => self.dfs_path(s, t),
        }
    }

    fn bfs_path(&self, s: usize, t: usize) -> Option<Vec<usize>> {
        let n = self.head.len();
        let mut parent_arc = vec![NONE; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::from([s]);
        visited[s] = true;

        while let Some(u) = queue.pop_front() {
            for &arc in &self.head[u] {
                let v = self.to[arc];
                if visited[v] || !self.open(arc) {
                    continue;
                }
                visited[v] = true;
                parent_arc[v] = arc;
                if v == t {
                    return Some(parent_arc);
                }
                queue.push_back(v);
            }
        }
        None
    }

    fn dfs_path(&self, s: usize, t: usize) -> Option<Vec<usize>> {
        let n = self.head.len();
        let mut parent_arc = vec![NONE; n];
        let mut visited = vec![false; n];
        let mut stack = vec![(s, 0usize)];
        visited[s] = true;

        while let Some(frame) = stack.last_mut() {
            let (u, pos) = *frame;
            let Some(&arc) = self.head[u].get(pos) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;
            let v = self.to[arc];
            if visited[v] || !self.open(arc) {
                continue;
            }
            visited[v] = true;
            parent_arc[v] = arc;
            if v == t {
                return Some(parent_arc);
            }
            stack.push((v, 0));
        }
        None
    }

    /// Pushes the bottleneck amount along the path ending at `t`.
    fn augment(&mut self, parent_arc: &[usize], s: usize, t: usize) -> Weight {
        let mut bottleneck = Weight::INFINITY;
        let mut v = t;
        while v != s {
            let arc = parent_arc[v];
            bottleneck = bottleneck.min(self.residual[arc]);
            v = self.tail(arc);
        }

        let mut v = t;
        while v != s {
            let arc = parent_arc[v];
            self.residual[arc] -= bottleneck;
            self.residual[arc ^ 1] += bottleneck;
            v = self.tail(arc);
        }
        bottleneck
    }

    fn reachable_from(&self, s: usize) -> Vec<bool> {
        let mut seen = vec![false; self.head.len()];
        let mut stack = vec![s];
        seen[s] = true;
        while let Some(u) = stack.pop() {
            for &arc in &self.head[u] {
                let v = self.to[arc];
                if !seen[v] && self.open(arc) {
                    seen[v] = true;
                    stack.push(v);
                }
            }
        }
        seen
    }

    /// Forward arcs as `(arc, tail, head)`.
    fn forward_arcs(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.to.len())
            .step_by(2)
            .map(|arc| (arc, self.tail(arc), self.to[arc]))
    }
}

fn check_network<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
    sink: &V,
    algorithm: &'static str,
) -> Result<(usize, usize)> {
    if !graph.is_directed() {
        return Err(Error::precondition(algorithm, "graph must be directed"));
    }
    if !graph.is_weighted() {
        return Err(Error::precondition(algorithm, "graph must be weighted"));
    }
    if graph.has_negative_weight() {
        return Err(Error::precondition(algorithm, "capacities must be non-negative"));
    }
    let s = graph.require(source)?;
    let t = graph.require(sink)?;
    if s == t {
        return Err(Error::precondition(algorithm, "source and sink must differ"));
    }
    Ok((s, t))
}

fn max_flow<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
    sink: &V,
    search: PathSearch,
    algorithm: &'static str,
) -> Result<MaxFlowResult<V>> {
    let (s, t) = check_network(graph, source, sink, algorithm)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let mut network = ResidualNetwork::new(&adj);

    let mut total = 0.0;
    let mut augmentations = 0;
    while let Some(parent_arc) = network.find_path(s, t, search) {
        let pushed = network.augment(&parent_arc, s, t);
        augmentations += 1;
        total += pushed;
        trace!(algorithm, augmentations, pushed, "augmenting path");
    }

    let mut flows = Vec::new();
    let mut cut = Vec::new();
    let reachable = network.reachable_from(s);
    for (arc, u, v) in network.forward_arcs() {
        let (Some(from), Some(to)) = (label(graph, u), label(graph, v)) else {
            continue;
        };
        let flow = network.capacity[arc] - network.residual[arc];
        if reachable[u] && !reachable[v] {
            cut.push(Edge::new(from.clone(), to.clone(), network.capacity[arc]));
        }
        if flow > FLOW_EPSILON {
            flows.push(Edge::new(from, to, flow));
        }
    }

    let source_side: Vec<usize> = (0..reachable.len()).filter(|&u| reachable[u]).collect();
    debug!(algorithm, max_flow = total, augmentations, "maximum flow complete");

    Ok(MaxFlowResult {
        max_flow: total,
        flows,
        augmentations,
        source_side: labels(graph, &source_side),
        cut,
    })
}

/// Maximum flow with depth-first augmenting paths.
///
/// Terminates for integral capacities; with arbitrary real capacities the
/// number of augmentations is not bounded by the graph size. Prefer
/// [`edmonds_karp`] when that matters.
///
/// # Errors
///
/// Returns [`Error::Precondition`] unless the graph is directed and
/// weighted with non-negative capacities and `source != sink`, and
/// [`Error::VertexNotFound`] if either terminal is missing.
pub fn ford_fulkerson<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
    sink: &V,
) -> Result<MaxFlowResult<V>> {
    max_flow(graph, source, sink, PathSearch::DepthFirst, "ford_fulkerson")
}

/// Maximum flow with breadth-first (fewest edges) augmenting paths.
///
/// Time complexity: O(V * E^2)
///
/// # Errors
///
/// Same as [`ford_fulkerson`].
pub fn edmonds_karp<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
    sink: &V,
) -> Result<MaxFlowResult<V>> {
    max_flow(graph, source, sink, PathSearch::BreadthFirst, "edmonds_karp")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(edges: &[(&'static str, &'static str, f64)]) -> Graph<&'static str> {
        let mut g = Graph::new(true, true);
        for &(u, v, c) in edges {
            g.add_edge(u, v, c);
        }
        g
    }

    /// The textbook network with maximum flow 23.
    fn textbook() -> Graph<&'static str> {
        network(&[
            ("s", "v1", 16.0),
            ("s", "v2", 13.0),
            ("v1", "v3", 12.0),
            ("v2", "v1", 4.0),
            ("v3", "v2", 9.0),
            ("v2", "v4", 14.0),
            ("v4", "v3", 7.0),
            ("v3", "t", 20.0),
            ("v4", "t", 4.0),
        ])
    }

    fn assert_conserved(result: &MaxFlowResult<&str>, source: &str, sink: &str) {
        let mut vertices: Vec<&str> = result
            .flows
            .iter()
            .flat_map(|e| [e.source, e.target])
            .collect();
        vertices.sort_unstable();
        vertices.dedup();

        for v in vertices {
            let inflow: f64 = result
                .flows
                .iter()
                .filter(|e| e.target == v)
                .map(|e| e.weight)
                .sum();
            let outflow: f64 = result
                .flows
                .iter()
                .filter(|e| e.source == v)
                .map(|e| e.weight)
                .sum();
            if v == source {
                assert_eq!(outflow - inflow, result.max_flow);
            } else if v == sink {
                assert_eq!(inflow - outflow, result.max_flow);
            } else {
                assert_eq!(inflow, outflow, "flow not conserved at {v}");
            }
        }
    }

    #[test]
    fn test_chain_bottleneck() {
        let g = network(&[("S", "A", 10.0), ("A", "B", 5.0), ("B", "T", 7.0)]);
        let result = ford_fulkerson(&g, &"S", &"T").unwrap();

        assert_eq!(result.max_flow, 5.0);
        assert_eq!(result.augmentations, 1);
        assert_eq!(result.min_cut_source_side(), &["S", "A"]);
        assert_eq!(result.min_cut_edges(), &[Edge::new("A", "B", 5.0)]);
        assert_eq!(result.flows.len(), 3);
        assert!(result.flows.iter().all(|e| e.weight == 5.0));
    }

    #[test]
    fn test_textbook_network() {
        let g = textbook();
        for result in [
            ford_fulkerson(&g, &"s", &"t").unwrap(),
            edmonds_karp(&g, &"s", &"t").unwrap(),
        ] {
            assert_eq!(result.max_flow, 23.0);
            assert_conserved(&result, "s", "t");

            let cut: f64 = result.min_cut_edges().iter().map(|e| e.weight).sum();
            assert_eq!(cut, 23.0);
            assert!(result.min_cut_source_side().contains(&"s"));
            assert!(!result.min_cut_source_side().contains(&"t"));
        }
    }

    #[test]
    fn test_flow_respects_capacity() {
        let g = textbook();
        let result = edmonds_karp(&g, &"s", &"t").unwrap();
        for flow in &result.flows {
            let capacity = g.edge_weight(&flow.source, &flow.target).unwrap();
            assert!(flow.weight <= capacity);
        }
    }

    #[test]
    fn test_parallel_edges_add_up() {
        let g = network(&[("S", "T", 3.0), ("S", "T", 4.0)]);
        let result = edmonds_karp(&g, &"S", &"T").unwrap();
        assert_eq!(result.max_flow, 7.0);
        assert_eq!(result.flows.len(), 2);
        assert_eq!(result.augmentations, 2);
    }

    #[test]
    fn test_no_path() {
        let mut g = network(&[("S", "A", 3.0)]);
        g.add_vertex("T");
        let result = ford_fulkerson(&g, &"S", &"T").unwrap();
        assert_eq!(result.max_flow, 0.0);
        assert_eq!(result.augmentations, 0);
        assert!(result.flows.is_empty());
        assert_eq!(result.min_cut_source_side(), &["S", "A"]);
    }

    #[test]
    fn test_reverse_arc_is_used() {
        // DFS first takes S-A-B-T; the second path must cancel flow on A-B.
        let g = network(&[
            ("S", "A", 1.0),
            ("S", "B", 1.0),
            ("A", "B", 1.0),
            ("A", "T", 1.0),
            ("B", "T", 1.0),
        ]);
        let result = ford_fulkerson(&g, &"S", &"T").unwrap();
        assert_eq!(result.max_flow, 2.0);
        assert_eq!(result.augmentations, 2);
        assert!(result.flows.iter().all(|e| !(e.source == "A" && e.target == "B")));
    }

    #[test]
    fn test_preconditions() {
        let mut undirected = Graph::new(false, true);
        undirected.add_edge("S", "T", 1.0);
        assert!(matches!(
            ford_fulkerson(&undirected, &"S", &"T"),
            Err(Error::Precondition { .. })
        ));

        let mut unweighted = Graph::new(true, false);
        unweighted.add_unweighted_edge("S", "T");
        assert!(edmonds_karp(&unweighted, &"S", &"T").is_err());

        let negative = network(&[("S", "T", -1.0)]);
        assert!(ford_fulkerson(&negative, &"S", &"T").is_err());

        let g = network(&[("S", "T", 1.0)]);
        assert!(matches!(
            ford_fulkerson(&g, &"S", &"S"),
            Err(Error::Precondition { .. })
        ));
        assert!(matches!(
            edmonds_karp(&g, &"S", &"X"),
            Err(Error::VertexNotFound(_))
        ));
    }
}

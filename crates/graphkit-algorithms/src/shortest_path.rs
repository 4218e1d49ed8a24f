//! Shortest path algorithms: Dijkstra, Bellman-Ford, Floyd-Warshall.
//!
//! Single-source algorithms return a [`ShortestPaths`] table (distance and
//! predecessor per reached vertex). Negative cycles are reported through the
//! result types, never as errors.

use std::collections::BinaryHeap;

use graphkit_common::utils::hash::{FastHashMap, map_with_capacity};
use graphkit_common::{Error, Result, Vertex, Weight};
use graphkit_core::{Graph, IndexedAdjacency};
use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{MinScored, NONE, label};

// ============================================================================
// Result types
// ============================================================================

/// Distances and predecessors from a single source.
///
/// Only reached vertices have entries. The source has distance `0.0` and no
/// predecessor.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V: Vertex> {
    source: V,
    distances: FastHashMap<V, Weight>,
    predecessors: FastHashMap<V, V>,
}

impl<V: Vertex> ShortestPaths<V> {
    /// Builds the table from index-based arrays.
    fn from_arrays(graph: &Graph<V>, source: &V, dist: &[Weight], pred: &[usize]) -> Self {
        let mut distances = map_with_capacity(dist.len());
        let mut predecessors = map_with_capacity(dist.len());
        for (u, vertex) in graph.vertices().enumerate() {
            if dist[u].is_finite() {
                distances.insert(vertex.clone(), dist[u]);
            }
            if pred[u] != NONE
                && let Some(p) = label(graph, pred[u])
            {
                predecessors.insert(vertex.clone(), p);
            }
        }
        Self {
            source: source.clone(),
            distances,
            predecessors,
        }
    }

    /// The vertex distances are measured from.
    #[must_use]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Distance to `target`, or `None` if it was not reached.
    #[must_use]
    pub fn distance(&self, target: &V) -> Option<Weight> {
        self.distances.get(target).copied()
    }

    /// Predecessor of `target` on its shortest path.
    #[must_use]
    pub fn predecessor(&self, target: &V) -> Option<&V> {
        self.predecessors.get(target)
    }

    /// True if `target` was reached from the source.
    #[must_use]
    pub fn is_reachable(&self, target: &V) -> bool {
        self.distances.contains_key(target)
    }

    /// Full path from the source to `target`.
    #[must_use]
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        reconstruct_path(&self.predecessors, &self.source, target)
    }

    /// All reached vertices with their distances.
    #[must_use]
    pub fn distances(&self) -> &FastHashMap<V, Weight> {
        &self.distances
    }

    /// Predecessor links of every reached vertex except the source.
    #[must_use]
    pub fn predecessors(&self) -> &FastHashMap<V, V> {
        &self.predecessors
    }
}

/// Result of [`dijkstra`].
pub type DijkstraResult<V> = ShortestPaths<V>;

/// Result of [`bellman_ford`].
#[derive(Debug, Clone)]
pub enum BellmanFordResult<V: Vertex> {
    /// No negative cycle is reachable from the source.
    Paths(ShortestPaths<V>),
    /// A negative cycle is reachable, so shortest paths are undefined.
    NegativeCycle,
}

impl<V: Vertex> BellmanFordResult<V> {
    /// True if a negative cycle was detected.
    #[must_use]
    pub fn has_negative_cycle(&self) -> bool {
        matches!(self, Self::NegativeCycle)
    }

    /// The paths table, if one exists.
    #[must_use]
    pub fn paths(&self) -> Option<&ShortestPaths<V>> {
        match self {
            Self::Paths(paths) => Some(paths),
            Self::NegativeCycle => None,
        }
    }

    /// Consumes the result, returning the paths table if one exists.
    #[must_use]
    pub fn into_paths(self) -> Option<ShortestPaths<V>> {
        match self {
            Self::Paths(paths) => Some(paths),
            Self::NegativeCycle => None,
        }
    }
}

/// All-pairs distances from [`floyd_warshall`].
#[derive(Debug, Clone)]
pub struct FloydWarshallResult<V: Vertex> {
    vertices: IndexSet<V>,
    dist: Vec<Weight>,
    negative_cycle: bool,
}

impl<V: Vertex> FloydWarshallResult<V> {
    /// Distance from `u` to `v`, or `None` if unreachable or unknown.
    ///
    /// Values are meaningless when [`has_negative_cycle`](Self::has_negative_cycle)
    /// is true.
    #[must_use]
    pub fn distance(&self, u: &V, v: &V) -> Option<Weight> {
        let i = self.vertices.get_index_of(u)?;
        let j = self.vertices.get_index_of(v)?;
        let d = self.dist[i * self.vertices.len() + j];
        d.is_finite().then_some(d)
    }

    /// True if some vertex can reach itself at negative cost.
    #[must_use]
    pub fn has_negative_cycle(&self) -> bool {
        self.negative_cycle
    }

    /// Vertices in matrix order.
    #[must_use]
    pub fn vertices(&self) -> &IndexSet<V> {
        &self.vertices
    }
}

// ============================================================================
// Dijkstra
// ============================================================================

fn dijkstra_indexed(adj: &IndexedAdjacency, source: usize) -> (Vec<Weight>, Vec<usize>) {
    let n = adj.vertex_count();
    let mut dist = vec![Weight::INFINITY; n];
    let mut pred = vec![NONE; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(MinScored(0.0, source));

    while let Some(MinScored(d, u)) = heap.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;

        for (v, w) in adj.arcs(u) {
            if settled[v] {
                continue;
            }
            let candidate = d + w;
            if candidate < dist[v] {
                dist[v] = candidate;
                pred[v] = u;
                heap.push(MinScored(candidate, v));
            }
        }
    }

    (dist, pred)
}

fn ensure_non_negative<V: Vertex>(graph: &Graph<V>, algorithm: &'static str) -> Result<()> {
    if graph.has_negative_weight() {
        return Err(Error::precondition(
            algorithm,
            "edge weights must be non-negative",
        ));
    }
    Ok(())
}

/// Single-source shortest paths with Dijkstra's algorithm.
///
/// Time complexity: O((V + E) log V)
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`] if `source` is not in the graph and
/// [`Error::Precondition`] if any edge weight is negative.
pub fn dijkstra<V: Vertex>(graph: &Graph<V>, source: &V) -> Result<DijkstraResult<V>> {
    let s = graph.require(source)?;
    ensure_non_negative(graph, "dijkstra")?;

    let adj = IndexedAdjacency::from_graph(graph);
    let (dist, pred) = dijkstra_indexed(&adj, s);
    Ok(ShortestPaths::from_arrays(graph, source, &dist, &pred))
}

/// Shortest path between two vertices with Dijkstra's algorithm.
///
/// Returns the total weight and the vertex sequence, or `None` if `target`
/// is unreachable.
///
/// # Errors
///
/// Same as [`dijkstra`], plus [`Error::VertexNotFound`] for `target`.
pub fn dijkstra_path<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
    target: &V,
) -> Result<Option<(Weight, Vec<V>)>> {
    graph.require(target)?;
    let paths = dijkstra(graph, source)?;
    Ok(paths.distance(target).zip(paths.path_to(target)))
}

/// Runs [`dijkstra`] from every vertex in `sources` in parallel.
///
/// The graph is only read, so the runs share it without locking. Results
/// come back in the order of `sources`.
///
/// # Errors
///
/// Same as [`dijkstra`]; the first failing source is reported.
pub fn par_dijkstra_all<V>(graph: &Graph<V>, sources: &[V]) -> Result<Vec<DijkstraResult<V>>>
where
    V: Vertex + Send + Sync,
{
    let indices = sources
        .iter()
        .map(|s| graph.require(s))
        .collect::<Result<Vec<_>>>()?;
    ensure_non_negative(graph, "dijkstra")?;

    let adj = IndexedAdjacency::from_graph(graph);
    debug!(sources = sources.len(), "running parallel dijkstra");

    Ok(indices
        .par_iter()
        .zip(sources.par_iter())
        .map(|(&s, source)| {
            let (dist, pred) = dijkstra_indexed(&adj, s);
            ShortestPaths::from_arrays(graph, source, &dist, &pred)
        })
        .collect())
}

// ============================================================================
// Bellman-Ford
// ============================================================================

/// Single-source shortest paths allowing negative weights.
///
/// Runs at most `|V| - 1` relaxation passes, stopping early once a pass
/// changes nothing, then one detection pass. On undirected graphs a negative
/// edge is itself a negative cycle.
///
/// Time complexity: O(V * E)
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`] if `source` is not in the graph.
pub fn bellman_ford<V: Vertex>(graph: &Graph<V>, source: &V) -> Result<BellmanFordResult<V>> {
    let s = graph.require(source)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();

    let mut dist = vec![Weight::INFINITY; n];
    let mut pred = vec![NONE; n];
    dist[s] = 0.0;

    for pass in 1..n {
        let mut changed = false;
        for u in 0..n {
            if !dist[u].is_finite() {
                continue;
            }
            for (v, w) in adj.arcs(u) {
                if dist[u] + w < dist[v] {
                    dist[v] = dist[u] + w;
                    pred[v] = u;
                    changed = true;
                }
            }
        }
        if !changed {
            trace!(pass, "bellman-ford converged early");
            break;
        }
    }

    for u in 0..n {
        if !dist[u].is_finite() {
            continue;
        }
        if adj.arcs(u).any(|(v, w)| dist[u] + w < dist[v]) {
            debug!(source = ?source, "negative cycle reachable from source");
            return Ok(BellmanFordResult::NegativeCycle);
        }
    }

    Ok(BellmanFordResult::Paths(ShortestPaths::from_arrays(
        graph, source, &dist, &pred,
    )))
}

// ============================================================================
// Path reconstruction
// ============================================================================

/// Walks predecessor links back from `end` to `start`.
///
/// Returns `[start]` when `start == end`, and `None` when `end` has no
/// predecessor chain leading to `start`.
#[must_use]
pub fn reconstruct_path<V: Vertex>(
    predecessors: &FastHashMap<V, V>,
    start: &V,
    end: &V,
) -> Option<Vec<V>> {
    if start == end {
        return Some(vec![start.clone()]);
    }

    let mut path = vec![end.clone()];
    let mut current = end;
    while let Some(previous) = predecessors.get(current) {
        path.push(previous.clone());
        if previous == start {
            path.reverse();
            return Some(path);
        }
        // A well-formed predecessor map is a forest; stop on a cycle.
        if path.len() > predecessors.len() + 1 {
            return None;
        }
        current = previous;
    }
    None
}

// ============================================================================
// Floyd-Warshall
// ============================================================================

/// All-pairs shortest distances.
///
/// Parallel edges keep the cheapest weight. A negative cycle shows up as a
/// negative diagonal entry and sets
/// [`has_negative_cycle`](FloydWarshallResult::has_negative_cycle).
///
/// Time complexity: O(V^3)
#[must_use]
pub fn floyd_warshall<V: Vertex>(graph: &Graph<V>) -> FloydWarshallResult<V> {
    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();
    let mut dist = vec![Weight::INFINITY; n * n];

    for u in 0..n {
        dist[u * n + u] = 0.0;
        for (v, w) in adj.arcs(u) {
            let cell = &mut dist[u * n + v];
            *cell = cell.min(w);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let ik = dist[i * n + k];
            if !ik.is_finite() {
                continue;
            }
            for j in 0..n {
                let candidate = ik + dist[k * n + j];
                if candidate < dist[i * n + j] {
                    dist[i * n + j] = candidate;
                }
            }
        }
    }

    let negative_cycle = (0..n).any(|i| dist[i * n + i] < 0.0);
    if negative_cycle {
        debug!("floyd-warshall found a negative cycle");
    }

    FloydWarshallResult {
        vertices: graph.vertex_set(),
        dist,
        negative_cycle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph<&'static str> {
        let mut g = Graph::new(true, true);
        g.add_edge("A", "B", 4.0);
        g.add_edge("A", "C", 2.0);
        g.add_edge("C", "B", 1.0);
        g.add_edge("B", "D", 3.0);
        g.add_edge("C", "D", 5.0);
        g
    }

    #[test]
    fn test_dijkstra_distances() {
        let result = dijkstra(&sample(), &"A").unwrap();

        assert_eq!(result.source(), &"A");
        assert_eq!(result.distance(&"A"), Some(0.0));
        assert_eq!(result.distance(&"C"), Some(2.0));
        assert_eq!(result.distance(&"B"), Some(3.0));
        assert_eq!(result.distance(&"D"), Some(6.0));
        assert_eq!(result.predecessor(&"A"), None);
        assert_eq!(result.predecessor(&"B"), Some(&"C"));
    }

    #[test]
    fn test_dijkstra_paths() {
        let result = dijkstra(&sample(), &"A").unwrap();
        assert_eq!(result.path_to(&"B"), Some(vec!["A", "C", "B"]));
        assert_eq!(result.path_to(&"D"), Some(vec!["A", "C", "B", "D"]));
        assert_eq!(result.path_to(&"A"), Some(vec!["A"]));
    }

    #[test]
    fn test_dijkstra_unreachable() {
        let mut g = sample();
        g.add_vertex("E");
        let result = dijkstra(&g, &"B").unwrap();

        assert!(!result.is_reachable(&"A"));
        assert!(!result.is_reachable(&"E"));
        assert_eq!(result.distance(&"D"), Some(3.0));
        assert_eq!(result.distances().len(), 2);
        assert_eq!(result.path_to(&"E"), None);
    }

    #[test]
    fn test_dijkstra_negative_weight_rejected() {
        let mut g = sample();
        g.add_edge("D", "A", -1.0);
        assert!(matches!(
            dijkstra(&g, &"A"),
            Err(Error::Precondition { algorithm: "dijkstra", .. })
        ));
    }

    #[test]
    fn test_dijkstra_missing_source() {
        assert!(matches!(
            dijkstra(&sample(), &"Z"),
            Err(Error::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_dijkstra_parallel_edges_and_self_loop() {
        let mut g = Graph::new(true, true);
        g.add_edge(1, 2, 5.0);
        g.add_edge(1, 2, 2.0);
        g.add_edge(2, 2, 0.5);
        let result = dijkstra(&g, &1).unwrap();
        assert_eq!(result.distance(&2), Some(2.0));
    }

    #[test]
    fn test_dijkstra_path() {
        let g = sample();
        assert_eq!(
            dijkstra_path(&g, &"A", &"D").unwrap(),
            Some((6.0, vec!["A", "C", "B", "D"]))
        );
        assert_eq!(dijkstra_path(&g, &"D", &"A").unwrap(), None);
        assert!(dijkstra_path(&g, &"A", &"Z").is_err());
    }

    #[test]
    fn test_par_dijkstra_all() {
        let g = sample();
        let sources = ["A", "C", "D"];
        let results = par_dijkstra_all(&g, &sources).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].distance(&"D"), Some(6.0));
        assert_eq!(results[1].source(), &"C");
        assert_eq!(results[1].distance(&"D"), Some(4.0));
        assert_eq!(results[2].distances().len(), 1);

        assert!(par_dijkstra_all(&g, &["A", "Z"]).is_err());
    }

    #[test]
    fn test_bellman_ford_matches_dijkstra() {
        let g = sample();
        let bf = bellman_ford(&g, &"A").unwrap();
        let paths = bf.paths().unwrap();
        let dj = dijkstra(&g, &"A").unwrap();

        for v in ["A", "B", "C", "D"] {
            assert_eq!(paths.distance(&v), dj.distance(&v));
        }
        assert!(!bf.has_negative_cycle());
    }

    #[test]
    fn test_bellman_ford_negative_edge() {
        let mut g = Graph::new(true, true);
        g.add_edge("S", "A", 4.0);
        g.add_edge("S", "B", 5.0);
        g.add_edge("B", "A", -3.0);

        let paths = bellman_ford(&g, &"S").unwrap().into_paths().unwrap();
        assert_eq!(paths.distance(&"A"), Some(2.0));
        assert_eq!(paths.path_to(&"A"), Some(vec!["S", "B", "A"]));
    }

    #[test]
    fn test_bellman_ford_negative_cycle() {
        let mut g = Graph::new(true, true);
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", -2.0);
        g.add_edge("C", "A", -1.0);

        let result = bellman_ford(&g, &"A").unwrap();
        assert!(result.has_negative_cycle());
        assert!(result.paths().is_none());
    }

    #[test]
    fn test_bellman_ford_unreachable_cycle_ignored() {
        let mut g = Graph::new(true, true);
        g.add_edge("S", "T", 1.0);
        g.add_edge("X", "Y", -1.0);
        g.add_edge("Y", "X", -1.0);

        let result = bellman_ford(&g, &"S").unwrap();
        assert!(!result.has_negative_cycle());
    }

    #[test]
    fn test_bellman_ford_undirected_negative_edge() {
        let mut g = Graph::new(false, true);
        g.add_edge(1, 2, -1.0);
        assert!(bellman_ford(&g, &1).unwrap().has_negative_cycle());
    }

    #[test]
    fn test_reconstruct_path() {
        let mut preds: FastHashMap<&str, &str> = map_with_capacity(4);
        preds.insert("B", "A");
        preds.insert("C", "B");

        assert_eq!(reconstruct_path(&preds, &"A", &"C"), Some(vec!["A", "B", "C"]));
        assert_eq!(reconstruct_path(&preds, &"A", &"A"), Some(vec!["A"]));
        assert_eq!(reconstruct_path(&preds, &"A", &"D"), None);

        preds.insert("A", "C");
        assert_eq!(reconstruct_path(&preds, &"X", &"C"), None);
    }

    #[test]
    fn test_floyd_warshall() {
        let g = sample();
        let all = floyd_warshall(&g);

        assert!(!all.has_negative_cycle());
        assert_eq!(all.distance(&"A", &"D"), Some(6.0));
        assert_eq!(all.distance(&"C", &"D"), Some(4.0));
        assert_eq!(all.distance(&"D", &"D"), Some(0.0));
        assert_eq!(all.distance(&"D", &"A"), None);
        assert_eq!(all.distance(&"A", &"Z"), None);
        assert_eq!(all.vertices().len(), 4);
    }

    #[test]
    fn test_floyd_warshall_negative_cycle() {
        let mut g = Graph::new(true, true);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 1, -2.0);
        assert!(floyd_warshall(&g).has_negative_cycle());
    }
}

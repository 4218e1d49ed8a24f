//! Connectivity: connected components, cycle detection, topological order
//! and strongly connected components.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use graphkit_common::{Error, Result, Vertex};
use graphkit_core::{DisjointSet, Graph, IndexedAdjacency};
use tracing::debug;

use crate::traversal::preorder;
use crate::{NONE, labels};

// ============================================================================
// Connected components
// ============================================================================

/// Connected components, each listed in DFS preorder from its first vertex.
///
/// Seeds are taken in insertion order, so isolated vertices appear as
/// singletons at their insertion position. On directed graphs edge direction
/// is ignored (weak components).
#[must_use]
pub fn connected_components<V: Vertex>(graph: &Graph<V>) -> Vec<Vec<V>> {
    let adj = IndexedAdjacency::from_graph(graph).symmetrize();
    let n = adj.vertex_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        let mut members = Vec::new();
        preorder(&adj, seed, &mut visited, &mut members);
        components.push(labels(graph, &members));
    }

    components
}

/// Number of connected (weak, for directed graphs) components.
#[must_use]
pub fn connected_component_count<V: Vertex>(graph: &Graph<V>) -> usize {
    connected_components(graph).len()
}

/// Connected components computed with a [`DisjointSet`].
///
/// Yields the same partition as [`connected_components`]. Members are listed
/// in insertion order.
///
/// # Errors
///
/// Propagates lookup errors from the disjoint set; every edge endpoint is a
/// registered vertex, so none occur on a well-formed graph.
pub fn connected_components_union_find<V: Vertex>(graph: &Graph<V>) -> Result<Vec<Vec<V>>> {
    let mut sets = DisjointSet::from_elements(graph.vertices().cloned());
    for edge in graph.edges() {
        sets.union(&edge.source, &edge.target)?;
    }
    Ok(sets.sets().into_iter().map(|(_, members)| members).collect())
}

// ============================================================================
// Cycle detection
// ============================================================================

/// True if the graph contains a cycle.
///
/// Undirected graphs: a cycle is an edge to a visited vertex other than the
/// DFS parent. Only one edge back to the parent is excused, so a parallel
/// edge forms a cycle, and so does a self-loop.
///
/// Directed graphs: three-color DFS, a cycle is an edge into a vertex that
/// is still on the stack.
#[must_use]
pub fn has_cycle<V: Vertex>(graph: &Graph<V>) -> bool {
    let adj = IndexedAdjacency::from_graph(graph);
    let found = if graph.is_directed() {
        has_directed_cycle(&adj)
    } else {
        has_undirected_cycle(&adj)
    };
    if found {
        debug!("cycle detected");
    }
    found
}

fn has_undirected_cycle(adj: &IndexedAdjacency) -> bool {
    let n = adj.vertex_count();
    let mut visited = vec![false; n];

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        // (vertex, next arc, parent, parent edge already skipped)
        let mut stack = vec![(root, 0usize, NONE, false)];

        while let Some(frame) = stack.last_mut() {
            let (u, pos, parent, skipped) = *frame;
            let targets = adj.targets(u);
            if pos >= targets.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;
            let v = targets[pos];
            if v == parent && !skipped {
                frame.3 = true;
                continue;
            }
            if visited[v] {
                return true;
            }
            visited[v] = true;
            stack.push((v, 0, u, false));
        }
    }
    false
}

/// Undirected cycle check with a [`DisjointSet`].
///
/// Edges are merged one at a time; an edge whose endpoints are already in
/// the same set closes a cycle. Agrees with [`has_cycle`] on undirected
/// graphs, including parallel edges and self-loops.
///
/// # Errors
///
/// Returns [`Error::Precondition`] if the graph is directed.
pub fn has_cycle_union_find<V: Vertex>(graph: &Graph<V>) -> Result<bool> {
    if graph.is_directed() {
        return Err(Error::precondition("has_cycle_union_find", "graph must be undirected"));
    }

    let mut sets = DisjointSet::from_elements(graph.vertices().cloned());
    for edge in graph.edges() {
        if edge.is_self_loop() || !sets.union(&edge.source, &edge.target)? {
            debug!(source = ?edge.source, target = ?edge.target, "edge closes a cycle");
            return Ok(true);
        }
    }
    Ok(false)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

fn has_directed_cycle(adj: &IndexedAdjacency) -> bool {
    directed_postorder(adj).is_none()
}

/// DFS postorder over the whole graph, or `None` on a back edge.
fn directed_postorder(adj: &IndexedAdjacency) -> Option<Vec<usize>> {
    let n = adj.vertex_count();
    let mut color = vec![Color::White; n];
    let mut postorder = Vec::with_capacity(n);

    for root in 0..n {
        if color[root] != Color::White {
            continue;
        }
        color[root] = Color::Gray;
        let mut stack = vec![(root, 0usize)];

        while let Some(frame) = stack.last_mut() {
            let (u, pos) = *frame;
            let targets = adj.targets(u);
            if pos < targets.len() {
                frame.1 += 1;
                let v = targets[pos];
                match color[v] {
                    Color::Gray => return None,
                    Color::White => {
                        color[v] = Color::Gray;
                        stack.push((v, 0));
                    }
                    Color::Black => {}
                }
            } else {
                color[u] = Color::Black;
                postorder.push(u);
                stack.pop();
            }
        }
    }

    Some(postorder)
}

// ============================================================================
// Topological sort
// ============================================================================

/// Outcome of a topological sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologicalOrder<V> {
    /// Every vertex, each before all of its successors.
    Sorted(Vec<V>),
    /// The graph has a cycle; no partial order is returned.
    CycleDetected,
}

impl<V> TopologicalOrder<V> {
    /// True if a cycle prevented sorting.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected)
    }

    /// The order, if one exists.
    #[must_use]
    pub fn order(&self) -> Option<&[V]> {
        match self {
            Self::Sorted(order) => Some(order),
            Self::CycleDetected => None,
        }
    }

    /// Consumes the result, returning the order if one exists.
    #[must_use]
    pub fn into_order(self) -> Option<Vec<V>> {
        match self {
            Self::Sorted(order) => Some(order),
            Self::CycleDetected => None,
        }
    }
}

fn require_directed<V: Vertex>(graph: &Graph<V>, algorithm: &'static str) -> Result<()> {
    if graph.is_directed() {
        Ok(())
    } else {
        Err(Error::precondition(algorithm, "graph must be directed"))
    }
}

/// Topological order with Kahn's algorithm.
///
/// Among vertices that are ready at the same time, the one inserted first
/// comes first, so the order is deterministic.
///
/// # Errors
///
/// Returns [`Error::Precondition`] for undirected graphs.
pub fn topological_sort<V: Vertex>(graph: &Graph<V>) -> Result<TopologicalOrder<V>> {
    require_directed(graph, "topological_sort")?;
    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();

    let mut in_degree = adj.in_degrees();
    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&u| in_degree[u] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(n);

    while let Some(Reverse(u)) = ready.pop() {
        order.push(u);
        for &v in adj.targets(u) {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                ready.push(Reverse(v));
            }
        }
    }

    if order.len() < n {
        debug!(
            sorted = order.len(),
            vertices = n,
            "topological sort found a cycle"
        );
        return Ok(TopologicalOrder::CycleDetected);
    }
    Ok(TopologicalOrder::Sorted(labels(graph, &order)))
}

/// Topological order from reversed DFS finishing times.
///
/// # Errors
///
/// Returns [`Error::Precondition`] for undirected graphs.
pub fn topological_sort_dfs<V: Vertex>(graph: &Graph<V>) -> Result<TopologicalOrder<V>> {
    require_directed(graph, "topological_sort_dfs")?;
    let adj = IndexedAdjacency::from_graph(graph);
    match directed_postorder(&adj) {
        Some(mut order) => {
            order.reverse();
            Ok(TopologicalOrder::Sorted(labels(graph, &order)))
        }
        None => {
            debug!("topological sort found a cycle");
            Ok(TopologicalOrder::CycleDetected)
        }
    }
}

/// True if the graph is directed and acyclic.
///
/// Undirected graphs are never DAGs.
#[must_use]
pub fn is_dag<V: Vertex>(graph: &Graph<V>) -> bool {
    graph.is_directed() && !has_directed_cycle(&IndexedAdjacency::from_graph(graph))
}

// ============================================================================
// Strongly connected components
// ============================================================================

/// Strongly connected components with Kosaraju's algorithm.
///
/// First pass records DFS finishing order on the graph; the second pass runs
/// DFS on the transpose in reverse finishing order, and each tree is one
/// component. Components come out in topological order of the condensation.
/// On undirected graphs this equals [`connected_components`].
#[must_use]
pub fn kosaraju_scc<V: Vertex>(graph: &Graph<V>) -> Vec<Vec<V>> {
    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();

    let mut visited = vec![false; n];
    let mut finished = Vec::with_capacity(n);
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack = vec![(root, 0usize)];
        while let Some(frame) = stack.last_mut() {
            let (u, pos) = *frame;
            let targets = adj.targets(u);
            if pos < targets.len() {
                frame.1 += 1;
                let v = targets[pos];
                if !visited[v] {
                    visited[v] = true;
                    stack.push((v, 0));
                }
            } else {
                finished.push(u);
                stack.pop();
            }
        }
    }

    let transpose = adj.transpose();
    let mut assigned = vec![false; n];
    let mut components = Vec::new();
    for &root in finished.iter().rev() {
        if assigned[root] {
            continue;
        }
        let mut members = Vec::new();
        preorder(&transpose, root, &mut assigned, &mut members);
        components.push(labels(graph, &members));
    }

    components
}

/// Number of strongly connected components.
#[must_use]
pub fn strongly_connected_component_count<V: Vertex>(graph: &Graph<V>) -> usize {
    kosaraju_scc(graph).len()
}

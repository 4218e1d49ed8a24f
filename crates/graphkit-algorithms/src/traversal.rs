//! Graph traversal algorithms: DFS and BFS.
//!
//! All traversals run on an [`IndexedAdjacency`] snapshot and visit
//! neighbors in adjacency order, so results are deterministic for a given
//! construction sequence. Only [`dfs_recursive`] uses the call stack.

use std::collections::VecDeque;

use graphkit_common::utils::hash::{FastHashMap, map_with_capacity};
use graphkit_common::{Result, Vertex};
use graphkit_core::{Graph, IndexedAdjacency};
use tracing::debug;

use crate::{Control, NONE, TraversalEvent, label, labels};

/// Vertex count above which [`dfs_recursive`] switches to [`dfs`].
pub const MAX_RECURSION_DEPTH: usize = 4096;

// ============================================================================
// Depth-first search
// ============================================================================

/// Appends the DFS preorder reachable from `start` to `out`.
///
/// Frames are `(vertex, next arc position)`, which reproduces the recursive
/// visiting order exactly.
pub(crate) fn preorder(
    adj: &IndexedAdjacency,
    start: usize,
    visited: &mut [bool],
    out: &mut Vec<usize>,
) {
    if visited[start] {
        return;
    }
    visited[start] = true;
    out.push(start);

    let mut stack = vec![(start, 0usize)];
    while let Some(frame) = stack.last_mut() {
        let (u, pos) = *frame;
        let targets = adj.targets(u);
        if pos < targets.len() {
            frame.1 += 1;
            let v = targets[pos];
            if !visited[v] {
                visited[v] = true;
                out.push(v);
                stack.push((v, 0));
            }
        } else {
            stack.pop();
        }
    }
}

/// Depth-first preorder from `start`.
///
/// Uses an explicit stack and never overflows, yet produces the same order
/// as [`dfs_recursive`].
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn dfs<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<V>> {
    let s = graph.require(start)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let mut visited = vec![false; adj.vertex_count()];
    let mut order = Vec::new();
    preorder(&adj, s, &mut visited, &mut order);
    Ok(labels(graph, &order))
}

/// Recursive depth-first preorder from `start`.
///
/// Graphs with more than [`MAX_RECURSION_DEPTH`] vertices are handed to
/// [`dfs`] instead, which yields the same order.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn dfs_recursive<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<V>> {
    fn visit(adj: &IndexedAdjacency, u: usize, visited: &mut [bool], out: &mut Vec<usize>) {
        visited[u] = true;
        out.push(u);
        for &v in adj.targets(u) {
            if !visited[v] {
                visit(adj, v, visited, out);
            }
        }
    }

    if graph.vertex_count() > MAX_RECURSION_DEPTH {
        debug!(
            vertices = graph.vertex_count(),
            limit = MAX_RECURSION_DEPTH,
            "recursive DFS falling back to explicit stack"
        );
        return dfs(graph, start);
    }

    let s = graph.require(start)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let mut visited = vec![false; adj.vertex_count()];
    let mut order = Vec::new();
    visit(&adj, s, &mut visited, &mut order);
    Ok(labels(graph, &order))
}

/// Stack-based DFS that pushes neighbors in reverse.
///
/// Visits the same set as [`dfs`]; the order can differ when a vertex is
/// reachable along several branches, because a vertex is marked when popped
/// rather than when first seen.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn dfs_iterative<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<V>> {
    let s = graph.require(start)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let mut visited = vec![false; adj.vertex_count()];
    let mut order = Vec::new();
    let mut stack = vec![s];

    while let Some(u) = stack.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        order.push(u);
        for &v in adj.targets(u).iter().rev() {
            if !visited[v] {
                stack.push(v);
            }
        }
    }

    Ok(labels(graph, &order))
}

/// Depth-first traversal reporting [`TraversalEvent`]s to `visitor`.
///
/// Returning [`Control::Prune`] from `Discover` or `TreeEdge` skips the
/// subtree below that vertex; [`Control::Break`] ends the traversal.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn dfs_with_visitor<'g, V, F>(graph: &'g Graph<V>, start: &V, mut visitor: F) -> Result<()>
where
    V: Vertex,
    F: FnMut(TraversalEvent<'g, V>) -> Control,
{
    let s = graph.require(start)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let names: Vec<&'g V> = graph.vertices().collect();
    let mut visited = vec![false; adj.vertex_count()];

    visited[s] = true;
    match visitor(TraversalEvent::Discover(names[s])) {
        Control::Break => return Ok(()),
        Control::Prune => {
            visitor(TraversalEvent::Finish(names[s]));
            return Ok(());
        }
        Control::Continue => {}
    }

    let mut stack = vec![(s, 0usize)];
    while let Some(frame) = stack.last_mut() {
        let (u, pos) = *frame;
        let targets = adj.targets(u);

        if pos >= targets.len() {
            stack.pop();
            if visitor(TraversalEvent::Finish(names[u])) == Control::Break {
                return Ok(());
            }
            continue;
        }

        frame.1 += 1;
        let v = targets[pos];
        if visited[v] {
            if visitor(TraversalEvent::NonTreeEdge(names[u], names[v])) == Control::Break {
                return Ok(());
            }
            continue;
        }

        match visitor(TraversalEvent::TreeEdge(names[u], names[v])) {
            Control::Break => return Ok(()),
            Control::Prune => continue,
            Control::Continue => {}
        }

        visited[v] = true;
        match visitor(TraversalEvent::Discover(names[v])) {
            Control::Break => return Ok(()),
            Control::Prune => {
                if visitor(TraversalEvent::Finish(names[v])) == Control::Break {
                    return Ok(());
                }
            }
            Control::Continue => stack.push((v, 0)),
        }
    }

    Ok(())
}

/// Discovery and finish times of a full depth-first search.
///
/// Times come from a single counter that ticks on every discovery and every
/// finish, starting at 1, so for any vertex `discovery < finish` and the
/// intervals of two vertices are either nested or disjoint.
#[derive(Debug, Clone)]
pub struct DfsTimestamps<V: Vertex> {
    discovery: FastHashMap<V, usize>,
    finish: FastHashMap<V, usize>,
    parent: FastHashMap<V, V>,
}

impl<V: Vertex> DfsTimestamps<V> {
    /// Time at which `vertex` was discovered.
    #[must_use]
    pub fn discovery(&self, vertex: &V) -> Option<usize> {
        self.discovery.get(vertex).copied()
    }

    /// Time at which every edge of `vertex` had been explored.
    #[must_use]
    pub fn finish(&self, vertex: &V) -> Option<usize> {
        self.finish.get(vertex).copied()
    }

    /// DFS-tree parent of `vertex`; `None` for tree roots.
    #[must_use]
    pub fn parent(&self, vertex: &V) -> Option<&V> {
        self.parent.get(vertex)
    }

    /// True if `ancestor`'s interval contains `descendant`'s.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: &V, descendant: &V) -> bool {
        match (
            self.discovery(ancestor),
            self.finish(ancestor),
            self.discovery(descendant),
            self.finish(descendant),
        ) {
            (Some(d1), Some(f1), Some(d2), Some(f2)) => d1 <= d2 && f2 <= f1,
            _ => false,
        }
    }
}

/// Runs DFS over the whole graph and records timestamps.
///
/// The search starts at `start`, then restarts from every still unvisited
/// vertex in insertion order.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn dfs_timestamps<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<DfsTimestamps<V>> {
    let s = graph.require(start)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();

    let mut discovery = vec![0usize; n];
    let mut finish = vec![0usize; n];
    let mut parent = vec![NONE; n];
    let mut time = 0usize;

    let roots = std::iter::once(s).chain((0..n).filter(|&u| u != s));
    for root in roots {
        if discovery[root] != 0 {
            continue;
        }
        time += 1;
        discovery[root] = time;
        let mut stack = vec![(root, 0usize)];

        while let Some(frame) = stack.last_mut() {
            let (u, pos) = *frame;
            let targets = adj.targets(u);
            if pos < targets.len() {
                frame.1 += 1;
                let v = targets[pos];
                if discovery[v] == 0 {
                    time += 1;
                    discovery[v] = time;
                    parent[v] = u;
                    stack.push((v, 0));
                }
            } else {
                time += 1;
                finish[u] = time;
                stack.pop();
            }
        }
    }

    let mut result = DfsTimestamps {
        discovery: map_with_capacity(n),
        finish: map_with_capacity(n),
        parent: map_with_capacity(n),
    };
    for (u, vertex) in graph.vertices().enumerate() {
        result.discovery.insert(vertex.clone(), discovery[u]);
        result.finish.insert(vertex.clone(), finish[u]);
        if parent[u] != NONE
            && let Some(p) = label(graph, parent[u])
        {
            result.parent.insert(vertex.clone(), p);
        }
    }
    Ok(result)
}

/// Enumerates every simple path from `start` to `end` by backtracking.
///
/// Exponential in the worst case. Paths end as soon as they reach `end`.
/// When `start == end` the only path is `[start]`.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if either endpoint is not in the graph.
pub fn dfs_paths<V: Vertex>(graph: &Graph<V>, start: &V, end: &V) -> Result<Vec<Vec<V>>> {
    let s = graph.require(start)?;
    let e = graph.require(end)?;
    if s == e {
        return Ok(vec![vec![start.clone()]]);
    }

    let adj = IndexedAdjacency::from_graph(graph);
    let mut on_path = vec![false; adj.vertex_count()];
    let mut path = vec![s];
    let mut paths = Vec::new();
    on_path[s] = true;

    let mut stack = vec![(s, 0usize)];
    while let Some(frame) = stack.last_mut() {
        let (u, pos) = *frame;
        let targets = adj.targets(u);
        if pos < targets.len() {
            frame.1 += 1;
            let v = targets[pos];
            if on_path[v] {
                continue;
            }
            if v == e {
                path.push(v);
                paths.push(labels(graph, &path));
                path.pop();
            } else {
                on_path[v] = true;
                path.push(v);
                stack.push((v, 0));
            }
        } else {
            stack.pop();
            path.pop();
            on_path[u] = false;
        }
    }

    Ok(paths)
}

// ============================================================================
// Breadth-first search
// ============================================================================

/// Breadth-first (level) order from `start`.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn bfs<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<V>> {
    let layers = bfs_layers(graph, start)?;
    Ok(layers.into_iter().flatten().collect())
}

/// Vertices reachable from `start`, grouped by distance in edges.
///
/// Layer 0 is `[start]`.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn bfs_layers<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<Vec<V>>> {
    let s = graph.require(start)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let mut visited = vec![false; adj.vertex_count()];
    visited[s] = true;

    let mut layers = Vec::new();
    let mut frontier = vec![s];
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &u in &frontier {
            for &v in adj.targets(u) {
                if !visited[v] {
                    visited[v] = true;
                    next.push(v);
                }
            }
        }
        layers.push(labels(graph, &frontier));
        frontier = next;
    }

    Ok(layers)
}

/// Breadth-first traversal reporting [`TraversalEvent`]s to `visitor`.
///
/// A vertex is discovered when it is enqueued and finished once all of its
/// edges have been examined. [`Control::Prune`] on `Discover` or `TreeEdge`
/// keeps that vertex from being expanded.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if `start` is not in the graph.
pub fn bfs_with_visitor<'g, V, F>(graph: &'g Graph<V>, start: &V, mut visitor: F) -> Result<()>
where
    V: Vertex,
    F: FnMut(TraversalEvent<'g, V>) -> Control,
{
    let s = graph.require(start)?;
    let adj = IndexedAdjacency::from_graph(graph);
    let names: Vec<&'g V> = graph.vertices().collect();
    let mut visited = vec![false; adj.vertex_count()];
    let mut queue = VecDeque::new();

    visited[s] = true;
    match visitor(TraversalEvent::Discover(names[s])) {
        Control::Break => return Ok(()),
        Control::Prune => {}
        Control::Continue => queue.push_back(s),
    }

    while let Some(u) = queue.pop_front() {
        for &v in adj.targets(u) {
            if visited[v] {
                if visitor(TraversalEvent::NonTreeEdge(names[u], names[v])) == Control::Break {
                    return Ok(());
                }
                continue;
            }
            match visitor(TraversalEvent::TreeEdge(names[u], names[v])) {
                Control::Break => return Ok(()),
                Control::Prune => continue,
                Control::Continue => {}
            }
            visited[v] = true;
            match visitor(TraversalEvent::Discover(names[v])) {
                Control::Break => return Ok(()),
                Control::Prune => {}
                Control::Continue => queue.push_back(v),
            }
        }
        if visitor(TraversalEvent::Finish(names[u])) == Control::Break {
            return Ok(());
        }
    }

    Ok(())
}

/// Follows parent pointers from `end` back to the search root.
fn walk_parents(parent: &[usize], end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut current = end;
    while parent[current] != NONE {
        current = parent[current];
        path.push(current);
    }
    path
}

/// Shortest path by edge count from `start` to `end`.
///
/// Returns `Ok(None)` if `end` is unreachable and `[start]` when both are
/// the same vertex.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if either endpoint is not in the graph.
pub fn bfs_shortest_path<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    end: &V,
) -> Result<Option<Vec<V>>> {
    let s = graph.require(start)?;
    let e = graph.require(end)?;
    if s == e {
        return Ok(Some(vec![start.clone()]));
    }

    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();
    let mut visited = vec![false; n];
    let mut parent = vec![NONE; n];
    let mut queue = VecDeque::from([s]);
    visited[s] = true;

    while let Some(u) = queue.pop_front() {
        for &v in adj.targets(u) {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            parent[v] = u;
            if v == e {
                let mut path = walk_parents(&parent, e);
                path.reverse();
                return Ok(Some(labels(graph, &path)));
            }
            queue.push_back(v);
        }
    }

    Ok(None)
}

/// One side of a bidirectional search.
struct Side {
    dist: Vec<usize>,
    parent: Vec<usize>,
    frontier: Vec<usize>,
}

impl Side {
    fn new(n: usize, root: usize) -> Self {
        let mut dist = vec![NONE; n];
        dist[root] = 0;
        Self {
            dist,
            parent: vec![NONE; n],
            frontier: vec![root],
        }
    }

    /// Expands one full level; returns the best meeting vertex found in it.
    fn expand(&mut self, adj: &IndexedAdjacency, other: &Side) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        let mut next = Vec::new();
        for &u in &self.frontier {
            for &v in adj.targets(u) {
                if self.dist[v] != NONE {
                    continue;
                }
                self.dist[v] = self.dist[u] + 1;
                self.parent[v] = u;
                next.push(v);
                if other.dist[v] != NONE {
                    let length = self.dist[v] + other.dist[v];
                    if best.is_none_or(|(_, b)| length < b) {
                        best = Some((v, length));
                    }
                }
            }
        }
        self.frontier = next;
        best.map(|(v, _)| v)
    }
}

/// Shortest path by edge count, searching from both ends at once.
///
/// Expands one BFS level forward from `start`, then one level backward from
/// `end` over reversed arcs, and so on. The first level that touches the
/// other side's explored set is finished and the shortest stitched path
/// through it is returned, so the result has the same length as
/// [`bfs_shortest_path`].
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`](graphkit_common::Error::VertexNotFound)
/// if either endpoint is not in the graph.
pub fn bidirectional_search<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    end: &V,
) -> Result<Option<Vec<V>>> {
    let s = graph.require(start)?;
    let e = graph.require(end)?;
    if s == e {
        return Ok(Some(vec![start.clone()]));
    }

    let forward_adj = IndexedAdjacency::from_graph(graph);
    let backward_adj = forward_adj.transpose();
    let n = forward_adj.vertex_count();

    let mut forward = Side::new(n, s);
    let mut backward = Side::new(n, e);
    let mut forward_turn = true;

    let meeting = loop {
        if forward.frontier.is_empty() || backward.frontier.is_empty() {
            return Ok(None);
        }
        let found = if forward_turn {
            forward.expand(&forward_adj, &backward)
        } else {
            backward.expand(&backward_adj, &forward)
        };
        if let Some(m) = found {
            break m;
        }
        forward_turn = !forward_turn;
    };

    let mut path = walk_parents(&forward.parent, meeting);
    path.reverse();
    let tail = walk_parents(&backward.parent, meeting);
    path.extend_from_slice(&tail[1..]);
    Ok(Some(labels(graph, &path)))
}

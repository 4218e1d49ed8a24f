//! Structural analysis: articulation points and bridges.
//!
//! Both come out of one Tarjan low-link DFS. `low[u]` is the smallest
//! discovery time reachable from the subtree of `u` using at most one
//! non-tree edge.

use graphkit_common::{Error, Result, Vertex};
use graphkit_core::{Graph, IndexedAdjacency};

use crate::{NONE, label, labels};

struct Frame {
    vertex: usize,
    next: usize,
    parent: usize,
    parent_skipped: bool,
    children: usize,
}

impl Frame {
    fn new(vertex: usize, parent: usize) -> Self {
        Self {
            vertex,
            next: 0,
            parent,
            parent_skipped: false,
            children: 0,
        }
    }
}

struct LowLink {
    discovery: Vec<usize>,
    cut_vertex: Vec<bool>,
    bridges: Vec<(usize, usize)>,
}

fn low_link(adj: &IndexedAdjacency) -> LowLink {
    let n = adj.vertex_count();
    let mut discovery = vec![NONE; n];
    let mut low = vec![NONE; n];
    let mut cut_vertex = vec![false; n];
    let mut bridges = Vec::new();
    let mut time = 0;

    for root in 0..n {
        if discovery[root] != NONE {
            continue;
        }
        discovery[root] = time;
        low[root] = time;
        time += 1;
        let mut stack = vec![Frame::new(root, NONE)];

        while let Some(top) = stack.last_mut() {
            let u = top.vertex;
            let targets = adj.targets(u);

            if top.next < targets.len() {
                let v = targets[top.next];
                top.next += 1;

                // Excuse exactly one edge back to the parent.
                if v == top.parent && !top.parent_skipped {
                    top.parent_skipped = true;
                    continue;
                }
                if discovery[v] == NONE {
                    top.children += 1;
                    discovery[v] = time;
                    low[v] = time;
                    time += 1;
                    stack.push(Frame::new(v, u));
                } else {
                    low[u] = low[u].min(discovery[v]);
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            match stack.last() {
                Some(parent) => {
                    let p = parent.vertex;
                    low[p] = low[p].min(low[u]);
                    if low[u] > discovery[p] {
                        bridges.push((p, u));
                    }
                    if parent.parent != NONE && low[u] >= discovery[p] {
                        cut_vertex[p] = true;
                    }
                }
                None => {
                    if done.children >= 2 {
                        cut_vertex[u] = true;
                    }
                }
            }
        }
    }

    LowLink {
        discovery,
        cut_vertex,
        bridges,
    }
}

fn require_undirected<V: Vertex>(graph: &Graph<V>, algorithm: &'static str) -> Result<()> {
    if graph.is_directed() {
        Err(Error::precondition(algorithm, "graph must be undirected"))
    } else {
        Ok(())
    }
}

/// Vertices whose removal disconnects their component.
///
/// A DFS root is a cut vertex when it has two or more tree children; any
/// other vertex `u` is one when some child `c` has `low[c] >= disc[u]`.
/// Results are in discovery order without duplicates.
///
/// Time complexity: O(V + E)
///
/// # Errors
///
/// Returns [`Error::Precondition`] for directed graphs.
pub fn articulation_points<V: Vertex>(graph: &Graph<V>) -> Result<Vec<V>> {
    require_undirected(graph, "articulation_points")?;
    let adj = IndexedAdjacency::from_graph(graph);
    let result = low_link(&adj);

    let mut points: Vec<usize> = (0..adj.vertex_count())
        .filter(|&u| result.cut_vertex[u])
        .collect();
    points.sort_by_key(|&u| result.discovery[u]);
    Ok(labels(graph, &points))
}

/// Edges whose removal disconnects their component.
///
/// Tree edge `(p, c)` is a bridge when `low[c] > disc[p]`. Each bridge is
/// reported once, oriented from the DFS parent, in the order the search
/// closes them. Parallel edges are never bridges.
///
/// Time complexity: O(V + E)
///
/// # Errors
///
/// Returns [`Error::Precondition`] for directed graphs.
pub fn bridges<V: Vertex>(graph: &Graph<V>) -> Result<Vec<(V, V)>> {
    require_undirected(graph, "bridges")?;
    let adj = IndexedAdjacency::from_graph(graph);
    let result = low_link(&adj);

    Ok(result
        .bridges
        .into_iter()
        .filter_map(|(p, c)| Some((label(graph, p)?, label(graph, c)?)))
        .collect())
}

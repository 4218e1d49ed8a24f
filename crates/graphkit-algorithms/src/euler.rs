//! Eulerian circuits and paths.
//!
//! The `has_*` checks look at degrees only. A self-loop adds two to the
//! degree of its vertex on undirected graphs, and one to each of in- and
//! out-degree on directed graphs. [`eulerian_path`] also checks that all
//! edges are connected, by trying to use every one of them.

use graphkit_common::Vertex;
use graphkit_core::{Graph, IndexedAdjacency};
use tracing::debug;

use crate::labels;

/// Undirected degree of every vertex, counting self-loops twice.
fn undirected_degrees(adj: &IndexedAdjacency) -> Vec<usize> {
    (0..adj.vertex_count())
        .map(|u| {
            let loops = adj.targets(u).iter().filter(|&&v| v == u).count();
            adj.out_degree(u) + loops
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Balance {
    Even,
    ExtraOut,
    ExtraIn,
    Off,
}

/// How out-degree compares to in-degree at every vertex.
fn directed_balance(adj: &IndexedAdjacency) -> Vec<Balance> {
    let in_degree = adj.in_degrees();
    (0..adj.vertex_count())
        .map(|u| {
            let out = adj.out_degree(u);
            match out.abs_diff(in_degree[u]) {
                0 => Balance::Even,
                1 if out > in_degree[u] => Balance::ExtraOut,
                1 => Balance::ExtraIn,
                _ => Balance::Off,
            }
        })
        .collect()
}

/// True if some closed walk uses every edge exactly once (degree test).
///
/// Undirected: every vertex has even degree. Directed: in-degree equals
/// out-degree at every vertex.
#[must_use]
pub fn has_eulerian_circuit<V: Vertex>(graph: &Graph<V>) -> bool {
    let adj = IndexedAdjacency::from_graph(graph);
    if graph.is_directed() {
        directed_balance(&adj).iter().all(|&b| b == Balance::Even)
    } else {
        undirected_degrees(&adj).iter().all(|d| d % 2 == 0)
    }
}

/// True if some walk uses every edge exactly once (degree test).
///
/// Undirected: zero or two vertices of odd degree. Directed: exactly one
/// vertex with one extra outgoing edge, exactly one with one extra incoming
/// edge, and every other vertex balanced. A fully balanced directed graph is
/// reported by [`has_eulerian_circuit`] instead.
#[must_use]
pub fn has_eulerian_path<V: Vertex>(graph: &Graph<V>) -> bool {
    let adj = IndexedAdjacency::from_graph(graph);
    if !adj.is_directed() {
        return start_vertex(&adj).is_some();
    }

    let balance = directed_balance(&adj);
    let count = |kind: Balance| balance.iter().filter(|&&b| b == kind).count();
    count(Balance::ExtraOut) == 1 && count(Balance::ExtraIn) == 1 && count(Balance::Off) == 0
}

/// Where a walk must start, or `None` if the degree test fails.
///
/// A balanced directed graph starts at its first vertex with edges, so the
/// walk comes out closed. For a graph without edges this is vertex 0 when
/// it exists.
fn start_vertex(adj: &IndexedAdjacency) -> Option<Option<usize>> {
    let n = adj.vertex_count();
    let first_with_edges = (0..n).find(|&u| adj.out_degree(u) > 0);

    if adj.is_directed() {
        let mut start = None;
        let mut ends = 0;
        for (u, balance) in directed_balance(adj).into_iter().enumerate() {
            match balance {
                Balance::Even => {}
                Balance::ExtraOut if start.is_none() => start = Some(u),
                Balance::ExtraIn if ends == 0 => ends += 1,
                _ => return None,
            }
        }
        match (start, ends) {
            (None, 0) => Some(first_with_edges.or((n > 0).then_some(0))),
            (Some(s), 1) => Some(Some(s)),
            _ => None,
        }
    } else {
        let degrees = undirected_degrees(adj);
        let odd: Vec<usize> = (0..n).filter(|&u| degrees[u] % 2 == 1).collect();
        match odd.len() {
            0 => Some(first_with_edges.or((n > 0).then_some(0))),
            2 => Some(Some(odd[0])),
            _ => None,
        }
    }
}

/// Builds a walk that uses every edge exactly once (Hierholzer).
///
/// Returns `None` when the degree test fails or the edges do not all lie in
/// one connected piece. A graph without edges yields its first vertex, or
/// an empty walk when it has no vertices. If the graph has an Eulerian
/// circuit the walk is closed.
#[must_use]
pub fn eulerian_path<V: Vertex>(graph: &Graph<V>) -> Option<Vec<V>> {
    let adj = IndexedAdjacency::from_graph(graph);
    let Some(start) = start_vertex(&adj)? else {
        return Some(Vec::new());
    };

    // incident[u] lists (edge id, other endpoint); an undirected edge is
    // listed at both ends under the same id.
    let n = adj.vertex_count();
    let mut incident: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    let mut edge_count = 0;
    if adj.is_directed() {
        for u in 0..n {
            for &v in adj.targets(u) {
                incident[u].push((edge_count, v));
                edge_count += 1;
            }
        }
    } else {
        for edge in graph.edges() {
            let (Some(u), Some(v)) = (graph.index_of(&edge.source), graph.index_of(&edge.target))
            else {
                continue;
            };
            incident[u].push((edge_count, v));
            if u != v {
                incident[v].push((edge_count, u));
            }
            edge_count += 1;
        }
    }

    let mut used = vec![false; edge_count];
    let mut next = vec![0usize; n];
    let mut stack = vec![start];
    let mut walk = Vec::with_capacity(edge_count + 1);

    while let Some(&u) = stack.last() {
        while next[u] < incident[u].len() && used[incident[u][next[u]].0] {
            next[u] += 1;
        }
        if let Some(&(edge, v)) = incident[u].get(next[u]) {
            used[edge] = true;
            stack.push(v);
        } else {
            walk.push(u);
            stack.pop();
        }
    }

    if walk.len() != edge_count + 1 {
        debug!(
            used = walk.len().saturating_sub(1),
            edges = edge_count,
            "edges are not connected, no eulerian path"
        );
        return None;
    }
    walk.reverse();
    Some(labels(graph, &walk))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(edges: &[(u32, u32)]) -> Graph<u32> {
        let mut g = Graph::new(false, false);
        for &(u, v) in edges {
            g.add_unweighted_edge(u, v);
        }
        g
    }

    fn directed(edges: &[(u32, u32)]) -> Graph<u32> {
        let mut g = Graph::new(true, false);
        for &(u, v) in edges {
            g.add_unweighted_edge(u, v);
        }
        g
    }

    /// Checks that `walk` follows edges of `g` and uses each exactly once.
    fn assert_valid_walk(g: &Graph<u32>, walk: &[u32]) {
        assert_eq!(walk.len(), g.edge_count() + 1);
        let mut remaining = g.clone();
        for step in walk.windows(2) {
            assert!(remaining.has_edge(&step[0], &step[1]), "missing edge {step:?}");
            // Take out a single copy of the edge.
            let copies = remaining.edge_multiplicity(&step[0], &step[1]);
            remaining.remove_edge(&step[0], &step[1]).unwrap();
            for _ in 1..copies {
                remaining.add_unweighted_edge(step[0], step[1]);
            }
        }
        assert_eq!(remaining.edge_count(), 0);
    }

    #[test]
    fn test_triangle_circuit() {
        let g = undirected(&[(1, 2), (2, 3), (3, 1)]);
        assert!(has_eulerian_circuit(&g));
        assert!(has_eulerian_path(&g));

        let walk = eulerian_path(&g).unwrap();
        assert_eq!(walk.first(), walk.last());
        assert_valid_walk(&g, &walk);
    }

    #[test]
    fn test_triangle_minus_edge_is_path() {
        let g = undirected(&[(1, 2), (2, 3)]);
        assert!(!has_eulerian_circuit(&g));
        assert!(has_eulerian_path(&g));
        assert_eq!(eulerian_path(&g), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_star_has_neither() {
        let g = undirected(&[(0, 1), (0, 2), (0, 3)]);
        assert!(!has_eulerian_circuit(&g));
        assert!(!has_eulerian_path(&g));
        assert_eq!(eulerian_path(&g), None);
    }

    #[test]
    fn test_house_path() {
        // Square 1-2-3-4 with roof 3-5-4 and diagonal 1-3.
        let g = undirected(&[(1, 2), (2, 3), (3, 4), (4, 1), (3, 5), (5, 4), (1, 3)]);
        assert!(!has_eulerian_circuit(&g));
        let walk = eulerian_path(&g).unwrap();
        assert_valid_walk(&g, &walk);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let g = undirected(&[(1, 2), (2, 2), (2, 1)]);
        assert!(has_eulerian_circuit(&g));
        let walk = eulerian_path(&g).unwrap();
        assert_eq!(walk.len(), 4);
        assert_valid_walk(&g, &walk);
    }

    #[test]
    fn test_directed() {
        let cycle = directed(&[(1, 2), (2, 3), (3, 1)]);
        assert!(has_eulerian_circuit(&cycle));
        assert!(!has_eulerian_path(&cycle));
        assert_eq!(eulerian_path(&cycle), Some(vec![1, 2, 3, 1]));

        let open = directed(&[(1, 2), (2, 3), (3, 1), (1, 4)]);
        assert!(!has_eulerian_circuit(&open));
        assert!(has_eulerian_path(&open));
        assert_valid_walk(&open, &eulerian_path(&open).unwrap());

        let two_sources = directed(&[(1, 3), (2, 3)]);
        assert!(!has_eulerian_path(&two_sources));
    }

    #[test]
    fn test_directed_balanced_graph_is_circuit_not_path() {
        let g = directed(&[(1, 2), (2, 3), (3, 1)]);
        assert!(has_eulerian_circuit(&g));
        assert!(!has_eulerian_path(&g));

        // Removing one edge leaves exactly one start and one end.
        let mut open = g.clone();
        open.remove_edge(&3, &1).unwrap();
        assert!(has_eulerian_path(&open));
        assert_eq!(eulerian_path(&open), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_degrees_pass_but_disconnected() {
        let g = undirected(&[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)]);
        assert!(has_eulerian_circuit(&g));
        assert_eq!(eulerian_path(&g), None);
    }

    #[test]
    fn test_edgeless() {
        let mut g = undirected(&[]);
        assert!(has_eulerian_circuit(&g));
        assert_eq!(eulerian_path(&g), Some(vec![]));

        g.add_vertex(7);
        g.add_vertex(8);
        assert_eq!(eulerian_path(&g), Some(vec![7]));
    }

    #[test]
    fn test_isolated_vertex_ignored() {
        let mut g = directed(&[(1, 2), (2, 1)]);
        g.add_vertex(3);
        assert_eq!(eulerian_path(&g), Some(vec![1, 2, 1]));
    }
}

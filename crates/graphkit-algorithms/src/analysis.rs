//! Whole-graph summary.

use graphkit_common::Vertex;
use graphkit_core::{Graph, IndexedAdjacency};
use serde::{Deserialize, Serialize};

use crate::components::{TopologicalOrder, connected_component_count, has_cycle, topological_sort};

/// Basic properties of a graph, computed in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary<V> {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of logical edges.
    pub edges: usize,
    /// Whether edges are directed.
    pub directed: bool,
    /// Whether edge weights are meaningful.
    pub weighted: bool,
    /// Smallest adjacency count (out-degree on directed graphs); 0 when empty.
    pub min_degree: usize,
    /// Largest adjacency count (out-degree on directed graphs); 0 when empty.
    pub max_degree: usize,
    /// Mean adjacency count; 0.0 when empty.
    pub avg_degree: f64,
    /// Connected components (weak on directed graphs).
    pub component_count: usize,
    /// Whether any cycle exists.
    pub has_cycle: bool,
    /// Whether the graph is a DAG.
    pub is_dag: bool,
    /// A topological order, present only for DAGs.
    pub topological_order: Option<Vec<V>>,
}

/// Computes a [`GraphSummary`].
#[must_use]
pub fn summarize<V: Vertex>(graph: &Graph<V>) -> GraphSummary<V> {
    let adj = IndexedAdjacency::from_graph(graph);
    let n = adj.vertex_count();
    let degrees = (0..n).map(|u| adj.out_degree(u));

    let cyclic = has_cycle(graph);
    let topological_order = if graph.is_directed() && !cyclic {
        match topological_sort(graph) {
            Ok(TopologicalOrder::Sorted(order)) => Some(order),
            _ => None,
        }
    } else {
        None
    };

    GraphSummary {
        vertices: n,
        edges: graph.edge_count(),
        directed: graph.is_directed(),
        weighted: graph.is_weighted(),
        min_degree: degrees.clone().min().unwrap_or(0),
        max_degree: degrees.clone().max().unwrap_or(0),
        avg_degree: if n == 0 {
            0.0
        } else {
            degrees.sum::<usize>() as f64 / n as f64
        },
        component_count: connected_component_count(graph),
        has_cycle: cyclic,
        is_dag: topological_order.is_some(),
        topological_order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_dag() {
        let mut g = Graph::new(true, false);
        g.add_unweighted_edge("A", "B");
        g.add_unweighted_edge("A", "C");
        g.add_unweighted_edge("B", "C");
        g.add_vertex("D");

        let summary = summarize(&g);
        assert_eq!(summary.vertices, 4);
        assert_eq!(summary.edges, 3);
        assert!(summary.directed);
        assert!(!summary.weighted);
        assert_eq!(summary.min_degree, 0);
        assert_eq!(summary.max_degree, 2);
        assert!((summary.avg_degree - 0.75).abs() < f64::EPSILON);
        assert_eq!(summary.component_count, 2);
        assert!(!summary.has_cycle);
        assert!(summary.is_dag);
        assert_eq!(summary.topological_order, Some(vec!["A", "B", "C", "D"]));
    }

    #[test]
    fn test_summarize_undirected_cycle() {
        let mut g = Graph::new(false, true);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 1, 1.0);

        let summary = summarize(&g);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.min_degree, 2);
        assert!(summary.has_cycle);
        assert!(!summary.is_dag);
        assert_eq!(summary.topological_order, None);
        assert_eq!(summary.component_count, 1);
    }

    #[test]
    fn test_summarize_empty() {
        let g: Graph<u8> = Graph::default();
        let summary = summarize(&g);
        assert_eq!(summary.vertices, 0);
        assert_eq!(summary.max_degree, 0);
        assert_eq!(summary.avg_degree, 0.0);
        assert_eq!(summary.component_count, 0);
    }
}

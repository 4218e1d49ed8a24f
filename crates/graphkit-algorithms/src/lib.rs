//! Graph algorithms for graphkit.
//!
//! Every algorithm is a free function over a borrowed [`Graph`]. None of them
//! mutate the graph; derived structures (transposes, residual networks,
//! index snapshots) are built and owned internally.
//!
//! ## Algorithm Categories
//!
//! - [`traversal`] - DFS, BFS, visitors, path enumeration, bidirectional search
//! - [`shortest_path`] - Dijkstra, Bellman-Ford, Floyd-Warshall
//! - [`components`] - Connected components, cycles, topological sort, SCC
//! - [`structure`] - Articulation points and bridges
//! - [`mst`] - Prim and Kruskal
//! - [`flow`] - Ford-Fulkerson and Edmonds-Karp
//! - [`euler`] - Eulerian circuit and path
//! - [`analysis`] - Whole-graph summary
//!
//! ## Usage
//!
//! ```
//! use graphkit_algorithms::{bfs, connected_components, dijkstra};
//! use graphkit_core::Graph;
//!
//! let mut graph = Graph::new(true, true);
//! graph.add_edge("A", "B", 4.0);
//! graph.add_edge("A", "C", 2.0);
//! graph.add_edge("C", "B", 1.0);
//!
//! let order = bfs(&graph, &"A").unwrap();
//! assert_eq!(order, vec!["A", "B", "C"]);
//!
//! let paths = dijkstra(&graph, &"A").unwrap();
//! assert_eq!(paths.distance(&"B"), Some(3.0));
//!
//! assert_eq!(connected_components(&graph).len(), 1);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]

pub mod analysis;
pub mod components;
pub mod euler;
pub mod flow;
pub mod mst;
pub mod shortest_path;
pub mod structure;
pub mod traits;
pub mod traversal;

use graphkit_common::Vertex;
use graphkit_core::Graph;

// Core traits
pub use traits::{Control, MinScored, TraversalEvent};

// Traversal algorithms
pub use traversal::{
    DfsTimestamps, MAX_RECURSION_DEPTH, bfs, bfs_layers, bfs_shortest_path, bfs_with_visitor,
    bidirectional_search, dfs, dfs_iterative, dfs_paths, dfs_recursive, dfs_timestamps,
    dfs_with_visitor,
};

// Shortest path algorithms
pub use shortest_path::{
    BellmanFordResult, DijkstraResult, FloydWarshallResult, ShortestPaths, bellman_ford,
    dijkstra, dijkstra_path, floyd_warshall, par_dijkstra_all, reconstruct_path,
};

// Component algorithms
pub use components::{
    TopologicalOrder, connected_component_count, connected_components,
    connected_components_union_find, has_cycle, has_cycle_union_find, is_dag, kosaraju_scc,
    strongly_connected_component_count, topological_sort, topological_sort_dfs,
};

// Structure analysis algorithms
pub use structure::{articulation_points, bridges};

// Minimum Spanning Tree algorithms
pub use mst::{MstResult, kruskal_mst, prim_mst};

// Network Flow algorithms
pub use flow::{MaxFlowResult, edmonds_karp, ford_fulkerson};

// Eulerian path algorithms
pub use euler::{eulerian_path, has_eulerian_circuit, has_eulerian_path};

// Analysis
pub use analysis::{GraphSummary, summarize};

/// Sentinel for "no vertex" in index-based parent arrays.
pub(crate) const NONE: usize = usize::MAX;

/// Maps vertex indices back to labels.
pub(crate) fn labels<V: Vertex>(graph: &Graph<V>, indices: &[usize]) -> Vec<V> {
    indices
        .iter()
        .filter_map(|&i| graph.vertex_at(i).cloned())
        .collect()
}

/// Label of the vertex at `index`, which must come from a snapshot of `graph`.
pub(crate) fn label<V: Vertex>(graph: &Graph<V>, index: usize) -> Option<V> {
    graph.vertex_at(index).cloned()
}

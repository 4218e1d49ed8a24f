//! # graphkit
//!
//! Generic, in-memory graphs and the classic algorithms that run on them.
//!
//! Start with [`Graph`]: any `Clone + Eq + Hash + Debug` type can be a
//! vertex. Every algorithm is a free function that borrows the graph, so a
//! single graph can be queried from several threads at once.
//!
//! ## What's Inside
//!
//! | Area | Functions |
//! | ---- | --------- |
//! | Traversal | [`dfs`], [`bfs`], [`bfs_layers`], [`dfs_with_visitor`], [`dfs_paths`], [`bidirectional_search`] |
//! | Shortest paths | [`dijkstra`], [`bellman_ford`], [`floyd_warshall`], [`par_dijkstra_all`] |
//! | Connectivity | [`connected_components`], [`has_cycle`], [`topological_sort`], [`kosaraju_scc`] |
//! | Structure | [`articulation_points`], [`bridges`] |
//! | Spanning trees | [`prim_mst`], [`kruskal_mst`] |
//! | Flow | [`ford_fulkerson`], [`edmonds_karp`] |
//! | Euler | [`has_eulerian_circuit`], [`has_eulerian_path`], [`eulerian_path`] |
//! | Sets | [`DisjointSet`] |
//!
//! ## Quick Start
//!
//! ```rust
//! use graphkit::prelude::*;
//!
//! let mut roads = Graph::new(true, true);
//! roads.add_edge("A", "B", 4.0);
//! roads.add_edge("A", "C", 2.0);
//! roads.add_edge("C", "B", 1.0);
//! roads.add_edge("B", "D", 3.0);
//! roads.add_edge("C", "D", 5.0);
//!
//! let paths = dijkstra(&roads, &"A")?;
//! assert_eq!(paths.distance(&"D"), Some(6.0));
//! assert_eq!(paths.path_to(&"D"), Some(vec!["A", "C", "B", "D"]));
//!
//! // Asking about a vertex that isn't there is an error, not a panic.
//! assert!(dijkstra(&roads, &"Z").is_err());
//! # Ok::<(), graphkit::Error>(())
//! ```

#![warn(missing_docs)]

// Re-export the graph model
pub use graphkit_core::{
    DisjointSet, DisjointSetStats, Edge, Graph, GraphConfig, IndexedAdjacency, Neighbor,
    UnionStrategy,
};

// Re-export common types - errors and the vertex contract
pub use graphkit_common::{DEFAULT_WEIGHT, Error, Result, Vertex, Weight};

// Re-export every algorithm
pub use graphkit_algorithms::*;

/// The types and functions most programs need.
pub mod prelude {
    pub use graphkit_algorithms::{
        MstResult, TopologicalOrder, bellman_ford, bfs, bfs_shortest_path, connected_components,
        dfs, dijkstra, edmonds_karp, has_cycle, kosaraju_scc, kruskal_mst, prim_mst,
        topological_sort,
    };
    pub use graphkit_common::{Error, Result, Vertex, Weight};
    pub use graphkit_core::{DisjointSet, Edge, Graph, GraphConfig, UnionStrategy};
}

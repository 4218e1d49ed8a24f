//! # graphkit-core
//!
//! Core layer for graphkit: the graph model and the set structures the
//! algorithms are built on. It depends only on `graphkit-common`.
//!
//! ## Modules
//!
//! - [`graph`] - The generic labeled [`Graph`] and its dense [`IndexedAdjacency`] view
//! - [`sets`] - Union-Find ([`DisjointSet`])

pub mod graph;
pub mod sets;

// Re-export commonly used types
pub use graph::{Edge, Graph, GraphConfig, IndexedAdjacency, Neighbor};
pub use sets::{DisjointSet, DisjointSetStats, UnionStrategy};

//! Set structures.
//!
//! - [`DisjointSet`] - Union-Find with path compression and union by rank or size

mod disjoint_set;

pub use disjoint_set::{DisjointSet, DisjointSetStats, UnionStrategy};

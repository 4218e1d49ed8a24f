//! The graph model.
//!
//! A [`Graph`] maps every vertex to an ordered list of [`Neighbor`]s. Edges
//! are not stored separately; an [`Edge`] is a logical triple derived from
//! adjacency on demand.
//!
//! Algorithms that make many passes over the structure take an
//! [`IndexedAdjacency`] snapshot first, which replaces vertex labels with
//! dense indices.

mod adjacency;
mod config;
mod indexed;
mod store;

pub use config::GraphConfig;
pub use indexed::IndexedAdjacency;
pub use store::Graph;

use graphkit_common::Weight;
use serde::{Deserialize, Serialize};

/// One adjacency entry: the vertex an edge leads to and its weight.
///
/// This is the only neighbor representation in graphkit; flow networks
/// read capacities from `weight` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor<V> {
    /// The vertex at the other end of the edge.
    pub target: V,
    /// Edge weight, `1.0` on unweighted graphs.
    pub weight: Weight,
}

impl<V> Neighbor<V> {
    /// Creates a new adjacency entry.
    pub fn new(target: V, weight: Weight) -> Self {
        Self { target, weight }
    }
}

/// A logical edge derived from adjacency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<V> {
    /// Source vertex (either endpoint on undirected graphs).
    pub source: V,
    /// Target vertex.
    pub target: V,
    /// Edge weight.
    pub weight: Weight,
}

impl<V> Edge<V> {
    /// Creates a new edge.
    pub fn new(source: V, target: V, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns true if both endpoints are the same vertex.
    pub fn is_self_loop(&self) -> bool
    where
        V: PartialEq,
    {
        self.source == self.target
    }
}

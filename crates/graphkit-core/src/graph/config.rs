//! Graph configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Graph`](super::Graph).
///
/// The two flags are fixed for the lifetime of the graph; algorithms check
/// them to decide whether they can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Whether edges have a direction. Undirected edges are mirrored.
    pub directed: bool,
    /// Whether edge weights are meaningful. Unweighted graphs store `1.0`.
    pub weighted: bool,
    /// Initial capacity for the vertex table.
    pub vertex_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            weighted: false,
            vertex_capacity: 16,
        }
    }
}

impl GraphConfig {
    /// Creates the default configuration: undirected and unweighted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes edges directed.
    #[must_use]
    pub fn directed(mut self) -> Self {
        self.directed = true;
        self
    }

    /// Makes edges undirected.
    #[must_use]
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }

    /// Keeps the weights passed to `add_edge`.
    #[must_use]
    pub fn weighted(mut self) -> Self {
        self.weighted = true;
        self
    }

    /// Stores `1.0` on every edge.
    #[must_use]
    pub fn unweighted(mut self) -> Self {
        self.weighted = false;
        self
    }

    /// Sets the initial vertex capacity.
    #[must_use]
    pub fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }
}

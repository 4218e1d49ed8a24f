//! Error types for graphkit.
//!
//! Two kinds of failure are errors: referring to something that is not
//! there ([`Error::VertexNotFound`], [`Error::ElementNotFound`]) and running
//! an algorithm on input of the wrong shape ([`Error::Precondition`]).
//!
//! Outcomes that are impossible for a well-formed input, such as a
//! topological order of a cyclic graph, are not errors. Algorithms report
//! them as variants of their own result types.

use std::fmt::Debug;

use thiserror::Error;

/// Result type alias for graphkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by graphkit data structures and algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation named a vertex that is not in the graph.
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    /// The operation named an element never registered with the disjoint set.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// The algorithm was invoked on a graph it cannot run on.
    #[error("{algorithm}: {reason}")]
    Precondition {
        /// Name of the algorithm that rejected its input.
        algorithm: &'static str,
        /// What the input violated.
        reason: String,
    },
}

impl Error {
    /// Builds a [`Error::VertexNotFound`] naming `vertex`.
    pub fn vertex_not_found<V: Debug + ?Sized>(vertex: &V) -> Self {
        Self::VertexNotFound(format!("{vertex:?}"))
    }

    /// Builds an [`Error::ElementNotFound`] naming `element`.
    pub fn element_not_found<T: Debug + ?Sized>(element: &T) -> Self {
        Self::ElementNotFound(format!("{element:?}"))
    }

    /// Builds an [`Error::Precondition`].
    pub fn precondition(algorithm: &'static str, reason: impl Into<String>) -> Self {
        Self::Precondition {
            algorithm,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_not_found_uses_debug() {
        let err = Error::vertex_not_found(&"Z");
        assert_eq!(err, Error::VertexNotFound("\"Z\"".to_string()));
        assert_eq!(err.to_string(), "vertex not found: \"Z\"");
    }

    #[test]
    fn test_precondition_display() {
        let err = Error::precondition("kruskal_mst", "graph must be undirected");
        assert_eq!(err.to_string(), "kruskal_mst: graph must be undirected");
    }

    #[test]
    fn test_element_not_found() {
        let err = Error::element_not_found(&7);
        assert_eq!(err.to_string(), "element not found: 7");
    }
}

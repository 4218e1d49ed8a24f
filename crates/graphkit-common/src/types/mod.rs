//! Core type definitions for graphkit.
//!
//! - [`Vertex`] - the bound every vertex label satisfies
//! - [`Weight`] - edge weights and capacities

mod vertex;

pub use vertex::Vertex;

/// Edge weight, also used for flow capacities.
pub type Weight = f64;

/// Weight stored on every edge of an unweighted graph.
pub const DEFAULT_WEIGHT: Weight = 1.0;

//! The vertex label bound.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values that can label graph vertices.
///
/// A vertex has no identity beyond equality: two labels that compare equal
/// are the same vertex. `Debug` is required so lookup failures can name the
/// missing vertex.
///
/// Implemented automatically for every `Clone + Eq + Hash + Debug` type,
/// so `&str`, `String`, integers and small tuples all work out of the box.
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Vertex for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vertex<V: Vertex>(_: &V) {}

    #[test]
    fn test_common_labels_are_vertices() {
        assert_vertex(&"A");
        assert_vertex(&String::from("B"));
        assert_vertex(&42u32);
        assert_vertex(&(1i64, 'x'));
    }
}

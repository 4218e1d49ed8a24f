//! Graph store implementation.

use std::fmt;

use graphkit_common::{DEFAULT_WEIGHT, Error, Result, Vertex, Weight};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::adjacency::AdjacencyList;
use super::{Edge, GraphConfig, Neighbor};

/// A generic labeled graph.
///
/// Vertices are kept in insertion order and every vertex owns an ordered
/// adjacency list of `(neighbor, weight)` entries. When the graph is
/// undirected each edge `(u, v, w)` is stored on both endpoints; a self-loop
/// is stored once.
///
/// The graph is a plain value: algorithms borrow it immutably, so any number
/// of threads may query the same graph as long as nobody mutates it.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    /// Configuration.
    config: GraphConfig,
    /// Adjacency lists indexed by vertex, in insertion order.
    adjacency: IndexMap<V, AdjacencyList<V>>,
}

impl<V: Vertex> Graph<V> {
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphkit_core::Graph;
    ///
    /// let mut g = Graph::new(false, true);
    /// g.add_edge("A", "B", 2.5);
    /// assert_eq!(g.edge_weight(&"B", &"A"), Some(2.5));
    /// ```
    #[must_use]
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self::with_config(GraphConfig {
            directed,
            weighted,
            ..GraphConfig::default()
        })
    }

    /// Creates an empty graph with the given configuration.
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            adjacency: IndexMap::with_capacity(config.vertex_capacity),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Returns true if edges have a direction.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    /// Returns true if edge weights are meaningful.
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.config.weighted
    }

    // === Vertex Operations ===

    /// Adds a vertex. Returns false if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, AdjacencyList::new());
        true
    }

    /// Removes a vertex and every edge touching it.
    ///
    /// Runs in O(V + E): every other adjacency list is scanned for
    /// references to the removed vertex. Remaining vertices keep their
    /// relative order.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<()> {
        let Some(outgoing) = self.adjacency.shift_remove(vertex) else {
            return Err(Error::vertex_not_found(vertex));
        };
        let incoming: usize = self
            .adjacency
            .values_mut()
            .map(|list| list.remove_all(vertex))
            .sum();
        debug!(?vertex, outgoing = outgoing.degree(), incoming, "removed vertex");
        Ok(())
    }

    /// Returns true if the vertex is in the graph.
    #[must_use]
    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates over vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Returns the set of all vertices, in insertion order.
    #[must_use]
    pub fn vertex_set(&self) -> IndexSet<V> {
        self.adjacency.keys().cloned().collect()
    }

    /// Returns the dense index of a vertex.
    ///
    /// Indices follow insertion order and stay valid until the next
    /// `remove_vertex`.
    #[must_use]
    pub fn index_of(&self, vertex: &V) -> Option<usize> {
        self.adjacency.get_index_of(vertex)
    }

    /// Returns the vertex at a dense index.
    #[must_use]
    pub fn vertex_at(&self, index: usize) -> Option<&V> {
        self.adjacency.get_index(index).map(|(v, _)| v)
    }

    /// Returns the index of `vertex`, or a lookup error.
    pub fn require(&self, vertex: &V) -> Result<usize> {
        self.index_of(vertex)
            .ok_or_else(|| Error::vertex_not_found(vertex))
    }

    // === Edge Operations ===

    /// Adds an edge, inserting missing endpoints.
    ///
    /// Undirected edges are mirrored. Parallel edges are kept. On an
    /// unweighted graph the weight is ignored and `1.0` is stored.
    pub fn add_edge(&mut self, u: V, v: V, weight: Weight) {
        let weight = if self.config.weighted {
            weight
        } else {
            DEFAULT_WEIGHT
        };

        self.add_vertex(u.clone());
        self.add_vertex(v.clone());

        let mirror = !self.config.directed && u != v;
        if mirror {
            if let Some(list) = self.adjacency.get_mut(&v) {
                list.push(u.clone(), weight);
            }
        }
        if let Some(list) = self.adjacency.get_mut(&u) {
            list.push(v, weight);
        }
    }

    /// Adds an edge with the default weight.
    pub fn add_unweighted_edge(&mut self, u: V, v: V) {
        self.add_edge(u, v, DEFAULT_WEIGHT);
    }

    /// Removes every edge from `u` to `v`.
    ///
    /// All parallel entries go, together with their mirrors on undirected
    /// graphs. Returns the number of logical edges removed, which is zero
    /// when the vertices exist but are not adjacent.
    pub fn remove_edge(&mut self, u: &V, v: &V) -> Result<usize> {
        self.require(u)?;
        self.require(v)?;

        let removed = self
            .adjacency
            .get_mut(u)
            .map_or(0, |list| list.remove_all(v));

        if !self.config.directed && u != v {
            if let Some(list) = self.adjacency.get_mut(v) {
                list.remove_all(u);
            }
        }
        Ok(removed)
    }

    /// Returns true if there is an edge from `u` to `v`.
    ///
    /// Absent vertices simply have no edges.
    #[must_use]
    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.adjacency.get(u).is_some_and(|list| list.contains(v))
    }

    /// Returns the weight of the first edge from `u` to `v`, if any.
    #[must_use]
    pub fn edge_weight(&self, u: &V, v: &V) -> Option<Weight> {
        self.adjacency.get(u).and_then(|list| list.weight_to(v))
    }

    /// Returns the number of parallel edges from `u` to `v`.
    #[must_use]
    pub fn edge_multiplicity(&self, u: &V, v: &V) -> usize {
        self.adjacency.get(u).map_or(0, |list| list.count_to(v))
    }

    /// Returns the adjacency entries of a vertex, in insertion order.
    pub fn neighbors(&self, vertex: &V) -> Result<&[Neighbor<V>]> {
        self.adjacency
            .get(vertex)
            .map(AdjacencyList::as_slice)
            .ok_or_else(|| Error::vertex_not_found(vertex))
    }

    /// Returns the adjacency entries of the vertex at `index`.
    ///
    /// Out-of-range indices have no neighbors.
    #[must_use]
    pub fn neighbors_at(&self, index: usize) -> &[Neighbor<V>] {
        self.adjacency
            .get_index(index)
            .map(|(_, list)| list.as_slice())
            .unwrap_or_default()
    }

    /// Returns the number of adjacency entries of a vertex.
    ///
    /// This is the out-degree on directed graphs. A self-loop contributes a
    /// single entry.
    pub fn degree(&self, vertex: &V) -> Result<usize> {
        self.adjacency
            .get(vertex)
            .map(AdjacencyList::degree)
            .ok_or_else(|| Error::vertex_not_found(vertex))
    }

    /// Returns the number of edges leaving a vertex.
    pub fn out_degree(&self, vertex: &V) -> Result<usize> {
        self.degree(vertex)
    }

    /// Returns the number of edges entering a vertex.
    ///
    /// Scans every adjacency list, O(V + E). Equal to [`degree`](Self::degree)
    /// on undirected graphs.
    pub fn in_degree(&self, vertex: &V) -> Result<usize> {
        self.require(vertex)?;
        if !self.config.directed {
            return self.degree(vertex);
        }
        Ok(self
            .adjacency
            .values()
            .map(|list| list.count_to(vertex))
            .sum())
    }

    /// Returns the number of logical edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        if self.config.directed {
            return self.adjacency.values().map(AdjacencyList::degree).sum();
        }
        self.logical_entries().count()
    }

    /// Returns every logical edge.
    ///
    /// On undirected graphs each edge appears once, oriented from the
    /// endpoint that was inserted first. Order follows vertex insertion
    /// order, then adjacency order, so it is stable for a given
    /// construction sequence.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<V>> {
        self.logical_entries()
            .map(|(u, n)| Edge::new(u.clone(), n.target.clone(), n.weight))
            .collect()
    }

    /// Adjacency entries that represent a logical edge exactly once.
    fn logical_entries(&self) -> impl Iterator<Item = (&V, &Neighbor<V>)> + '_ {
        let directed = self.config.directed;
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(move |(i, (u, list))| {
                list.iter().filter_map(move |n| {
                    let keep = directed
                        || self
                            .adjacency
                            .get_index_of(&n.target)
                            .is_some_and(|j| j >= i);
                    keep.then_some((u, n))
                })
            })
    }

    // === Derived Graphs ===

    /// Returns the graph with every edge reversed.
    ///
    /// Undirected graphs are their own transpose, so this is a copy.
    /// Vertex order is preserved.
    #[must_use]
    pub fn transpose(&self) -> Self {
        if !self.config.directed {
            return self.clone();
        }

        let mut transposed = Self::with_config(self.config);
        for vertex in self.adjacency.keys() {
            transposed.add_vertex(vertex.clone());
        }
        for (u, list) in &self.adjacency {
            for n in list.iter() {
                if let Some(reverse) = transposed.adjacency.get_mut(&n.target) {
                    reverse.push(u.clone(), n.weight);
                }
            }
        }
        transposed
    }

    /// Returns true if any edge has a negative weight.
    #[must_use]
    pub fn has_negative_weight(&self) -> bool {
        self.adjacency
            .values()
            .any(|list| list.iter().any(|n| n.weight < 0.0))
    }

    /// Removes all vertices and edges, keeping the configuration.
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::with_config(GraphConfig::default())
    }
}

impl<V: Vertex> fmt::Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph(directed={}, weighted={}, vertices={})",
            self.config.directed,
            self.config.weighted,
            self.vertex_count()
        )?;
        for (vertex, list) in &self.adjacency {
            write!(f, "\n  {vertex:?} -> ")?;
            if list.degree() == 0 {
                write!(f, "(no edges)")?;
                continue;
            }
            for (i, n) in list.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:?}({})", n.target, n.weight)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph<&'static str> {
        let mut g = Graph::new(false, false);
        g.add_unweighted_edge("A", "B");
        g.add_unweighted_edge("B", "C");
        g.add_unweighted_edge("C", "A");
        g
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<u32> = Graph::new(false, false);
        assert!(g.is_empty());
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(!g.is_directed());
        assert!(!g.is_weighted());
    }

    #[test]
    fn test_add_vertex_idempotent() {
        let mut g = Graph::new(true, false);
        assert!(g.add_vertex("A"));
        assert!(!g.add_vertex("A"));
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.degree(&"A"), Ok(0));
    }

    #[test]
    fn test_add_edge_undirected_mirrors() {
        let mut g = Graph::new(false, false);
        g.add_unweighted_edge("A", "B");

        assert!(g.has_edge(&"A", &"B"));
        assert!(g.has_edge(&"B", &"A"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_directed() {
        let mut g = Graph::new(true, false);
        g.add_unweighted_edge("A", "B");

        assert!(g.has_edge(&"A", &"B"));
        assert!(!g.has_edge(&"B", &"A"));
        assert_eq!(g.out_degree(&"A"), Ok(1));
        assert_eq!(g.in_degree(&"B"), Ok(1));
        assert_eq!(g.in_degree(&"A"), Ok(0));
    }

    #[test]
    fn test_unweighted_ignores_weight() {
        let mut g = Graph::new(true, false);
        g.add_edge("A", "B", 9.0);
        assert_eq!(g.edge_weight(&"A", &"B"), Some(1.0));

        let mut w = Graph::new(true, true);
        w.add_edge("A", "B", 9.0);
        assert_eq!(w.edge_weight(&"A", &"B"), Some(9.0));
        assert_eq!(w.edge_weight(&"B", &"A"), None);
    }

    #[test]
    fn test_self_loop_stored_once() {
        let mut g = Graph::new(false, false);
        g.add_unweighted_edge("A", "A");

        assert_eq!(g.degree(&"A"), Ok(1));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.remove_edge(&"A", &"A"), Ok(1));
        assert_eq!(g.degree(&"A"), Ok(0));
    }

    #[test]
    fn test_parallel_edges_kept() {
        let mut g = Graph::new(false, true);
        g.add_edge("A", "B", 1.0);
        g.add_edge("A", "B", 2.0);

        assert_eq!(g.edge_multiplicity(&"A", &"B"), 2);
        assert_eq!(g.degree(&"B"), Ok(2));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_weight(&"A", &"B"), Some(1.0));
    }

    #[test]
    fn test_remove_edge_removes_all_matches() {
        let mut g = Graph::new(false, true);
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "A", 2.0);
        g.add_edge("A", "C", 3.0);

        assert_eq!(g.remove_edge(&"A", &"B"), Ok(2));
        assert!(!g.has_edge(&"A", &"B"));
        assert!(!g.has_edge(&"B", &"A"));
        assert_eq!(g.degree(&"A"), Ok(1));
        assert_eq!(g.degree(&"B"), Ok(0));
    }

    #[test]
    fn test_remove_edge_restores_degrees() {
        let mut g = triangle();
        let before_a = g.degree(&"A").unwrap();
        let before_d = 0;

        g.add_unweighted_edge("A", "D");
        assert!(g.has_edge(&"A", &"D"));

        assert_eq!(g.remove_edge(&"A", &"D"), Ok(1));
        assert!(!g.has_edge(&"A", &"D"));
        assert_eq!(g.degree(&"A"), Ok(before_a));
        assert_eq!(g.degree(&"D"), Ok(before_d));
    }

    #[test]
    fn test_remove_edge_missing() {
        let mut g = triangle();
        g.add_vertex("D");
        assert_eq!(g.remove_edge(&"A", &"D"), Ok(0));
        assert!(matches!(
            g.remove_edge(&"A", &"Z"),
            Err(Error::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_remove_edge_directed_keeps_reverse() {
        let mut g = Graph::new(true, false);
        g.add_unweighted_edge("A", "B");
        g.add_unweighted_edge("B", "A");

        assert_eq!(g.remove_edge(&"A", &"B"), Ok(1));
        assert!(g.has_edge(&"B", &"A"));
    }

    #[test]
    fn test_remove_vertex() {
        let mut g = triangle();
        g.add_unweighted_edge("A", "D");

        g.remove_vertex(&"A").unwrap();

        assert!(!g.has_vertex(&"A"));
        assert_eq!(g.vertex_count(), 3);
        assert!(!g.has_edge(&"B", &"A"));
        assert!(!g.has_edge(&"D", &"A"));
        assert_eq!(g.degree(&"D"), Ok(0));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(
            g.vertices().copied().collect::<Vec<_>>(),
            vec!["B", "C", "D"]
        );
    }

    #[test]
    fn test_remove_vertex_missing() {
        let mut g = triangle();
        assert_eq!(
            g.remove_vertex(&"Z"),
            Err(Error::VertexNotFound("\"Z\"".to_string()))
        );
    }

    #[test]
    fn test_neighbors() {
        let mut g = Graph::new(true, true);
        g.add_edge("A", "B", 4.0);
        g.add_edge("A", "C", 2.0);

        let neighbors = g.neighbors(&"A").unwrap();
        assert_eq!(
            neighbors,
            &[Neighbor::new("B", 4.0), Neighbor::new("C", 2.0)]
        );
        assert!(g.neighbors(&"B").unwrap().is_empty());
        assert!(g.neighbors(&"Z").is_err());
        assert!(g.degree(&"Z").is_err());
    }

    #[test]
    fn test_edges_undirected_once() {
        let g = triangle();
        let edges = g.edges();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], Edge::new("A", "B", 1.0));
        assert_eq!(edges[1], Edge::new("A", "C", 1.0));
        assert_eq!(edges[2], Edge::new("B", "C", 1.0));
    }

    #[test]
    fn test_edges_directed() {
        let mut g = Graph::new(true, true);
        g.add_edge(1, 2, 0.5);
        g.add_edge(2, 1, 1.5);
        let edges = g.edges();
        assert_eq!(edges, vec![Edge::new(1, 2, 0.5), Edge::new(2, 1, 1.5)]);
    }

    #[test]
    fn test_index_mapping() {
        let g = triangle();
        assert_eq!(g.index_of(&"C"), Some(2));
        assert_eq!(g.vertex_at(1), Some(&"B"));
        assert_eq!(g.vertex_at(7), None);
        assert!(g.require(&"Q").is_err());
        assert!(g.neighbors_at(7).is_empty());
    }

    #[test]
    fn test_transpose() {
        let mut g = Graph::new(true, true);
        g.add_edge("A", "B", 3.0);
        g.add_edge("B", "C", 4.0);
        g.add_vertex("D");

        let t = g.transpose();
        assert!(t.has_edge(&"B", &"A"));
        assert!(t.has_edge(&"C", &"B"));
        assert!(!t.has_edge(&"A", &"B"));
        assert_eq!(t.edge_weight(&"C", &"B"), Some(4.0));
        assert_eq!(t.vertex_set(), g.vertex_set());
        assert_eq!(t.edge_count(), 2);
    }

    #[test]
    fn test_negative_weight_detection() {
        let mut g = Graph::new(true, true);
        g.add_edge("A", "B", 1.0);
        assert!(!g.has_negative_weight());
        g.add_edge("B", "C", -1.0);
        assert!(g.has_negative_weight());
    }

    #[test]
    fn test_display() {
        let mut g = Graph::new(true, true);
        g.add_edge("A", "B", 2.0);
        g.add_vertex("C");

        let rendered = g.to_string();
        assert_eq!(
            rendered,
            "Graph(directed=true, weighted=true, vertices=3)\n  \"A\" -> \"B\"(2)\n  \"B\" -> (no edges)\n  \"C\" -> (no edges)"
        );
    }

    #[test]
    fn test_clear() {
        let mut g = triangle();
        g.clear();
        assert!(g.is_empty());
        assert!(!g.is_directed());
    }
}

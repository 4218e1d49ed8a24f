//! Union-Find (disjoint set union).
//!
//! Elements are interned to dense indices in registration order; the forest
//! itself lives in parallel `parent`/`rank`/`size` vectors.
//!
//! `find` compresses paths fully and `union` links roots by rank or by size.
//! With both in place a sequence of m operations on n elements costs
//! O(m α(n)); either heuristic alone degrades to O(log n) per operation.

use std::fmt;

use graphkit_common::{Error, Result, Vertex};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Heuristic used to pick the surviving root of a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnionStrategy {
    /// Attach the lower-rank root under the higher; on a tie the first
    /// argument's root survives and its rank grows by one.
    #[default]
    ByRank,
    /// Attach the smaller set under the larger; on a tie the first
    /// argument's root survives.
    BySize,
}

/// Shape statistics of a [`DisjointSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisjointSetStats {
    /// Number of registered elements.
    pub elements: usize,
    /// Number of disjoint sets.
    pub sets: usize,
    /// Size of the largest set.
    pub max_set_size: usize,
    /// Size of the smallest set (0 when empty).
    pub min_set_size: usize,
    /// Mean set size (0 when empty).
    pub avg_set_size: f64,
    /// Longest parent chain from any element to its root.
    pub max_tree_height: usize,
}

/// Union-Find over arbitrary hashable elements.
///
/// # Examples
///
/// ```
/// use graphkit_core::DisjointSet;
///
/// let mut sets = DisjointSet::from_elements(["a", "b", "c"]);
/// assert!(sets.union(&"a", &"b").unwrap());
/// assert!(sets.connected(&"a", &"b").unwrap());
/// assert!(!sets.connected(&"a", &"c").unwrap());
/// assert_eq!(sets.set_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
    strategy: UnionStrategy,
    /// Element labels; position is the element's index.
    elements: IndexSet<T>,
    parent: Vec<usize>,
    /// Upper bound on the height of the tree under each root.
    rank: Vec<u32>,
    /// Number of elements under each root (stale for non-roots).
    size: Vec<usize>,
}

impl<T: Vertex> DisjointSet<T> {
    /// Creates an empty structure using union by rank.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(UnionStrategy::default())
    }

    /// Creates an empty structure using the given union heuristic.
    #[must_use]
    pub fn with_strategy(strategy: UnionStrategy) -> Self {
        Self {
            strategy,
            elements: IndexSet::new(),
            parent: Vec::new(),
            rank: Vec::new(),
            size: Vec::new(),
        }
    }

    /// Creates a structure with one singleton set per element.
    pub fn from_elements(elements: impl IntoIterator<Item = T>) -> Self {
        let mut sets = Self::new();
        for element in elements {
            sets.make_set(element);
        }
        sets
    }

    /// Returns the configured union heuristic.
    #[must_use]
    pub fn strategy(&self) -> UnionStrategy {
        self.strategy
    }

    /// Registers `element` as a singleton set.
    ///
    /// Returns false, leaving its current set untouched, if it was already
    /// registered.
    pub fn make_set(&mut self, element: T) -> bool {
        let (index, inserted) = self.elements.insert_full(element);
        if inserted {
            self.parent.push(index);
            self.rank.push(0);
            self.size.push(1);
        }
        inserted
    }

    /// Returns true if `element` is registered.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the representative of the set containing `element`.
    ///
    /// Every node on the path is repointed directly at the root.
    pub fn find(&mut self, element: &T) -> Result<T> {
        let index = self.index(element)?;
        let root = self.find_index(index);
        Ok(self.label(root))
    }

    /// Merges the sets containing `a` and `b` using the configured heuristic.
    ///
    /// Returns false if they were already in the same set.
    pub fn union(&mut self, a: &T, b: &T) -> Result<bool> {
        self.union_with(a, b, self.strategy)
    }

    /// Merges using union by rank regardless of the configured heuristic.
    pub fn union_by_rank(&mut self, a: &T, b: &T) -> Result<bool> {
        self.union_with(a, b, UnionStrategy::ByRank)
    }

    /// Merges using union by size regardless of the configured heuristic.
    pub fn union_by_size(&mut self, a: &T, b: &T) -> Result<bool> {
        self.union_with(a, b, UnionStrategy::BySize)
    }

    /// Returns true if `a` and `b` are in the same set.
    pub fn connected(&mut self, a: &T, b: &T) -> Result<bool> {
        let a = self.index(a)?;
        let b = self.index(b)?;
        Ok(self.find_index(a) == self.find_index(b))
    }

    /// Returns the number of elements in the set containing `element`.
    pub fn set_size(&mut self, element: &T) -> Result<usize> {
        let index = self.index(element)?;
        let root = self.find_index(index);
        Ok(self.size[root])
    }

    /// Returns the number of disjoint sets.
    #[must_use]
    pub fn set_count(&self) -> usize {
        (0..self.parent.len())
            .filter(|&i| self.parent[i] == i)
            .count()
    }

    /// Returns every set as `(representative, members)`.
    ///
    /// Sets are ordered by the registration of their first member, and
    /// members by registration order.
    pub fn sets(&mut self) -> Vec<(T, Vec<T>)> {
        let mut slot_of_root = vec![usize::MAX; self.parent.len()];
        let mut grouped: Vec<(usize, Vec<T>)> = Vec::new();

        for i in 0..self.parent.len() {
            let root = self.find_index(i);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = grouped.len();
                grouped.push((root, Vec::new()));
            }
            grouped[slot_of_root[root]].1.push(self.label(i));
        }

        grouped
            .into_iter()
            .map(|(root, members)| (self.label(root), members))
            .collect()
    }

    /// Computes shape statistics without compressing any path.
    #[must_use]
    pub fn stats(&self) -> DisjointSetStats {
        let n = self.parent.len();
        let roots: Vec<usize> = (0..n).filter(|&i| self.parent[i] == i).collect();
        let sizes: Vec<usize> = roots.iter().map(|&r| self.size[r]).collect();

        let max_tree_height = (0..n)
            .map(|mut i| {
                let mut depth = 0;
                while self.parent[i] != i {
                    i = self.parent[i];
                    depth += 1;
                }
                depth
            })
            .max()
            .unwrap_or(0);

        DisjointSetStats {
            elements: n,
            sets: roots.len(),
            max_set_size: sizes.iter().copied().max().unwrap_or(0),
            min_set_size: sizes.iter().copied().min().unwrap_or(0),
            avg_set_size: if roots.is_empty() {
                0.0
            } else {
                n as f64 / roots.len() as f64
            },
            max_tree_height,
        }
    }

    // === Internal Helpers ===

    fn index(&self, element: &T) -> Result<usize> {
        self.elements
            .get_index_of(element)
            .ok_or_else(|| Error::element_not_found(element))
    }

    fn label(&self, index: usize) -> T {
        self.elements[index].clone()
    }

    /// Two-pass find: locate the root, then repoint the whole path at it.
    fn find_index(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    fn union_with(&mut self, a: &T, b: &T, strategy: UnionStrategy) -> Result<bool> {
        let a = self.index(a)?;
        let b = self.index(b)?;
        let root_a = self.find_index(a);
        let root_b = self.find_index(b);

        if root_a == root_b {
            return Ok(false);
        }

        let (survivor, absorbed) = match strategy {
            UnionStrategy::ByRank if self.rank[root_a] < self.rank[root_b] => (root_b, root_a),
            UnionStrategy::ByRank => (root_a, root_b),
            UnionStrategy::BySize if self.size[root_a] < self.size[root_b] => (root_b, root_a),
            UnionStrategy::BySize => (root_a, root_b),
        };

        // Only roots are ever linked, so parent chains stay acyclic.
        self.parent[absorbed] = survivor;
        self.size[survivor] += self.size[absorbed];
        self.rank[survivor] = self.rank[survivor].max(self.rank[absorbed] + 1);

        Ok(true)
    }
}

impl<T: Vertex> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Vertex> FromIterator<T> for DisjointSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T: Vertex> fmt::Display for DisjointSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display must not mutate, so walk parent chains without compressing.
        let n = self.parent.len();
        let root_of = |mut i: usize| {
            while self.parent[i] != i {
                i = self.parent[i];
            }
            i
        };

        let mut order: Vec<usize> = Vec::new();
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n];
        for i in 0..n {
            let root = root_of(i);
            if members[root].is_empty() {
                order.push(root);
            }
            members[root].push(i);
        }

        write!(f, "DisjointSet({} elements, {} sets:", n, order.len())?;
        for (k, root) in order.iter().enumerate() {
            f.write_str(if k == 0 { " {" } else { " | {" })?;
            for (j, &m) in members[*root].iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}", self.elements[m])?;
            }
            f.write_str("}")?;
        }
        f.write_str(")")
    }
}

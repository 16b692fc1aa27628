//! `VertexEdgeIndex`: the vertex → edge-list map backing every incidence store.
//!
//! Backed by an `IndexMap` with the Fx hasher: lookups are hashed, and
//! enumeration follows insertion order until a vertex is removed (removal uses
//! `swap_remove`, which moves the last vertex into the freed position).

use core::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::EdgeList;

/// Maps each vertex of a store to its edge list for one direction.
#[derive(Debug, Clone)]
pub struct VertexEdgeIndex<V, E> {
    map: IndexMap<V, EdgeList<E>, FxBuildHasher>,
}

impl<V, E> Default for VertexEdgeIndex<V, E> {
    fn default() -> Self {
        Self {
            map: IndexMap::default(),
        }
    }
}

impl<V, E> VertexEdgeIndex<V, E> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no vertex is indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates the vertices.
    pub fn vertices(&self) -> indexmap::map::Keys<'_, V, EdgeList<E>> {
        self.map.keys()
    }

    /// Iterates `(vertex, edges)` pairs.
    pub fn iter(&self) -> indexmap::map::Iter<'_, V, EdgeList<E>> {
        self.map.iter()
    }

    /// Iterates every edge list mutably.
    pub fn lists_mut(&mut self) -> indexmap::map::ValuesMut<'_, V, EdgeList<E>> {
        self.map.values_mut()
    }

    /// Returns the `(vertex, edges)` pair at position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&V, &EdgeList<E>)> {
        self.map.get_index(index)
    }

    /// Sum of all edge list lengths.
    pub fn total_edges(&self) -> usize {
        self.map.values().map(EdgeList::len).sum()
    }

    /// Drops every vertex and edge list.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<V: Eq + Hash, E> VertexEdgeIndex<V, E> {
    /// Releases unused capacity of the map and of every list.
    pub fn trim_excess(&mut self) {
        for list in self.map.values_mut() {
            list.trim_excess();
        }
        self.map.shrink_to_fit();
    }

    /// Returns `true` if `vertex` is indexed.
    #[inline]
    pub fn contains(&self, vertex: &V) -> bool {
        self.map.contains_key(vertex)
    }

    /// Indexes `vertex` with `edges` unless it is already present.
    ///
    /// Returns `false` (and leaves the existing list untouched) on duplicates.
    pub fn insert(&mut self, vertex: V, edges: EdgeList<E>) -> bool {
        match self.map.entry(vertex) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(edges);
                true
            }
        }
    }

    /// The edge list of `vertex`.
    #[inline]
    pub fn get(&self, vertex: &V) -> Option<&EdgeList<E>> {
        self.map.get(vertex)
    }

    /// The mutable edge list of `vertex`.
    #[inline]
    pub fn get_mut(&mut self, vertex: &V) -> Option<&mut EdgeList<E>> {
        self.map.get_mut(vertex)
    }

    /// Position of `vertex` in enumeration order.
    #[inline]
    pub fn position(&self, vertex: &V) -> Option<usize> {
        self.map.get_index_of(vertex)
    }

    /// Unindexes `vertex`, returning its edge list.
    pub fn remove(&mut self, vertex: &V) -> Option<EdgeList<E>> {
        self.map.swap_remove(vertex)
    }
}

impl<V: Eq + Hash, E> FromIterator<(V, EdgeList<E>)> for VertexEdgeIndex<V, E> {
    fn from_iter<I: IntoIterator<Item = (V, EdgeList<E>)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_duplicates() {
        let mut index: VertexEdgeIndex<u32, (u32, u32)> = VertexEdgeIndex::new();
        assert!(index.insert(1, vec![(1, 2)].into()));
        assert!(!index.insert(1, EdgeList::new()));
        assert_eq!(index.get(&1).map(EdgeList::len), Some(1));
    }

    #[test]
    fn clone_is_structural() {
        let mut index: VertexEdgeIndex<u32, (u32, u32)> = VertexEdgeIndex::new();
        index.insert(1, vec![(1, 2)].into());
        index.insert(2, EdgeList::new());

        let copy = index.clone();
        index.get_mut(&1).unwrap().push((1, 1));
        index.remove(&2);

        assert_eq!(copy.len(), 2);
        assert_eq!(copy.total_edges(), 1);
        assert_eq!(index.total_edges(), 2);
    }

    #[test]
    fn enumeration_follows_insertion() {
        let index: VertexEdgeIndex<char, (char, char)> =
            ['c', 'a', 'b'].into_iter().map(|v| (v, EdgeList::new())).collect();
        assert_eq!(index.vertices().copied().collect::<Vec<_>>(), vec!['c', 'a', 'b']);
        assert_eq!(index.position(&'b'), Some(2));
    }
}

//! `EdgeList`: the ordered, duplicate-tolerant edge sequence held by one
//! `(vertex, direction)` slot of an incidence store.

use core::ops::Index;

/// An ordered list of edges.
///
/// Duplicates are allowed; stores that forbid parallel edges check before
/// pushing. Removal preserves the relative order of the remaining edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList<E> {
    edges: Vec<E>,
}

impl<E> Default for EdgeList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EdgeList<E> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Creates an empty list with room for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    /// Number of edges in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the list holds no edge.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Appends an edge.
    #[inline]
    pub fn push(&mut self, edge: E) {
        self.edges.push(edge);
    }

    /// Appends every edge of `edges`.
    pub fn add_range<I: IntoIterator<Item = E>>(&mut self, edges: I) {
        self.edges.extend(edges);
    }

    /// Returns the edge at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&E> {
        self.edges.get(index)
    }

    /// Iterates the edges in insertion order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.edges.iter()
    }

    /// Views the list as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.edges
    }

    /// Returns `true` if any edge satisfies `pred`.
    #[inline]
    pub fn any<P: FnMut(&E) -> bool>(&self, pred: P) -> bool {
        self.edges.iter().any(pred)
    }

    /// Counts the edges satisfying `pred`.
    pub fn count_where<P: FnMut(&&E) -> bool>(&self, pred: P) -> usize {
        self.edges.iter().filter(pred).count()
    }

    /// Removes and returns every edge satisfying `pred`, keeping the order of
    /// both the removed and the remaining edges.
    pub fn extract_where<P: FnMut(&E) -> bool>(&mut self, pred: P) -> Vec<E> {
        let (removed, kept): (Vec<E>, Vec<E>) =
            core::mem::take(&mut self.edges).into_iter().partition(pred);
        self.edges = kept;
        removed
    }

    /// Removes and returns all edges, leaving the list empty.
    pub fn take_all(&mut self) -> Vec<E> {
        core::mem::take(&mut self.edges)
    }

    /// Drops every edge.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Releases unused capacity.
    pub fn trim_excess(&mut self) {
        self.edges.shrink_to_fit();
    }

    /// Unwraps the backing vector.
    pub fn into_vec(self) -> Vec<E> {
        self.edges
    }
}

impl<E: PartialEq> EdgeList<E> {
    /// Returns `true` if an edge equal to `edge` is present.
    #[inline]
    pub fn contains(&self, edge: &E) -> bool {
        self.edges.iter().any(|e| e == edge)
    }

    /// Removes the first edge equal to `edge`.
    ///
    /// Returns the removed edge, or `None` if no edge matched.
    pub fn remove_first(&mut self, edge: &E) -> Option<E> {
        let pos = self.edges.iter().position(|e| e == edge)?;
        Some(self.edges.remove(pos))
    }
}

impl<E> Index<usize> for EdgeList<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.edges[index]
    }
}

impl<E> FromIterator<E> for EdgeList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<E> From<Vec<E>> for EdgeList<E> {
    fn from(edges: Vec<E>) -> Self {
        Self { edges }
    }
}

impl<'a, E> IntoIterator for &'a EdgeList<E> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl<E> IntoIterator for EdgeList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_kept() {
        let mut list = EdgeList::new();
        list.push((1, 2));
        list.push((1, 2));
        assert_eq!(list.len(), 2);
        assert!(list.contains(&(1, 2)));
    }

    #[test]
    fn remove_first_keeps_order() {
        let mut list: EdgeList<_> = vec![(0, 1), (0, 2), (0, 1), (0, 3)].into();
        assert_eq!(list.remove_first(&(0, 1)), Some((0, 1)));
        assert_eq!(list.as_slice(), &[(0, 2), (0, 1), (0, 3)]);
        assert_eq!(list.remove_first(&(9, 9)), None);
    }

    #[test]
    fn extract_where_partitions() {
        let mut list: EdgeList<_> = (0..6).map(|i| (0, i)).collect();
        let removed = list.extract_where(|e| e.1 % 2 == 0);
        assert_eq!(removed, vec![(0, 0), (0, 2), (0, 4)]);
        assert_eq!(list.as_slice(), &[(0, 1), (0, 3), (0, 5)]);
    }

    #[test]
    fn clone_is_independent() {
        let mut a: EdgeList<_> = vec![(1, 2)].into();
        let b = a.clone();
        a.push((2, 3));
        a.trim_excess();
        assert_eq!(b.len(), 1);
        assert_eq!(a.len(), 2);
        assert_eq!(a[1], (2, 3));
    }
}

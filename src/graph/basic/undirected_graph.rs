//! A mutable undirected graph.
//!
//! Each vertex owns one adjacency list. An edge `(s, t)` with `s != t` sits
//! in both `adjacent[s]` and `adjacent[t]`; a self-edge sits once in
//! `adjacent[s]` but counts twice towards [`adjacent_degree`].
//!
//! How `try_get_edge(a, b)` treats orientation is fixed at construction by an
//! [`EdgeLookup`] strategy.
//!
//! [`adjacent_degree`]: ImplicitUndirectedGraph::adjacent_degree

use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;

use crate::collections::{EdgeList, VertexEdgeIndex};
use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::graph::events::{GraphEvents, ObservableGraph};
use crate::graph::options::GraphOptions;
use crate::graph::traits::{
    EdgeSet, GraphBase, ImplicitUndirectedGraph, MutableEdgeSet, MutableGraph,
    MutableUndirectedGraph, MutableVertexAndEdgeSet, MutableVertexSet, VertexSet,
};

/// Orientation policy for endpoint lookups on an undirected store.
pub enum EdgeLookup<V> {
    /// `(a, b)` and `(b, a)` match the same edge whatever order it was stored
    /// in. Needs no ordering on vertices.
    Symmetric,
    /// Edges are stored with `cmp(source, target) != Greater`. Queries are
    /// reordered with the comparer and matched exactly.
    Canonical(fn(&V, &V) -> Ordering),
}

impl<V> EdgeLookup<V> {
    /// Orders `(a, b)` the way the strategy stores them.
    #[inline]
    pub fn reorder<'a>(&self, a: &'a V, b: &'a V) -> (&'a V, &'a V) {
        match self {
            Self::Canonical(cmp) if cmp(a, b) == Ordering::Greater => (b, a),
            _ => (a, b),
        }
    }

    fn accepts(&self, source: &V, target: &V) -> bool {
        match self {
            Self::Symmetric => true,
            Self::Canonical(cmp) => cmp(source, target) != Ordering::Greater,
        }
    }
}

impl<V> Clone for EdgeLookup<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for EdgeLookup<V> {}

impl<V> Default for EdgeLookup<V> {
    fn default() -> Self {
        Self::Symmetric
    }
}

impl<V> fmt::Debug for EdgeLookup<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric => f.write_str("Symmetric"),
            Self::Canonical(_) => f.write_str("Canonical"),
        }
    }
}

/// An undirected adjacency-list graph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(1)\) amortized | |
/// | `remove_vertex` | \(O(\sum \deg(u))\) | Over the removed vertex's neighbours |
/// | `add_edge` | \(O(1)\) / \(O(\deg)\) | Scan only when parallel edges are forbidden |
/// | `try_get_edge` | \(O(\min(\deg a, \deg b))\) | Smaller list is scanned |
/// | `adjacent_degree` | \(O(\deg)\) | Self-edges are counted on the fly |
#[derive(Debug)]
pub struct UndirectedGraph<V, E> {
    adjacent: VertexEdgeIndex<V, E>,
    edge_count: usize,
    allow_parallel_edges: bool,
    edge_capacity: usize,
    lookup: EdgeLookup<V>,
    events: GraphEvents<V, E>,
}

impl<V, E> UndirectedGraph<V, E> {
    /// Creates an empty graph with symmetric lookup that accepts parallel
    /// edges.
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    /// Creates an empty graph with the given parallel-edge policy.
    pub fn with_parallel_edges(allow_parallel_edges: bool) -> Self {
        Self::with_options(GraphOptions::new().allow_parallel_edges(allow_parallel_edges))
    }

    /// Creates an empty graph from `options`, with symmetric lookup.
    pub fn with_options(options: GraphOptions) -> Self {
        Self::with_lookup(options, EdgeLookup::Symmetric)
    }

    /// Creates an empty graph from `options` and an explicit lookup strategy.
    pub fn with_lookup(options: GraphOptions, lookup: EdgeLookup<V>) -> Self {
        Self {
            adjacent: VertexEdgeIndex::with_capacity(options.vertex_capacity),
            edge_count: 0,
            allow_parallel_edges: options.allow_parallel_edges,
            edge_capacity: options.edge_capacity,
            lookup,
            events: GraphEvents::new(),
        }
    }

    /// The lookup strategy chosen at construction.
    pub fn lookup(&self) -> EdgeLookup<V> {
        self.lookup
    }
}

impl<V: Ord, E> UndirectedGraph<V, E> {
    /// Creates an empty graph with canonical lookup under `Ord`.
    pub fn ordered() -> Self {
        Self::with_lookup(GraphOptions::default(), EdgeLookup::Canonical(Ord::cmp))
    }
}

impl<V, E> Default for UndirectedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, E: Clone> Clone for UndirectedGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            adjacent: self.adjacent.clone(),
            edge_count: self.edge_count,
            allow_parallel_edges: self.allow_parallel_edges,
            edge_capacity: self.edge_capacity,
            lookup: self.lookup,
            events: GraphEvents::new(),
        }
    }
}

impl<V, E> UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// The edges touching `vertex` as a slice, without cloning.
    pub fn adjacent_edge_slice(&self, vertex: &V) -> Option<&[E]> {
        self.adjacent.get(vertex).map(EdgeList::as_slice)
    }

    /// Every edge joining `a` and `b`, or `None` if `a` is unknown.
    pub fn try_get_edges(&self, a: &V, b: &V) -> Option<Vec<E>> {
        let list = self.adjacent.get(a)?;
        Some(list.iter().filter(|e| self.matches(e, a, b)).cloned().collect())
    }

    /// Releases unused adjacency list capacity.
    pub fn trim_edge_excess(&mut self) {
        self.adjacent.trim_excess();
    }

    fn matches(&self, edge: &E, a: &V, b: &V) -> bool {
        match self.lookup {
            EdgeLookup::Symmetric => edge.connects(a, b),
            EdgeLookup::Canonical(_) => {
                let (lo, hi) = self.lookup.reorder(a, b);
                edge.source() == lo && edge.target() == hi
            }
        }
    }

    /// Drops the second copy of `edge`, held by its other endpoint.
    fn unlink_other(&mut self, from: &V, edge: &E) {
        if edge.is_self_edge() {
            return;
        }
        let other = edge.other_vertex(from);
        let unlinked = self
            .adjacent
            .get_mut(other)
            .and_then(|list| list.remove_first(edge))
            .is_some();
        debug_assert!(unlinked, "adjacency lost the second copy of an edge");
    }
}

impl<V, E> GraphBase for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        false
    }

    fn allow_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V, E> VertexSet for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.adjacent.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.adjacent.vertices().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacent.contains(vertex)
    }
}

impl<V, E> EdgeSet for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Each edge is reported from its source's list only.
    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.adjacent.iter().flat_map(|(vertex, list)| {
            list.iter()
                .filter(move |e| e.source() == vertex)
                .cloned()
        })
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.adjacent
            .get(edge.source())
            .is_some_and(|list| list.contains(edge))
    }
}

impl<V, E> ImplicitUndirectedGraph for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_adjacent_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.adjacent.get(vertex).map(|list| list.iter().cloned())
    }

    fn adjacent_degree(&self, vertex: &V) -> GraphResult<usize> {
        let list = self.adjacent.get(vertex).ok_or(GraphError::VertexNotFound)?;
        Ok(list.len() + list.count_where(|e| e.is_self_edge()))
    }

    fn is_adjacent_edges_empty(&self, vertex: &V) -> GraphResult<bool> {
        self.adjacent
            .get(vertex)
            .map(EdgeList::is_empty)
            .ok_or(GraphError::VertexNotFound)
    }

    fn adjacent_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        let list = self.adjacent.get(vertex).ok_or(GraphError::VertexNotFound)?;
        list.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            len: list.len(),
        })
    }

    fn try_get_edge(&self, a: &V, b: &V) -> Option<E> {
        let (a, b) = self.lookup.reorder(a, b);
        let from_a = self.adjacent.get(a)?;
        let from_b = self.adjacent.get(b)?;
        let list = if from_b.len() < from_a.len() { from_b } else { from_a };
        list.iter().find(|e| self.matches(e, a, b)).cloned()
    }
}

impl<V, E> MutableGraph for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn clear(&mut self) {
        let index = core::mem::take(&mut self.adjacent);
        self.edge_count = 0;
        if self.events.has_edge_removed_listeners() {
            for (vertex, list) in index.iter() {
                self.events
                    .edges_removed(list.iter().filter(|e| e.source() == vertex));
            }
        }
        if self.events.has_vertex_removed_listeners() {
            for vertex in index.vertices() {
                self.events.vertex_removed(vertex);
            }
        }
        trace_op!(vertices = index.len(), "undirected graph cleared");
    }
}

impl<V, E> MutableVertexSet for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn add_vertex(&mut self, vertex: V) -> bool {
        let list = EdgeList::with_capacity(self.edge_capacity);
        if !self.adjacent.insert(vertex.clone(), list) {
            return false;
        }
        self.events.vertex_added(&vertex);
        trace_op!(vertex_count = self.adjacent.len(), "vertex added");
        true
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(own) = self.adjacent.remove(vertex) else {
            return false;
        };
        for edge in &own {
            self.unlink_other(vertex, edge);
        }
        self.edge_count -= own.len();
        self.events.edges_removed(&own);
        self.events.vertex_removed(vertex);
        debug_op!(removed_edges = own.len(), edge_count = self.edge_count, "vertex removed");
        true
    }
}

impl<V, E> MutableEdgeSet for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn add_edge(&mut self, edge: E) -> GraphResult<bool> {
        let (source, target) = (edge.source(), edge.target());
        if !self.adjacent.contains(source) || !self.adjacent.contains(target) {
            return Err(GraphError::VertexNotFound);
        }
        if !self.lookup.accepts(source, target) {
            return Err(GraphError::InvalidArgument(
                "undirected edge is not in canonical orientation",
            ));
        }
        if !self.allow_parallel_edges && self.try_get_edge(source, target).is_some() {
            return Ok(false);
        }
        if !edge.is_self_edge() {
            if let Some(list) = self.adjacent.get_mut(edge.target()) {
                list.push(edge.clone());
            }
        }
        if let Some(list) = self.adjacent.get_mut(edge.source()) {
            list.push(edge.clone());
        }
        self.edge_count += 1;
        self.events.edge_added(&edge);
        trace_op!(edge_count = self.edge_count, "edge added");
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(removed) = self
            .adjacent
            .get_mut(edge.source())
            .and_then(|list| list.remove_first(edge))
        else {
            return false;
        };
        self.unlink_other(edge.source(), edge);
        self.edge_count -= 1;
        self.events.edge_removed(&removed);
        trace_op!(edge_count = self.edge_count, "edge removed");
        true
    }
}

impl<V, E> MutableVertexAndEdgeSet for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

impl<V, E> MutableUndirectedGraph for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn remove_adjacent_edge_if<P>(&mut self, vertex: &V, pred: P) -> GraphResult<usize>
    where
        P: FnMut(&E) -> bool,
    {
        let gone = self
            .adjacent
            .get_mut(vertex)
            .ok_or(GraphError::VertexNotFound)?
            .extract_where(pred);
        for edge in &gone {
            self.unlink_other(vertex, edge);
        }
        self.edge_count -= gone.len();
        self.events.edges_removed(&gone);
        Ok(gone.len())
    }
}

impl<V, E> ObservableGraph for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn events(&self) -> &GraphEvents<V, E> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut GraphEvents<V, E> {
        &mut self.events
    }
}

impl<V, E> FromIterator<E> for UndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn from_iter<I: IntoIterator<Item = E>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.add_vertices_and_edge_range(edges);
        graph
    }
}

//! Graphs whose edges come from caller-supplied functions.
//!
//! Nothing is stored besides the callbacks (and, for the list variants, the
//! vertex set). Every query calls back, so the graph always reflects whatever
//! the callback returns at that moment.
//!
//! A callback answers `None` for a vertex it does not know and
//! `Some(edges)` otherwise. When the graph also holds a vertex set, the
//! callback's answers are filtered against it: edges leading outside the set
//! are dropped, since the callback cannot be relied on to agree with it.

use core::hash::Hash;
use core::marker::PhantomData;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitGraph, ImplicitUndirectedGraph,
    IncidenceGraph, VertexSet,
};

/// A directed graph defined by an out-edge function.
pub struct DelegateImplicitGraph<V, E, F> {
    out_edges: F,
    allow_parallel_edges: bool,
    _marker: PhantomData<fn(&V) -> E>,
}

/// The out-edge function already answers endpoint lookups through
/// [`IncidenceGraph`]'s provided methods.
pub type DelegateIncidenceGraph<V, E, F> = DelegateImplicitGraph<V, E, F>;

impl<V, E, F> DelegateImplicitGraph<V, E, F>
where
    F: Fn(&V) -> Option<Vec<E>>,
{
    /// Creates a graph answering out-edge queries with `out_edges`.
    pub fn new(out_edges: F, allow_parallel_edges: bool) -> Self {
        Self {
            out_edges,
            allow_parallel_edges,
            _marker: PhantomData,
        }
    }
}

impl<V, E, F> core::fmt::Debug for DelegateImplicitGraph<V, E, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelegateImplicitGraph")
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish_non_exhaustive()
    }
}

impl<V, E, F> GraphBase for DelegateImplicitGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V, E, F> ImplicitGraph for DelegateImplicitGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        (self.out_edges)(vertex).map(Vec::into_iter)
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        (self.out_edges)(vertex)
            .map(|edges| edges.len())
            .ok_or(GraphError::VertexNotFound)
    }

    fn out_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        let mut edges = (self.out_edges)(vertex).ok_or(GraphError::VertexNotFound)?;
        let len = edges.len();
        if index < len {
            Ok(edges.swap_remove(index))
        } else {
            Err(GraphError::IndexOutOfRange { index, len })
        }
    }
}

impl<V, E, F> IncidenceGraph for DelegateImplicitGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
}

/// A directed graph defined by an out-edge and an in-edge function.
///
/// The two functions are trusted to describe the same edges.
pub struct DelegateBidirectionalIncidenceGraph<V, E, F, G> {
    out_edges: F,
    in_edges: G,
    allow_parallel_edges: bool,
    _marker: PhantomData<fn(&V) -> E>,
}

impl<V, E, F, G> DelegateBidirectionalIncidenceGraph<V, E, F, G>
where
    F: Fn(&V) -> Option<Vec<E>>,
    G: Fn(&V) -> Option<Vec<E>>,
{
    /// Creates a graph answering out-edge queries with `out_edges` and
    /// in-edge queries with `in_edges`.
    pub fn new(out_edges: F, in_edges: G, allow_parallel_edges: bool) -> Self {
        Self {
            out_edges,
            in_edges,
            allow_parallel_edges,
            _marker: PhantomData,
        }
    }
}

impl<V, E, F, G> core::fmt::Debug for DelegateBidirectionalIncidenceGraph<V, E, F, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelegateBidirectionalIncidenceGraph")
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish_non_exhaustive()
    }
}

impl<V, E, F, G> GraphBase for DelegateBidirectionalIncidenceGraph<V, E, F, G>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
    G: Fn(&V) -> Option<Vec<E>>,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V, E, F, G> ImplicitGraph for DelegateBidirectionalIncidenceGraph<V, E, F, G>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
    G: Fn(&V) -> Option<Vec<E>>,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        (self.out_edges)(vertex).map(Vec::into_iter)
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        (self.out_edges)(vertex)
            .map(|edges| edges.len())
            .ok_or(GraphError::VertexNotFound)
    }
}

impl<V, E, F, G> IncidenceGraph for DelegateBidirectionalIncidenceGraph<V, E, F, G>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
    G: Fn(&V) -> Option<Vec<E>>,
{
}

impl<V, E, F, G> BidirectionalIncidenceGraph for DelegateBidirectionalIncidenceGraph<V, E, F, G>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
    G: Fn(&V) -> Option<Vec<E>>,
{
    fn try_get_in_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        (self.in_edges)(vertex).map(Vec::into_iter)
    }

    fn in_degree(&self, vertex: &V) -> GraphResult<usize> {
        (self.in_edges)(vertex)
            .map(|edges| edges.len())
            .ok_or(GraphError::VertexNotFound)
    }
}

/// A directed graph over a fixed vertex set, edges from an out-edge function.
///
/// Out-edges whose target is not in the vertex set are dropped, and vertices
/// outside the set are reported as unknown whatever the callback says.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `contains_vertex` | \(O(1)\) | Hashed set |
/// | `out_edges` / `out_degree` | callback + \(O(d)\) | Filtered on every call |
/// | `edges` / `edge_count` | \(O(n)\) callbacks | Recomputed on every call |
pub struct DelegateVertexAndEdgeListGraph<V, E, F> {
    vertices: IndexSet<V, FxBuildHasher>,
    out_edges: F,
    allow_parallel_edges: bool,
    _marker: PhantomData<fn(&V) -> E>,
}

impl<V, E, F> DelegateVertexAndEdgeListGraph<V, E, F>
where
    V: Eq + Hash,
    F: Fn(&V) -> Option<Vec<E>>,
{
    /// Creates a graph over `vertices` whose out-edges come from `out_edges`.
    /// Duplicate vertices collapse.
    pub fn new<I>(vertices: I, out_edges: F, allow_parallel_edges: bool) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self {
            vertices: vertices.into_iter().collect(),
            out_edges,
            allow_parallel_edges,
            _marker: PhantomData,
        }
    }
}

impl<V, E, F> core::fmt::Debug for DelegateVertexAndEdgeListGraph<V, E, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelegateVertexAndEdgeListGraph")
            .field("vertices", &self.vertices.len())
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish_non_exhaustive()
    }
}

impl<V, E, F> DelegateVertexAndEdgeListGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    /// The callback's out-edges of a known vertex, minus those leaving the set.
    fn filtered(&self, vertex: &V) -> Option<Vec<E>> {
        if !self.vertices.contains(vertex) {
            return None;
        }
        let mut edges = (self.out_edges)(vertex)?;
        edges.retain(|e| self.vertices.contains(e.target()));
        Some(edges)
    }
}

impl<V, E, F> GraphBase for DelegateVertexAndEdgeListGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V, E, F> VertexSet for DelegateVertexAndEdgeListGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.vertices.iter().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }
}

impl<V, E, F> EdgeSet for DelegateVertexAndEdgeListGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn edge_count(&self) -> usize {
        self.vertices
            .iter()
            .filter_map(|v| self.filtered(v))
            .map(|edges| edges.len())
            .sum()
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.vertices
            .iter()
            .filter_map(|v| self.filtered(v))
            .flatten()
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.filtered(edge.source())
            .is_some_and(|edges| edges.contains(edge))
    }
}

impl<V, E, F> ImplicitGraph for DelegateVertexAndEdgeListGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.filtered(vertex).map(Vec::into_iter)
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.filtered(vertex)
            .map(|edges| edges.len())
            .ok_or(GraphError::VertexNotFound)
    }
}

impl<V, E, F> IncidenceGraph for DelegateVertexAndEdgeListGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
}

/// An undirected graph over a fixed vertex set, edges from an adjacency
/// function.
///
/// The callback may list an edge from either endpoint. Edges that do not
/// touch the queried vertex, or whose other endpoint lies outside the set,
/// are dropped. [`EdgeSet::edges`] reports each edge once, from the vertex
/// it names as source.
pub struct DelegateUndirectedGraph<V, E, F> {
    vertices: IndexSet<V, FxBuildHasher>,
    adjacent_edges: F,
    allow_parallel_edges: bool,
    _marker: PhantomData<fn(&V) -> E>,
}

impl<V, E, F> DelegateUndirectedGraph<V, E, F>
where
    V: Eq + Hash,
    F: Fn(&V) -> Option<Vec<E>>,
{
    /// Creates a graph over `vertices` whose adjacent edges come from
    /// `adjacent_edges`.
    pub fn new<I>(vertices: I, adjacent_edges: F, allow_parallel_edges: bool) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self {
            vertices: vertices.into_iter().collect(),
            adjacent_edges,
            allow_parallel_edges,
            _marker: PhantomData,
        }
    }
}

impl<V, E, F> core::fmt::Debug for DelegateUndirectedGraph<V, E, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelegateUndirectedGraph")
            .field("vertices", &self.vertices.len())
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish_non_exhaustive()
    }
}

impl<V, E, F> DelegateUndirectedGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn filtered(&self, vertex: &V) -> Option<Vec<E>> {
        if !self.vertices.contains(vertex) {
            return None;
        }
        let mut edges = (self.adjacent_edges)(vertex)?;
        edges.retain(|e| e.is_adjacent(vertex) && self.vertices.contains(e.other_vertex(vertex)));
        Some(edges)
    }
}

impl<V, E, F> GraphBase for DelegateUndirectedGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
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

impl<V, E, F> VertexSet for DelegateUndirectedGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.vertices.iter().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }
}

impl<V, E, F> EdgeSet for DelegateUndirectedGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn edge_count(&self) -> usize {
        self.edges().count()
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.vertices.iter().flat_map(move |vertex| {
            self.filtered(vertex)
                .unwrap_or_default()
                .into_iter()
                .filter(move |e| e.source() == vertex)
        })
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.filtered(edge.source())
            .is_some_and(|edges| edges.contains(edge))
    }
}

impl<V, E, F> ImplicitUndirectedGraph for DelegateUndirectedGraph<V, E, F>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn try_get_adjacent_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.filtered(vertex).map(Vec::into_iter)
    }

    fn adjacent_degree(&self, vertex: &V) -> GraphResult<usize> {
        let edges = self.filtered(vertex).ok_or(GraphError::VertexNotFound)?;
        let loops = edges.iter().filter(|e| e.is_self_edge()).count();
        Ok(edges.len() + loops)
    }
}

#[cfg(test)]
mod tests;

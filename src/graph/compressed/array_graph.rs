//! Immutable array snapshots of mutable stores.
//!
//! Each snapshot copies, at construction, every vertex's edge lists into
//! boxed slices. Later mutation of the source is not observed. The tables
//! sit behind an `Arc`, so `clone` hands out the same snapshot.

use core::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitGraph, ImplicitUndirectedGraph,
    IncidenceGraph, VertexSet,
};

type EdgeTable<V, E> = IndexMap<V, Box<[E]>, FxBuildHasher>;

fn table_with_capacity<V, E>(capacity: usize) -> EdgeTable<V, E> {
    IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher)
}

fn positional<E: Clone>(edges: Option<&[E]>, index: usize) -> GraphResult<E> {
    let edges = edges.ok_or(GraphError::VertexNotFound)?;
    edges.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
        index,
        len: edges.len(),
    })
}

#[derive(Debug)]
struct OutSnapshot<V, E> {
    out_edges: EdgeTable<V, E>,
    edge_count: usize,
    allow_parallel_edges: bool,
}

/// Read-only copy of a directed graph's out-edge lists.
#[derive(Debug)]
pub struct ArrayAdjacencyGraph<V, E> {
    snapshot: Arc<OutSnapshot<V, E>>,
}

impl<V, E> Clone for ArrayAdjacencyGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<V, E> ArrayAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Captures the vertices and out-edges of `graph`.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: VertexSet<Vertex = V, Edge = E> + ImplicitGraph,
    {
        let mut out_edges = table_with_capacity(graph.vertex_count());
        let mut edge_count = 0;
        for vertex in graph.vertices() {
            let edges: Box<[E]> = graph
                .try_get_out_edges(&vertex)
                .map(Iterator::collect)
                .unwrap_or_default();
            edge_count += edges.len();
            out_edges.insert(vertex, edges);
        }
        debug_op!(vertices = out_edges.len(), edges = edge_count, "array snapshot built");
        Self {
            snapshot: Arc::new(OutSnapshot {
                out_edges,
                edge_count,
                allow_parallel_edges: graph.allow_parallel_edges(),
            }),
        }
    }

    /// The out-edges of `vertex` as a slice.
    pub fn out_edge_slice(&self, vertex: &V) -> Option<&[E]> {
        self.snapshot.out_edges.get(vertex).map(AsRef::as_ref)
    }
}

impl<V, E> GraphBase for ArrayAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.snapshot.allow_parallel_edges
    }
}

impl<V, E> VertexSet for ArrayAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.snapshot.out_edges.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.snapshot.out_edges.keys().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.snapshot.out_edges.contains_key(vertex)
    }
}

impl<V, E> EdgeSet for ArrayAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.snapshot.edge_count
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.snapshot.out_edges.values().flat_map(|edges| edges.iter().cloned())
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.out_edge_slice(edge.source())
            .is_some_and(|edges| edges.contains(edge))
    }
}

impl<V, E> ImplicitGraph for ArrayAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.out_edge_slice(vertex).map(|edges| edges.iter().cloned())
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.out_edge_slice(vertex)
            .map(<[E]>::len)
            .ok_or(GraphError::VertexNotFound)
    }

    fn out_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        positional(self.out_edge_slice(vertex), index)
    }
}

impl<V, E> IncidenceGraph for ArrayAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

#[derive(Debug)]
struct BidirectionalSnapshot<V, E> {
    out_edges: EdgeTable<V, E>,
    in_edges: EdgeTable<V, E>,
    edge_count: usize,
    allow_parallel_edges: bool,
}

/// Read-only copy of a bidirectional graph's out- and in-edge lists.
#[derive(Debug)]
pub struct ArrayBidirectionalGraph<V, E> {
    snapshot: Arc<BidirectionalSnapshot<V, E>>,
}

impl<V, E> Clone for ArrayBidirectionalGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<V, E> ArrayBidirectionalGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Captures the vertices, out-edges and in-edges of `graph`.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: VertexSet<Vertex = V, Edge = E> + BidirectionalIncidenceGraph,
    {
        let mut out_edges = table_with_capacity(graph.vertex_count());
        let mut in_edges = table_with_capacity(graph.vertex_count());
        let mut edge_count = 0;
        for vertex in graph.vertices() {
            let outgoing: Box<[E]> = graph
                .try_get_out_edges(&vertex)
                .map(Iterator::collect)
                .unwrap_or_default();
            let incoming: Box<[E]> = graph
                .try_get_in_edges(&vertex)
                .map(Iterator::collect)
                .unwrap_or_default();
            edge_count += outgoing.len();
            out_edges.insert(vertex.clone(), outgoing);
            in_edges.insert(vertex, incoming);
        }
        debug_op!(vertices = out_edges.len(), edges = edge_count, "array snapshot built");
        Self {
            snapshot: Arc::new(BidirectionalSnapshot {
                out_edges,
                in_edges,
                edge_count,
                allow_parallel_edges: graph.allow_parallel_edges(),
            }),
        }
    }

    /// The out-edges of `vertex` as a slice.
    pub fn out_edge_slice(&self, vertex: &V) -> Option<&[E]> {
        self.snapshot.out_edges.get(vertex).map(AsRef::as_ref)
    }

    /// The in-edges of `vertex` as a slice.
    pub fn in_edge_slice(&self, vertex: &V) -> Option<&[E]> {
        self.snapshot.in_edges.get(vertex).map(AsRef::as_ref)
    }
}

impl<V, E> GraphBase for ArrayBidirectionalGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.snapshot.allow_parallel_edges
    }
}

impl<V, E> VertexSet for ArrayBidirectionalGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.snapshot.out_edges.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.snapshot.out_edges.keys().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.snapshot.out_edges.contains_key(vertex)
    }
}

impl<V, E> EdgeSet for ArrayBidirectionalGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.snapshot.edge_count
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.snapshot.out_edges.values().flat_map(|edges| edges.iter().cloned())
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.out_edge_slice(edge.source())
            .is_some_and(|edges| edges.contains(edge))
    }
}

impl<V, E> ImplicitGraph for ArrayBidirectionalGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.out_edge_slice(vertex).map(|edges| edges.iter().cloned())
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.out_edge_slice(vertex)
            .map(<[E]>::len)
            .ok_or(GraphError::VertexNotFound)
    }

    fn out_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        positional(self.out_edge_slice(vertex), index)
    }
}

impl<V, E> IncidenceGraph for ArrayBidirectionalGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

impl<V, E> BidirectionalIncidenceGraph for ArrayBidirectionalGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_in_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.in_edge_slice(vertex).map(|edges| edges.iter().cloned())
    }

    fn in_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.in_edge_slice(vertex)
            .map(<[E]>::len)
            .ok_or(GraphError::VertexNotFound)
    }

    fn in_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        positional(self.in_edge_slice(vertex), index)
    }
}

#[derive(Debug)]
struct UndirectedSnapshot<V, E> {
    adjacent: EdgeTable<V, E>,
    edges: Box<[E]>,
    allow_parallel_edges: bool,
}

/// Read-only copy of an undirected graph's adjacency lists.
///
/// Endpoint lookups match either orientation.
#[derive(Debug)]
pub struct ArrayUndirectedGraph<V, E> {
    snapshot: Arc<UndirectedSnapshot<V, E>>,
}

impl<V, E> Clone for ArrayUndirectedGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<V, E> ArrayUndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Captures the vertices, edges and adjacency lists of `graph`.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: VertexSet<Vertex = V, Edge = E> + EdgeSet + ImplicitUndirectedGraph,
    {
        let mut adjacent = table_with_capacity(graph.vertex_count());
        for vertex in graph.vertices() {
            let edges: Box<[E]> = graph
                .try_get_adjacent_edges(&vertex)
                .map(Iterator::collect)
                .unwrap_or_default();
            adjacent.insert(vertex, edges);
        }
        let edges: Box<[E]> = graph.edges().collect();
        debug_op!(vertices = adjacent.len(), edges = edges.len(), "array snapshot built");
        Self {
            snapshot: Arc::new(UndirectedSnapshot {
                adjacent,
                edges,
                allow_parallel_edges: graph.allow_parallel_edges(),
            }),
        }
    }

    /// The edges touching `vertex` as a slice.
    pub fn adjacent_edge_slice(&self, vertex: &V) -> Option<&[E]> {
        self.snapshot.adjacent.get(vertex).map(AsRef::as_ref)
    }
}

impl<V, E> GraphBase for ArrayUndirectedGraph<V, E>
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
        self.snapshot.allow_parallel_edges
    }
}

impl<V, E> VertexSet for ArrayUndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.snapshot.adjacent.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.snapshot.adjacent.keys().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.snapshot.adjacent.contains_key(vertex)
    }
}

impl<V, E> EdgeSet for ArrayUndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.snapshot.edges.len()
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.snapshot.edges.iter().cloned()
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.adjacent_edge_slice(edge.source())
            .is_some_and(|edges| edges.contains(edge))
    }
}

impl<V, E> ImplicitUndirectedGraph for ArrayUndirectedGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_adjacent_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.adjacent_edge_slice(vertex)
            .map(|edges| edges.iter().cloned())
    }

    fn adjacent_degree(&self, vertex: &V) -> GraphResult<usize> {
        let edges = self
            .adjacent_edge_slice(vertex)
            .ok_or(GraphError::VertexNotFound)?;
        Ok(edges.len() + edges.iter().filter(|e| e.is_self_edge()).count())
    }

    fn adjacent_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        positional(self.adjacent_edge_slice(vertex), index)
    }

    fn try_get_edge(&self, a: &V, b: &V) -> Option<E> {
        let from_a = self.adjacent_edge_slice(a)?;
        let from_b = self.adjacent_edge_slice(b)?;
        let edges = if from_b.len() < from_a.len() { from_b } else { from_a };
        edges.iter().find(|e| e.connects(a, b)).cloned()
    }
}

#[cfg(test)]
mod tests;

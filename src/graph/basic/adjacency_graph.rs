//! A mutable directed graph indexed by out-edges only.
//!
//! This representation prioritizes **cheap forward traversal** and small
//! memory footprint: every vertex owns one out-edge list and nothing else.
//! The price is paid on vertex removal, which must scan every other vertex's
//! list to purge edges targeting the removed vertex.

use core::hash::Hash;

use crate::collections::{EdgeList, VertexEdgeIndex};
use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::graph::events::{GraphEvents, ObservableGraph};
use crate::graph::options::GraphOptions;
use crate::graph::traits::{
    EdgeSet, GraphBase, ImplicitGraph, IncidenceGraph, MutableEdgeSet, MutableGraph,
    MutableIncidenceGraph, MutableVertexAndEdgeSet, MutableVertexSet, VertexSet,
};

/// A directed adjacency-list graph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(1)\) amortized | Hashed insert |
/// | `remove_vertex` | \(O(n + m)\) | Must scan all out-edge lists |
/// | `add_edge` | \(O(1)\) / \(O(\text{out-degree})\) | Scan only when parallel edges are forbidden |
/// | `remove_edge` | \(O(\text{out-degree})\) | Linear scan of the source's list |
/// | `out_degree` | \(O(1)\) | returns `EdgeList::len` |
/// | `clone` | \(O(n + m)\) | New indices, cloned edge values |
#[derive(Debug)]
pub struct AdjacencyGraph<V, E> {
    out_edges: VertexEdgeIndex<V, E>,
    edge_count: usize,
    allow_parallel_edges: bool,
    edge_capacity: usize,
    events: GraphEvents<V, E>,
}

impl<V, E> AdjacencyGraph<V, E> {
    /// Creates an empty graph that accepts parallel edges.
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    /// Creates an empty graph with the given parallel-edge policy.
    pub fn with_parallel_edges(allow_parallel_edges: bool) -> Self {
        Self::with_options(GraphOptions::new().allow_parallel_edges(allow_parallel_edges))
    }

    /// Creates an empty graph from `options`.
    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            out_edges: VertexEdgeIndex::with_capacity(options.vertex_capacity),
            edge_count: 0,
            allow_parallel_edges: options.allow_parallel_edges,
            edge_capacity: options.edge_capacity,
            events: GraphEvents::new(),
        }
    }

    /// Initial capacity given to each new out-edge list.
    pub fn edge_capacity(&self) -> usize {
        self.edge_capacity
    }

    /// Changes the initial capacity of out-edge lists created from now on.
    pub fn set_edge_capacity(&mut self, capacity: usize) {
        self.edge_capacity = capacity;
    }
}

impl<V, E> Default for AdjacencyGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, E: Clone> Clone for AdjacencyGraph<V, E> {
    /// Structural copy: new indices holding clones of the same edges.
    /// Listeners are not copied.
    fn clone(&self) -> Self {
        Self {
            out_edges: self.out_edges.clone(),
            edge_count: self.edge_count,
            allow_parallel_edges: self.allow_parallel_edges,
            edge_capacity: self.edge_capacity,
            events: GraphEvents::new(),
        }
    }
}

impl<V, E> AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// The out-edges of `vertex` as a slice, without cloning.
    pub fn out_edge_slice(&self, vertex: &V) -> Option<&[E]> {
        self.out_edges.get(vertex).map(EdgeList::as_slice)
    }
}

impl<V, E> GraphBase for AdjacencyGraph<V, E>
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
        self.allow_parallel_edges
    }
}

impl<V, E> VertexSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.out_edges.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.out_edges.vertices().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.out_edges.contains(vertex)
    }
}

impl<V, E> EdgeSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.out_edges
            .iter()
            .flat_map(|(_, list)| list.iter().cloned())
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.out_edges
            .get(edge.source())
            .is_some_and(|list| list.contains(edge))
    }
}

impl<V, E> ImplicitGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.out_edges.get(vertex).map(|list| list.iter().cloned())
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.out_edges
            .get(vertex)
            .map(EdgeList::len)
            .ok_or(GraphError::VertexNotFound)
    }

    fn out_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        let list = self.out_edges.get(vertex).ok_or(GraphError::VertexNotFound)?;
        list.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            len: list.len(),
        })
    }
}

impl<V, E> IncidenceGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

impl<V, E> MutableGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn clear(&mut self) {
        let index = core::mem::take(&mut self.out_edges);
        self.edge_count = 0;
        for (_, list) in index.iter() {
            self.events.edges_removed(list);
        }
        if self.events.has_vertex_removed_listeners() {
            for vertex in index.vertices() {
                self.events.vertex_removed(vertex);
            }
        }
        trace_op!(vertices = index.len(), "adjacency graph cleared");
    }
}

impl<V, E> MutableVertexSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn add_vertex(&mut self, vertex: V) -> bool {
        let list = EdgeList::with_capacity(self.edge_capacity);
        if !self.out_edges.insert(vertex.clone(), list) {
            return false;
        }
        self.events.vertex_added(&vertex);
        trace_op!(vertex_count = self.out_edges.len(), "vertex added");
        true
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(own) = self.out_edges.remove(vertex) else {
            return false;
        };
        let mut removed = own.len();
        self.events.edges_removed(&own);

        // Edges targeting `vertex` can sit in any other list.
        for list in self.out_edges.lists_mut() {
            let gone = list.extract_where(|e| e.target() == vertex);
            removed += gone.len();
            self.events.edges_removed(&gone);
        }

        self.edge_count -= removed;
        self.events.vertex_removed(vertex);
        debug_op!(removed_edges = removed, edge_count = self.edge_count, "vertex removed");
        true
    }
}

impl<V, E> MutableEdgeSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn add_edge(&mut self, edge: E) -> GraphResult<bool> {
        if !self.out_edges.contains(edge.target()) {
            return Err(GraphError::VertexNotFound);
        }
        let allow_parallel = self.allow_parallel_edges;
        let list = self
            .out_edges
            .get_mut(edge.source())
            .ok_or(GraphError::VertexNotFound)?;
        if !allow_parallel && list.any(|e| e.target() == edge.target()) {
            return Ok(false);
        }
        list.push(edge);
        self.edge_count += 1;
        if let Some(added) = list.as_slice().last() {
            self.events.edge_added(added);
        }
        trace_op!(edge_count = self.edge_count, "edge added");
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(list) = self.out_edges.get_mut(edge.source()) else {
            return false;
        };
        let Some(removed) = list.remove_first(edge) else {
            return false;
        };
        self.edge_count -= 1;
        self.events.edge_removed(&removed);
        trace_op!(edge_count = self.edge_count, "edge removed");
        true
    }

    fn remove_edge_if<P>(&mut self, mut pred: P) -> GraphResult<usize>
    where
        P: FnMut(&E) -> bool,
    {
        let mut removed = 0;
        for list in self.out_edges.lists_mut() {
            let gone = list.extract_where(&mut pred);
            removed += gone.len();
            self.events.edges_removed(&gone);
        }
        self.edge_count -= removed;
        Ok(removed)
    }
}

impl<V, E> MutableVertexAndEdgeSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

impl<V, E> MutableIncidenceGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn remove_out_edge_if<P>(&mut self, vertex: &V, pred: P) -> GraphResult<usize>
    where
        P: FnMut(&E) -> bool,
    {
        let list = self
            .out_edges
            .get_mut(vertex)
            .ok_or(GraphError::VertexNotFound)?;
        let gone = list.extract_where(pred);
        self.edge_count -= gone.len();
        self.events.edges_removed(&gone);
        Ok(gone.len())
    }

    fn trim_edge_excess(&mut self) {
        self.out_edges.trim_excess();
    }
}

impl<V, E> ObservableGraph for AdjacencyGraph<V, E>
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

impl<V, E> FromIterator<E> for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Builds a graph holding every edge and its endpoints.
    fn from_iter<I: IntoIterator<Item = E>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.add_vertices_and_edge_range(edges);
        graph
    }
}

#[cfg(test)]
mod tests;

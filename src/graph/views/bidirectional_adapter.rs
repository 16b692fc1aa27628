//! In-edge support for forward-only graphs.

use core::fmt;

use crate::collections::{EdgeList, VertexEdgeIndex};
use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitGraph, IncidenceGraph, VertexSet,
};

/// Adds in-edge queries on top of a graph that only knows its out-edges.
///
/// The in-edge index is built once, at construction, with one pass over the
/// wrapped graph's edges. Out-edge queries still read the wrapped graph.
/// The wrapped graph stays borrowed, so the index cannot go stale.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `new` | \(O(n + m)\) | Builds the in-edge index |
/// | `in_edges` / `in_degree` | \(O(1)\) | Index lookup |
/// | out-edge queries | as wrapped | Delegated |
pub struct BidirectionalAdapterGraph<'a, G: GraphBase> {
    base: &'a G,
    in_edges: VertexEdgeIndex<G::Vertex, G::Edge>,
}

impl<G: GraphBase> fmt::Debug for BidirectionalAdapterGraph<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BidirectionalAdapterGraph")
            .field("vertices", &self.in_edges.len())
            .field("edges", &self.in_edges.total_edges())
            .finish_non_exhaustive()
    }
}

impl<'a, G> BidirectionalAdapterGraph<'a, G>
where
    G: VertexSet + EdgeSet + IncidenceGraph,
{
    /// Wraps `base` and indexes its in-edges.
    pub fn new(base: &'a G) -> Self {
        let mut in_edges = VertexEdgeIndex::with_capacity(base.vertex_count());
        for vertex in base.vertices() {
            in_edges.insert(vertex, EdgeList::new());
        }
        for edge in base.edges() {
            if let Some(list) = in_edges.get_mut(edge.target()) {
                list.push(edge);
            }
        }
        debug_op!(
            vertices = in_edges.len(),
            edges = in_edges.total_edges(),
            "in-edge index built"
        );
        Self { base, in_edges }
    }

    /// The wrapped graph.
    pub fn base(&self) -> &'a G {
        self.base
    }
}

impl<G: GraphBase> GraphBase for BidirectionalAdapterGraph<'_, G> {
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn is_directed(&self) -> bool {
        self.base.is_directed()
    }

    fn allow_parallel_edges(&self) -> bool {
        self.base.allow_parallel_edges()
    }
}

impl<G: VertexSet> VertexSet for BidirectionalAdapterGraph<'_, G> {
    fn vertex_count(&self) -> usize {
        self.base.vertex_count()
    }

    fn vertices(&self) -> impl Iterator<Item = G::Vertex> + '_ {
        self.base.vertices()
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.base.contains_vertex(vertex)
    }
}

impl<G: EdgeSet> EdgeSet for BidirectionalAdapterGraph<'_, G> {
    fn edge_count(&self) -> usize {
        self.base.edge_count()
    }

    fn edges(&self) -> impl Iterator<Item = G::Edge> + '_ {
        self.base.edges()
    }

    fn contains_edge(&self, edge: &G::Edge) -> bool {
        self.base.contains_edge(edge)
    }
}

impl<G: ImplicitGraph> ImplicitGraph for BidirectionalAdapterGraph<'_, G> {
    fn try_get_out_edges(
        &self,
        vertex: &G::Vertex,
    ) -> Option<impl Iterator<Item = G::Edge> + '_> {
        self.base.try_get_out_edges(vertex)
    }

    fn out_degree(&self, vertex: &G::Vertex) -> GraphResult<usize> {
        self.base.out_degree(vertex)
    }

    fn out_edge(&self, vertex: &G::Vertex, index: usize) -> GraphResult<G::Edge> {
        self.base.out_edge(vertex, index)
    }
}

impl<G: IncidenceGraph> IncidenceGraph for BidirectionalAdapterGraph<'_, G> {
    fn contains_edge_between(&self, source: &G::Vertex, target: &G::Vertex) -> bool {
        self.base.contains_edge_between(source, target)
    }

    fn try_get_edge(&self, source: &G::Vertex, target: &G::Vertex) -> Option<G::Edge> {
        self.base.try_get_edge(source, target)
    }

    fn try_get_edges(&self, source: &G::Vertex, target: &G::Vertex) -> Option<Vec<G::Edge>> {
        self.base.try_get_edges(source, target)
    }
}

impl<G: IncidenceGraph> BidirectionalIncidenceGraph for BidirectionalAdapterGraph<'_, G> {
    fn try_get_in_edges(
        &self,
        vertex: &G::Vertex,
    ) -> Option<impl Iterator<Item = G::Edge> + '_> {
        self.in_edges.get(vertex).map(|list| list.iter().cloned())
    }

    fn in_degree(&self, vertex: &G::Vertex) -> GraphResult<usize> {
        self.in_edges
            .get(vertex)
            .map(EdgeList::len)
            .ok_or(GraphError::VertexNotFound)
    }

    fn in_edge(&self, vertex: &G::Vertex, index: usize) -> GraphResult<G::Edge> {
        let list = self.in_edges.get(vertex).ok_or(GraphError::VertexNotFound)?;
        list.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            len: list.len(),
        })
    }
}

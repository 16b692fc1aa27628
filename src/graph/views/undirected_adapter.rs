//! Undirected view of a bidirectional graph.

use crate::edge::Edge;
use crate::error::GraphResult;
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitUndirectedGraph, VertexSet,
};

/// Reads a bidirectional graph as if its edges had no orientation.
///
/// The adjacent edges of a vertex are its out-edges followed by its
/// in-edges. A self-edge shows up in both lists of the wrapped graph and is
/// reported once, from the out side, while still counting twice in
/// `adjacent_degree`.
#[derive(Debug)]
pub struct UndirectedBidirectionalGraph<'a, G> {
    original: &'a G,
}

impl<G> Clone for UndirectedBidirectionalGraph<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for UndirectedBidirectionalGraph<'_, G> {}

impl<'a, G> UndirectedBidirectionalGraph<'a, G> {
    /// Wraps `original`.
    pub fn new(original: &'a G) -> Self {
        Self { original }
    }

    /// The wrapped graph.
    pub fn original(&self) -> &'a G {
        self.original
    }
}

impl<G: GraphBase> GraphBase for UndirectedBidirectionalGraph<'_, G> {
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn is_directed(&self) -> bool {
        false
    }

    fn allow_parallel_edges(&self) -> bool {
        self.original.allow_parallel_edges()
    }
}

impl<G: VertexSet> VertexSet for UndirectedBidirectionalGraph<'_, G> {
    fn vertex_count(&self) -> usize {
        self.original.vertex_count()
    }

    fn vertices(&self) -> impl Iterator<Item = G::Vertex> + '_ {
        self.original.vertices()
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.original.contains_vertex(vertex)
    }
}

impl<G: EdgeSet> EdgeSet for UndirectedBidirectionalGraph<'_, G> {
    fn edge_count(&self) -> usize {
        self.original.edge_count()
    }

    fn edges(&self) -> impl Iterator<Item = G::Edge> + '_ {
        self.original.edges()
    }

    fn contains_edge(&self, edge: &G::Edge) -> bool {
        self.original.contains_edge(edge)
    }
}

impl<G: BidirectionalIncidenceGraph> ImplicitUndirectedGraph
    for UndirectedBidirectionalGraph<'_, G>
{
    fn try_get_adjacent_edges(
        &self,
        vertex: &G::Vertex,
    ) -> Option<impl Iterator<Item = G::Edge> + '_> {
        let out_edges = self.original.try_get_out_edges(vertex)?;
        let in_edges = self.original.try_get_in_edges(vertex)?;
        Some(out_edges.chain(in_edges.filter(|e| !e.is_self_edge())))
    }

    fn adjacent_degree(&self, vertex: &G::Vertex) -> GraphResult<usize> {
        self.original.degree(vertex)
    }
}

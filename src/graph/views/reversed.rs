//! Reversed view of a bidirectional graph.

use crate::edge::ReversedEdge;
use crate::error::GraphResult;
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitGraph, IncidenceGraph, VertexSet,
};

/// A bidirectional graph with every edge turned around.
///
/// Nothing is copied: out-edge queries read the wrapped graph's in-edges and
/// the other way round, each edge wrapped in a [`ReversedEdge`].
#[derive(Debug)]
pub struct ReversedBidirectionalGraph<'a, G> {
    original: &'a G,
}

impl<G> Clone for ReversedBidirectionalGraph<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for ReversedBidirectionalGraph<'_, G> {}

impl<'a, G> ReversedBidirectionalGraph<'a, G> {
    /// Wraps `original`.
    pub fn new(original: &'a G) -> Self {
        Self { original }
    }

    /// The wrapped graph.
    pub fn original(&self) -> &'a G {
        self.original
    }
}

type Reversed<G> = ReversedEdge<<G as GraphBase>::Vertex, <G as GraphBase>::Edge>;

impl<G: GraphBase> GraphBase for ReversedBidirectionalGraph<'_, G> {
    type Vertex = G::Vertex;
    type Edge = Reversed<G>;

    fn is_directed(&self) -> bool {
        self.original.is_directed()
    }

    fn allow_parallel_edges(&self) -> bool {
        self.original.allow_parallel_edges()
    }
}

impl<G: VertexSet> VertexSet for ReversedBidirectionalGraph<'_, G> {
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

impl<G: EdgeSet> EdgeSet for ReversedBidirectionalGraph<'_, G> {
    fn edge_count(&self) -> usize {
        self.original.edge_count()
    }

    fn edges(&self) -> impl Iterator<Item = Reversed<G>> + '_ {
        self.original.edges().map(ReversedEdge::new)
    }

    fn contains_edge(&self, edge: &Reversed<G>) -> bool {
        self.original.contains_edge(edge.original())
    }
}

impl<G: BidirectionalIncidenceGraph> ImplicitGraph for ReversedBidirectionalGraph<'_, G> {
    fn try_get_out_edges(
        &self,
        vertex: &G::Vertex,
    ) -> Option<impl Iterator<Item = Reversed<G>> + '_> {
        Some(self.original.try_get_in_edges(vertex)?.map(ReversedEdge::new))
    }

    fn out_degree(&self, vertex: &G::Vertex) -> GraphResult<usize> {
        self.original.in_degree(vertex)
    }

    fn out_edge(&self, vertex: &G::Vertex, index: usize) -> GraphResult<Reversed<G>> {
        self.original.in_edge(vertex, index).map(ReversedEdge::new)
    }
}

impl<G: BidirectionalIncidenceGraph> IncidenceGraph for ReversedBidirectionalGraph<'_, G> {}

impl<G: BidirectionalIncidenceGraph> BidirectionalIncidenceGraph
    for ReversedBidirectionalGraph<'_, G>
{
    fn try_get_in_edges(
        &self,
        vertex: &G::Vertex,
    ) -> Option<impl Iterator<Item = Reversed<G>> + '_> {
        Some(self.original.try_get_out_edges(vertex)?.map(ReversedEdge::new))
    }

    fn in_degree(&self, vertex: &G::Vertex) -> GraphResult<usize> {
        self.original.out_degree(vertex)
    }

    fn in_edge(&self, vertex: &G::Vertex, index: usize) -> GraphResult<Reversed<G>> {
        self.original.out_edge(vertex, index).map(ReversedEdge::new)
    }
}

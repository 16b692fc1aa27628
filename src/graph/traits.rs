//! Capability traits.
//!
//! Each representation implements the subset of these contracts it can
//! support. Consumers (traversals, mutation tooling) bound on the capability
//! they need and stay agnostic of the concrete store.
//!
//! Queries take vertices by reference and yield owned vertices and edges.
//! Stored edges are cloned on the way out, so heavy edge payloads belong
//! behind `Rc`/`Arc`.

use core::hash::Hash;

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};

/// Vertex and edge types of a graph, plus its structural flags.
pub trait GraphBase {
    /// Vertex type; identity is `Eq`.
    type Vertex: Clone + Eq + Hash;
    /// Edge type; equality is the edge type's own `PartialEq`.
    type Edge: Edge<Self::Vertex> + Clone + PartialEq;

    /// Returns `true` if edges are oriented.
    fn is_directed(&self) -> bool;

    /// Returns `true` if two edges may join the same vertex pair.
    fn allow_parallel_edges(&self) -> bool;
}

/// A finite, enumerable vertex set.
pub trait VertexSet: GraphBase {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns `true` if there is no vertex.
    fn is_vertices_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Iterates the vertices.
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Returns `true` if `vertex` belongs to the graph.
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;
}

/// A finite, enumerable edge set.
pub trait EdgeSet: GraphBase {
    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Returns `true` if there is no edge.
    fn is_edges_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Iterates every edge exactly once.
    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_;

    /// Returns `true` if an edge equal to `edge` is stored.
    fn contains_edge(&self, edge: &Self::Edge) -> bool;
}

/// Forward traversal: out-edges of a vertex.
pub trait ImplicitGraph: GraphBase {
    /// The out-edges of `vertex`, or `None` if the vertex is unknown.
    fn try_get_out_edges(
        &self,
        vertex: &Self::Vertex,
    ) -> Option<impl Iterator<Item = Self::Edge> + '_>;

    /// Number of out-edges of `vertex`.
    fn out_degree(&self, vertex: &Self::Vertex) -> GraphResult<usize>;

    /// The out-edges of `vertex`.
    fn out_edges(
        &self,
        vertex: &Self::Vertex,
    ) -> GraphResult<impl Iterator<Item = Self::Edge> + '_> {
        self.try_get_out_edges(vertex).ok_or(GraphError::VertexNotFound)
    }

    /// Returns `true` if `vertex` has no out-edge.
    fn is_out_edges_empty(&self, vertex: &Self::Vertex) -> GraphResult<bool> {
        Ok(self.out_degree(vertex)? == 0)
    }

    /// The out-edge of `vertex` at position `index`.
    fn out_edge(&self, vertex: &Self::Vertex, index: usize) -> GraphResult<Self::Edge> {
        let len = self.out_degree(vertex)?;
        self.out_edges(vertex)?
            .nth(index)
            .ok_or(GraphError::IndexOutOfRange { index, len })
    }
}

/// Forward traversal plus edge lookup by endpoints.
pub trait IncidenceGraph: ImplicitGraph {
    /// Returns `true` if some edge leads from `source` to `target`.
    fn contains_edge_between(&self, source: &Self::Vertex, target: &Self::Vertex) -> bool {
        self.try_get_edge(source, target).is_some()
    }

    /// The first edge leading from `source` to `target`.
    fn try_get_edge(&self, source: &Self::Vertex, target: &Self::Vertex) -> Option<Self::Edge> {
        self.try_get_out_edges(source)?
            .find(|e| e.target() == target)
    }

    /// Every edge leading from `source` to `target`, or `None` if `source` is
    /// unknown.
    fn try_get_edges(
        &self,
        source: &Self::Vertex,
        target: &Self::Vertex,
    ) -> Option<Vec<Self::Edge>> {
        Some(
            self.try_get_out_edges(source)?
                .filter(|e| e.target() == target)
                .collect(),
        )
    }
}

/// Backward traversal: in-edges of a vertex.
pub trait BidirectionalIncidenceGraph: IncidenceGraph {
    /// The in-edges of `vertex`, or `None` if the vertex is unknown.
    fn try_get_in_edges(
        &self,
        vertex: &Self::Vertex,
    ) -> Option<impl Iterator<Item = Self::Edge> + '_>;

    /// Number of in-edges of `vertex`.
    fn in_degree(&self, vertex: &Self::Vertex) -> GraphResult<usize>;

    /// The in-edges of `vertex`.
    fn in_edges(
        &self,
        vertex: &Self::Vertex,
    ) -> GraphResult<impl Iterator<Item = Self::Edge> + '_> {
        self.try_get_in_edges(vertex).ok_or(GraphError::VertexNotFound)
    }

    /// Returns `true` if `vertex` has no in-edge.
    fn is_in_edges_empty(&self, vertex: &Self::Vertex) -> GraphResult<bool> {
        Ok(self.in_degree(vertex)? == 0)
    }

    /// The in-edge of `vertex` at position `index`.
    fn in_edge(&self, vertex: &Self::Vertex, index: usize) -> GraphResult<Self::Edge> {
        let len = self.in_degree(vertex)?;
        self.in_edges(vertex)?
            .nth(index)
            .ok_or(GraphError::IndexOutOfRange { index, len })
    }

    /// `in_degree + out_degree`.
    fn degree(&self, vertex: &Self::Vertex) -> GraphResult<usize> {
        Ok(self.in_degree(vertex)? + self.out_degree(vertex)?)
    }
}

/// Undirected traversal: edges touching a vertex.
pub trait ImplicitUndirectedGraph: GraphBase {
    /// The edges touching `vertex`, or `None` if the vertex is unknown.
    /// A self-edge is listed once.
    fn try_get_adjacent_edges(
        &self,
        vertex: &Self::Vertex,
    ) -> Option<impl Iterator<Item = Self::Edge> + '_>;

    /// Degree of `vertex`; self-edges count twice.
    fn adjacent_degree(&self, vertex: &Self::Vertex) -> GraphResult<usize>;

    /// The edges touching `vertex`.
    fn adjacent_edges(
        &self,
        vertex: &Self::Vertex,
    ) -> GraphResult<impl Iterator<Item = Self::Edge> + '_> {
        self.try_get_adjacent_edges(vertex)
            .ok_or(GraphError::VertexNotFound)
    }

    /// Returns `true` if no edge touches `vertex`.
    fn is_adjacent_edges_empty(&self, vertex: &Self::Vertex) -> GraphResult<bool> {
        Ok(self.adjacent_edges(vertex)?.next().is_none())
    }

    /// The adjacent edge of `vertex` at position `index`.
    fn adjacent_edge(&self, vertex: &Self::Vertex, index: usize) -> GraphResult<Self::Edge> {
        let mut edges = self.adjacent_edges(vertex)?;
        let mut len = 0;
        for edge in edges.by_ref() {
            if len == index {
                return Ok(edge);
            }
            len += 1;
        }
        Err(GraphError::IndexOutOfRange { index, len })
    }

    /// Returns `true` if some edge joins `a` and `b`, in either orientation.
    fn contains_edge_between(&self, a: &Self::Vertex, b: &Self::Vertex) -> bool {
        self.try_get_edge(a, b).is_some()
    }

    /// The first edge joining `a` and `b`.
    fn try_get_edge(&self, a: &Self::Vertex, b: &Self::Vertex) -> Option<Self::Edge> {
        self.try_get_adjacent_edges(a)?.find(|e| e.connects(a, b))
    }
}

/// A graph whose content can be dropped wholesale.
pub trait MutableGraph: GraphBase {
    /// Removes every vertex and edge.
    fn clear(&mut self);
}

/// Vertex insertion and removal.
pub trait MutableVertexSet: VertexSet + MutableGraph {
    /// Adds `vertex`; returns `false` if it was already present.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Removes `vertex` and every edge touching it; returns `false` if absent.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> bool;

    /// Adds every vertex of `vertices`, returning how many were new.
    fn add_vertex_range<I>(&mut self, vertices: I) -> usize
    where
        I: IntoIterator<Item = Self::Vertex>,
    {
        vertices
            .into_iter()
            .filter(|v| self.add_vertex(v.clone()))
            .count()
    }

    /// Removes every vertex matching `pred`, returning how many were removed.
    fn remove_vertex_if<P>(&mut self, mut pred: P) -> usize
    where
        P: FnMut(&Self::Vertex) -> bool,
    {
        let doomed: Vec<Self::Vertex> = self.vertices().filter(|v| pred(v)).collect();
        doomed.iter().filter(|v| self.remove_vertex(v)).count()
    }
}

/// Edge insertion and removal.
pub trait MutableEdgeSet: EdgeSet + MutableGraph {
    /// Adds `edge`.
    ///
    /// Returns `Ok(false)` when the parallel-edge policy rejects it and
    /// `Err(VertexNotFound)` when an endpoint is missing.
    fn add_edge(&mut self, edge: Self::Edge) -> GraphResult<bool>;

    /// Removes the first stored edge equal to `edge`.
    fn remove_edge(&mut self, edge: &Self::Edge) -> bool;

    /// Adds every edge of `edges`, returning how many were accepted.
    ///
    /// Stops at the first error; edges added before it stay added.
    fn add_edge_range<I>(&mut self, edges: I) -> GraphResult<usize>
    where
        I: IntoIterator<Item = Self::Edge>,
    {
        let mut added = 0;
        for edge in edges {
            if self.add_edge(edge)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removes every edge matching `pred`, returning how many were removed.
    fn remove_edge_if<P>(&mut self, mut pred: P) -> GraphResult<usize>
    where
        P: FnMut(&Self::Edge) -> bool,
    {
        let doomed: Vec<Self::Edge> = self.edges().filter(|e| pred(e)).collect();
        Ok(doomed.iter().filter(|e| self.remove_edge(e)).count())
    }
}

/// Combined vertex and edge mutation with endpoint completion.
pub trait MutableVertexAndEdgeSet: MutableVertexSet + MutableEdgeSet {
    /// Adds both endpoints (if missing) then `edge`.
    fn add_vertices_and_edge(&mut self, edge: Self::Edge) -> bool {
        self.add_vertex(edge.source().clone());
        self.add_vertex(edge.target().clone());
        matches!(self.add_edge(edge), Ok(true))
    }

    /// Calls [`add_vertices_and_edge`](Self::add_vertices_and_edge) for each
    /// edge, returning how many edges were accepted.
    fn add_vertices_and_edge_range<I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = Self::Edge>,
    {
        let mut added = 0;
        for edge in edges {
            if self.add_vertices_and_edge(edge) {
                added += 1;
            }
        }
        added
    }
}

/// Per-vertex out-edge mutation.
pub trait MutableIncidenceGraph: IncidenceGraph + MutableGraph {
    /// Removes the out-edges of `vertex` matching `pred`.
    fn remove_out_edge_if<P>(&mut self, vertex: &Self::Vertex, pred: P) -> GraphResult<usize>
    where
        P: FnMut(&Self::Edge) -> bool;

    /// Removes every out-edge of `vertex`.
    fn clear_out_edges(&mut self, vertex: &Self::Vertex) -> GraphResult<usize> {
        self.remove_out_edge_if(vertex, |_| true)
    }

    /// Releases unused edge list capacity.
    fn trim_edge_excess(&mut self);
}

/// Per-vertex in-edge mutation.
pub trait MutableBidirectionalGraph:
    MutableIncidenceGraph + BidirectionalIncidenceGraph + MutableVertexAndEdgeSet
{
    /// Removes the in-edges of `vertex` matching `pred`.
    fn remove_in_edge_if<P>(&mut self, vertex: &Self::Vertex, pred: P) -> GraphResult<usize>
    where
        P: FnMut(&Self::Edge) -> bool;

    /// Removes every in-edge of `vertex`.
    fn clear_in_edges(&mut self, vertex: &Self::Vertex) -> GraphResult<usize> {
        self.remove_in_edge_if(vertex, |_| true)
    }

    /// Removes every edge touching `vertex`, keeping the vertex.
    fn clear_edges(&mut self, vertex: &Self::Vertex) -> GraphResult<usize> {
        let out = self.clear_out_edges(vertex)?;
        Ok(out + self.clear_in_edges(vertex)?)
    }
}

/// Per-vertex adjacent-edge mutation.
pub trait MutableUndirectedGraph: ImplicitUndirectedGraph + MutableVertexAndEdgeSet {
    /// Removes the edges touching `vertex` that match `pred`.
    fn remove_adjacent_edge_if<P>(&mut self, vertex: &Self::Vertex, pred: P) -> GraphResult<usize>
    where
        P: FnMut(&Self::Edge) -> bool;

    /// Removes every edge touching `vertex`, keeping the vertex.
    fn clear_adjacent_edges(&mut self, vertex: &Self::Vertex) -> GraphResult<usize> {
        self.remove_adjacent_edge_if(vertex, |_| true)
    }
}

//! Tests for the CSR snapshot.

use super::*;
use crate::graph::basic::AdjacencyGraph;
use crate::graph::traits::MutableVertexSet;
use std::collections::HashSet;

fn source() -> AdjacencyGraph<u32, SEdge<u32>> {
    [(0, 1), (0, 2), (1, 2), (3, 1)]
        .into_iter()
        .map(SEdge::from)
        .collect()
}

#[test]
fn csr_round_trip_preserves_edges() {
    let graph = source();
    let csr = CompressedSparseRowGraph::from_graph(&graph);

    let expected: HashSet<(u32, u32)> = graph.edges().map(SEdge::into_pair).collect();
    let actual: HashSet<(u32, u32)> = csr.edges().map(SEdge::into_pair).collect();
    assert_eq!(actual, expected);
    assert_eq!(csr.edge_count(), 4);
    assert_eq!(csr.vertex_count(), 4);
}

#[test]
fn rows_follow_source_order() {
    let csr = CompressedSparseRowGraph::from_graph(&source());
    assert_eq!(csr.vertices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(csr.out_targets(&0), Some(&[1, 2][..]));
    assert_eq!(csr.out_targets(&2), Some(&[][..]));
    assert_eq!(csr.out_targets(&9), None);
}

#[test]
fn degree_and_lookup() {
    let csr = CompressedSparseRowGraph::from_graph(&source());
    assert_eq!(csr.out_degree(&0), Ok(2));
    assert_eq!(csr.out_degree(&2), Ok(0));
    assert_eq!(csr.out_degree(&7), Err(GraphError::VertexNotFound));
    assert!(csr.contains_edge_between(&3, &1));
    assert!(!csr.contains_edge_between(&1, &3));
    assert!(csr.contains_edge(&SEdge::new(1, 2)));
    assert_eq!(csr.out_edge(&0, 1), Ok(SEdge::new(0, 2)));
    assert_eq!(
        csr.out_edge(&0, 2),
        Err(GraphError::IndexOutOfRange { index: 2, len: 2 })
    );
}

#[test]
fn snapshot_ignores_later_mutation() {
    let mut graph = source();
    let csr = CompressedSparseRowGraph::from_graph(&graph);
    graph.remove_vertex(&0);
    assert!(csr.contains_vertex(&0));
    assert_eq!(csr.edge_count(), 4);
}

#[test]
fn clone_shares_layout() {
    let csr = CompressedSparseRowGraph::from_graph(&source());
    let copy = csr.clone();
    assert!(Arc::ptr_eq(&csr.layout, &copy.layout));
}

#[test]
fn empty_graph() {
    let graph: AdjacencyGraph<u32, SEdge<u32>> = AdjacencyGraph::new();
    let csr = CompressedSparseRowGraph::from_graph(&graph);
    assert!(csr.is_vertices_empty());
    assert!(csr.is_edges_empty());
    assert_eq!(csr.edges().count(), 0);
}

/// Enumerates every vertex of the wrapped graph twice.
struct RepeatingVertices(AdjacencyGraph<u32, SEdge<u32>>);

impl GraphBase for RepeatingVertices {
    type Vertex = u32;
    type Edge = SEdge<u32>;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        true
    }
}

impl VertexSet for RepeatingVertices {
    fn vertex_count(&self) -> usize {
        2 * self.0.vertex_count()
    }

    fn vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.vertices().flat_map(|v| [v, v])
    }

    fn contains_vertex(&self, vertex: &u32) -> bool {
        self.0.contains_vertex(vertex)
    }
}

impl ImplicitGraph for RepeatingVertices {
    fn try_get_out_edges(&self, vertex: &u32) -> Option<impl Iterator<Item = SEdge<u32>> + '_> {
        self.0.try_get_out_edges(vertex)
    }

    fn out_degree(&self, vertex: &u32) -> GraphResult<usize> {
        self.0.out_degree(vertex)
    }
}

#[test]
fn repeated_vertices_keep_rows_aligned() {
    let csr = CompressedSparseRowGraph::from_graph(&RepeatingVertices(source()));
    assert_eq!(csr.vertex_count(), 4);
    assert_eq!(csr.edge_count(), 4);
    assert_eq!(csr.out_targets(&0), Some(&[1, 2][..]));
    assert_eq!(csr.out_targets(&1), Some(&[2][..]));
    assert_eq!(csr.out_targets(&2), Some(&[][..]));
    assert_eq!(csr.out_targets(&3), Some(&[1][..]));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_iteration_matches_sequential() {
    use rayon::prelude::*;

    let csr = CompressedSparseRowGraph::from_graph(&source());
    let parallel: HashSet<SEdge<u32>> = csr.par_edges().collect();
    let sequential: HashSet<SEdge<u32>> = csr.edges().collect();
    assert_eq!(parallel, sequential);

    let degrees: Vec<usize> = csr.par_out_degrees().collect();
    assert_eq!(degrees, vec![2, 1, 0, 1]);
}

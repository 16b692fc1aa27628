//! Tests for the array snapshots.

use super::*;
use crate::edge::SEdge;
use crate::graph::basic::{AdjacencyGraph, BidirectionalGraph, UndirectedGraph};
use crate::graph::traits::{MutableEdgeSet, MutableVertexSet};

fn pairs() -> [SEdge<u32>; 4] {
    [(1, 2), (1, 3), (2, 3), (3, 3)].map(SEdge::from)
}

#[test]
fn adjacency_snapshot_copies_out_edges() {
    let mut graph: AdjacencyGraph<u32, SEdge<u32>> = pairs().into_iter().collect();
    let snapshot = ArrayAdjacencyGraph::from_graph(&graph);

    graph.remove_vertex(&3);
    assert_eq!(snapshot.vertex_count(), 3);
    assert_eq!(snapshot.edge_count(), 4);
    assert_eq!(snapshot.out_degree(&1), Ok(2));
    assert_eq!(snapshot.out_edge(&1, 1), Ok(SEdge::new(1, 3)));
    assert!(snapshot.contains_edge_between(&3, &3));
    assert_eq!(snapshot.out_edge(&4, 0), Err(GraphError::VertexNotFound));
}

#[test]
fn bidirectional_snapshot_copies_both_sides() {
    let graph: BidirectionalGraph<u32, SEdge<u32>> = pairs().into_iter().collect();
    let snapshot = ArrayBidirectionalGraph::from_graph(&graph);

    assert_eq!(snapshot.in_degree(&3), Ok(3));
    assert_eq!(snapshot.in_edge(&3, 0), Ok(SEdge::new(1, 3)));
    assert_eq!(
        snapshot.in_edge(&1, 0),
        Err(GraphError::IndexOutOfRange { index: 0, len: 0 })
    );
    assert_eq!(snapshot.degree(&1), Ok(2));
    assert_eq!(snapshot.edges().count(), 4);
}

#[test]
fn undirected_snapshot_keeps_edge_multiplicity() {
    let mut graph: UndirectedGraph<u32, SEdge<u32>> = pairs().into_iter().collect();
    let snapshot = ArrayUndirectedGraph::from_graph(&graph);

    assert!(!snapshot.is_directed());
    assert_eq!(snapshot.edge_count(), 4);
    assert_eq!(snapshot.adjacent_degree(&3), Ok(4));
    assert!(snapshot.contains_edge_between(&3, &1));
    assert_eq!(snapshot.try_get_edge(&3, &2), Some(SEdge::new(2, 3)));

    graph.add_edge(SEdge::new(2, 1)).unwrap();
    assert_eq!(snapshot.edge_count(), 4);
}

#[test]
fn snapshot_clone_is_shared() {
    let graph: AdjacencyGraph<u32, SEdge<u32>> = pairs().into_iter().collect();
    let snapshot = ArrayAdjacencyGraph::from_graph(&graph);
    let copy = snapshot.clone();
    assert!(Arc::ptr_eq(&snapshot.snapshot, &copy.snapshot));
    assert_eq!(copy.vertices().collect::<Vec<_>>(), vec![1, 2, 3]);
}

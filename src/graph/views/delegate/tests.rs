//! Tests for the delegate graphs.

use super::*;
use crate::edge::SEdge;
use std::cell::Cell;

/// Successors on a ring of `n` vertices; `None` outside `0..n`.
fn ring(n: u32) -> impl Fn(&u32) -> Option<Vec<SEdge<u32>>> {
    move |&v: &u32| (v < n).then(|| vec![SEdge::new(v, (v + 1) % n)])
}

#[test]
fn implicit_graph_calls_back() {
    let graph = DelegateImplicitGraph::new(ring(3), false);

    assert!(graph.is_directed());
    assert!(!graph.allow_parallel_edges());
    assert_eq!(graph.out_degree(&2), Ok(1));
    assert_eq!(graph.out_edge(&2, 0), Ok(SEdge::new(2, 0)));
    assert_eq!(
        graph.out_edge(&2, 1),
        Err(GraphError::IndexOutOfRange { index: 1, len: 1 })
    );
    assert_eq!(graph.out_degree(&5), Err(GraphError::VertexNotFound));
    assert!(graph.contains_edge_between(&0, &1));
    assert!(!graph.contains_edge_between(&1, &0));
}

#[test]
fn implicit_graph_reflects_callback_state() {
    let extra = Cell::new(false);
    let graph = DelegateIncidenceGraph::new(
        |&v: &u32| {
            let mut edges = vec![SEdge::new(v, v + 1)];
            if extra.get() {
                edges.push(SEdge::new(v, v + 2));
            }
            Some(edges)
        },
        true,
    );

    assert_eq!(graph.out_degree(&0), Ok(1));
    extra.set(true);
    assert_eq!(graph.out_degree(&0), Ok(2));
    assert_eq!(
        graph.try_get_edges(&0, &2),
        Some(vec![SEdge::new(0, 2)])
    );
}

#[test]
fn bidirectional_delegate_uses_both_callbacks() {
    let graph = DelegateBidirectionalIncidenceGraph::new(
        |&v: &u32| (v < 3).then(|| vec![SEdge::new(v, (v + 1) % 3)]),
        |&v: &u32| (v < 3).then(|| vec![SEdge::new((v + 2) % 3, v)]),
        false,
    );

    assert_eq!(graph.in_degree(&0), Ok(1));
    assert_eq!(graph.in_edge(&0, 0), Ok(SEdge::new(2, 0)));
    assert_eq!(graph.degree(&1), Ok(2));
    assert_eq!(graph.in_degree(&3), Err(GraphError::VertexNotFound));
}

#[test]
fn vertex_list_filters_unknown_targets() {
    // The callback knows four vertices but the set only holds three.
    let graph = DelegateVertexAndEdgeListGraph::new([0, 1, 2], ring(4), false);

    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.out_degree(&2), Ok(0));
    assert_eq!(graph.out_degree(&3), Err(GraphError::VertexNotFound));
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(
        graph.edges().collect::<Vec<_>>(),
        vec![SEdge::new(0, 1), SEdge::new(1, 2)]
    );
    assert!(graph.contains_edge(&SEdge::new(1, 2)));
    assert!(!graph.contains_edge(&SEdge::new(2, 3)));
}

#[test]
fn vertex_list_collapses_duplicates() {
    let graph = DelegateVertexAndEdgeListGraph::new([0, 1, 1, 0], ring(2), true);
    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 2);
}

fn path_adjacency(v: &u32) -> Option<Vec<SEdge<u32>>> {
    // Path 0 - 1 - 2 with a loop on 2 and a stray edge to 7.
    match v {
        0 => Some(vec![SEdge::new(0, 1)]),
        1 => Some(vec![SEdge::new(0, 1), SEdge::new(1, 2), SEdge::new(5, 6)]),
        2 => Some(vec![SEdge::new(1, 2), SEdge::new(2, 2), SEdge::new(2, 7)]),
        _ => None,
    }
}

#[test]
fn undirected_delegate_reports_each_edge_once() {
    let graph = DelegateUndirectedGraph::new([0, 1, 2], path_adjacency, false);

    assert!(!graph.is_directed());
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(
        graph.edges().collect::<Vec<_>>(),
        vec![SEdge::new(0, 1), SEdge::new(1, 2), SEdge::new(2, 2)]
    );
}

#[test]
fn undirected_delegate_filters_and_counts_loops() {
    let graph = DelegateUndirectedGraph::new([0, 1, 2], path_adjacency, false);

    assert_eq!(graph.adjacent_degree(&1), Ok(2));
    assert_eq!(graph.adjacent_degree(&2), Ok(3));
    assert_eq!(graph.adjacent_degree(&9), Err(GraphError::VertexNotFound));
    assert!(graph.contains_edge_between(&2, &1));
    assert!(!graph.contains_edge_between(&2, &7));
    assert_eq!(graph.try_get_edge(&1, &0), Some(SEdge::new(0, 1)));
}

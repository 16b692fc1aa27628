//! Tests for the directed adjacency graph.

use super::*;
use crate::edge::{SEdge, TaggedEdge};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

fn sample() -> AdjacencyGraph<u32, SEdge<u32>> {
    // 1 -> 2,3,4 ; 2 -> 4 ; 3 -> 1,3
    [(1, 2), (1, 3), (1, 4), (2, 4), (3, 1), (3, 3)]
        .into_iter()
        .map(SEdge::from)
        .collect()
}

fn edge_pairs(graph: &AdjacencyGraph<u32, SEdge<u32>>) -> HashSet<(u32, u32)> {
    graph.edges().map(SEdge::into_pair).collect()
}

#[test]
fn adjacency_graph_construction() {
    let graph = sample();
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 6);
    assert_eq!(graph.edges().count(), graph.edge_count());
    assert_eq!(graph.out_degree(&1), Ok(3));
    assert_eq!(graph.out_degree(&4), Ok(0));
    assert!(graph.is_directed());
}

#[test]
fn add_vertex_twice_returns_false() {
    let mut graph: AdjacencyGraph<u32, SEdge<u32>> = AdjacencyGraph::new();
    assert!(graph.add_vertex(1));
    assert!(!graph.add_vertex(1));
    assert_eq!(graph.vertex_count(), 1);
}

#[test]
fn add_edge_requires_endpoints() {
    let mut graph: AdjacencyGraph<u32, SEdge<u32>> = AdjacencyGraph::new();
    graph.add_vertex(1);
    assert_eq!(graph.add_edge(SEdge::new(1, 2)), Err(GraphError::VertexNotFound));
    assert_eq!(graph.add_edge(SEdge::new(2, 1)), Err(GraphError::VertexNotFound));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn parallel_edge_policy() {
    let mut strict = AdjacencyGraph::with_parallel_edges(false);
    strict.add_vertex_range([1, 2]);
    assert_eq!(strict.add_edge(SEdge::new(1, 2)), Ok(true));
    assert_eq!(strict.add_edge(SEdge::new(1, 2)), Ok(false));
    assert_eq!(strict.edge_count(), 1);

    let mut loose = AdjacencyGraph::with_parallel_edges(true);
    loose.add_vertex_range([1, 2]);
    assert_eq!(loose.add_edge(SEdge::new(1, 2)), Ok(true));
    assert_eq!(loose.add_edge(SEdge::new(1, 2)), Ok(true));
    assert_eq!(loose.edge_count(), 2);
}

#[test]
fn remove_vertex_purges_incoming_edges() {
    let mut graph = sample();
    assert!(graph.remove_vertex(&3));

    let vertices: HashSet<u32> = graph.vertices().collect();
    assert_eq!(vertices, HashSet::from([1, 2, 4]));
    assert_eq!(edge_pairs(&graph), HashSet::from([(1, 2), (1, 4), (2, 4)]));
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn remove_absent_vertex_is_noop() {
    let mut graph = sample();
    assert!(!graph.remove_vertex(&42));
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 6);
}

#[test]
fn remove_vertex_fires_edge_events_before_vertex_event() {
    let mut graph = sample();
    let log = Rc::new(RefCell::new(Vec::new()));

    let edges_log = Rc::clone(&log);
    graph
        .events_mut()
        .on_edge_removed(move |e: &SEdge<u32>| edges_log.borrow_mut().push(format!("e{}{}", e.source(), e.target())));
    let vertex_log = Rc::clone(&log);
    graph
        .events_mut()
        .on_vertex_removed(move |v| vertex_log.borrow_mut().push(format!("v{v}")));

    graph.remove_vertex(&3);

    let log = log.borrow();
    assert_eq!(log.len(), 4);
    assert_eq!(log.last().map(String::as_str), Some("v3"));
    let removed: HashSet<&str> = log[..3].iter().map(String::as_str).collect();
    assert_eq!(removed, HashSet::from(["e31", "e33", "e13"]));
}

#[test]
fn remove_edge_and_lookup() {
    let mut graph = sample();
    assert!(graph.contains_edge_between(&1, &4));
    assert!(graph.remove_edge(&SEdge::new(1, 4)));
    assert!(!graph.remove_edge(&SEdge::new(1, 4)));
    assert!(!graph.contains_edge_between(&1, &4));
    assert_eq!(graph.try_get_edge(&3, &3), Some(SEdge::new(3, 3)));
    assert_eq!(graph.edge_count(), 5);
}

#[test]
fn positional_out_edge() {
    let graph = sample();
    assert_eq!(graph.out_edge(&1, 1), Ok(SEdge::new(1, 3)));
    assert_eq!(
        graph.out_edge(&1, 3),
        Err(GraphError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(graph.out_edge(&9, 0), Err(GraphError::VertexNotFound));
}

#[test]
fn try_get_edges_returns_parallel_copies() {
    let mut graph = AdjacencyGraph::new();
    graph.add_vertex_range([1, 2]);
    graph.add_edge(TaggedEdge::new(1, 2, 'a')).unwrap();
    graph.add_edge(TaggedEdge::new(1, 2, 'b')).unwrap();

    let edges = graph.try_get_edges(&1, &2).unwrap();
    assert_eq!(edges.len(), 2);
    assert!(graph.try_get_edges(&7, &2).is_none());
    assert!(graph.remove_edge(&TaggedEdge::new(1, 2, 'b')));
    assert_eq!(graph.try_get_edges(&1, &2).unwrap(), vec![TaggedEdge::new(1, 2, 'a')]);
}

#[test]
fn remove_out_edge_if_and_clear_out_edges() {
    let mut graph = sample();
    assert_eq!(graph.remove_out_edge_if(&1, |e| *e.target() > 2), Ok(2));
    assert_eq!(graph.out_degree(&1), Ok(1));
    assert_eq!(graph.clear_out_edges(&3), Ok(2));
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.clear_out_edges(&8), Err(GraphError::VertexNotFound));
}

#[test]
fn remove_edge_if_and_remove_vertex_if() {
    let mut graph = sample();
    assert_eq!(graph.remove_edge_if(|e| e.is_self_edge()), Ok(1));
    assert_eq!(graph.edge_count(), 5);

    assert_eq!(graph.remove_vertex_if(|v| v % 2 == 0), 2);
    assert_eq!(edge_pairs(&graph), HashSet::from([(1, 3), (3, 1)]));
}

#[test]
fn clone_is_independent() {
    let original = sample();
    let mut copy = original.clone();
    copy.remove_vertex(&1);
    assert_eq!(original.vertex_count(), 4);
    assert_eq!(original.edge_count(), 6);
    assert_eq!(copy.edge_count(), 2);
}

#[test]
fn clear_notifies_only_when_observed() {
    let mut graph = sample();
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    graph.events_mut().on_edge_removed(move |_| *c.borrow_mut() += 1);

    graph.clear();
    assert_eq!(*count.borrow(), 6);
    assert_eq!(graph.vertex_count(), 0);
    assert_eq!(graph.edge_count(), 0);

    let mut quiet = sample();
    quiet.clear();
    assert!(quiet.is_edges_empty());
}

#[test]
fn add_vertices_and_edge_completes_endpoints() {
    let mut graph: AdjacencyGraph<&str, SEdge<&str>> = AdjacencyGraph::new();
    assert!(graph.add_vertices_and_edge(SEdge::new("a", "b")));
    assert!(graph.contains_vertex(&"a"));
    assert!(graph.contains_vertex(&"b"));
    assert!(graph.contains_edge(&SEdge::new("a", "b")));
}

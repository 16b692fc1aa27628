//! Tests for the dense matrix graph.

use super::*;
use crate::edge::SEdge;
use std::cell::RefCell;
use std::rc::Rc;

type Matrix = BidirectionalMatrixGraph<u8, SEdge<u8>>;

fn square() -> Matrix {
    let mut graph = Matrix::new(4).unwrap();
    graph
        .add_edge_range([(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)].map(SEdge::from))
        .unwrap();
    graph
}

#[test]
fn parallel_edge_is_an_error() {
    let mut graph = Matrix::new(3).unwrap();
    assert_eq!(graph.add_edge(SEdge::new(0, 1)), Ok(true));
    assert_eq!(
        graph.add_edge(SEdge::new(0, 1)),
        Err(GraphError::ParallelEdgeNotAllowed)
    );
    assert_eq!(graph.edge_count(), 1);
    assert!(!graph.allow_parallel_edges());
}

#[test]
fn construction_checks_domain() {
    assert!(matches!(Matrix::new(0), Err(GraphError::InvalidArgument(_))));
    assert!(matches!(Matrix::new(257), Err(GraphError::InvalidArgument(_))));
    assert!(Matrix::new(256).is_ok());
    assert!(matches!(
        BidirectionalMatrixGraph::<usize, SEdge<usize>>::new(usize::MAX),
        Err(GraphError::InvalidArgument(_))
    ));
}

#[test]
fn fixed_vertex_domain() {
    let graph = Matrix::new(3).unwrap();
    assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(graph.contains_vertex(&2));
    assert!(!graph.contains_vertex(&3));
}

#[test]
fn out_of_domain_edge_is_rejected() {
    let mut graph = Matrix::new(2).unwrap();
    assert_eq!(graph.add_edge(SEdge::new(0, 5)), Err(GraphError::VertexNotFound));
    assert!(!graph.remove_edge(&SEdge::new(0, 5)));
}

#[test]
fn row_and_column_queries() {
    let graph = square();
    assert_eq!(graph.out_degree(&0), Ok(2));
    assert_eq!(graph.in_degree(&2), Ok(2));
    assert_eq!(graph.degree(&0), Ok(3));
    assert_eq!(
        graph.in_edges(&0).unwrap().collect::<Vec<_>>(),
        vec![SEdge::new(3, 0)]
    );
    assert_eq!(graph.try_get_edge(&1, &2), Some(SEdge::new(1, 2)));
    assert_eq!(graph.try_get_edge(&2, &1), None);
    assert_eq!(graph.try_get_edges(&2, &1), Some(Vec::new()));
    assert_eq!(graph.try_get_edges(&9, &1), None);
    assert_eq!(graph.out_edge(&0, 1), Ok(SEdge::new(0, 2)));
}

#[test]
fn remove_edge_if_is_not_supported() {
    let mut graph = square();
    assert!(matches!(
        graph.remove_edge_if(|_| true),
        Err(GraphError::NotSupported(_))
    ));
    assert_eq!(graph.edge_count(), 5);
}

#[test]
fn clear_vertex_edges() {
    let mut graph = square();
    assert_eq!(graph.clear_out_edges(&0), Ok(2));
    assert_eq!(graph.clear_in_edges(&2), Ok(1));
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.clear_edges(&3), Ok(2));
    assert_eq!(graph.edges().count(), 0);
    assert_eq!(graph.clear_in_edges(&4), Err(GraphError::VertexNotFound));
}

#[test]
fn remove_edge_compares_stored_value() {
    let mut graph = square();
    assert!(graph.remove_edge(&SEdge::new(3, 0)));
    assert!(!graph.contains_edge(&SEdge::new(3, 0)));
    assert!(!graph.remove_edge(&SEdge::new(3, 0)));
}

#[test]
fn clear_keeps_vertices_and_notifies() {
    let mut graph = square();
    let removed = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&removed);
    graph.events_mut().on_edge_removed(move |_| *sink.borrow_mut() += 1);

    graph.clear();
    assert_eq!(*removed.borrow(), 5);
    assert_eq!(graph.vertex_count(), 4);
    assert!(graph.is_edges_empty());
}

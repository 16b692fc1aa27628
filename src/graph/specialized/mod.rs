//! Stores with a structural twist on the plain adjacency list.
//!
//! - `ClusteredAdjacencyGraph`: a tree of directed stores with cascading mutations
//! - `BidirectionalMatrixGraph`: dense slot table over a fixed integer domain

pub mod clustered_graph;
pub mod matrix_graph;

pub use clustered_graph::{ClusterId, ClusterMut, ClusteredAdjacencyGraph};
pub use matrix_graph::BidirectionalMatrixGraph;

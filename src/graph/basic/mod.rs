//! Mutable adjacency-list stores.
//!
//! - `AdjacencyGraph`: out-edges only, cheapest memory, full scan on vertex removal
//! - `BidirectionalGraph`: mirrored out/in indices, local vertex removal and contraction
//! - `UndirectedGraph`: one adjacency list per vertex, configurable lookup orientation

pub mod adjacency_graph;
pub mod bidirectional_graph;
pub mod undirected_graph;

pub use adjacency_graph::AdjacencyGraph;
pub use bidirectional_graph::BidirectionalGraph;
pub use undirected_graph::{EdgeLookup, UndirectedGraph};

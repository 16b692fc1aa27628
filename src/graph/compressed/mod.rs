//! Immutable snapshots.
//!
//! Built once from a live store, never mutated afterwards, cheap to clone
//! and safe to read from several threads.
//!
//! - `CompressedSparseRowGraph`: flat offsets + targets, no edge objects
//! - `ArrayAdjacencyGraph` / `ArrayBidirectionalGraph` / `ArrayUndirectedGraph`:
//!   per-vertex edge arrays copied from the source store

pub mod array_graph;
pub mod csr_graph;

pub use array_graph::{ArrayAdjacencyGraph, ArrayBidirectionalGraph, ArrayUndirectedGraph};
pub use csr_graph::CompressedSparseRowGraph;

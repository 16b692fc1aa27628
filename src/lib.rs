//! # `incidence` - In-Memory Graph Storage
//!
//! A family of graph stores sharing one capability-based contract: vertex
//! and edge enumeration, incidence queries, mutation and bidirectional
//! traversal. Algorithms written against the traits in [`graph::traits`]
//! run unchanged over any store that provides the capabilities they need.
//!
//! ## Stores
//!
//! | Store | Directed | In-edges | Mutable | Notes |
//! |-------|----------|----------|---------|-------|
//! | [`AdjacencyGraph`] | yes | no | yes | Out-edge lists only |
//! | [`BidirectionalGraph`] | yes | yes | yes | Mirrored out/in lists, vertex merging |
//! | [`UndirectedGraph`] | no | - | yes | One adjacency list per vertex |
//! | [`ClusteredAdjacencyGraph`] | yes | no | yes | Tree of stores, cascading mutation |
//! | [`BidirectionalMatrixGraph`] | yes | yes | edges only | Dense slots over `0..n` |
//! | [`CompressedSparseRowGraph`] | yes | no | no | Offsets + targets |
//! | [`ArrayAdjacencyGraph`] and friends | - | - | no | Frozen edge arrays |
//!
//! Views (reversed, bidirectional adapter, undirected adapter, delegate
//! graphs) live in [`graph::views`] and never own primary storage.
//!
//! ## Invariants
//!
//! - `edge_count` always equals the number of edges enumerated by `edges`.
//! - An edge is stored only while both endpoints are vertices of the store.
//! - In the bidirectional store an edge sits in its source's out-list exactly
//!   as often as it sits in its target's in-list.
//! - With parallel edges disallowed, at most one edge joins any ordered pair
//!   (any unordered pair for undirected stores).
//! - Failed operations leave the store untouched.
//!
//! ## Features
//!
//! - `tracing`: structured `trace!`/`debug!` events on mutation and snapshot
//!   construction (counts only).
//! - `parallel`: rayon-backed read iteration over CSR snapshots.
//!
//! ## Example
//!
//! ```rust
//! use incidence::prelude::*;
//!
//! let mut graph: BidirectionalGraph<u32, SEdge<u32>> = BidirectionalGraph::new();
//! graph.add_vertices_and_edge(SEdge::new(1, 2));
//! graph.add_vertices_and_edge(SEdge::new(2, 3));
//!
//! assert_eq!(graph.in_degree(&2), Ok(1));
//! assert_eq!(graph.merge_vertex(&2, |a, b| SEdge::new(*a, *b)), Ok(1));
//! assert!(graph.contains_edge_between(&1, &3));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

/// Emits a `tracing::trace!` event when the `tracing` feature is enabled.
macro_rules! trace_op {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)+);
        }
    };
}

/// Emits a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! debug_op {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)+);
        }
    };
}

pub mod collections;
pub mod edge;
pub mod error;
pub mod graph;

pub use edge::{Edge, ReversedEdge, SEdge, SUndirectedEdge, TaggedEdge};
pub use error::{GraphError, GraphResult};
pub use graph::{
    AdjacencyGraph, ArrayAdjacencyGraph, ArrayBidirectionalGraph, ArrayUndirectedGraph,
    BidirectionalGraph, BidirectionalMatrixGraph, ClusteredAdjacencyGraph,
    CompressedSparseRowGraph, GraphOptions, UndirectedGraph,
};

/// Traits and common types in one import.
pub mod prelude {
    pub use crate::edge::{Edge, ReversedEdge, SEdge, SUndirectedEdge, TaggedEdge};
    pub use crate::error::{GraphError, GraphResult};
    pub use crate::graph::events::{GraphEvents, ListenerId, ObservableGraph};
    pub use crate::graph::options::GraphOptions;
    pub use crate::graph::traits::{
        BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitGraph, ImplicitUndirectedGraph,
        IncidenceGraph, MutableBidirectionalGraph, MutableEdgeSet, MutableGraph,
        MutableIncidenceGraph, MutableUndirectedGraph, MutableVertexAndEdgeSet, MutableVertexSet,
        VertexSet,
    };
    pub use crate::graph::{
        AdjacencyGraph, ArrayAdjacencyGraph, ArrayBidirectionalGraph, ArrayUndirectedGraph,
        BidirectionalGraph, BidirectionalMatrixGraph, ClusterId, ClusteredAdjacencyGraph,
        CompressedSparseRowGraph, EdgeLookup, UndirectedGraph,
    };
}

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // Cluster ids and listener handles stay word-sized.
    assert!(mem::size_of::<graph::ClusterId>() == mem::size_of::<usize>());
    assert!(mem::size_of::<graph::ListenerId>() == mem::size_of::<u64>());
    // Reversed edges add nothing to the wrapped edge.
    assert!(mem::size_of::<ReversedEdge<u32, SEdge<u32>>>() == mem::size_of::<SEdge<u32>>());
};

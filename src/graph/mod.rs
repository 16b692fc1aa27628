//! Graph stores and the capability traits they implement.
//!
//! Stores are organized into categories:
//! - `basic`: mutable adjacency-list stores (directed, bidirectional, undirected)
//! - `specialized`: clustered hierarchy and dense matrix
//! - `compressed`: immutable CSR and array snapshots
//! - `views`: reversed, adapted and callback-driven graphs over other sources
//!
//! Every store speaks the traits in [`traits`]; consumers bound on the
//! capability they need rather than on a concrete type.

pub mod basic;
pub mod compressed;
pub mod events;
pub mod options;
pub mod specialized;
pub mod traits;
pub mod views;

pub use basic::{AdjacencyGraph, BidirectionalGraph, EdgeLookup, UndirectedGraph};
pub use compressed::{
    ArrayAdjacencyGraph, ArrayBidirectionalGraph, ArrayUndirectedGraph, CompressedSparseRowGraph,
};
pub use events::{GraphEvents, ListenerId, ObservableGraph};
pub use options::GraphOptions;
pub use specialized::{BidirectionalMatrixGraph, ClusterId, ClusterMut, ClusteredAdjacencyGraph};
pub use traits::{
    BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitGraph, ImplicitUndirectedGraph,
    IncidenceGraph, MutableBidirectionalGraph, MutableEdgeSet, MutableGraph,
    MutableIncidenceGraph, MutableUndirectedGraph, MutableVertexAndEdgeSet, MutableVertexSet,
    VertexSet,
};
pub use views::{
    BidirectionalAdapterGraph, DelegateBidirectionalIncidenceGraph, DelegateImplicitGraph,
    DelegateIncidenceGraph, DelegateUndirectedGraph, DelegateVertexAndEdgeListGraph,
    ReversedBidirectionalGraph, UndirectedBidirectionalGraph,
};

//! Graphs that compute their structure from another graph or a callback.
//!
//! None of these own primary storage. The borrowing views reflect the live
//! state of what they wrap; the delegate graphs call back on every query.

pub mod bidirectional_adapter;
pub mod delegate;
pub mod reversed;
pub mod undirected_adapter;

pub use bidirectional_adapter::BidirectionalAdapterGraph;
pub use delegate::{
    DelegateBidirectionalIncidenceGraph, DelegateImplicitGraph, DelegateIncidenceGraph,
    DelegateUndirectedGraph, DelegateVertexAndEdgeListGraph,
};
pub use reversed::ReversedBidirectionalGraph;
pub use undirected_adapter::UndirectedBidirectionalGraph;

//! Building blocks shared by the incidence stores.
//!
//! - `EdgeList`: ordered edge sequence owned by one `(vertex, direction)` slot
//! - `VertexEdgeIndex`: vertex → `EdgeList` map, one per direction per store

pub mod edge_list;
pub mod vertex_edge_index;

pub use edge_list::EdgeList;
pub use vertex_edge_index::VertexEdgeIndex;

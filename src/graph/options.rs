//! Store configuration.

use serde::{Deserialize, Serialize};

/// Construction options shared by the mutable stores.
///
/// Deserializable so hosts can keep store settings in their own config files;
/// missing fields fall back to [`GraphOptions::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Whether two edges may join the same vertex pair.
    pub allow_parallel_edges: bool,
    /// Initial vertex capacity of each index.
    pub vertex_capacity: usize,
    /// Initial capacity of each new per-vertex edge list.
    pub edge_capacity: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            allow_parallel_edges: true,
            vertex_capacity: 0,
            edge_capacity: 0,
        }
    }
}

impl GraphOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parallel-edge policy.
    #[must_use]
    pub fn allow_parallel_edges(mut self, allow: bool) -> Self {
        self.allow_parallel_edges = allow;
        self
    }

    /// Sets the initial vertex capacity.
    #[must_use]
    pub fn vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    /// Sets the initial capacity of each per-vertex edge list.
    #[must_use]
    pub fn edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }
}

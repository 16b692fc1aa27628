//! An immutable compressed sparse row (CSR) graph.
//!
//! Memory layout:
//! - `vertices`: insertion-ordered vertex set, position `i` is row `i`
//! - `offsets`: `Vec<usize>` of length `n + 1`, row `i` spans `offsets[i]..offsets[i + 1]`
//! - `targets`: every out-edge target, rows laid out back to back
//!
//! There is no per-edge object: out-edges are synthesized as [`SEdge`]
//! values on the way out. The layout is built once by
//! [`CompressedSparseRowGraph::from_graph`] and never changes afterwards,
//! which makes the graph safe to share between threads for reading.

use core::hash::Hash;
use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::edge::{Edge, SEdge};
use crate::error::{GraphError, GraphResult};
use crate::graph::traits::{EdgeSet, GraphBase, ImplicitGraph, IncidenceGraph, VertexSet};

#[derive(Debug)]
struct CsrLayout<V> {
    vertices: IndexSet<V, FxBuildHasher>,
    offsets: Vec<usize>,
    targets: Vec<V>,
}

/// A read-only CSR snapshot of a directed graph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_graph` | \(O(n + m)\) | One pass over the source |
/// | `out_degree` | \(O(1)\) | Offset difference |
/// | `out_edges` | \(O(1)\) + \(O(\text{out-degree})\) | Contiguous slice walk |
/// | `contains_edge_between` | \(O(\text{out-degree})\) | Linear scan of the row |
/// | `clone` | \(O(1)\) | Layout is shared |
#[derive(Debug)]
pub struct CompressedSparseRowGraph<V> {
    layout: Arc<CsrLayout<V>>,
}

impl<V> Clone for CompressedSparseRowGraph<V> {
    fn clone(&self) -> Self {
        Self {
            layout: Arc::clone(&self.layout),
        }
    }
}

impl<V: Clone + Eq + Hash> CompressedSparseRowGraph<V> {
    /// Captures the vertices and out-edge targets of `graph`, rows in the
    /// source's vertex enumeration order.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: VertexSet<Vertex = V> + ImplicitGraph,
    {
        let mut vertices = IndexSet::with_capacity_and_hasher(graph.vertex_count(), FxBuildHasher);
        let mut offsets = Vec::with_capacity(graph.vertex_count() + 1);
        let mut targets = Vec::new();
        offsets.push(0);

        for vertex in graph.vertices() {
            // A repeated vertex would open a second row for the same key.
            if vertices.contains(&vertex) {
                continue;
            }
            if let Some(out_edges) = graph.try_get_out_edges(&vertex) {
                targets.extend(out_edges.map(|e| e.target().clone()));
            }
            offsets.push(targets.len());
            vertices.insert(vertex);
        }

        debug_op!(
            vertices = vertices.len(),
            edges = targets.len(),
            "csr snapshot built"
        );
        Self {
            layout: Arc::new(CsrLayout {
                vertices,
                offsets,
                targets,
            }),
        }
    }

    /// The out-neighbours of `vertex` as a contiguous slice.
    pub fn out_targets(&self, vertex: &V) -> Option<&[V]> {
        let row = self.layout.vertices.get_index_of(vertex)?;
        Some(self.row(row))
    }

    /// Row `index` of the target array.
    fn row(&self, index: usize) -> &[V] {
        let layout = &*self.layout;
        &layout.targets[layout.offsets[index]..layout.offsets[index + 1]]
    }
}

#[cfg(feature = "parallel")]
impl<V> CompressedSparseRowGraph<V>
where
    V: Clone + Eq + Hash + Send + Sync,
{
    /// Every edge, produced in parallel one row per task.
    pub fn par_edges(&self) -> impl rayon::iter::ParallelIterator<Item = SEdge<V>> + '_ {
        use rayon::prelude::*;

        let layout = &*self.layout;
        (0..layout.vertices.len())
            .into_par_iter()
            .flat_map_iter(move |row| {
                let source = &layout.vertices[row];
                layout.targets[layout.offsets[row]..layout.offsets[row + 1]]
                    .iter()
                    .map(move |target| SEdge::new(source.clone(), target.clone()))
            })
    }

    /// Out-degree of every row, in vertex order.
    pub fn par_out_degrees(&self) -> impl rayon::iter::IndexedParallelIterator<Item = usize> + '_ {
        use rayon::prelude::*;

        self.layout.offsets.par_windows(2).map(|w| w[1] - w[0])
    }
}

impl<V: Clone + Eq + Hash> GraphBase for CompressedSparseRowGraph<V> {
    type Vertex = V;
    type Edge = SEdge<V>;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        true
    }
}

impl<V: Clone + Eq + Hash> VertexSet for CompressedSparseRowGraph<V> {
    fn vertex_count(&self) -> usize {
        self.layout.vertices.len()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.layout.vertices.iter().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.layout.vertices.contains(vertex)
    }
}

impl<V: Clone + Eq + Hash> EdgeSet for CompressedSparseRowGraph<V> {
    fn edge_count(&self) -> usize {
        self.layout.targets.len()
    }

    fn edges(&self) -> impl Iterator<Item = SEdge<V>> + '_ {
        self.layout
            .vertices
            .iter()
            .enumerate()
            .flat_map(move |(row, source)| {
                self.row(row)
                    .iter()
                    .map(move |target| SEdge::new(source.clone(), target.clone()))
            })
    }

    fn contains_edge(&self, edge: &SEdge<V>) -> bool {
        self.out_targets(edge.source())
            .is_some_and(|targets| targets.contains(edge.target()))
    }
}

impl<V: Clone + Eq + Hash> ImplicitGraph for CompressedSparseRowGraph<V> {
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = SEdge<V>> + '_> {
        let row = self.layout.vertices.get_index_of(vertex)?;
        let source = &self.layout.vertices[row];
        Some(
            self.row(row)
                .iter()
                .map(move |target| SEdge::new(source.clone(), target.clone())),
        )
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.out_targets(vertex)
            .map(<[V]>::len)
            .ok_or(GraphError::VertexNotFound)
    }

    fn out_edge(&self, vertex: &V, index: usize) -> GraphResult<SEdge<V>> {
        let targets = self.out_targets(vertex).ok_or(GraphError::VertexNotFound)?;
        targets
            .get(index)
            .map(|target| SEdge::new(vertex.clone(), target.clone()))
            .ok_or(GraphError::IndexOutOfRange {
                index,
                len: targets.len(),
            })
    }
}

impl<V: Clone + Eq + Hash> IncidenceGraph for CompressedSparseRowGraph<V> {
    fn contains_edge_between(&self, source: &V, target: &V) -> bool {
        self.out_targets(source)
            .is_some_and(|targets| targets.contains(target))
    }
}

#[cfg(test)]
mod tests;

//! A dense bidirectional graph over a fixed integer vertex domain.
//!
//! Vertices are the integers `0..n`; edges live in an `n × n` slot table, one
//! slot per ordered pair. The table cannot hold two edges for the same pair,
//! so inserting into an occupied slot fails with
//! [`GraphError::ParallelEdgeNotAllowed`] instead of returning `false`.
//!
//! Memory is \(O(n^2)\) regardless of edge count; in exchange every endpoint
//! lookup is a single slot read.

use core::hash::Hash;

use num_traits::{NumCast, PrimInt};

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::graph::events::{GraphEvents, ObservableGraph};
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeSet, GraphBase, ImplicitGraph, IncidenceGraph,
    MutableEdgeSet, MutableGraph, MutableIncidenceGraph, VertexSet,
};

/// An adjacency-matrix graph with vertices `0..n`.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_edge` / `remove_edge` | \(O(1)\) | Slot write |
/// | `try_get_edge` | \(O(1)\) | Slot read |
/// | `out_edges` / `in_edges` | \(O(n)\) | Row / column scan |
/// | `out_degree` / `in_degree` | \(O(n)\) | Row / column scan |
/// | `memory` | \(O(n^2)\) | One `Option<E>` per ordered pair |
#[derive(Debug)]
pub struct BidirectionalMatrixGraph<V, E> {
    vertex_count: usize,
    slots: Vec<Option<E>>,
    edge_count: usize,
    events: GraphEvents<V, E>,
}

impl<V: PrimInt, E> BidirectionalMatrixGraph<V, E> {
    /// Creates a graph over the vertices `0..vertex_count` with no edge.
    ///
    /// Fails with `InvalidArgument` when `vertex_count` is zero, when the
    /// slot table would overflow `usize`, or when `vertex_count - 1` does not
    /// fit in `V`.
    pub fn new(vertex_count: usize) -> GraphResult<Self> {
        if vertex_count == 0 {
            return Err(GraphError::InvalidArgument("vertex count must be positive"));
        }
        let size = vertex_count
            .checked_mul(vertex_count)
            .ok_or(GraphError::InvalidArgument("vertex count overflows the slot table"))?;
        if <V as NumCast>::from(vertex_count - 1).is_none() {
            return Err(GraphError::InvalidArgument(
                "vertex count exceeds the vertex type range",
            ));
        }
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);
        Ok(Self {
            vertex_count,
            slots,
            edge_count: 0,
            events: GraphEvents::new(),
        })
    }

    #[inline]
    fn index_of(&self, vertex: V) -> Option<usize> {
        vertex.to_usize().filter(|&i| i < self.vertex_count)
    }

    #[inline]
    fn slot_of(&self, source: V, target: V) -> Option<usize> {
        Some(self.index_of(source)? * self.vertex_count + self.index_of(target)?)
    }

    #[inline]
    fn vertex_at(index: usize) -> Option<V> {
        <V as NumCast>::from(index)
    }
}

impl<V, E: Clone> Clone for BidirectionalMatrixGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            vertex_count: self.vertex_count,
            slots: self.slots.clone(),
            edge_count: self.edge_count,
            events: GraphEvents::new(),
        }
    }
}

impl<V, E> BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn row(&self, vertex: V) -> Option<&[Option<E>]> {
        let start = self.index_of(vertex)? * self.vertex_count;
        self.slots.get(start..start + self.vertex_count)
    }

    fn column(&self, vertex: V) -> Option<impl Iterator<Item = &Option<E>> + '_> {
        let column = self.index_of(vertex)?;
        Some(self.slots.iter().skip(column).step_by(self.vertex_count))
    }

    /// Removes the in-edges of `vertex` matching `pred`.
    pub fn remove_in_edge_if<P>(&mut self, vertex: &V, mut pred: P) -> GraphResult<usize>
    where
        P: FnMut(&E) -> bool,
    {
        let column = self.index_of(*vertex).ok_or(GraphError::VertexNotFound)?;
        let mut removed = 0;
        for slot in self.slots.iter_mut().skip(column).step_by(self.vertex_count) {
            if slot.as_ref().is_some_and(&mut pred) {
                if let Some(edge) = slot.take() {
                    self.events.edge_removed(&edge);
                    removed += 1;
                }
            }
        }
        self.edge_count -= removed;
        Ok(removed)
    }

    /// Removes every in-edge of `vertex`.
    pub fn clear_in_edges(&mut self, vertex: &V) -> GraphResult<usize> {
        self.remove_in_edge_if(vertex, |_| true)
    }

    /// Removes every edge touching `vertex`.
    pub fn clear_edges(&mut self, vertex: &V) -> GraphResult<usize> {
        let out = self.clear_out_edges(vertex)?;
        Ok(out + self.clear_in_edges(vertex)?)
    }
}

impl<V, E> GraphBase for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        false
    }
}

impl<V, E> VertexSet for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        (0..self.vertex_count).filter_map(Self::vertex_at)
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.index_of(*vertex).is_some()
    }
}

impl<V, E> EdgeSet for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.slots.iter().flatten().cloned()
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.slot_of(*edge.source(), *edge.target())
            .and_then(|slot| self.slots[slot].as_ref())
            .is_some_and(|stored| stored == edge)
    }
}

impl<V, E> ImplicitGraph for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        Some(self.row(*vertex)?.iter().flatten().cloned())
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.row(*vertex)
            .map(|row| row.iter().filter(|slot| slot.is_some()).count())
            .ok_or(GraphError::VertexNotFound)
    }
}

impl<V, E> IncidenceGraph for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn contains_edge_between(&self, source: &V, target: &V) -> bool {
        self.try_get_edge(source, target).is_some()
    }

    fn try_get_edge(&self, source: &V, target: &V) -> Option<E> {
        let slot = self.slot_of(*source, *target)?;
        self.slots[slot].clone()
    }

    fn try_get_edges(&self, source: &V, target: &V) -> Option<Vec<E>> {
        self.index_of(*source)?;
        Some(self.try_get_edge(source, target).into_iter().collect())
    }
}

impl<V, E> BidirectionalIncidenceGraph for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_in_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        Some(self.column(*vertex)?.flatten().cloned())
    }

    fn in_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.column(*vertex)
            .map(|column| column.filter(|slot| slot.is_some()).count())
            .ok_or(GraphError::VertexNotFound)
    }
}

impl<V, E> MutableGraph for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Empties every slot. The vertex domain is fixed and stays.
    fn clear(&mut self) {
        let observed = self.events.has_edge_removed_listeners();
        for slot in &mut self.slots {
            if let Some(edge) = slot.take() {
                if observed {
                    self.events.edge_removed(&edge);
                }
            }
        }
        self.edge_count = 0;
        trace_op!(vertices = self.vertex_count, "matrix graph cleared");
    }
}

impl<V, E> MutableEdgeSet for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Fills the `(source, target)` slot.
    ///
    /// Never returns `Ok(false)`: an occupied slot is
    /// `Err(ParallelEdgeNotAllowed)`.
    fn add_edge(&mut self, edge: E) -> GraphResult<bool> {
        let slot = self
            .slot_of(*edge.source(), *edge.target())
            .ok_or(GraphError::VertexNotFound)?;
        if self.slots[slot].is_some() {
            return Err(GraphError::ParallelEdgeNotAllowed);
        }
        self.edge_count += 1;
        let added = self.slots[slot].insert(edge);
        self.events.edge_added(added);
        trace_op!(edge_count = self.edge_count, "edge added");
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(slot) = self.slot_of(*edge.source(), *edge.target()) else {
            return false;
        };
        if self.slots[slot].as_ref() != Some(edge) {
            return false;
        }
        if let Some(removed) = self.slots[slot].take() {
            self.events.edge_removed(&removed);
        }
        self.edge_count -= 1;
        trace_op!(edge_count = self.edge_count, "edge removed");
        true
    }

    /// Always fails: predicate removal over the slot table is left to the
    /// caller.
    fn remove_edge_if<P>(&mut self, _pred: P) -> GraphResult<usize>
    where
        P: FnMut(&E) -> bool,
    {
        Err(GraphError::NotSupported("remove_edge_if on a matrix graph"))
    }
}

impl<V, E> MutableIncidenceGraph for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn remove_out_edge_if<P>(&mut self, vertex: &V, mut pred: P) -> GraphResult<usize>
    where
        P: FnMut(&E) -> bool,
    {
        let start = self.index_of(*vertex).ok_or(GraphError::VertexNotFound)? * self.vertex_count;
        let mut removed = 0;
        for slot in &mut self.slots[start..start + self.vertex_count] {
            if slot.as_ref().is_some_and(&mut pred) {
                if let Some(edge) = slot.take() {
                    self.events.edge_removed(&edge);
                    removed += 1;
                }
            }
        }
        self.edge_count -= removed;
        Ok(removed)
    }

    /// Slots are preallocated; nothing to release.
    fn trim_edge_excess(&mut self) {}
}

impl<V, E> ObservableGraph for BidirectionalMatrixGraph<V, E>
where
    V: PrimInt + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn events(&self) -> &GraphEvents<V, E> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut GraphEvents<V, E> {
        &mut self.events
    }
}

#[cfg(test)]
mod tests;

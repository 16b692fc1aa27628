//! Edge value contracts.
//!
//! An edge is an ordered `(source, target)` pair. Stores never look inside an
//! edge beyond these two accessors and the edge type's own `PartialEq`, so the
//! caller picks the equality strategy by picking the edge type:
//! - [`SEdge`]: structural equality, parallel copies compare equal
//! - [`TaggedEdge`]: the tag takes part in equality, so parallel edges with
//!   different tags stay distinguishable
//! - `Rc<E>` / `Arc<E>`: shared edge instances, cheap to clone across indices

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// A directed pair of vertices.
pub trait Edge<V> {
    /// The vertex this edge leaves.
    fn source(&self) -> &V;

    /// The vertex this edge enters.
    fn target(&self) -> &V;

    /// Returns `true` if `source == target`.
    #[inline]
    fn is_self_edge(&self) -> bool
    where
        V: PartialEq,
    {
        self.source() == self.target()
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    #[inline]
    fn is_adjacent(&self, vertex: &V) -> bool
    where
        V: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns the endpoint opposite to `vertex`.
    ///
    /// For a self-edge this is `vertex` itself. If `vertex` is not an endpoint
    /// the source is returned.
    #[inline]
    fn other_vertex(&self, vertex: &V) -> &V
    where
        V: PartialEq,
    {
        if self.source() == vertex {
            self.target()
        } else {
            self.source()
        }
    }

    /// Returns `true` if the edge joins `a` and `b` in either orientation.
    #[inline]
    fn connects(&self, a: &V, b: &V) -> bool
    where
        V: PartialEq,
    {
        (self.source() == a && self.target() == b) || (self.source() == b && self.target() == a)
    }
}

impl<V> Edge<V> for (V, V) {
    #[inline]
    fn source(&self) -> &V {
        &self.0
    }

    #[inline]
    fn target(&self) -> &V {
        &self.1
    }
}

impl<V, E: Edge<V>> Edge<V> for Rc<E> {
    #[inline]
    fn source(&self) -> &V {
        (**self).source()
    }

    #[inline]
    fn target(&self) -> &V {
        (**self).target()
    }
}

impl<V, E: Edge<V>> Edge<V> for Arc<E> {
    #[inline]
    fn source(&self) -> &V {
        (**self).source()
    }

    #[inline]
    fn target(&self) -> &V {
        (**self).target()
    }
}

/// A plain edge with structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SEdge<V> {
    source: V,
    target: V,
}

impl<V> SEdge<V> {
    /// Creates the edge `source -> target`.
    pub const fn new(source: V, target: V) -> Self {
        Self { source, target }
    }

    /// Consumes the edge and returns its endpoints.
    pub fn into_pair(self) -> (V, V) {
        (self.source, self.target)
    }
}

impl<V> Edge<V> for SEdge<V> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

impl<V> From<(V, V)> for SEdge<V> {
    fn from((source, target): (V, V)) -> Self {
        Self::new(source, target)
    }
}

/// An edge carrying a tag that participates in equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedEdge<V, T> {
    source: V,
    target: V,
    tag: T,
}

impl<V, T> TaggedEdge<V, T> {
    /// Creates the edge `source -> target` labelled with `tag`.
    pub const fn new(source: V, target: V, tag: T) -> Self {
        Self {
            source,
            target,
            tag,
        }
    }

    /// The tag attached at construction.
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// Returns a copy of this edge carrying a different tag.
    pub fn with_tag<U>(self, tag: U) -> TaggedEdge<V, U> {
        TaggedEdge::new(self.source, self.target, tag)
    }
}

impl<V, T> Edge<V> for TaggedEdge<V, T> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

/// An undirected edge stored in canonical order (`source <= target`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SUndirectedEdge<V> {
    source: V,
    target: V,
}

impl<V: Ord> SUndirectedEdge<V> {
    /// Creates the edge, rejecting pairs given out of order.
    pub fn try_new(source: V, target: V) -> GraphResult<Self> {
        if source > target {
            return Err(GraphError::InvalidArgument(
                "undirected edge source must not exceed its target",
            ));
        }
        Ok(Self { source, target })
    }

    /// Creates the edge, swapping the endpoints into canonical order if needed.
    pub fn normalized(a: V, b: V) -> Self {
        if a <= b {
            Self {
                source: a,
                target: b,
            }
        } else {
            Self {
                source: b,
                target: a,
            }
        }
    }
}

impl<V> Edge<V> for SUndirectedEdge<V> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

/// An edge seen through a reversed graph: `source` and `target` are swapped,
/// the wrapped edge is untouched.
#[derive(Debug)]
pub struct ReversedEdge<V, E> {
    original: E,
    _vertex: PhantomData<fn() -> V>,
}

impl<V, E> ReversedEdge<V, E> {
    /// Wraps `original`.
    pub fn new(original: E) -> Self {
        Self {
            original,
            _vertex: PhantomData,
        }
    }

    /// The edge as stored in the wrapped graph.
    pub fn original(&self) -> &E {
        &self.original
    }

    /// Unwraps the stored edge.
    pub fn into_original(self) -> E {
        self.original
    }
}

impl<V, E: Edge<V>> Edge<V> for ReversedEdge<V, E> {
    #[inline]
    fn source(&self) -> &V {
        self.original.target()
    }

    #[inline]
    fn target(&self) -> &V {
        self.original.source()
    }
}

impl<V, E: Clone> Clone for ReversedEdge<V, E> {
    fn clone(&self) -> Self {
        Self::new(self.original.clone())
    }
}

impl<V, E: PartialEq> PartialEq for ReversedEdge<V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl<V, E: Eq> Eq for ReversedEdge<V, E> {}

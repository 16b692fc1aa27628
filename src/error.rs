//! Error taxonomy shared by every graph store.
//!
//! Every fallible operation validates its arguments before touching any
//! index, so a returned error always means the store is unchanged.

use core::fmt;

/// The error type for graph store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An argument was rejected before any mutation took place.
    InvalidArgument(&'static str),
    /// A query or insertion referenced a vertex absent from the vertex set.
    VertexNotFound,
    /// A slot-based store already holds an edge for this ordered pair.
    ParallelEdgeNotAllowed,
    /// A positional accessor was called past the current degree.
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The degree at the time of the call.
        len: usize,
    },
    /// The representation structurally cannot perform this operation.
    NotSupported(&'static str),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            GraphError::VertexNotFound => f.write_str("vertex not found"),
            GraphError::ParallelEdgeNotAllowed => f.write_str("parallel edge not allowed"),
            GraphError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for degree {len}")
            }
            GraphError::NotSupported(what) => write!(f, "operation not supported: {what}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Shorthand for results produced by graph stores.
pub type GraphResult<T> = Result<T, GraphError>;

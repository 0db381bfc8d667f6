//! Error types for the graphforge core library.
//!
//! Two enums cover the two failure surfaces: [`GraphError`] for graph
//! construction and sampling (capacity, invalid arguments, unimplemented
//! operations) and [`IndexError`] for structural misuse of the adjacency
//! index (stale, foreign, or past-the-end positions). Each enum carries a
//! parallel code enum with a stable machine-readable representation for
//! logging surfaces.

use thiserror::Error;

use crate::adjacency::Vertex;

/// Errors raised by [`crate::AdjacencyIndex`] position handling.
///
/// Structural operations on the index are total; these errors only signal
/// caller bugs around positions and absent entries.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum IndexError {
    /// A past-the-end position was dereferenced, ranked, or erased.
    #[error("cannot dereference a past-the-end position")]
    PastTheEnd,
    /// The position refers to an entry that has since been erased.
    #[error("position refers to an erased entry")]
    StalePosition,
    /// The position was created by a different index instance.
    #[error("position belongs to a different index")]
    ForeignPosition,
    /// An erase targeted an adjacency that is not present.
    #[error("adjacency ({tail}, {head}) is not present")]
    AbsentAdjacency {
        /// Tail vertex of the missing adjacency.
        tail: Vertex,
        /// Head vertex of the missing adjacency.
        head: Vertex,
    },
}

impl IndexError {
    /// Returns a stable, machine-readable code for the variant.
    #[must_use]
    pub const fn code(&self) -> IndexErrorCode {
        match self {
            Self::PastTheEnd => IndexErrorCode::PastTheEnd,
            Self::StalePosition => IndexErrorCode::StalePosition,
            Self::ForeignPosition => IndexErrorCode::ForeignPosition,
            Self::AbsentAdjacency { .. } => IndexErrorCode::AbsentAdjacency,
        }
    }
}

/// Machine-readable codes for [`IndexError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IndexErrorCode {
    /// A past-the-end position was dereferenced, ranked, or erased.
    PastTheEnd,
    /// The position refers to an entry that has since been erased.
    StalePosition,
    /// The position was created by a different index instance.
    ForeignPosition,
    /// An erase targeted an adjacency that is not present.
    AbsentAdjacency,
}

impl IndexErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PastTheEnd => "PAST_THE_END",
            Self::StalePosition => "STALE_POSITION",
            Self::ForeignPosition => "FOREIGN_POSITION",
            Self::AbsentAdjacency => "ABSENT_ADJACENCY",
        }
    }
}

/// Errors raised while constructing or mutating a graph.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GraphError {
    /// A sampling request exceeded the free slots left in the range.
    #[error("requested {requested} samples but only {available} slots remain")]
    CapacityExceeded {
        /// Number of values the caller asked for.
        requested: usize,
        /// Number of non-excluded slots actually available.
        available: u64,
    },
    /// A forest was requested with more edges than any forest can hold.
    #[error("a forest on {vertices} vertices holds at most {} edges, got {requested}", .vertices.saturating_sub(1))]
    TooManyEdges {
        /// Number of edges the caller asked for.
        requested: usize,
        /// Number of vertices in the graph.
        vertices: usize,
    },
    /// The topology needs more vertices than the graph has.
    #[error("topology requires at least {required} vertices, got {vertices}")]
    TooFewVertices {
        /// Minimum vertex count the topology needs.
        required: usize,
        /// Number of vertices in the graph.
        vertices: usize,
    },
    /// A vertex index was outside `[0, n)`.
    #[error("vertex {vertex} is out of range for a graph on {vertices} vertices")]
    VertexOutOfRange {
        /// The offending vertex index.
        vertex: Vertex,
        /// Number of vertices in the graph.
        vertices: usize,
    },
    /// An edge connected a vertex to itself.
    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop {
        /// The vertex appearing at both endpoints.
        vertex: Vertex,
    },
    /// The requested operation is not supported.
    #[error("{operation} is not implemented")]
    NotImplemented {
        /// Name of the unsupported operation.
        operation: &'static str,
    },
    /// A structural violation surfaced from the adjacency index.
    #[error("adjacency index violation: {0}")]
    Index(#[from] IndexError),
}

impl GraphError {
    /// Returns a stable, machine-readable code for the variant.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::CapacityExceeded { .. } => GraphErrorCode::CapacityExceeded,
            Self::TooManyEdges { .. } => GraphErrorCode::TooManyEdges,
            Self::TooFewVertices { .. } => GraphErrorCode::TooFewVertices,
            Self::VertexOutOfRange { .. } => GraphErrorCode::VertexOutOfRange,
            Self::SelfLoop { .. } => GraphErrorCode::SelfLoop,
            Self::NotImplemented { .. } => GraphErrorCode::NotImplemented,
            Self::Index(_) => GraphErrorCode::Index,
        }
    }

    /// Retrieves the inner [`IndexErrorCode`] when the error originated in
    /// the adjacency index.
    #[must_use]
    pub const fn index_code(&self) -> Option<IndexErrorCode> {
        match self {
            Self::Index(inner) => Some(inner.code()),
            _ => None,
        }
    }
}

/// Machine-readable codes for [`GraphError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphErrorCode {
    /// A sampling request exceeded the free slots left in the range.
    CapacityExceeded,
    /// A forest was requested with more edges than any forest can hold.
    TooManyEdges,
    /// The topology needs more vertices than the graph has.
    TooFewVertices,
    /// A vertex index was outside `[0, n)`.
    VertexOutOfRange,
    /// An edge connected a vertex to itself.
    SelfLoop,
    /// The requested operation is not supported.
    NotImplemented,
    /// A structural violation surfaced from the adjacency index.
    Index,
}

impl GraphErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::TooManyEdges => "TOO_MANY_EDGES",
            Self::TooFewVertices => "TOO_FEW_VERTICES",
            Self::VertexOutOfRange => "VERTEX_OUT_OF_RANGE",
            Self::SelfLoop => "SELF_LOOP",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::Index => "INDEX_VIOLATION",
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;

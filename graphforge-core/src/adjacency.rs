//! The adjacency type every other component orders itself around.
//!
//! An adjacency is an ordered pair of vertex indices. It differs from an
//! edge: an undirected edge is stored as two mirrored adjacencies, a
//! directed edge as one. The derived ordering is lexicographic by
//! `(tail, head)`, which is the order the index iterates in and the order
//! the rank codecs are monotonic against.

use std::fmt;

/// Dense vertex index in `[0, n)`. Vertices have no identity beyond it.
pub type Vertex = usize;

/// An ordered pair of vertices denoting a directed connection.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Adjacency {
    /// Source vertex of the connection.
    pub tail: Vertex,
    /// Destination vertex of the connection.
    pub head: Vertex,
}

impl Adjacency {
    /// Creates the adjacency `tail -> head`.
    ///
    /// # Examples
    /// ```
    /// use graphforge_core::Adjacency;
    ///
    /// let a = Adjacency::new(3, 1);
    /// assert!(Adjacency::new(2, 9) < a);
    /// ```
    #[must_use]
    pub const fn new(tail: Vertex, head: Vertex) -> Self {
        Self { tail, head }
    }

    /// Returns the mirrored adjacency `head -> tail`.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            tail: self.head,
            head: self.tail,
        }
    }
}

impl fmt::Display for Adjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.tail, self.head)
    }
}

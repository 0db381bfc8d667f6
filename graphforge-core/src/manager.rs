//! Vertex-aware facade over the adjacency index.
//!
//! The index itself has no notion of a vertex count; the manager fixes one
//! at construction and validates every adjacency against it, rejecting
//! out-of-range endpoints and self-loops before they reach the tree. It
//! also exposes per-vertex views: `(v, 0)` and `(v + 1, 0)` bracket the
//! block of entries tailed at `v`, so neighbour iteration and out-degree
//! fall out of the index's bound and rank machinery. Because bound lookups
//! splay, repeated access to one vertex's block stays near the root and is
//! amortized constant.

use crate::adjacency::{Adjacency, Vertex};
use crate::error::{GraphError, IndexError, Result};
use crate::index::{AdjacencyIndex, Iter, Position};

/// Bounds-checked adjacency storage for a graph on a fixed vertex count.
///
/// # Examples
/// ```
/// use graphforge_core::{Adjacency, AdjacencyManager};
///
/// let mut manager = AdjacencyManager::new(4);
/// manager.insert(Adjacency::new(2, 0), ())?;
/// manager.insert(Adjacency::new(2, 3), ())?;
/// manager.insert(Adjacency::new(1, 3), ())?;
/// assert_eq!(manager.out_degree(2)?, 2);
/// let heads: Vec<_> = manager.neighbors(2)?.map(|a| a.head).collect();
/// assert_eq!(heads, vec![0, 3]);
/// # Ok::<(), graphforge_core::GraphError>(())
/// ```
#[derive(Debug)]
pub struct AdjacencyManager<W = ()> {
    index: AdjacencyIndex<W>,
    vertices: usize,
}

impl<W> AdjacencyManager<W> {
    /// Creates an empty manager for a graph on `vertices` vertices.
    #[must_use]
    pub fn new(vertices: usize) -> Self {
        Self {
            index: AdjacencyIndex::new(),
            vertices,
        }
    }

    /// Returns the fixed vertex count.
    #[must_use]
    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Returns the number of stored adjacencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` when no adjacency is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Inserts `adjacency`, returning its position.
    ///
    /// Re-inserting a present pair is an idempotent no-op.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] or [`GraphError::SelfLoop`]
    /// when the adjacency is invalid for this vertex count.
    pub fn insert(&mut self, adjacency: Adjacency, weight: W) -> Result<Position> {
        self.validate(adjacency)?;
        Ok(self.index.insert(adjacency, weight))
    }

    /// Erases the entry holding `adjacency`.
    ///
    /// # Errors
    /// Returns [`IndexError::AbsentAdjacency`] (wrapped) when no such entry
    /// exists.
    pub fn erase(&mut self, adjacency: Adjacency) -> Result<()> {
        self.index.erase_adjacency(adjacency)?;
        Ok(())
    }

    /// Erases the entry at `position`, returning its adjacency.
    ///
    /// # Errors
    /// Returns a wrapped [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn erase_at(&mut self, position: Position) -> Result<Adjacency> {
        Ok(self.index.erase(position)?)
    }

    /// Returns the position of `adjacency`, or past-the-end when absent.
    pub fn find(&mut self, adjacency: Adjacency) -> Position {
        self.index.find(adjacency)
    }

    /// Returns `true` when `adjacency` is present.
    pub fn contains(&mut self, adjacency: Adjacency) -> bool {
        self.index.contains(adjacency)
    }

    /// Returns the position of the first entry, or past-the-end when empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.index.first()
    }

    /// Returns the past-the-end position.
    #[must_use]
    pub fn end(&self) -> Position {
        self.index.end()
    }

    /// Returns the position of the first adjacency tailed at `vertex`, or
    /// the end of its block when the vertex has no neighbours.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn begin_of(&mut self, vertex: Vertex) -> Result<Position> {
        self.check_vertex(vertex)?;
        Ok(self.index.lower_bound(Adjacency::new(vertex, 0)))
    }

    /// Returns the position one past the last adjacency tailed at `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn end_of(&mut self, vertex: Vertex) -> Result<Position> {
        self.check_vertex(vertex)?;
        Ok(self.index.lower_bound(Adjacency::new(vertex + 1, 0)))
    }

    /// Returns the number of adjacencies tailed at `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn out_degree(&mut self, vertex: Vertex) -> Result<usize> {
        let begin = self.begin_of(vertex)?;
        let end = self.end_of(vertex)?;
        Ok(self.rank_or_past_end(end)? - self.rank_or_past_end(begin)?)
    }

    /// Iterates the adjacencies tailed at `vertex` in ascending head order.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn neighbors(&self, vertex: Vertex) -> Result<Iter<'_, W>> {
        self.check_vertex(vertex)?;
        Ok(self
            .index
            .range(Adjacency::new(vertex, 0), Adjacency::new(vertex + 1, 0)))
    }

    /// Returns the 1-based rank of the entry at `position`.
    ///
    /// # Errors
    /// Returns a wrapped [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn rank(&mut self, position: Position) -> Result<usize> {
        Ok(self.index.rank(position)?)
    }

    /// Returns the position of the entry with 1-based rank `rank`, or
    /// past-the-end when out of range.
    #[must_use]
    pub fn select(&self, rank: usize) -> Position {
        self.index.select(rank)
    }

    /// Returns the adjacency stored at `position`.
    ///
    /// # Errors
    /// Returns a wrapped [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn adjacency_at(&self, position: Position) -> Result<Adjacency> {
        Ok(self.index.adjacency_at(position)?)
    }

    /// Returns the weight stored at `position`.
    ///
    /// # Errors
    /// Returns a wrapped [`IndexError`] for past-the-end, stale, or foreign
    /// positions.
    pub fn weight_at(&self, position: Position) -> Result<&W> {
        Ok(self.index.weight_at(position)?)
    }

    /// Iterates all adjacencies in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, W> {
        self.index.iter()
    }

    fn check_vertex(&self, vertex: Vertex) -> Result<()> {
        if vertex >= self.vertices {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                vertices: self.vertices,
            });
        }
        Ok(())
    }

    /// Validates both endpoints and rejects self-loops.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] or [`GraphError::SelfLoop`].
    pub fn validate(&self, adjacency: Adjacency) -> Result<()> {
        self.check_vertex(adjacency.tail)?;
        self.check_vertex(adjacency.head)?;
        if adjacency.tail == adjacency.head {
            return Err(GraphError::SelfLoop {
                vertex: adjacency.tail,
            });
        }
        Ok(())
    }

    /// Maps the past-the-end position to rank `len() + 1`.
    fn rank_or_past_end(&mut self, position: Position) -> Result<usize> {
        match self.index.rank(position) {
            Ok(rank) => Ok(rank),
            Err(IndexError::PastTheEnd) => Ok(self.index.len() + 1),
            Err(other) => Err(other.into()),
        }
    }
}

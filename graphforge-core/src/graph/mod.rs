//! Graph construction facades.
//!
//! [`UndirectedGraph`] and [`DirectedGraph`] share one private core: a
//! bounds-checked [`AdjacencyManager`] plus a mirroring flag. Undirected
//! edges are stored as two mirrored adjacencies, directed edges as one;
//! everything else — random edge injection, spanning augmentation, and the
//! deterministic topology builders — differs only in which codec
//! enumerates the possible edges and whether inserts mirror.
//!
//! `add_edges` never enumerates the edge space. It encodes the present
//! admitted adjacencies into slots (already sorted, because the codec is
//! monotonic in the index's iteration order), hands them to the sampler as
//! exclusions, and decodes the draws back into adjacencies. Capacity is
//! validated inside the sampler before any insertion, so a failed bulk
//! request leaves the graph untouched.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::adjacency::{Adjacency, Vertex};
use crate::codec::{FullCodec, RankCodec, TriangularCodec};
use crate::dsu::DisjointSet;
use crate::error::{GraphError, Result};
use crate::index::Iter;
use crate::manager::AdjacencyManager;
use crate::sampler;

#[derive(Debug)]
struct GraphCore {
    manager: AdjacencyManager,
    mirrored: bool,
}

impl GraphCore {
    fn new(vertices: usize, mirrored: bool) -> Self {
        Self {
            manager: AdjacencyManager::new(vertices),
            mirrored,
        }
    }

    fn vertices(&self) -> usize {
        self.manager.vertices()
    }

    fn edge_count(&self) -> usize {
        if self.mirrored {
            self.manager.len() / 2
        } else {
            self.manager.len()
        }
    }

    fn insert(&mut self, adjacency: Adjacency) -> Result<()> {
        self.manager.insert(adjacency, ())?;
        if self.mirrored {
            self.manager.insert(adjacency.reversed(), ())?;
        }
        Ok(())
    }

    fn add_edge(&mut self, tail: Vertex, head: Vertex) -> Result<()> {
        let adjacency = Adjacency::new(tail, head);
        self.manager.validate(adjacency)?;
        self.insert(adjacency)
    }

    /// Draws `count` previously absent edges under `codec` and inserts
    /// them. The exclusion list comes out of the ordered scan already
    /// sorted, because the codec is monotonic in the same order.
    fn sample_edges<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        codec: &impl RankCodec,
    ) -> Result<()> {
        let excluded: Vec<u64> = self
            .manager
            .iter()
            .filter(|adjacency| codec.admits(*adjacency))
            .map(|adjacency| codec.encode(adjacency))
            .collect();
        let slots = sampler::sample_without_replacement(rng, count, 0, codec.slot_count(), excluded)?;
        for slot in slots {
            self.insert(codec.decode(slot))?;
        }
        Ok(())
    }

    /// Links the connected components with a random spanning tree over one
    /// representative per component. Returns the number of edges added.
    fn connect_components<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let n = self.vertices();
        if n == 0 {
            return Ok(0);
        }

        let mut components = DisjointSet::new(n);
        for adjacency in self.manager.iter() {
            components.merge(adjacency.tail, adjacency.head);
        }

        let mut order: Vec<Vertex> = (0..n).collect();
        order.shuffle(rng);

        // The first vertex scanned in each component represents it; merging
        // everything into the first component as we scan makes "new
        // component" a single merge test.
        let mut representatives = vec![order[0]];
        for &vertex in &order[1..] {
            if components.merge(order[0], vertex) {
                representatives.push(vertex);
            }
        }

        for i in 1..representatives.len() {
            let earlier = representatives[rng.gen_range(0..i)];
            self.add_edge(earlier, representatives[i])?;
        }
        Ok(representatives.len() - 1)
    }

    /// Emits a uniformly random forest with exactly `edges` edges.
    fn build_forest<R: Rng + ?Sized>(&mut self, rng: &mut R, edges: usize) -> Result<()> {
        let n = self.vertices();
        if edges > n.saturating_sub(1) {
            return Err(GraphError::TooManyEdges {
                requested: edges,
                vertices: n,
            });
        }
        // Each sampled v grows the forest by attaching v + 1 somewhere
        // among the earlier vertices; [0, n - 1) holds exactly n - 1
        // candidates, which is also the maximum forest size.
        let top = n.saturating_sub(1) as u64;
        let attachment_points = sampler::sample_without_replacement(rng, edges, 0, top, Vec::new())?;
        for point in attachment_points {
            let child = point as Vertex + 1;
            let parent = rng.gen_range(0..child);
            self.add_edge(parent, child)?;
        }
        Ok(())
    }

    fn build_path(&mut self) -> Result<()> {
        self.require_vertices(2)?;
        for i in 0..self.vertices() - 1 {
            self.add_edge(i, i + 1)?;
        }
        Ok(())
    }

    fn build_cycle(&mut self) -> Result<()> {
        self.require_vertices(3)?;
        self.build_path()?;
        self.add_edge(self.vertices() - 1, 0)
    }

    fn build_star(&mut self) -> Result<()> {
        self.require_vertices(2)?;
        for i in 1..self.vertices() {
            self.add_edge(0, i)?;
        }
        Ok(())
    }

    /// Hub `0`, rim `1..n`: spokes from the hub to every rim vertex, a rim
    /// path, and a closing edge back to the first rim vertex.
    fn build_wheel(&mut self) -> Result<()> {
        self.require_vertices(4)?;
        let n = self.vertices();
        for i in 1..n {
            self.add_edge(0, i)?;
        }
        for i in 1..n - 1 {
            self.add_edge(i, i + 1)?;
        }
        self.add_edge(n - 1, 1)
    }

    fn build_clique(&mut self) -> Result<()> {
        for i in 0..self.vertices() {
            for j in i + 1..self.vertices() {
                self.add_edge(i, j)?;
            }
        }
        Ok(())
    }

    fn require_vertices(&self, required: usize) -> Result<()> {
        if self.vertices() < required {
            return Err(GraphError::TooFewVertices {
                required,
                vertices: self.vertices(),
            });
        }
        Ok(())
    }
}

/// An undirected graph storing every edge as two mirrored adjacencies.
///
/// # Examples
/// ```
/// use graphforge_core::{UndirectedGraph, rng};
///
/// let mut rng = rng::seeded(11);
/// let mut graph = UndirectedGraph::new(5);
/// graph.add_edges(&mut rng, 4)?;
/// graph.connect(&mut rng)?;
/// assert!(graph.edge_count() >= 4);
/// # Ok::<(), graphforge_core::GraphError>(())
/// ```
#[derive(Debug)]
pub struct UndirectedGraph {
    core: GraphCore,
}

impl UndirectedGraph {
    /// Creates an empty undirected graph on `vertices` vertices.
    #[must_use]
    pub fn new(vertices: usize) -> Self {
        Self {
            core: GraphCore::new(vertices, true),
        }
    }

    /// Returns the vertex count.
    #[must_use]
    pub fn vertices(&self) -> usize {
        self.core.vertices()
    }

    /// Returns the number of edges, counting each mirrored pair once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.core.edge_count()
    }

    /// Inserts the edge `{tail, head}`; a present edge is a no-op.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] or [`GraphError::SelfLoop`]
    /// for an invalid edge.
    pub fn add_edge(&mut self, tail: Vertex, head: Vertex) -> Result<()> {
        self.core.add_edge(tail, head)
    }

    /// Returns `true` when the edge `{tail, head}` is present.
    pub fn has_edge(&mut self, tail: Vertex, head: Vertex) -> bool {
        self.core.manager.contains(Adjacency::new(tail, head))
    }

    /// Iterates each edge once, in ascending canonical `(tail > head)`
    /// order.
    pub fn edges(&self) -> impl Iterator<Item = Adjacency> + '_ {
        self.core
            .manager
            .iter()
            .filter(|adjacency| adjacency.tail > adjacency.head)
    }

    /// Iterates the neighbours of `vertex` in ascending order.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn neighbors(&self, vertex: Vertex) -> Result<Iter<'_>> {
        self.core.manager.neighbors(vertex)
    }

    /// Returns the degree of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn degree(&mut self, vertex: Vertex) -> Result<usize> {
        self.core.manager.out_degree(vertex)
    }

    /// Adds `edges` new, uniformly random, distinct edges.
    ///
    /// # Errors
    /// Returns [`GraphError::CapacityExceeded`] when fewer than `edges`
    /// absent edges remain; no edge is inserted on failure.
    #[instrument(skip(self, rng), fields(vertices = self.vertices(), edges))]
    pub fn add_edges<R: Rng + ?Sized>(&mut self, rng: &mut R, edges: usize) -> Result<()> {
        let codec = TriangularCodec::new(self.vertices());
        self.core.sample_edges(rng, edges, &codec)?;
        debug!(edge_count = self.edge_count(), "random edges added");
        Ok(())
    }

    /// Makes the graph connected by linking one representative per
    /// component with a random spanning tree. Returns the number of edges
    /// added (`components - 1`).
    ///
    /// # Errors
    /// Returns [`GraphError`] only on internal invariant violations.
    #[instrument(skip(self, rng), fields(vertices = self.vertices()))]
    pub fn connect<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let added = self.core.connect_components(rng)?;
        debug!(added, "spanning augmentation complete");
        Ok(added)
    }

    /// Emits a uniformly random forest with exactly `edges` edges; a
    /// single spanning tree when `edges == vertices - 1`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyEdges`] when `edges > vertices - 1`.
    #[instrument(skip(self, rng), fields(vertices = self.vertices(), edges))]
    pub fn build_forest<R: Rng + ?Sized>(&mut self, rng: &mut R, edges: usize) -> Result<()> {
        self.core.build_forest(rng, edges)
    }

    /// Emits a uniformly random spanning tree.
    ///
    /// # Errors
    /// Returns [`GraphError`] only on internal invariant violations.
    pub fn build_tree<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.core
            .build_forest(rng, self.vertices().saturating_sub(1))
    }

    /// Emits the path `0 - 1 - … - (n-1)`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 2`.
    pub fn build_path(&mut self) -> Result<()> {
        self.core.build_path()
    }

    /// Emits the cycle over all vertices.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 3`.
    pub fn build_cycle(&mut self) -> Result<()> {
        self.core.build_cycle()
    }

    /// Emits the star with hub `0`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 2`.
    pub fn build_star(&mut self) -> Result<()> {
        self.core.build_star()
    }

    /// Emits the wheel with hub `0` and rim `1..n`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 4`.
    pub fn build_wheel(&mut self) -> Result<()> {
        self.core.build_wheel()
    }

    /// Emits every possible edge.
    ///
    /// # Errors
    /// Returns [`GraphError`] only on internal invariant violations.
    pub fn build_clique(&mut self) -> Result<()> {
        self.core.build_clique()
    }
}

/// A directed graph storing each edge as a single adjacency.
#[derive(Debug)]
pub struct DirectedGraph {
    core: GraphCore,
}

impl DirectedGraph {
    /// Creates an empty directed graph on `vertices` vertices.
    #[must_use]
    pub fn new(vertices: usize) -> Self {
        Self {
            core: GraphCore::new(vertices, false),
        }
    }

    /// Returns the vertex count.
    #[must_use]
    pub fn vertices(&self) -> usize {
        self.core.vertices()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.core.edge_count()
    }

    /// Inserts the edge `(tail, head)`; a present edge is a no-op.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] or [`GraphError::SelfLoop`]
    /// for an invalid edge.
    pub fn add_edge(&mut self, tail: Vertex, head: Vertex) -> Result<()> {
        self.core.add_edge(tail, head)
    }

    /// Returns `true` when the edge `(tail, head)` is present.
    pub fn has_edge(&mut self, tail: Vertex, head: Vertex) -> bool {
        self.core.manager.contains(Adjacency::new(tail, head))
    }

    /// Iterates all edges in ascending `(tail, head)` order.
    pub fn edges(&self) -> impl Iterator<Item = Adjacency> + '_ {
        self.core.manager.iter()
    }

    /// Iterates the out-neighbours of `vertex` in ascending order.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn neighbors(&self, vertex: Vertex) -> Result<Iter<'_>> {
        self.core.manager.neighbors(vertex)
    }

    /// Returns the out-degree of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid vertex.
    pub fn out_degree(&mut self, vertex: Vertex) -> Result<usize> {
        self.core.manager.out_degree(vertex)
    }

    /// Adds `edges` new, uniformly random, distinct directed edges.
    ///
    /// # Errors
    /// Returns [`GraphError::CapacityExceeded`] when fewer than `edges`
    /// absent edges remain; no edge is inserted on failure.
    #[instrument(skip(self, rng), fields(vertices = self.vertices(), edges))]
    pub fn add_edges<R: Rng + ?Sized>(&mut self, rng: &mut R, edges: usize) -> Result<()> {
        let codec = FullCodec::new(self.vertices());
        self.core.sample_edges(rng, edges, &codec)?;
        debug!(edge_count = self.edge_count(), "random edges added");
        Ok(())
    }

    /// Adds `edges` new random edges that all point from a higher to a
    /// lower vertex, keeping the graph acyclic under the natural
    /// topological order.
    ///
    /// # Errors
    /// Returns [`GraphError::CapacityExceeded`] when fewer than `edges`
    /// absent canonical edges remain; no edge is inserted on failure.
    #[instrument(skip(self, rng), fields(vertices = self.vertices(), edges))]
    pub fn build_dag<R: Rng + ?Sized>(&mut self, rng: &mut R, edges: usize) -> Result<()> {
        let codec = TriangularCodec::new(self.vertices());
        self.core.sample_edges(rng, edges, &codec)
    }

    /// Strong-connectivity augmentation.
    ///
    /// # Errors
    /// Always returns [`GraphError::NotImplemented`].
    pub fn connect<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Result<usize> {
        Err(GraphError::NotImplemented {
            operation: "directed strong-connectivity augmentation",
        })
    }

    /// Emits a uniformly random forest with exactly `edges` edges, each
    /// pointing from parent to child.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyEdges`] when `edges > vertices - 1`.
    #[instrument(skip(self, rng), fields(vertices = self.vertices(), edges))]
    pub fn build_forest<R: Rng + ?Sized>(&mut self, rng: &mut R, edges: usize) -> Result<()> {
        self.core.build_forest(rng, edges)
    }

    /// Emits a uniformly random spanning tree rooted anywhere.
    ///
    /// # Errors
    /// Returns [`GraphError`] only on internal invariant violations.
    pub fn build_tree<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.core
            .build_forest(rng, self.vertices().saturating_sub(1))
    }

    /// Emits the directed path `0 -> 1 -> … -> (n-1)`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 2`.
    pub fn build_path(&mut self) -> Result<()> {
        self.core.build_path()
    }

    /// Emits the directed cycle over all vertices.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 3`.
    pub fn build_cycle(&mut self) -> Result<()> {
        self.core.build_cycle()
    }

    /// Emits the star with hub `0` pointing outwards.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 2`.
    pub fn build_star(&mut self) -> Result<()> {
        self.core.build_star()
    }

    /// Emits the wheel with hub `0` and rim `1..n`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooFewVertices`] when `vertices < 4`.
    pub fn build_wheel(&mut self) -> Result<()> {
        self.core.build_wheel()
    }

    /// Emits one edge `(i, j)` for every pair `i < j`.
    ///
    /// # Errors
    /// Returns [`GraphError`] only on internal invariant violations.
    pub fn build_clique(&mut self) -> Result<()> {
        self.core.build_clique()
    }
}

#[cfg(test)]
mod tests;

//! Vertex labeling and edge weighting strategies.
//!
//! The core works on dense vertex indices; these strategies decide what
//! the serialized output calls each vertex and what weight, if any, each
//! edge carries. Labelers are injective and deterministic once
//! constructed, so the same graph always serializes to the same vertex
//! names. Weighters may consume randomness; absence of a weighter means
//! the weight column is omitted entirely.

use graphforge_core::{Adjacency, Vertex, rng::GraphRng};
use rand::Rng;
use rand::seq::SliceRandom;

/// An injective mapping from vertex index to output label.
pub trait Labeler {
    /// Returns the label of `vertex`.
    ///
    /// # Panics
    /// May panic when `vertex` is outside the range the labeler was
    /// constructed for.
    fn label(&self, vertex: Vertex) -> i64;
}

/// Labels vertex `i` as `start + i`.
///
/// # Examples
/// ```
/// use graphforge_cli::strategy::{IotaLabeler, Labeler};
///
/// let labeler = IotaLabeler::new(100);
/// assert_eq!(labeler.label(0), 100);
/// assert_eq!(labeler.label(7), 107);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IotaLabeler {
    start: i64,
}

impl IotaLabeler {
    /// Creates a labeler counting upwards from `start`.
    #[must_use]
    pub const fn new(start: i64) -> Self {
        Self { start }
    }
}

impl Labeler for IotaLabeler {
    fn label(&self, vertex: Vertex) -> i64 {
        self.start + vertex as i64
    }
}

/// Labels vertices with a random permutation of `[start, end)`.
///
/// The permutation is fixed at construction time; lookups are
/// deterministic afterwards.
#[derive(Clone, Debug)]
pub struct ShuffledRangeLabeler {
    labels: Vec<i64>,
}

impl ShuffledRangeLabeler {
    /// Creates a labeler over a shuffled copy of `start..end`.
    pub fn new<R: Rng + ?Sized>(start: i64, end: i64, rng: &mut R) -> Self {
        let mut labels: Vec<i64> = (start..end).collect();
        labels.shuffle(rng);
        Self { labels }
    }
}

impl Labeler for ShuffledRangeLabeler {
    fn label(&self, vertex: Vertex) -> i64 {
        self.labels[vertex]
    }
}

/// Labels vertices from an explicit table supplied by the caller.
#[derive(Clone, Debug)]
pub struct StaticLabeler {
    labels: Vec<i64>,
}

impl StaticLabeler {
    /// Creates a labeler over `labels`, indexed by vertex.
    ///
    /// Injectivity is the caller's responsibility.
    #[must_use]
    pub fn new(labels: Vec<i64>) -> Self {
        Self { labels }
    }
}

impl Labeler for StaticLabeler {
    fn label(&self, vertex: Vertex) -> i64 {
        self.labels[vertex]
    }
}

/// A weight assignment for edges about to be serialized.
pub trait Weighter {
    /// Returns the weight of `adjacency`.
    fn weight(&mut self, adjacency: Adjacency) -> f64;
}

/// Draws each weight uniformly from `[min, max)`, ignoring the edge.
#[derive(Debug)]
pub struct UniformWeighter {
    min: f64,
    max: f64,
    rng: GraphRng,
}

impl UniformWeighter {
    /// Creates a weighter drawing from `[min, max)` with its own
    /// generator.
    ///
    /// The caller must ensure `min < max`.
    #[must_use]
    pub fn new(min: f64, max: f64, rng: GraphRng) -> Self {
        Self { min, max, rng }
    }
}

impl Weighter for UniformWeighter {
    fn weight(&mut self, _adjacency: Adjacency) -> f64 {
        self.rng.gen_range(self.min..self.max)
    }
}

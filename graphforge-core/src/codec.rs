//! Monotonic bijections between adjacencies and dense integer slots.
//!
//! Sampling operates on plain integers: every possible adjacency under an
//! enumeration scheme owns one slot in `[0, M)`, whether or not it is
//! materialized. Two schemes exist: the triangular enumeration over
//! canonical pairs `tail > head` (undirected graphs and DAGs,
//! `M = n(n-1)/2`) and the full enumeration over all ordered pairs with
//! `tail != head` (directed graphs, `M = n(n-1)`).
//!
//! Both encodings are strictly increasing in the lexicographic order the
//! adjacency index iterates in, so an exclusion list built from an index
//! scan arrives at the sampler already sorted.

use crate::adjacency::{Adjacency, Vertex};

/// A slot/adjacency bijection for one enumeration scheme.
pub trait RankCodec {
    /// Total number of slots, `M`.
    fn slot_count(&self) -> u64;

    /// Returns `true` when `adjacency` belongs to this scheme's domain.
    fn admits(&self, adjacency: Adjacency) -> bool;

    /// Maps an admitted adjacency to its slot.
    ///
    /// The result is unspecified when [`Self::admits`] is `false`.
    fn encode(&self, adjacency: Adjacency) -> u64;

    /// Maps a slot in `[0, slot_count())` back to its adjacency.
    fn decode(&self, slot: u64) -> Adjacency;
}

/// Triangular enumeration of canonical pairs `tail > head`.
///
/// `encode(t, h) = t(t-1)/2 + h`; slot `0` is `(1, 0)`, the pairs of each
/// tail occupy one contiguous block, and blocks are ordered by tail.
///
/// # Examples
/// ```
/// use graphforge_core::{Adjacency, RankCodec, TriangularCodec};
///
/// let codec = TriangularCodec::new(5);
/// assert_eq!(codec.slot_count(), 10);
/// let pair = Adjacency::new(3, 2);
/// assert_eq!(codec.decode(codec.encode(pair)), pair);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TriangularCodec {
    vertices: usize,
}

impl TriangularCodec {
    /// Creates the codec for a graph on `vertices` vertices.
    #[must_use]
    pub const fn new(vertices: usize) -> Self {
        Self { vertices }
    }
}

const fn triangle(tail: u64) -> u64 {
    tail * tail.saturating_sub(1) / 2
}

impl RankCodec for TriangularCodec {
    fn slot_count(&self) -> u64 {
        let n = self.vertices as u64;
        n * n.saturating_sub(1) / 2
    }

    fn admits(&self, adjacency: Adjacency) -> bool {
        adjacency.tail > adjacency.head
    }

    fn encode(&self, adjacency: Adjacency) -> u64 {
        triangle(adjacency.tail as u64) + adjacency.head as u64
    }

    fn decode(&self, slot: u64) -> Adjacency {
        // The closed-form inverse mis-rounds near slots of the form
        // t(t-1)/2, so the square root only seeds an integer search that
        // restores t(t-1)/2 <= slot < t(t+1)/2 exactly.
        let seed = ((1.0 + (8.0 * slot as f64 + 1.0).sqrt()) / 2.0).floor() as u64;
        let mut tail = seed.max(1);
        while triangle(tail) > slot {
            tail -= 1;
        }
        while triangle(tail + 1) <= slot {
            tail += 1;
        }
        let head = slot - triangle(tail);
        Adjacency::new(tail as Vertex, head as Vertex)
    }
}

/// Full enumeration of ordered pairs `tail != head`.
///
/// Each tail owns a block of `n - 1` slots holding its heads in ascending
/// order with the diagonal squeezed out:
/// `encode(t, h) = t(n-1) + h - [h > t]`.
#[derive(Clone, Copy, Debug)]
pub struct FullCodec {
    vertices: usize,
}

impl FullCodec {
    /// Creates the codec for a graph on `vertices` vertices.
    #[must_use]
    pub const fn new(vertices: usize) -> Self {
        Self { vertices }
    }
}

impl RankCodec for FullCodec {
    fn slot_count(&self) -> u64 {
        let n = self.vertices as u64;
        n * n.saturating_sub(1)
    }

    fn admits(&self, adjacency: Adjacency) -> bool {
        adjacency.tail != adjacency.head
    }

    fn encode(&self, adjacency: Adjacency) -> u64 {
        let n = self.vertices as u64;
        let skip = u64::from(adjacency.head > adjacency.tail);
        adjacency.tail as u64 * (n - 1) + adjacency.head as u64 - skip
    }

    fn decode(&self, slot: u64) -> Adjacency {
        let n = self.vertices as u64;
        let tail = slot / (n - 1);
        let mut head = slot % (n - 1);
        if head >= tail {
            head += 1;
        }
        Adjacency::new(tail as Vertex, head as Vertex)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn admitted_pairs_in_order(codec: &impl RankCodec, vertices: usize) -> Vec<Adjacency> {
        let mut pairs = Vec::new();
        for tail in 0..vertices {
            for head in 0..vertices {
                let pair = Adjacency::new(tail, head);
                if codec.admits(pair) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    #[case(8)]
    #[case(64)]
    #[case(257)]
    fn triangular_is_a_dense_monotonic_bijection(#[case] vertices: usize) {
        let codec = TriangularCodec::new(vertices);
        let pairs = admitted_pairs_in_order(&codec, vertices);
        assert_eq!(pairs.len() as u64, codec.slot_count());
        for (slot, pair) in pairs.into_iter().enumerate() {
            let slot = slot as u64;
            assert_eq!(codec.encode(pair), slot, "encode {pair}");
            assert_eq!(codec.decode(slot), pair, "decode {slot}");
        }
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    #[case(8)]
    #[case(64)]
    #[case(257)]
    fn full_is_a_dense_monotonic_bijection(#[case] vertices: usize) {
        let codec = FullCodec::new(vertices);
        let pairs = admitted_pairs_in_order(&codec, vertices);
        assert_eq!(pairs.len() as u64, codec.slot_count());
        for (slot, pair) in pairs.into_iter().enumerate() {
            let slot = slot as u64;
            assert_eq!(codec.encode(pair), slot, "encode {pair}");
            assert_eq!(codec.decode(slot), pair, "decode {slot}");
        }
    }

    #[test]
    fn triangular_decode_is_exact_at_block_boundaries() {
        // Slots of the form t(t-1)/2 are where the float inverse mis-rounds.
        let vertices = 1 << 21;
        let codec = TriangularCodec::new(vertices);
        for tail in [1u64, 2, 3, 1 << 10, (1 << 20) + 1, (vertices as u64) - 1] {
            let first = triangle(tail);
            let last = triangle(tail + 1) - 1;
            assert_eq!(codec.decode(first), Adjacency::new(tail as usize, 0));
            assert_eq!(
                codec.decode(last),
                Adjacency::new(tail as usize, (tail - 1) as usize)
            );
            let round_trip = codec.encode(Adjacency::new(tail as usize, 0));
            assert_eq!(round_trip, first);
        }
    }

    #[test]
    fn triangular_rejects_non_canonical_pairs() {
        let codec = TriangularCodec::new(6);
        assert!(codec.admits(Adjacency::new(4, 2)));
        assert!(!codec.admits(Adjacency::new(2, 4)));
        assert!(!codec.admits(Adjacency::new(3, 3)));
    }

    #[test]
    fn full_rejects_only_the_diagonal() {
        let codec = FullCodec::new(6);
        assert!(codec.admits(Adjacency::new(4, 2)));
        assert!(codec.admits(Adjacency::new(2, 4)));
        assert!(!codec.admits(Adjacency::new(3, 3)));
    }
}

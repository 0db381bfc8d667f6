//! Graphforge core library.
//!
//! Synthesizes test and benchmark graphs with controlled vertex and edge
//! counts. The engine adds guaranteed-unique, uniformly random edges to a
//! graph without ever enumerating the space of possible edges: an
//! order-statistics splay tree keeps the present adjacencies queryable in
//! ordered, rank-addressable form, a pair of monotonic codecs map
//! adjacencies to dense integer slots, and an exclusion-aware sampler
//! draws fresh slots in time independent of the slot-space size. Spanning
//! augmentation over a union-find structure makes graphs connected with
//! the minimum number of extra edges.
//!
//! [`UndirectedGraph`] and [`DirectedGraph`] are the main entry points;
//! the underlying pieces ([`AdjacencyIndex`], [`AdjacencyManager`],
//! [`sampler`], the codecs, and [`DisjointSet`]) are exported for callers
//! composing their own construction flows.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adjacency;
mod codec;
mod dsu;
mod error;
mod graph;
mod index;
mod manager;
pub mod rng;
pub mod sampler;

pub use crate::{
    adjacency::{Adjacency, Vertex},
    codec::{FullCodec, RankCodec, TriangularCodec},
    dsu::DisjointSet,
    error::{GraphError, GraphErrorCode, IndexError, IndexErrorCode, Result},
    graph::{DirectedGraph, UndirectedGraph},
    index::{AdjacencyIndex, Iter, Position},
    manager::AdjacencyManager,
};

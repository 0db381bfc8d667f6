//! Support library for the graphforge CLI binary.
//!
//! Re-exports the command pipeline, serialization, and strategy modules so
//! doctests and integration tests can exercise them without forking a
//! subprocess.

pub mod cli;
pub mod logging;
pub mod strategy;
pub mod writer;

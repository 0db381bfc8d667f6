//! Command-line interface orchestration for the graphforge generator.
//!
//! Parses a topology subcommand plus shared generation flags, builds the
//! requested graph through `graphforge-core`, and resolves labels and
//! weights for serialization.

mod commands;

pub use commands::{Cli, CliError, ExecutionSummary, Topology, render_summary, run_cli};

#[cfg(test)]
mod tests;

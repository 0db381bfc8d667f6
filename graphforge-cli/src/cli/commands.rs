//! Command implementations and argument parsing for the graphforge CLI.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use graphforge_core::{
    Adjacency, DirectedGraph, GraphError, UndirectedGraph,
    rng::{self, GraphRng},
};
use rand::RngCore;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::strategy::{
    IotaLabeler, Labeler, ShuffledRangeLabeler, StaticLabeler, UniformWeighter, Weighter,
};
use crate::writer::write_edge_list;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "graphforge", about = "Generate test and benchmark graphs.")]
pub struct Cli {
    /// Number of vertices in the generated graph.
    #[arg(long, short = 'n')]
    pub vertices: usize,

    /// Seed for deterministic generation; omitted means OS entropy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generate a directed graph.
    #[arg(long)]
    pub directed: bool,

    /// Add the minimum number of extra edges to make the result connected.
    #[arg(long)]
    pub connect: bool,

    /// Shuffle the edge order before writing.
    #[arg(long)]
    pub shuffle: bool,

    /// Smallest vertex label in the output.
    #[arg(long, default_value_t = 0)]
    pub base: i64,

    /// Assign labels as a random permutation of the label range instead of
    /// sequentially.
    #[arg(long)]
    pub shuffled_labels: bool,

    /// Attach uniform random weights drawn from `[MIN, MAX)`.
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    pub weights: Option<Vec<f64>>,

    /// Topology to generate.
    #[command(subcommand)]
    pub topology: Topology,
}

/// Supported topologies.
#[derive(Debug, Subcommand, Clone)]
pub enum Topology {
    /// A fixed number of uniformly random distinct edges.
    Random {
        /// Number of edges to add.
        #[arg(long, short = 'e')]
        edges: usize,
    },
    /// The path `0 - 1 - … - (n-1)`.
    Path,
    /// The cycle over all vertices.
    Cycle,
    /// The star with hub `0`.
    Star,
    /// The wheel with hub `0` and rim `1..n`.
    Wheel,
    /// A uniformly random spanning tree.
    Tree,
    /// A uniformly random forest with a fixed edge count.
    Forest {
        /// Number of edges in the forest; at most `n - 1`.
        #[arg(long, short = 'e')]
        edges: usize,
    },
    /// The complete graph.
    Clique,
    /// A random DAG whose edges point from higher to lower vertices.
    Dag {
        /// Number of edges to add.
        #[arg(long, short = 'e')]
        edges: usize,
    },
}

impl Topology {
    fn name(&self) -> &'static str {
        match self {
            Self::Random { .. } => "random",
            Self::Path => "path",
            Self::Cycle => "cycle",
            Self::Star => "star",
            Self::Wheel => "wheel",
            Self::Tree => "tree",
            Self::Forest { .. } => "forest",
            Self::Clique => "clique",
            Self::Dag { .. } => "dag",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Graph construction failed.
    #[error(transparent)]
    Core(#[from] GraphError),
    /// The requested topology only exists for directed graphs.
    #[error("topology `{topology}` requires `--directed`")]
    RequiresDirected {
        /// Name of the offending topology.
        topology: &'static str,
    },
    /// The supplied weight range is empty or not finite.
    #[error("weight range [{min}, {max}) is empty or not finite")]
    InvalidWeightRange {
        /// Lower bound supplied by the user.
        min: f64,
        /// Upper bound supplied by the user.
        max: f64,
    },
}

/// The generated graph, resolved to output labels and weights.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Number of vertices in the graph.
    pub vertices: usize,
    /// Edge list in output order.
    pub edges: Vec<Adjacency>,
    /// Output label of each vertex, indexed by vertex.
    pub labels: Vec<i64>,
    /// Weight column, parallel to `edges`; `None` omits the column.
    pub weights: Option<Vec<f64>>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the arguments are inconsistent or graph
/// construction fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use graphforge_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["graphforge", "-n", "6", "--seed", "7", "tree"]);
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.vertices, 6);
/// assert_eq!(summary.edges.len(), 5);
/// # Ok::<(), graphforge_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(topology = field::Empty, vertices = field::Empty, directed = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("topology", field::display(cli.topology.name()));
    span.record("vertices", field::display(cli.vertices));
    span.record("directed", field::display(cli.directed));

    let weight_range = validated_weight_range(cli.weights.as_deref())?;
    let mut rng = cli.seed.map_or_else(rng::from_entropy, rng::seeded);

    let mut edges = generate_edges(&cli, &mut rng)?;
    if cli.shuffle {
        edges.shuffle(&mut rng);
    }

    let labels = resolve_labels(&cli, &mut rng);
    let weights = weight_range.map(|(min, max)| {
        let mut weighter = UniformWeighter::new(min, max, rng::seeded(rng.next_u64()));
        edges.iter().map(|edge| weighter.weight(*edge)).collect()
    });

    info!(edges = edges.len(), "graph generated");
    Ok(ExecutionSummary {
        vertices: cli.vertices,
        edges,
        labels,
        weights,
    })
}

/// Renders `summary` in edge-list form: an `"n m"` header, then one line
/// per edge.
///
/// # Errors
/// Returns any error raised by the underlying writer.
pub fn render_summary<W: Write>(summary: &ExecutionSummary, writer: &mut W) -> io::Result<()> {
    let labeler = StaticLabeler::new(summary.labels.clone());
    write_edge_list(
        writer,
        summary.vertices,
        &summary.edges,
        &labeler,
        summary.weights.as_deref(),
    )
}

fn validated_weight_range(range: Option<&[f64]>) -> Result<Option<(f64, f64)>, CliError> {
    let Some(&[min, max]) = range else {
        return Ok(None);
    };
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(CliError::InvalidWeightRange { min, max });
    }
    Ok(Some((min, max)))
}

fn resolve_labels(cli: &Cli, rng: &mut GraphRng) -> Vec<i64> {
    if cli.shuffled_labels {
        let end = cli.base + cli.vertices as i64;
        let labeler = ShuffledRangeLabeler::new(cli.base, end, rng);
        (0..cli.vertices).map(|v| labeler.label(v)).collect()
    } else {
        let labeler = IotaLabeler::new(cli.base);
        (0..cli.vertices).map(|v| labeler.label(v)).collect()
    }
}

fn generate_edges(cli: &Cli, rng: &mut GraphRng) -> Result<Vec<Adjacency>, CliError> {
    if cli.directed {
        let mut graph = DirectedGraph::new(cli.vertices);
        match cli.topology {
            Topology::Random { edges } => graph.add_edges(rng, edges)?,
            Topology::Path => graph.build_path()?,
            Topology::Cycle => graph.build_cycle()?,
            Topology::Star => graph.build_star()?,
            Topology::Wheel => graph.build_wheel()?,
            Topology::Tree => graph.build_tree(rng)?,
            Topology::Forest { edges } => graph.build_forest(rng, edges)?,
            Topology::Clique => graph.build_clique()?,
            Topology::Dag { edges } => graph.build_dag(rng, edges)?,
        }
        if cli.connect {
            graph.connect(rng)?;
        }
        Ok(graph.edges().collect())
    } else {
        let mut graph = UndirectedGraph::new(cli.vertices);
        match cli.topology {
            Topology::Random { edges } => graph.add_edges(rng, edges)?,
            Topology::Path => graph.build_path()?,
            Topology::Cycle => graph.build_cycle()?,
            Topology::Star => graph.build_star()?,
            Topology::Wheel => graph.build_wheel()?,
            Topology::Tree => graph.build_tree(rng)?,
            Topology::Forest { edges } => graph.build_forest(rng, edges)?,
            Topology::Clique => graph.build_clique()?,
            Topology::Dag { .. } => {
                return Err(CliError::RequiresDirected { topology: "dag" });
            }
        }
        if cli.connect {
            graph.connect(rng)?;
        }
        Ok(graph.edges().collect())
    }
}

use clap::Parser;
use graphforge_core::{GraphError, GraphErrorCode};
use rstest::rstest;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("arguments must parse")
}

#[test]
fn parses_topology_and_shared_flags() {
    let cli = parse(&[
        "graphforge",
        "-n",
        "10",
        "--seed",
        "3",
        "--directed",
        "--shuffle",
        "--base",
        "100",
        "random",
        "-e",
        "12",
    ]);
    assert_eq!(cli.vertices, 10);
    assert_eq!(cli.seed, Some(3));
    assert!(cli.directed);
    assert!(cli.shuffle);
    assert_eq!(cli.base, 100);
    match cli.topology {
        Topology::Random { edges } => assert_eq!(edges, 12),
        other => panic!("unexpected topology: {other:?}"),
    }
}

#[test]
fn vertices_flag_is_required() {
    assert!(Cli::try_parse_from(["graphforge", "path"]).is_err());
}

#[test]
fn weights_flag_takes_two_values() {
    let cli = parse(&["graphforge", "-n", "4", "--weights", "0.5", "2", "path"]);
    assert_eq!(cli.weights, Some(vec![0.5, 2.0]));
    assert!(Cli::try_parse_from(["graphforge", "-n", "4", "--weights", "0.5", "path"]).is_err());
}

#[rstest]
#[case("path", 4)]
#[case("cycle", 5)]
#[case("star", 4)]
#[case("clique", 10)]
fn deterministic_topologies_have_fixed_edge_counts(#[case] topology: &str, #[case] edges: usize) {
    let cli = parse(&["graphforge", "-n", "5", topology]);
    let summary = run_cli(cli).expect("generation succeeds");
    assert_eq!(summary.vertices, 5);
    assert_eq!(summary.edges.len(), edges);
    assert_eq!(summary.labels, vec![0, 1, 2, 3, 4]);
    assert!(summary.weights.is_none());
}

#[test]
fn seeded_runs_are_reproducible() {
    let args = [
        "graphforge",
        "-n",
        "9",
        "--seed",
        "42",
        "--shuffle",
        "random",
        "-e",
        "14",
    ];
    let first = run_cli(parse(&args)).expect("generation succeeds");
    let second = run_cli(parse(&args)).expect("generation succeeds");
    assert_eq!(first.edges, second.edges);
}

#[test]
fn shuffle_preserves_the_edge_set() {
    let plain = run_cli(parse(&[
        "graphforge", "-n", "8", "--seed", "5", "random", "-e", "10",
    ]))
    .expect("generation succeeds");
    let shuffled = run_cli(parse(&[
        "graphforge",
        "-n",
        "8",
        "--seed",
        "5",
        "--shuffle",
        "random",
        "-e",
        "10",
    ]))
    .expect("generation succeeds");

    let mut left = plain.edges.clone();
    let mut right = shuffled.edges.clone();
    left.sort_unstable();
    right.sort_unstable();
    assert_eq!(left, right);
}

#[test]
fn connect_makes_the_forest_a_tree() {
    let summary = run_cli(parse(&[
        "graphforge",
        "-n",
        "10",
        "--seed",
        "8",
        "--connect",
        "forest",
        "-e",
        "4",
    ]))
    .expect("generation succeeds");
    // A spanning tree needs n - 1 edges.
    assert_eq!(summary.edges.len(), 9);
}

#[test]
fn weights_column_is_populated_and_in_range() {
    let summary = run_cli(parse(&[
        "graphforge",
        "-n",
        "6",
        "--seed",
        "1",
        "--weights",
        "1.5",
        "2.5",
        "tree",
    ]))
    .expect("generation succeeds");
    let weights = summary.weights.expect("weights requested");
    assert_eq!(weights.len(), summary.edges.len());
    assert!(weights.iter().all(|w| (1.5..2.5).contains(w)));
}

#[rstest]
#[case(2.0, 2.0)]
#[case(3.0, 1.0)]
#[case(f64::NAN, 1.0)]
fn degenerate_weight_ranges_are_rejected(#[case] min: f64, #[case] max: f64) {
    let mut cli = parse(&["graphforge", "-n", "4", "path"]);
    cli.weights = Some(vec![min, max]);
    match run_cli(cli) {
        Err(CliError::InvalidWeightRange { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn shuffled_labels_permute_the_range() {
    let summary = run_cli(parse(&[
        "graphforge",
        "-n",
        "7",
        "--seed",
        "2",
        "--base",
        "50",
        "--shuffled-labels",
        "path",
    ]))
    .expect("generation succeeds");
    let mut labels = summary.labels.clone();
    labels.sort_unstable();
    assert_eq!(labels, (50..57).collect::<Vec<_>>());
}

#[test]
fn dag_requires_a_directed_graph() {
    let undirected = parse(&["graphforge", "-n", "5", "dag", "-e", "3"]);
    match run_cli(undirected) {
        Err(CliError::RequiresDirected { topology }) => assert_eq!(topology, "dag"),
        other => panic!("unexpected result: {other:?}"),
    }

    let directed = parse(&[
        "graphforge",
        "-n",
        "5",
        "--seed",
        "4",
        "--directed",
        "dag",
        "-e",
        "3",
    ]);
    let summary = run_cli(directed).expect("generation succeeds");
    assert!(summary.edges.iter().all(|e| e.tail > e.head));
}

#[test]
fn directed_connect_surfaces_the_core_error() {
    let cli = parse(&[
        "graphforge",
        "-n",
        "5",
        "--directed",
        "--connect",
        "random",
        "-e",
        "2",
    ]);
    match run_cli(cli) {
        Err(CliError::Core(err)) => {
            assert_eq!(err.code(), GraphErrorCode::NotImplemented);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn oversized_requests_propagate_capacity_errors() {
    let cli = parse(&["graphforge", "-n", "3", "random", "-e", "10"]);
    match run_cli(cli) {
        Err(CliError::Core(GraphError::CapacityExceeded {
            requested,
            available,
        })) => {
            assert_eq!(requested, 10);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn rendered_output_has_header_and_weight_column() {
    let summary = run_cli(parse(&[
        "graphforge",
        "-n",
        "4",
        "--seed",
        "6",
        "--weights",
        "0.0",
        "1.0",
        "path",
    ]))
    .expect("generation succeeds");

    let mut out = Vec::new();
    render_summary(&summary, &mut out).expect("vec write succeeds");
    let text = String::from_utf8(out).expect("output is UTF-8");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("4 3"));
    for line in lines {
        assert_eq!(line.split_whitespace().count(), 3);
    }
}

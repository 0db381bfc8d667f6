use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::rng;

fn component_count(vertices: usize, edges: &[Adjacency]) -> usize {
    let mut components = DisjointSet::new(vertices);
    let mut merges = 0;
    for edge in edges {
        if components.merge(edge.tail, edge.head) {
            merges += 1;
        }
    }
    vertices - merges
}

#[test]
fn undirected_edges_are_mirrored_once() {
    let mut graph = UndirectedGraph::new(4);
    graph.add_edge(2, 0).expect("valid edge");
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.has_edge(2, 0));
    assert!(graph.has_edge(0, 2));
    // Re-adding either orientation changes nothing.
    graph.add_edge(0, 2).expect("valid edge");
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![Adjacency::new(2, 0)]);
}

#[test]
fn directed_edges_are_oriented() {
    let mut graph = DirectedGraph::new(4);
    graph.add_edge(2, 0).expect("valid edge");
    assert!(graph.has_edge(2, 0));
    assert!(!graph.has_edge(0, 2));
    graph.add_edge(0, 2).expect("valid edge");
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn invalid_edges_are_rejected() {
    let mut graph = UndirectedGraph::new(3);
    assert_eq!(
        graph.add_edge(1, 1),
        Err(GraphError::SelfLoop { vertex: 1 })
    );
    assert_eq!(
        graph.add_edge(0, 3),
        Err(GraphError::VertexOutOfRange {
            vertex: 3,
            vertices: 3,
        })
    );
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn filling_the_graph_then_overfilling_it() {
    let mut rng = rng::seeded(5);
    let mut graph = UndirectedGraph::new(5);
    graph.add_edges(&mut rng, 10).expect("C(5, 2) edges fit");
    assert_eq!(graph.edge_count(), 10);
    for tail in 1..5 {
        for head in 0..tail {
            assert!(graph.has_edge(tail, head), "missing ({tail}, {head})");
        }
    }

    assert_eq!(
        graph.add_edges(&mut rng, 1),
        Err(GraphError::CapacityExceeded {
            requested: 1,
            available: 0,
        })
    );
    assert_eq!(graph.edge_count(), 10);
}

#[test]
fn sampled_edges_avoid_the_existing_ones() {
    let mut rng = rng::seeded(17);
    let mut graph = UndirectedGraph::new(4);
    graph.add_edge(1, 0).expect("valid edge");
    graph.add_edge(3, 2).expect("valid edge");
    graph.add_edges(&mut rng, 1).expect("four free slots remain");

    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(edges.len(), 3);
    assert!(edges.contains(&Adjacency::new(1, 0)));
    assert!(edges.contains(&Adjacency::new(3, 2)));
    for edge in edges {
        assert!(edge.tail > edge.head);
        assert!(edge.tail < 4);
    }
}

#[test]
fn failed_bulk_request_commits_nothing() {
    let mut rng = rng::seeded(2);
    let mut graph = UndirectedGraph::new(4);
    graph.add_edge(1, 0).expect("valid edge");
    assert!(graph.add_edges(&mut rng, 6).is_err());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn connect_adds_one_edge_per_extra_component() {
    let mut rng = rng::seeded(23);
    let mut graph = UndirectedGraph::new(9);
    // Three components: {0, 1, 2}, {3, 4}, and five singletons.
    graph.add_edge(0, 1).expect("valid edge");
    graph.add_edge(1, 2).expect("valid edge");
    graph.add_edge(3, 4).expect("valid edge");
    let before: Vec<_> = graph.edges().collect();
    assert_eq!(component_count(9, &before), 7);

    let added = graph.connect(&mut rng).expect("augmentation succeeds");
    assert_eq!(added, 6);
    let after: Vec<_> = graph.edges().collect();
    assert_eq!(after.len(), before.len() + added);
    assert_eq!(component_count(9, &after), 1);
}

#[test]
fn connect_on_a_connected_graph_is_a_no_op() {
    let mut rng = rng::seeded(4);
    let mut graph = UndirectedGraph::new(5);
    graph.build_path().expect("path fits");
    assert_eq!(graph.connect(&mut rng), Ok(0));
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn directed_connect_is_not_implemented() {
    let mut rng = rng::seeded(4);
    let mut graph = DirectedGraph::new(5);
    assert_eq!(
        graph.connect(&mut rng),
        Err(GraphError::NotImplemented {
            operation: "directed strong-connectivity augmentation",
        })
    );
}

#[test]
fn spanning_forest_is_a_connected_tree() {
    let mut rng = rng::seeded(31);
    let mut graph = UndirectedGraph::new(6);
    graph.build_forest(&mut rng, 5).expect("five edges fit");

    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(edges.len(), 5);
    // Every merge succeeding means five edges and no cycle.
    let mut components = DisjointSet::new(6);
    for edge in &edges {
        assert!(components.merge(edge.tail, edge.head), "cycle at {edge}");
    }
    assert_eq!(component_count(6, &edges), 1);
}

#[rstest]
#[case(0)]
#[case(2)]
#[case(5)]
fn partial_forest_has_the_requested_edge_count(#[case] edges: usize) {
    let mut rng = rng::seeded(edges as u64);
    let mut graph = UndirectedGraph::new(6);
    graph.build_forest(&mut rng, edges).expect("request fits");
    let collected: Vec<_> = graph.edges().collect();
    assert_eq!(collected.len(), edges);
    assert_eq!(component_count(6, &collected), 6 - edges);
}

#[test]
fn oversized_forest_is_rejected() {
    let mut rng = rng::seeded(1);
    let mut graph = UndirectedGraph::new(6);
    assert_eq!(
        graph.build_forest(&mut rng, 6),
        Err(GraphError::TooManyEdges {
            requested: 6,
            vertices: 6,
        })
    );
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn random_tree_spans_the_graph() {
    let mut rng = rng::seeded(77);
    let mut graph = UndirectedGraph::new(12);
    graph.build_tree(&mut rng).expect("tree fits");
    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(edges.len(), 11);
    assert_eq!(component_count(12, &edges), 1);
}

#[test]
fn path_star_and_clique_shapes() {
    let mut path = UndirectedGraph::new(5);
    path.build_path().expect("path fits");
    assert_eq!(path.edge_count(), 4);
    assert!(path.has_edge(2, 3));
    assert!(!path.has_edge(0, 4));

    let mut star = UndirectedGraph::new(5);
    star.build_star().expect("star fits");
    assert_eq!(star.edge_count(), 4);
    assert_eq!(star.degree(0), Ok(4));
    assert_eq!(star.degree(3), Ok(1));

    let mut clique = UndirectedGraph::new(5);
    clique.build_clique().expect("clique fits");
    assert_eq!(clique.edge_count(), 10);
}

#[test]
fn cycle_closes_and_needs_three_vertices() {
    let mut graph = UndirectedGraph::new(4);
    graph.build_cycle().expect("cycle fits");
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.has_edge(3, 0));

    let mut small = UndirectedGraph::new(2);
    assert_eq!(
        small.build_cycle(),
        Err(GraphError::TooFewVertices {
            required: 3,
            vertices: 2,
        })
    );
}

#[test]
fn wheel_has_a_hub_a_rim_and_a_closing_edge() {
    let mut graph = UndirectedGraph::new(6);
    graph.build_wheel().expect("wheel fits");
    // n - 1 spokes plus an n - 1 edge rim cycle.
    assert_eq!(graph.edge_count(), 10);
    assert_eq!(graph.degree(0), Ok(5));
    assert!(graph.has_edge(5, 1));
    for rim in 1..6 {
        assert_eq!(graph.degree(rim), Ok(3));
    }

    let mut small = UndirectedGraph::new(3);
    assert_eq!(
        small.build_wheel(),
        Err(GraphError::TooFewVertices {
            required: 4,
            vertices: 3,
        })
    );
}

#[test]
fn directed_builders_orient_edges_forward() {
    let mut graph = DirectedGraph::new(4);
    graph.build_cycle().expect("cycle fits");
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.has_edge(0, 1));
    assert!(graph.has_edge(3, 0));
    assert!(!graph.has_edge(1, 0));
    assert_eq!(graph.out_degree(3), Ok(1));
}

#[test]
fn dag_edges_respect_the_topological_order() {
    let mut rng = rng::seeded(13);
    let mut graph = DirectedGraph::new(8);
    graph.build_dag(&mut rng, 12).expect("twelve edges fit");
    assert_eq!(graph.edge_count(), 12);
    for edge in graph.edges() {
        assert!(edge.tail > edge.head, "forward edge {edge}");
    }
}

#[test]
fn directed_add_edges_fills_the_full_enumeration() {
    let mut rng = rng::seeded(19);
    let mut graph = DirectedGraph::new(4);
    graph.add_edges(&mut rng, 12).expect("n(n-1) edges fit");
    assert_eq!(graph.edge_count(), 12);
    assert_eq!(
        graph.add_edges(&mut rng, 1),
        Err(GraphError::CapacityExceeded {
            requested: 1,
            available: 0,
        })
    );
}

proptest! {
    #[test]
    fn add_edges_always_yields_distinct_valid_edges(
        seed in any::<u64>(),
        vertices in 2usize..24,
        existing in proptest::collection::vec((0usize..24, 0usize..24), 0..20),
    ) {
        let mut rng = rng::seeded(seed);
        let mut graph = UndirectedGraph::new(vertices);
        for (tail, head) in existing {
            if tail != head && tail < vertices && head < vertices {
                graph.add_edge(tail, head).expect("validated edge");
            }
        }
        let present = graph.edge_count();
        let capacity = vertices * (vertices - 1) / 2;
        let requested = capacity.saturating_sub(present) / 2;

        graph.add_edges(&mut rng, requested).expect("request fits");
        let edges: Vec<_> = graph.edges().collect();
        prop_assert_eq!(edges.len(), present + requested);
        prop_assert!(edges.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(edges.iter().all(|e| e.tail > e.head && e.tail < vertices));
    }

    #[test]
    fn connect_always_reaches_one_component(
        seed in any::<u64>(),
        vertices in 1usize..32,
        edges in 0usize..24,
    ) {
        let mut rng = rng::seeded(seed);
        let mut graph = UndirectedGraph::new(vertices);
        let capacity = vertices * (vertices - 1) / 2;
        graph
            .add_edges(&mut rng, edges.min(capacity))
            .expect("request fits");

        let components = component_count(vertices, &graph.edges().collect::<Vec<_>>());
        let added = graph.connect(&mut rng).expect("augmentation succeeds");
        prop_assert_eq!(added, components - 1);
        let after: Vec<_> = graph.edges().collect();
        prop_assert_eq!(component_count(vertices, &after), 1);
    }
}

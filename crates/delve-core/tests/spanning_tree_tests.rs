use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use delve_core::dungeon::{ConnectivityGraph, Edge, SpanningTreeReducer};
use delve_core::{GenRng, Point};
use proptest::prelude::*;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Connected graph: a chain through every point plus extra random edges
fn connected_graph(points: &[Point], extra: &[(usize, usize)]) -> ConnectivityGraph {
    let mut graph = ConnectivityGraph::new();
    graph.add_vertex(points[0]);
    for pair in points.windows(2) {
        graph.add_edge(pair[0], pair[1]);
    }
    for &(a, b) in extra {
        graph.add_edge(points[a % points.len()], points[b % points.len()]);
    }
    graph
}

/// Exactly V - 1 edges that reach every vertex form a spanning tree
fn spans(vertices: &[Point], edges: &[Edge]) -> bool {
    let mut graph = ConnectivityGraph::new();
    for &v in vertices {
        graph.add_vertex(v);
    }
    for edge in edges {
        graph.add_edge(edge.first(), edge.second());
    }
    edges.len() + 1 == vertices.len() && graph.vertex_count() == vertices.len() && graph.is_connected()
}

/// Lightest spanning tree weight found by trying every (V - 1)-edge subset
fn brute_force_mst_weight(graph: &ConnectivityGraph) -> f64 {
    fn search(
        vertices: &[Point],
        edges: &[Edge],
        start: usize,
        picked: &mut Vec<Edge>,
        best: &mut f64,
    ) {
        if picked.len() == vertices.len() - 1 {
            if spans(vertices, picked) {
                let weight: f64 = picked.iter().map(Edge::weight).sum();
                *best = best.min(weight);
            }
            return;
        }
        for i in start..edges.len() {
            picked.push(edges[i]);
            search(vertices, edges, i + 1, picked, best);
            picked.pop();
        }
    }

    let vertices: Vec<Point> = graph.vertices().collect();
    let edges: Vec<Edge> = graph.edges().into_iter().collect();
    let mut best = f64::INFINITY;
    search(&vertices, &edges, 0, &mut Vec::new(), &mut best);
    best
}

fn point_set(max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::btree_set((0i32..40, 0i32..40), 2..=max)
        .prop_map(|set| set.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

#[test]
fn test_edge_weight_is_euclidean() {
    let edge = Edge::new(Point::new(3, 4), Point::new(0, 0));
    assert!((edge.weight() - 5.0).abs() < 1e-12);
    assert_eq!(edge.first(), Point::new(0, 0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_edge_canonical_for_any_pair(
        ax in -500i32..500, ay in -500i32..500,
        bx in -500i32..500, by in -500i32..500,
    ) {
        let (a, b) = (Point::new(ax, ay), Point::new(bx, by));
        prop_assume!(a != b);
        let forward = Edge::new(a, b);
        let backward = Edge::new(b, a);
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(hash_of(&forward), hash_of(&backward));
        prop_assert!(forward.first() < forward.second());
    }

    #[test]
    fn test_tree_has_v_minus_one_edges_and_spans(
        points in point_set(12),
        extra in prop::collection::vec((0usize..12, 0usize..12), 0..20),
        seed in any::<u64>(),
    ) {
        let graph = connected_graph(&points, &extra);
        let tree = SpanningTreeReducer::minimum_spanning_tree(&graph, &mut GenRng::new(seed));
        let vertices: Vec<Point> = graph.vertices().collect();
        let edges: Vec<Edge> = tree.edges().iter().copied().collect();

        prop_assert_eq!(tree.len(), vertices.len() - 1);
        prop_assert!(spans(&vertices, &edges));
        prop_assert!(edges.iter().all(|e| graph.contains_edge(e)));
    }

    #[test]
    fn test_tree_weight_is_minimal(
        points in point_set(7),
        extra in prop::collection::vec((0usize..7, 0usize..7), 0..10),
        seed in any::<u64>(),
    ) {
        let graph = connected_graph(&points, &extra);
        let tree = SpanningTreeReducer::minimum_spanning_tree(&graph, &mut GenRng::new(seed));
        let best = brute_force_mst_weight(&graph);
        prop_assert!((tree.total_weight() - best).abs() < 1e-9,
            "prim {} vs brute force {}", tree.total_weight(), best);
    }

    #[test]
    fn test_reintroduction_count(
        points in point_set(10),
        extra in prop::collection::vec((0usize..10, 0usize..10), 0..25),
        fraction in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let graph = connected_graph(&points, &extra);
        let tree = SpanningTreeReducer::new(fraction).reduce(&graph, &mut GenRng::new(seed));
        let tree_edges = graph.vertex_count() - 1;
        let discarded = graph.edge_count() - tree_edges;

        prop_assert_eq!(tree.reintroduced(), (fraction * discarded as f64).round() as usize);
        prop_assert_eq!(tree.len(), tree_edges + tree.reintroduced());
        prop_assert!(tree.edges().iter().all(|e| graph.contains_edge(e)));
    }

    #[test]
    fn test_fraction_extremes(
        points in point_set(9),
        extra in prop::collection::vec((0usize..9, 0usize..9), 0..20),
        seed in any::<u64>(),
    ) {
        let graph = connected_graph(&points, &extra);
        let none = SpanningTreeReducer::new(0.0).reduce(&graph, &mut GenRng::new(seed));
        let mst = SpanningTreeReducer::minimum_spanning_tree(&graph, &mut GenRng::new(seed));
        prop_assert_eq!(none.edges(), mst.edges());

        let all = SpanningTreeReducer::new(1.0).reduce(&graph, &mut GenRng::new(seed));
        prop_assert_eq!(all.edges(), &graph.edges());
    }
}

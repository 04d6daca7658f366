//! Minimum spanning tree and loop reintroduction
//!
//! Prim's algorithm over the connectivity graph with a binary heap frontier.
//! Equal weights are broken by discovery order so the tree is stable for a
//! given start vertex. Afterwards a random share of the discarded edges is
//! put back to give the dungeon loops.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use hashbrown::HashSet;
use log::debug;
use serde::Serialize;

use crate::geometry::Point;
use crate::rng::GenRng;

use super::graph::{ConnectivityGraph, Edge};

/// Edges kept for corridor routing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpanningTree {
    edges: BTreeSet<Edge>,
    /// Edges that formed the tree before any reintroduction
    tree_edges: usize,
}

impl SpanningTree {
    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Number of edges added back on top of the spanning tree
    pub fn reintroduced(&self) -> usize {
        self.edges.len() - self.tree_edges
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(Edge::weight).sum()
    }
}

/// Frontier entry: lighter first, then earlier discovered
#[derive(Debug, Clone, Copy)]
struct Candidate {
    weight: f64,
    seq: u64,
    edge: Edge,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Reversed so the max-heap pops the minimum.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Reduces the connectivity graph to the edges worth a corridor
#[derive(Debug, Clone, Copy)]
pub struct SpanningTreeReducer {
    fraction: f64,
}

impl SpanningTreeReducer {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }

    /// Spanning tree followed by edge reintroduction
    pub fn reduce(&self, graph: &ConnectivityGraph, rng: &mut GenRng) -> SpanningTree {
        let mut tree = Self::minimum_spanning_tree(graph, rng);
        let added = self.reintroduce(graph, &mut tree, rng);
        debug!(
            "spanning tree: {} edges, {} reintroduced, weight {:.2}",
            tree.tree_edges,
            added,
            tree.total_weight()
        );
        tree
    }

    /// Prim's algorithm from a randomly chosen start vertex
    ///
    /// Covers the component of the start vertex; for a connected graph with
    /// V vertices the result has exactly V - 1 edges.
    pub fn minimum_spanning_tree(graph: &ConnectivityGraph, rng: &mut GenRng) -> SpanningTree {
        let vertices: Vec<_> = graph.vertices().collect();
        if vertices.is_empty() {
            return SpanningTree::default();
        }

        let start = vertices[rng.rn2(vertices.len() as u32) as usize];
        Self::spanning_tree_from(graph, start)
    }

    /// Prim's algorithm grown from `start`
    ///
    /// Equal-weight frontier edges are taken in the order they were
    /// discovered; neighbours are discovered in `Point` order.
    pub fn spanning_tree_from(graph: &ConnectivityGraph, start: Point) -> SpanningTree {
        if !graph.contains_vertex(start) {
            return SpanningTree::default();
        }

        let mut in_tree = HashSet::new();
        in_tree.insert(start);
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;
        let mut edges = BTreeSet::new();

        let mut push_incident = |v: Point, in_tree: &HashSet<Point>, frontier: &mut BinaryHeap<Candidate>| {
            for n in graph.neighbors(v) {
                if !in_tree.contains(&n) {
                    let edge = Edge::new(v, n);
                    frontier.push(Candidate {
                        weight: edge.weight(),
                        seq,
                        edge,
                    });
                    seq += 1;
                }
            }
        };

        push_incident(start, &in_tree, &mut frontier);
        while let Some(Candidate { edge, .. }) = frontier.pop() {
            let far = match (in_tree.contains(&edge.first()), in_tree.contains(&edge.second())) {
                (true, false) => edge.second(),
                (false, true) => edge.first(),
                // Both ends already joined
                _ => continue,
            };
            edges.insert(edge);
            in_tree.insert(far);
            push_incident(far, &in_tree, &mut frontier);
        }

        SpanningTree {
            tree_edges: edges.len(),
            edges,
        }
    }

    /// Shuffle the graph edges missing from `tree` and add back
    /// `round(fraction * count)` of them; returns how many were added
    pub fn reintroduce(&self, graph: &ConnectivityGraph, tree: &mut SpanningTree, rng: &mut GenRng) -> usize {
        let mut discarded: Vec<Edge> = graph
            .edges()
            .into_iter()
            .filter(|e| !tree.contains(e))
            .collect();
        rng.shuffle(&mut discarded);

        let count = (self.fraction * discarded.len() as f64).round() as usize;
        let count = count.min(discarded.len());
        tree.edges.extend(discarded.into_iter().take(count));
        count
    }
}

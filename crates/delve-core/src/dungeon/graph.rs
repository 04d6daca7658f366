//! Connectivity graph over main room centres
//!
//! Vertices are integer room centres. Adjacency comes from the Delaunay
//! triangulation of those centres; a complete graph is used instead when the
//! triangulation is unusable (fewer than three centres, all collinear, or
//! not spanning every centre).

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use hashbrown::HashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::GenerationWarning;
use crate::geometry::Point;

use super::room::{Room, RoomKind};
use super::triangulation::{Triangle, Triangulator};

/// Undirected weighted edge between two room centres
///
/// Endpoints are stored in lexicographic order so `Edge::new(a, b)` and
/// `Edge::new(b, a)` are the same value with the same hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    first: Point,
    second: Point,
}

impl Edge {
    pub fn new(a: Point, b: Point) -> Self {
        if b < a {
            Self { first: b, second: a }
        } else {
            Self { first: a, second: b }
        }
    }

    /// Lexicographically smaller endpoint
    pub fn first(&self) -> Point {
        self.first
    }

    pub fn second(&self) -> Point {
        self.second
    }

    /// Euclidean length
    pub fn weight(&self) -> f64 {
        self.first.distance(&self.second)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.first == p || self.second == p
    }

    /// The endpoint that is not `p`
    pub fn other(&self, p: Point) -> Option<Point> {
        if self.first == p {
            Some(self.second)
        } else if self.second == p {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Symmetric adjacency between room centres
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectivityGraph {
    adjacency: BTreeMap<Point, BTreeSet<Point>>,
}

impl ConnectivityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pair of `points` adjacent
    pub fn complete(points: &[Point]) -> Self {
        let mut graph = Self::new();
        for (i, &a) in points.iter().enumerate() {
            graph.add_vertex(a);
            for &b in &points[i + 1..] {
                graph.add_edge(a, b);
            }
        }
        graph
    }

    pub fn add_vertex(&mut self, p: Point) {
        self.adjacency.entry(p).or_default();
    }

    /// Add `a <-> b`; self-pairs are ignored
    pub fn add_edge(&mut self, a: Point, b: Point) {
        if a == b {
            self.add_vertex(a);
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    pub fn contains_vertex(&self, p: Point) -> bool {
        self.adjacency.contains_key(&p)
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.adjacency
            .get(&edge.first())
            .is_some_and(|n| n.contains(&edge.second()))
    }

    /// Vertices in ascending order
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbours of `p` in ascending order
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.get(&p).into_iter().flatten().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Every edge once, in canonical order
    pub fn edges(&self) -> BTreeSet<Edge> {
        self.adjacency
            .iter()
            .flat_map(|(&a, n)| n.iter().map(move |&b| Edge::new(a, b)))
            .collect()
    }

    /// True when every vertex is reachable from every other (or the graph is empty)
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.vertices().next() else {
            return true;
        };
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            for q in self.neighbors(p) {
                if seen.insert(q) {
                    queue.push_back(q);
                }
            }
        }
        seen.len() == self.vertex_count()
    }
}

/// Resolves graph vertices back to the rooms they are the centre of
#[derive(Debug, Clone, Default)]
pub struct MidpointRoomIndex {
    by_center: HashMap<Point, u32>,
}

impl MidpointRoomIndex {
    pub fn room_at(&self, center: Point) -> Option<u32> {
        self.by_center.get(&center).copied()
    }

    pub fn len(&self) -> usize {
        self.by_center.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_center.is_empty()
    }
}

/// Output of graph construction
#[derive(Debug, Clone)]
pub struct GraphBuild {
    pub graph: ConnectivityGraph,
    pub index: MidpointRoomIndex,
    pub warnings: Vec<GenerationWarning>,
}

/// Builds the adjacency graph of main room centres
#[derive(Debug, Clone)]
pub struct ConnectivityGraphBuilder<T> {
    triangulator: T,
}

impl<T: Triangulator> ConnectivityGraphBuilder<T> {
    pub fn new(triangulator: T) -> Self {
        Self { triangulator }
    }

    /// Index main room centres and connect them
    ///
    /// A main room whose centre is already taken by an earlier main room is
    /// demoted to an inactive minor room.
    pub fn build(&self, rooms: &mut [Room], main_ids: &[u32]) -> GraphBuild {
        let mut warnings = Vec::new();
        let mut index = MidpointRoomIndex::default();
        let mut centers = Vec::with_capacity(main_ids.len());

        for &id in main_ids {
            let Some(room) = rooms.get_mut(id as usize) else {
                continue;
            };
            let center = room.center();
            if index.by_center.contains_key(&center) {
                room.kind = RoomKind::Minor;
                room.active = false;
                let warning = GenerationWarning::CenterCollision { room: id, center };
                warn!("{}", warning);
                warnings.push(warning);
                continue;
            }
            index.by_center.insert(center, id);
            centers.push(center);
        }

        let triangles = self.triangulator.triangulate(&centers);
        let graph = match Self::graph_from_triangles(&centers, &triangles) {
            Ok(graph) => graph,
            Err(reason) => {
                let warning = GenerationWarning::DegenerateTriangulation {
                    centers: centers.len(),
                    reason: reason.to_string(),
                };
                warn!("{}", warning);
                warnings.push(warning);
                ConnectivityGraph::complete(&centers)
            }
        };

        debug!(
            "connectivity graph: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        GraphBuild {
            graph,
            index,
            warnings,
        }
    }

    fn graph_from_triangles(
        centers: &[Point],
        triangles: &[Triangle],
    ) -> Result<ConnectivityGraph, &'static str> {
        if centers.len() < 3 {
            return Err("fewer than three centres");
        }
        if triangles.is_empty() {
            return Err("no triangles (collinear centres or spread too wide)");
        }

        let mut graph = ConnectivityGraph::new();
        for &c in centers {
            graph.add_vertex(c);
        }
        for Triangle(t) in triangles {
            let corners = t.map(|i| centers[i]);
            for &a in &corners {
                for &b in &corners {
                    graph.add_edge(a, b);
                }
            }
        }

        if graph.is_connected() {
            Ok(graph)
        } else {
            Err("triangulation does not reach every centre")
        }
    }
}

//! Dungeon generation pipeline
//!
//! Runs every stage in order on one seeded random stream:
//! sample rooms, separate them, pick main rooms, connect their centres,
//! reduce to a spanning tree, route corridors, reactivate crossed rooms.

use std::fmt;

use log::{info, warn};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::config::GeneratorConfig;
use crate::error::{GenError, GenerationWarning};
use crate::geometry::Point;
use crate::rng::GenRng;

use super::corridor::{CorridorRouter, RoutedEdge};
use super::factory::RoomFactory;
use super::graph::{ConnectivityGraph, ConnectivityGraphBuilder, GraphBuild};
use super::mst::{SpanningTree, SpanningTreeReducer};
use super::reactivation::MinorRoomReactivator;
use super::room::{Room, RoomKind};
use super::selection::MainRoomSelector;
use super::separation::{CollisionWorld, OverlapResolver, SeparationReport, SeparationSolver};
use super::triangulation::{BowyerWatson, Triangulator};

/// A generated layout
#[derive(Debug, Clone, Serialize)]
pub struct Dungeon {
    pub seed: u64,
    /// Every room ever created, indexed by id; check `active`
    pub rooms: Vec<Room>,
    #[serde(skip)]
    pub graph: ConnectivityGraph,
    /// Edges corridors were routed for
    pub tree: SpanningTree,
    pub routes: Vec<RoutedEdge>,
    pub separation: SeparationReport,
    pub reactivated: usize,
    pub warnings: Vec<GenerationWarning>,
}

impl Dungeon {
    /// Rooms that are part of the final layout
    pub fn active_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(|r| r.active)
    }

    pub fn main_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(|r| r.is_main() && r.active)
    }

    /// Corridor strips and elbow rooms
    pub fn corridors(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(|r| r.kind.is_passage())
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        self.rooms.get(id as usize)
    }

    pub fn summary(&self) -> DungeonSummary {
        let kinds = RoomKind::iter()
            .map(|kind| {
                let (total, active) = self
                    .rooms
                    .iter()
                    .filter(|r| r.kind == kind)
                    .fold((0, 0), |(t, a), r| (t + 1, a + usize::from(r.active)));
                KindCount { kind, total, active }
            })
            .collect();

        DungeonSummary {
            seed: self.seed,
            kinds,
            tree_edges: self.tree.len(),
            reintroduced: self.tree.reintroduced(),
            separation_steps: self.separation.steps,
            warnings: self.warnings.len(),
        }
    }

    pub fn to_json(&self) -> Result<String, GenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Room counts for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: RoomKind,
    pub total: usize,
    pub active: usize,
}

/// Short per-run statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DungeonSummary {
    pub seed: u64,
    pub kinds: Vec<KindCount>,
    pub tree_edges: usize,
    pub reintroduced: usize,
    pub separation_steps: u32,
    pub warnings: usize,
}

impl DungeonSummary {
    pub fn count(&self, kind: RoomKind) -> Option<&KindCount> {
        self.kinds.iter().find(|k| k.kind == kind)
    }
}

impl fmt::Display for DungeonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed {}", self.seed)?;
        for k in &self.kinds {
            writeln!(f, "  {:<10} {:>4} ({} active)", k.kind.to_string(), k.total, k.active)?;
        }
        writeln!(
            f,
            "  corridor edges {} ({} reintroduced), separation steps {}",
            self.tree_edges, self.reintroduced, self.separation_steps
        )?;
        write!(f, "  warnings {}", self.warnings)
    }
}

/// Runs the generation pipeline for one configuration
#[derive(Debug, Clone)]
pub struct DungeonGenerator<T = BowyerWatson> {
    config: GeneratorConfig,
    triangulator: T,
}

impl DungeonGenerator<BowyerWatson> {
    /// Validate `config` and use the bundled triangulator
    pub fn new(config: GeneratorConfig) -> Result<Self, GenError> {
        Self::with_triangulator(config, BowyerWatson)
    }
}

impl<T: Triangulator> DungeonGenerator<T> {
    pub fn with_triangulator(config: GeneratorConfig, triangulator: T) -> Result<Self, GenError> {
        config.validate()?;
        Ok(Self { config, triangulator })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate with the bundled separation solver
    pub fn generate(&self) -> Dungeon {
        self.generate_in(&mut SeparationSolver::new())
    }

    /// Generate using `world` for overlap resolution
    pub fn generate_in<W: CollisionWorld>(&self, world: &mut W) -> Dungeon {
        let config = &self.config;
        let mut rng = GenRng::new(config.seed);
        let mut warnings = Vec::new();

        let mut rooms = RoomFactory::new(config).generate(&mut rng);

        let resolver = OverlapResolver::new(config.max_separation_steps, config.separation_time_step);
        let (separation, warning) = resolver.resolve(&mut rooms, world);
        warnings.extend(warning);

        let main_ids = MainRoomSelector::new(config.main_room_area_threshold()).select(&mut rooms);

        let GraphBuild {
            graph,
            index,
            warnings: graph_warnings,
        } = ConnectivityGraphBuilder::new(&self.triangulator).build(&mut rooms, &main_ids);
        warnings.extend(graph_warnings);

        let tree = SpanningTreeReducer::new(config.edge_reintroduction_fraction).reduce(&graph, &mut rng);

        let routing = CorridorRouter::new(config.corridor_size).route_all(&mut rooms, &tree, &index, &mut rng);
        warnings.extend(routing.warnings);
        warnings.extend(check_connectivity(&graph, &routing.routes));

        let reactivated = MinorRoomReactivator.reactivate(&mut rooms);

        let dungeon = Dungeon {
            seed: config.seed,
            rooms,
            graph,
            tree,
            routes: routing.routes,
            separation,
            reactivated,
            warnings,
        };
        info!(
            "seed {}: {} active rooms ({} main, {} corridor pieces), {} warnings",
            dungeon.seed,
            dungeon.active_rooms().count(),
            dungeon.main_rooms().count(),
            dungeon.corridors().count(),
            dungeon.warnings.len()
        );
        dungeon
    }
}

/// Disjoint sets over centre indices (union by size, path halving)
#[derive(Debug)]
struct CentreGroups {
    parent: Vec<usize>,
    size: Vec<usize>,
    groups: usize,
}

impl CentreGroups {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            groups: n,
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }
        v
    }

    fn join(&mut self, a: usize, b: usize) {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.groups -= 1;
    }
}

/// Report main rooms left apart by dropped corridors
///
/// The gap is only reported; nothing is rerouted.
fn check_connectivity(graph: &ConnectivityGraph, routes: &[RoutedEdge]) -> Option<GenerationWarning> {
    let vertices: Vec<Point> = graph.vertices().collect();
    let mut groups = CentreGroups::new(vertices.len());

    for route in routes.iter().filter(|r| r.outcome.is_connected()) {
        let a = vertices.binary_search(&route.edge.first());
        let b = vertices.binary_search(&route.edge.second());
        if let (Ok(a), Ok(b)) = (a, b) {
            groups.join(a, b);
        }
    }

    let components = groups.groups;
    (components > 1).then(|| {
        let warning = GenerationWarning::DisconnectedLayout { components };
        warn!("{}", warning);
        warning
    })
}

//! Dungeon layout pipeline
//!
//! Contains the room model and every generation stage, from sampling to
//! corridor routing.

mod corridor;
mod factory;
mod generation;
mod graph;
mod mst;
mod reactivation;
mod room;
mod selection;
mod separation;
mod triangulation;

pub use corridor::{CorridorRouter, Orientation, RouteOutcome, RoutedEdge, RoutingReport};
pub use factory::{RoomFactory, limit_aspect_ratio};
pub use generation::{Dungeon, DungeonGenerator, DungeonSummary, KindCount};
pub use graph::{ConnectivityGraph, ConnectivityGraphBuilder, Edge, GraphBuild, MidpointRoomIndex};
pub use mst::{SpanningTree, SpanningTreeReducer};
pub use reactivation::MinorRoomReactivator;
pub use room::{Room, RoomKind};
pub use selection::MainRoomSelector;
pub use separation::{CollisionWorld, OverlapResolver, SeparationReport, SeparationSolver};
pub use triangulation::{BowyerWatson, Triangle, Triangulator};

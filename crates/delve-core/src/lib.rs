//! delve-core: seeded room-and-corridor dungeon layouts
//!
//! Rooms are scattered over a disk, pushed apart, and the large ones are
//! joined through a Delaunay graph reduced to a spanning tree. Corridors
//! follow the kept edges. The same configuration and seed always produce
//! the same layout.
//!
//! ```no_run
//! use delve_core::{DungeonGenerator, GeneratorConfig};
//!
//! let config = GeneratorConfig { seed: 42, ..GeneratorConfig::default() };
//! let dungeon = DungeonGenerator::new(config)?.generate();
//! for room in dungeon.active_rooms() {
//!     println!("{} {:?}", room.kind, room.rect());
//! }
//! # Ok::<(), delve_core::GenError>(())
//! ```

pub mod config;
pub mod dungeon;
pub mod error;
pub mod geometry;
pub mod rng;

pub use config::GeneratorConfig;
pub use dungeon::{Dungeon, DungeonGenerator, DungeonSummary, Room, RoomKind};
pub use error::{ConfigError, GenError, GenerationWarning};
pub use geometry::{Aabb, Point, Rect};
pub use rng::GenRng;

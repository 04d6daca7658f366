//! Error and warning types
//!
//! `GenError` is fatal and only produced before generation starts. Everything
//! that can go wrong once the pipeline is running is recoverable and recorded
//! as a `GenerationWarning` on the resulting dungeon.

use serde::Serialize;
use thiserror::Error;

use crate::geometry::Point;

/// Rejected configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("room count must be positive")]
    NoRooms,

    #[error("room count {count} exceeds the limit of {limit}")]
    TooManyRooms { count: u32, limit: u32 },

    #[error("room size mean must be positive and finite, got {0}")]
    InvalidSizeMean(f64),

    #[error("room size standard deviation must be non-negative and finite, got {0}")]
    InvalidSizeStdDev(f64),

    #[error("minimum room size must be between 1 and {limit}, got {size}")]
    InvalidMinRoomSize { size: u32, limit: u32 },

    #[error("room size mean {mean} plus four standard deviations {std_dev} exceeds the side limit of {limit}")]
    RoomSizeTooLarge { mean: f64, std_dev: f64, limit: u32 },

    #[error("maximum aspect ratio must be finite and at least 1, got {0}")]
    InvalidAspectRatio(f64),

    #[error("placement radius must lie in [0, {limit}], got {radius}")]
    InvalidRadius { radius: f64, limit: f64 },

    #[error("main room threshold ratio must be positive and finite, got {0}")]
    InvalidMainRoomThreshold(f64),

    #[error("corridor size must be between 1 and the minimum room size {min_room_size}, got {corridor_size}")]
    InvalidCorridorSize { corridor_size: u32, min_room_size: u32 },

    #[error("edge reintroduction fraction must lie in [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("separation step cap must be positive")]
    InvalidStepCap,

    #[error("separation time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
}

/// Fatal generator errors
#[derive(Error, Debug)]
pub enum GenError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recoverable conditions met during a generation run
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
    #[error("rooms still moving after {steps} separation steps; keeping best-effort positions")]
    NonConvergentSeparation { steps: u32 },

    #[error("triangulation unusable for {centers} main room centres ({reason}); connecting all pairs")]
    DegenerateTriangulation { centers: usize, reason: String },

    #[error("no corridor route between {from:?} and {to:?}")]
    UnroutableCorridor { from: Point, to: Point },

    #[error("room {room} shares centre {center:?} with another main room; demoted to minor")]
    CenterCollision { room: u32, center: Point },

    #[error("main rooms split into {components} unconnected groups after corridor routing")]
    DisconnectedLayout { components: usize },
}

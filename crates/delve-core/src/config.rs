//! Generator configuration
//!
//! Every numeric knob of the pipeline, validated once before any generation
//! starts. Loadable from JSON; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GenError};

/// Steps simulated between two "is everything settled" checks
pub const SETTLE_BATCH: u32 = 50;

/// Upper bound on sampled rooms
pub const MAX_ROOM_COUNT: u32 = 10_000;

/// Upper bound on any sampled room side
pub const MAX_ROOM_SIDE: u32 = 10_000;

/// Upper bound on the placement disk radius
///
/// Together with the room count and side limits this keeps every grid
/// coordinate far inside `i32`.
pub const MAX_PLACEMENT_RADIUS: f64 = 100_000.0;

/// User-configurable generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of rooms sampled before separation
    pub room_count: u32,
    /// Mean of the normal distribution each room side is drawn from
    pub room_size_mean: f64,
    /// Standard deviation of the room side distribution
    pub room_size_std_dev: f64,
    /// Floor applied to each sampled side
    pub min_room_size: u32,
    /// Largest allowed long-side / short-side ratio
    pub max_aspect_ratio: f64,
    /// Radius of the disk room centres are sampled from
    pub placement_radius: f64,
    /// Main rooms have area >= (mean * ratio)^2
    pub main_room_threshold: f64,
    /// Thickness of corridors and side of elbow rooms
    pub corridor_size: u32,
    /// Share of discarded graph edges put back after the spanning tree
    pub edge_reintroduction_fraction: f64,
    pub seed: u64,
    /// Hard cap on separation steps
    pub max_separation_steps: u32,
    /// Time step passed to the collision service
    pub separation_time_step: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_count: 60,
            room_size_mean: 10.0,
            room_size_std_dev: 3.0,
            min_room_size: 4,
            max_aspect_ratio: 2.0,
            placement_radius: 40.0,
            main_room_threshold: 1.25,
            corridor_size: 2,
            edge_reintroduction_fraction: 0.15,
            seed: 0,
            max_separation_steps: 20_000,
            separation_time_step: 0.02,
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, GenError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, GenError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Area a room needs to anchor the dungeon as a main room
    pub fn main_room_area_threshold(&self) -> f64 {
        let side = self.room_size_mean * self.main_room_threshold;
        side * side
    }

    /// Reject configurations the pipeline cannot run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_count == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.room_count > MAX_ROOM_COUNT {
            return Err(ConfigError::TooManyRooms {
                count: self.room_count,
                limit: MAX_ROOM_COUNT,
            });
        }
        if !(self.room_size_mean.is_finite() && self.room_size_mean > 0.0) {
            return Err(ConfigError::InvalidSizeMean(self.room_size_mean));
        }
        if !(self.room_size_std_dev.is_finite() && self.room_size_std_dev >= 0.0) {
            return Err(ConfigError::InvalidSizeStdDev(self.room_size_std_dev));
        }
        if self.room_size_mean + 4.0 * self.room_size_std_dev > f64::from(MAX_ROOM_SIDE) {
            return Err(ConfigError::RoomSizeTooLarge {
                mean: self.room_size_mean,
                std_dev: self.room_size_std_dev,
                limit: MAX_ROOM_SIDE,
            });
        }
        if self.min_room_size == 0 || self.min_room_size > MAX_ROOM_SIDE {
            return Err(ConfigError::InvalidMinRoomSize {
                size: self.min_room_size,
                limit: MAX_ROOM_SIDE,
            });
        }
        if !(self.max_aspect_ratio.is_finite() && self.max_aspect_ratio >= 1.0) {
            return Err(ConfigError::InvalidAspectRatio(self.max_aspect_ratio));
        }
        if !(0.0..=MAX_PLACEMENT_RADIUS).contains(&self.placement_radius) {
            return Err(ConfigError::InvalidRadius {
                radius: self.placement_radius,
                limit: MAX_PLACEMENT_RADIUS,
            });
        }
        if !(self.main_room_threshold.is_finite() && self.main_room_threshold > 0.0) {
            return Err(ConfigError::InvalidMainRoomThreshold(self.main_room_threshold));
        }
        if self.corridor_size == 0 || self.corridor_size > self.min_room_size {
            return Err(ConfigError::InvalidCorridorSize {
                corridor_size: self.corridor_size,
                min_room_size: self.min_room_size,
            });
        }
        if !(0.0..=1.0).contains(&self.edge_reintroduction_fraction) {
            return Err(ConfigError::InvalidFraction(self.edge_reintroduction_fraction));
        }
        if self.max_separation_steps == 0 {
            return Err(ConfigError::InvalidStepCap);
        }
        if !(self.separation_time_step.is_finite() && self.separation_time_step > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.separation_time_step));
        }
        Ok(())
    }
}

//! Room sampling
//!
//! Rooms are scattered uniformly over a disk with normally distributed side
//! lengths. Draw order per room: position (two uniforms), then width, then
//! height.

use log::debug;

use crate::config::{GeneratorConfig, MAX_ROOM_SIDE};
use crate::rng::GenRng;

use super::room::Room;

/// Samples room rectangles from the configured distributions
#[derive(Debug, Clone)]
pub struct RoomFactory {
    count: u32,
    radius: f64,
    size_mean: f64,
    size_std_dev: f64,
    min_size: u32,
    max_ratio: f64,
}

impl RoomFactory {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            count: config.room_count,
            radius: config.placement_radius,
            size_mean: config.room_size_mean,
            size_std_dev: config.room_size_std_dev,
            min_size: config.min_room_size,
            max_ratio: config.max_aspect_ratio,
        }
    }

    /// Produce `count` rooms with ids `0..count`
    pub fn generate(&self, rng: &mut GenRng) -> Vec<Room> {
        let rooms: Vec<Room> = (0..self.count).map(|id| self.sample_room(id, rng)).collect();
        debug!("sampled {} rooms within radius {}", rooms.len(), self.radius);
        rooms
    }

    fn sample_room(&self, id: u32, rng: &mut GenRng) -> Room {
        let (cx, cy) = rng.point_in_disk(self.radius);
        let width = self.sample_side(rng);
        let height = self.sample_side(rng);
        let (width, height) = limit_aspect_ratio(width, height, self.max_ratio);

        // The sampled point is the room's centre.
        Room::new(
            id,
            cx - f64::from(width) / 2.0,
            cy - f64::from(height) / 2.0,
            width,
            height,
        )
    }

    fn sample_side(&self, rng: &mut GenRng) -> u32 {
        let side = (self.size_mean + rng.standard_normal() * self.size_std_dev).round();
        side.clamp(f64::from(self.min_size), f64::from(MAX_ROOM_SIDE)) as u32
    }
}

/// Shrink the longer side until `long / short <= max_ratio`
pub fn limit_aspect_ratio(width: u32, height: u32, max_ratio: f64) -> (u32, u32) {
    let limit = |short: u32| (f64::from(short) * max_ratio).floor() as u32;
    if f64::from(width) > f64::from(height) * max_ratio {
        (limit(height), height)
    } else if f64::from(height) > f64::from(width) * max_ratio {
        (width, limit(width))
    } else {
        (width, height)
    }
}

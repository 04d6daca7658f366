//! Room structures
//!
//! Every rectangle the generator produces is a `Room`: sampled rooms, the
//! corridor strips joining them and the elbow joints of L-shaped routes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geometry::{Aabb, Point, Rect};

/// What part a room plays in the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomKind {
    /// Sampled, not yet classified
    #[default]
    Candidate,
    /// Large enough to anchor the connectivity graph
    Main,
    /// Below the area threshold
    Minor,
    /// Straight corridor strip
    Corridor,
    /// Corner joint of an L-shaped corridor
    Elbow,
}

impl RoomKind {
    /// Check if this room was generated by corridor routing
    pub fn is_passage(self) -> bool {
        matches!(self, RoomKind::Corridor | RoomKind::Elbow)
    }
}

/// A rectangle anchored at its lower-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Stable id, equal to the room's index in the dungeon
    pub id: u32,
    /// Lower-left X
    pub x: f64,
    /// Lower-left Y
    pub y: f64,
    pub width: u32,
    pub height: u32,
    pub kind: RoomKind,
    /// Whether the room is part of the final layout
    pub active: bool,
}

impl Room {
    /// Create a new active candidate room
    pub fn new(id: u32, x: f64, y: f64, width: u32, height: u32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            kind: RoomKind::Candidate,
            active: true,
        }
    }

    /// Create a room on the integer grid with a specific kind
    pub fn with_kind(id: u32, rect: Rect, kind: RoomKind) -> Self {
        Self {
            id,
            x: f64::from(rect.x),
            y: f64::from(rect.y),
            width: rect.width as u32,
            height: rect.height as u32,
            kind,
            active: true,
        }
    }

    /// Grid rectangle of the room (position rounded to the nearest cell)
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x.round() as i32,
            self.y.round() as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    /// Floating-point box for the collision service
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, f64::from(self.width), f64::from(self.height))
    }

    /// Integer midpoint used as graph vertex
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Snap the position to the integer grid
    pub fn round_position(&mut self) {
        self.x = self.x.round();
        self.y = self.y.round();
    }

    pub fn is_main(&self) -> bool {
        self.kind == RoomKind::Main
    }

    /// Check if this room overlaps another (open interval)
    pub fn overlaps(&self, other: &Room) -> bool {
        self.rect().overlaps(&other.rect())
    }
}

//! Grid points and axis-aligned rectangles
//!
//! Rooms live on an integer grid once separation has settled, so every
//! predicate used after that point works on `i32` coordinates. `Aabb` is the
//! floating-point box handed to the collision service before rounding.

use serde::{Deserialize, Serialize};

/// An integer grid point
///
/// Ordered lexicographically (x, then y). Used as graph vertex and map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate one past the right edge
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Y coordinate one past the top edge
    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    /// Integer midpoint (half extents use integer division)
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Open-interval overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Closed-interval overlap: shared edges and corners count
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.top()
            && self.top() >= other.y
    }

    /// Whether the X projections `[x, right - inset]` of both rectangles overlap
    pub fn spans_overlap_x(&self, other: &Rect, inset: i32) -> bool {
        self.x <= other.right() - inset && self.right() - inset >= other.x
    }

    /// Whether the Y projections `[y, top - inset]` of both rectangles overlap
    pub fn spans_overlap_y(&self, other: &Rect, inset: i32) -> bool {
        self.y <= other.top() - inset && self.top() - inset >= other.y
    }
}

/// Floating-point axis-aligned box used by the collision service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Penetration depth on each axis, if the boxes overlap with positive area
    pub fn penetration(&self, other: &Aabb) -> Option<(f64, f64)> {
        let px = (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let py = (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        (px > 0.0 && py > 0.0).then_some((px, py))
    }
}

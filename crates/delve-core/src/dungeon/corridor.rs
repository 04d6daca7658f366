//! Corridor routing between graph-adjacent rooms
//!
//! Every kept edge becomes, depending on how the two rooms line up:
//! 1. nothing, when the rooms already share both spans
//! 2. one straight corridor, when they share exactly one span
//! 3. an elbow room plus up to two straight legs otherwise
//!
//! A route may not cut through any main room other than its own two
//! endpoints. L-shaped routes try horizontal-first, then vertical-first;
//! straight routes get no second chance. Pieces of a rejected attempt are
//! never committed, so they consume no room ids.

use log::{debug, warn};
use serde::Serialize;

use crate::error::GenerationWarning;
use crate::geometry::Rect;
use crate::rng::GenRng;

use super::graph::{Edge, MidpointRoomIndex};
use super::mst::SpanningTree;
use super::room::{Room, RoomKind};

/// Which leg of an L-shaped route leaves the first room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Leave the first room along X; the elbow sits in its row
    HorizontalFirst,
    /// Leave the first room along Y; the elbow sits in its column
    VerticalFirst,
}

impl Orientation {
    pub fn opposite(self) -> Self {
        match self {
            Orientation::HorizontalFirst => Orientation::VerticalFirst,
            Orientation::VerticalFirst => Orientation::HorizontalFirst,
        }
    }
}

/// What routing did for one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// The rooms already touch
    Adjacent,
    Straight,
    Elbow { orientation: Orientation, retried: bool },
    /// Every attempt crossed another main room; the edge is dropped
    Unroutable,
}

impl RouteOutcome {
    pub fn is_connected(self) -> bool {
        !matches!(self, RouteOutcome::Unroutable)
    }
}

/// Routing result for one spanning tree edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutedEdge {
    pub edge: Edge,
    pub outcome: RouteOutcome,
}

/// Result of routing every kept edge
#[derive(Debug, Clone, Default)]
pub struct RoutingReport {
    pub routes: Vec<RoutedEdge>,
    pub corridors_created: usize,
    pub warnings: Vec<GenerationWarning>,
}

/// A prospective piece, not yet a room
type Piece = (Rect, RoomKind);

/// Connects rooms with rectangular corridor pieces
#[derive(Debug, Clone, Copy)]
pub struct CorridorRouter {
    corridor: i32,
}

impl CorridorRouter {
    pub fn new(corridor_size: u32) -> Self {
        Self {
            corridor: corridor_size as i32,
        }
    }

    /// Route every edge of `tree`, appending corridor rooms to `rooms`
    pub fn route_all(
        &self,
        rooms: &mut Vec<Room>,
        tree: &SpanningTree,
        index: &MidpointRoomIndex,
        rng: &mut GenRng,
    ) -> RoutingReport {
        let obstacles: Vec<(u32, Rect)> = rooms
            .iter()
            .filter(|r| r.is_main() && r.active)
            .map(|r| (r.id, r.rect()))
            .collect();

        let mut report = RoutingReport::default();
        for &edge in tree.edges() {
            let (Some(a), Some(b)) = (index.room_at(edge.first()), index.room_at(edge.second())) else {
                continue;
            };
            let (one, two) = (rooms[a as usize].rect(), rooms[b as usize].rect());
            let (outcome, pieces) = self.plan(one, two, |piece| {
                obstacles
                    .iter()
                    .any(|&(id, rect)| id != a && id != b && piece.overlaps(&rect))
            }, rng);

            for (rect, kind) in pieces {
                let id = rooms.len() as u32;
                rooms.push(Room::with_kind(id, rect, kind));
                report.corridors_created += 1;
            }

            if outcome == RouteOutcome::Unroutable {
                let warning = GenerationWarning::UnroutableCorridor {
                    from: edge.first(),
                    to: edge.second(),
                };
                warn!("{}", warning);
                report.warnings.push(warning);
            }
            report.routes.push(RoutedEdge { edge, outcome });
        }

        debug!(
            "routed {} edges with {} corridor pieces",
            report.routes.len(),
            report.corridors_created
        );
        report
    }

    /// Decide how to join `one` and `two`
    ///
    /// `blocked` reports whether a prospective piece crosses a room it may
    /// not cross. Returns the outcome and the pieces to create.
    pub fn plan<F>(&self, one: Rect, two: Rect, blocked: F, rng: &mut GenRng) -> (RouteOutcome, Vec<Piece>)
    where
        F: Fn(&Rect) -> bool,
    {
        let t = self.corridor;
        let share_x = one.spans_overlap_x(&two, t);
        let share_y = one.spans_overlap_y(&two, t);
        let rejects = |pieces: &[Piece]| pieces.iter().any(|(rect, _)| blocked(rect));

        match (share_x, share_y) {
            (true, true) => (RouteOutcome::Adjacent, Vec::new()),
            (true, false) | (false, true) => {
                let piece = if share_x {
                    self.vertical_piece(one, two, rng)
                } else {
                    self.horizontal_piece(one, two, rng)
                };
                match piece {
                    None => (RouteOutcome::Adjacent, Vec::new()),
                    Some(rect) if blocked(&rect) => (RouteOutcome::Unroutable, Vec::new()),
                    Some(rect) => (RouteOutcome::Straight, vec![(rect, RoomKind::Corridor)]),
                }
            }
            (false, false) => {
                let first = Orientation::HorizontalFirst;
                for (orientation, retried) in [(first, false), (first.opposite(), true)] {
                    let pieces = self.elbow_route(one, two, orientation, rng);
                    if !rejects(&pieces) {
                        return (RouteOutcome::Elbow { orientation, retried }, pieces);
                    }
                    debug!("{:?} route from {:?} to {:?} blocked", orientation, one, two);
                }
                (RouteOutcome::Unroutable, Vec::new())
            }
        }
    }

    /// Elbow room plus the legs joining it to both rooms
    fn elbow_route(&self, one: Rect, two: Rect, orientation: Orientation, rng: &mut GenRng) -> Vec<Piece> {
        let t = self.corridor;
        let (column_of, row_of) = match orientation {
            Orientation::HorizontalFirst => (two, one),
            Orientation::VerticalFirst => (one, two),
        };
        let x = rng.floor_range(column_of.x, column_of.right() - t);
        let y = rng.floor_range(row_of.y, row_of.top() - t);
        let elbow = Rect::new(x, y, t, t);

        let (first_leg, second_leg) = match orientation {
            Orientation::HorizontalFirst => (
                self.horizontal_piece(one, elbow, rng),
                self.vertical_piece(elbow, two, rng),
            ),
            Orientation::VerticalFirst => (
                self.vertical_piece(one, elbow, rng),
                self.horizontal_piece(elbow, two, rng),
            ),
        };

        std::iter::once((elbow, RoomKind::Elbow))
            .chain(first_leg.map(|r| (r, RoomKind::Corridor)))
            .chain(second_leg.map(|r| (r, RoomKind::Corridor)))
            .collect()
    }

    /// Corridor spanning the X gap between two rooms sharing a Y span
    ///
    /// `None` when the rooms already meet along X.
    fn horizontal_piece(&self, one: Rect, two: Rect, rng: &mut GenRng) -> Option<Rect> {
        let (left, right) = if two.x < one.x { (two, one) } else { (one, two) };
        let y = rng.floor_range(one.y.max(two.y), one.top().min(two.top()) - self.corridor);
        let x = left.right();
        let length = right.x - x;
        (length > 0).then(|| Rect::new(x, y, length, self.corridor))
    }

    /// Corridor spanning the Y gap between two rooms sharing an X span
    fn vertical_piece(&self, one: Rect, two: Rect, rng: &mut GenRng) -> Option<Rect> {
        let (lower, upper) = if two.y < one.y { (two, one) } else { (one, two) };
        let x = rng.floor_range(one.x.max(two.x), one.right().min(two.right()) - self.corridor);
        let y = lower.top();
        let length = upper.y - y;
        (length > 0).then(|| Rect::new(x, y, self.corridor, length))
    }
}

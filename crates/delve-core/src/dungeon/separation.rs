//! Overlap resolution
//!
//! The resolver owns the convergence loop; pushing rooms apart is delegated
//! to a `CollisionWorld`. `SeparationSolver` is the bundled, engine-free
//! world: a deterministic separating-axis pusher.

use hashbrown::HashMap;
use log::{debug, warn};
use serde::Serialize;

use crate::config::SETTLE_BATCH;
use crate::error::GenerationWarning;
use crate::geometry::Aabb;

use super::room::Room;

/// Collision service the resolver drives
pub trait CollisionWorld {
    /// Register or move a body
    fn set_room_rect(&mut self, id: u32, rect: Aabb);
    fn enable_collision(&mut self, id: u32);
    fn disable_collision(&mut self, id: u32);
    /// Advance the simulation
    fn step(&mut self, dt: f64);
    /// True once the body has no residual motion
    fn is_settled(&self, id: u32) -> bool;
    /// Current lower-left corner of a body
    fn room_position(&self, id: u32) -> Option<(f64, f64)>;
}

/// Extra distance added to each push so separated boxes end strictly apart
const SEPARATION_SLOP: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Body {
    rect: Aabb,
    enabled: bool,
    moved: bool,
}

/// Deterministic iterative pusher
///
/// Each step visits enabled body pairs in registration order. Overlapping
/// pairs are pushed apart along the axis of least penetration, each body
/// moving half the penetration. A body is settled when the last step did not
/// move it.
#[derive(Debug, Clone, Default)]
pub struct SeparationSolver {
    bodies: Vec<Body>,
    index: HashMap<u32, usize>,
}

impl SeparationSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn body_mut(&mut self, id: u32) -> Option<&mut Body> {
        let idx = *self.index.get(&id)?;
        self.bodies.get_mut(idx)
    }

    /// Push bodies `i < j` apart if they overlap
    fn resolve_pair(&mut self, i: usize, j: usize) {
        let (a, b) = (self.bodies[i].rect, self.bodies[j].rect);
        let Some((px, py)) = a.penetration(&b) else {
            return;
        };

        let (acx, acy) = a.center();
        let (bcx, bcy) = b.center();
        // Ties keep the lower id on the negative side.
        let sign = |delta: f64| if delta < 0.0 { -1.0 } else { 1.0 };

        let (dx, dy) = if px < py {
            (sign(bcx - acx) * (px / 2.0 + SEPARATION_SLOP), 0.0)
        } else {
            (0.0, sign(bcy - acy) * (py / 2.0 + SEPARATION_SLOP))
        };

        let (left, right) = self.bodies.split_at_mut(j);
        let (a, b) = (&mut left[i], &mut right[0]);

        a.rect.x -= dx;
        a.rect.y -= dy;
        b.rect.x += dx;
        b.rect.y += dy;
        a.moved = true;
        b.moved = true;
    }
}

impl CollisionWorld for SeparationSolver {
    fn set_room_rect(&mut self, id: u32, rect: Aabb) {
        if let Some(body) = self.body_mut(id) {
            body.rect = rect;
            return;
        }
        self.index.insert(id, self.bodies.len());
        self.bodies.push(Body {
            rect,
            enabled: false,
            moved: false,
        });
    }

    fn enable_collision(&mut self, id: u32) {
        if let Some(body) = self.body_mut(id) {
            body.enabled = true;
        }
    }

    fn disable_collision(&mut self, id: u32) {
        if let Some(body) = self.body_mut(id) {
            body.enabled = false;
            body.moved = false;
        }
    }

    /// Pushes are positional, so the time step does not scale them
    fn step(&mut self, _dt: f64) {
        for body in &mut self.bodies {
            body.moved = false;
        }

        let n = self.bodies.len();
        for i in 0..n {
            if !self.bodies[i].enabled {
                continue;
            }
            for j in (i + 1)..n {
                if self.bodies[j].enabled {
                    self.resolve_pair(i, j);
                }
            }
        }
    }

    fn is_settled(&self, id: u32) -> bool {
        self.index
            .get(&id)
            .and_then(|&idx| self.bodies.get(idx))
            .is_none_or(|body| !body.enabled || !body.moved)
    }

    fn room_position(&self, id: u32) -> Option<(f64, f64)> {
        let idx = *self.index.get(&id)?;
        self.bodies.get(idx).map(|b| (b.rect.x, b.rect.y))
    }
}

/// Drives a collision world until the rooms stop moving
#[derive(Debug, Clone)]
pub struct OverlapResolver {
    max_steps: u32,
    dt: f64,
}

/// Result of a separation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeparationReport {
    pub steps: u32,
    pub converged: bool,
}

impl OverlapResolver {
    pub fn new(max_steps: u32, dt: f64) -> Self {
        Self { max_steps, dt }
    }

    /// Push rooms apart, then snap their positions to the grid
    ///
    /// Returns the warning to record when the step cap was hit; positions are
    /// then best-effort and may still overlap.
    pub fn resolve<W: CollisionWorld>(
        &self,
        rooms: &mut [Room],
        world: &mut W,
    ) -> (SeparationReport, Option<GenerationWarning>) {
        for room in rooms.iter() {
            world.set_room_rect(room.id, room.aabb());
            world.enable_collision(room.id);
        }

        let mut steps = 0;
        let mut converged = false;
        while steps < self.max_steps {
            let batch = SETTLE_BATCH.min(self.max_steps - steps);
            for _ in 0..batch {
                world.step(self.dt);
            }
            steps += batch;

            if rooms.iter().all(|r| world.is_settled(r.id)) {
                converged = true;
                break;
            }
        }

        for room in rooms.iter_mut() {
            if let Some((x, y)) = world.room_position(room.id) {
                room.x = x;
                room.y = y;
            }
            room.round_position();
            world.disable_collision(room.id);
        }

        let report = SeparationReport { steps, converged };
        if converged {
            debug!("rooms settled after {} steps", steps);
            (report, None)
        } else {
            let warning = GenerationWarning::NonConvergentSeparation { steps };
            warn!("{}", warning);
            (report, Some(warning))
        }
    }
}

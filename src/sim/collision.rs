//! Collision detection and response for circle movers
//!
//! The one contact algorithm every mover kind shares: an axis-aligned edge
//! test followed by a corner test against a single tile, plus the 3×3
//! neighbor scan that applies it to the cells around a mover. The
//! circle-vs-circle helpers used for bullet hits and player separation live
//! here too. Everything is stateless: callers hand in a `Body` and a
//! `Bounce` policy and get mutations plus a contact flag back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOUNCE_CLEARANCE, TILE_SIZE};
use crate::room::Room;

/// Positional state every mover kind carries: players, enemies, bullets and
/// particles all embed one of these and resolve walls the same way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }
}

/// Per-kind bounce response: how much speed the reflected component keeps,
/// and how far past flush the mover is pushed back out.
#[derive(Debug, Clone, Copy)]
pub struct Bounce {
    /// Multiplier applied to the reflected velocity component
    pub decel: f32,
    /// Extra gap beyond the radius after repositioning
    pub clearance: f32,
}

impl Bounce {
    /// Reposition flush against the surface (players).
    pub fn flush(decel: f32) -> Self {
        Self {
            decel,
            clearance: 0.0,
        }
    }

    /// Leave a small gap so the same contact cannot re-fire next frame
    /// (kinds that count their bounces: bullets, enemies, particles).
    pub fn cleared(decel: f32) -> Self {
        Self {
            decel,
            clearance: BOUNCE_CLEARANCE,
        }
    }
}

/// Resolve a circle mover against one solid tile centered at `tile_center`.
///
/// Returns whether a contact occurred, repositioning the body and
/// reflecting the struck velocity component when it did. Edge tests run
/// first and report without falling through to the corner test; the corner
/// test pushes the body radially off the corner point and reflects the axis
/// with the smaller absolute corner delta (the more glancing one). A body
/// centered exactly on a corner has no push direction and is skipped.
pub fn resolve_tile_contact(body: &mut Body, tile_center: Vec2, bounce: Bounce) -> bool {
    let half = TILE_SIZE / 2.0;
    let d = tile_center - body.pos;
    if d.length() > 1.5 * TILE_SIZE + body.radius {
        return false;
    }

    // Both axes may fire in the same call when the body sits in the tile's
    // slab on both axes; the deltas are from before either reposition.
    let mut hit = false;
    if -half < d.x && d.x < half {
        if 0.0 < d.y && d.y < body.radius + half {
            body.pos.y = tile_center.y - half - body.radius - bounce.clearance;
            body.vel.y *= -bounce.decel;
            hit = true;
        }
        if 0.0 > d.y && d.y > -(body.radius + half) {
            body.pos.y = tile_center.y + half + body.radius + bounce.clearance;
            body.vel.y *= -bounce.decel;
            hit = true;
        }
    }
    if -half < d.y && d.y < half {
        if 0.0 < d.x && d.x < body.radius + half {
            body.pos.x = tile_center.x - half - body.radius - bounce.clearance;
            body.vel.x *= -bounce.decel;
            hit = true;
        }
        if 0.0 > d.x && d.x > -(body.radius + half) {
            body.pos.x = tile_center.x + half + body.radius + bounce.clearance;
            body.vel.x *= -bounce.decel;
            hit = true;
        }
    }
    if hit {
        return true;
    }

    for corner in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        let cpos = tile_center + Vec2::new(corner.0 * half, corner.1 * half);
        if body.pos.distance(cpos) < body.radius {
            let dc = cpos - body.pos;
            let mag = dc.length();
            if mag == 0.0 {
                continue;
            }
            body.pos = cpos - dc / mag * (body.radius + bounce.clearance);
            if dc.y.abs() < dc.x.abs() {
                body.vel.x *= -bounce.decel;
            } else {
                body.vel.y *= -bounce.decel;
            }
            return true;
        }
    }
    false
}

/// Resolve a mover against the blocking cells around it.
///
/// Scans the 3×3 window centered on the mover's cell in row-major order,
/// `(-1, -1)` through `(1, 1)`, and stops at the first cell that reports a
/// contact; at most one contact is resolved per call.
pub fn resolve_room_contacts(body: &mut Body, room: &Room, bounce: Bounce) -> bool {
    let (cx, cy) = room.world_to_cell_discrete(body.pos);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if room.cell_is_blocking(cx + dx, cy + dy)
                && resolve_tile_contact(body, room.cell_to_world(cx + dx, cy + dy), bounce)
            {
                return true;
            }
        }
    }
    false
}

/// Circle-vs-circle hit test with a cheap axis-aligned reject first.
pub fn circle_hit(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    if b_pos.x < a_pos.x - reach || b_pos.x > a_pos.x + reach {
        return false;
    }
    if b_pos.y < a_pos.y - reach || b_pos.y > a_pos.y + reach {
        return false;
    }
    a_pos.distance(b_pos) < reach
}

/// Separate two overlapping movers: an equal-and-opposite `impulse` along
/// the line between centers, then both positions corrected so they sit at
/// exactly the sum of their radii. Overlap gets 2 units of slack so resting
/// contact does not jitter; coincident centers have no separation direction
/// and are left alone. Returns whether a separation happened.
pub fn separate_pair(a: &mut Body, b: &mut Body, impulse: f32) -> bool {
    let d = b.pos - a.pos;
    let mag = d.length();
    if mag >= a.radius + b.radius - 2.0 || mag == 0.0 {
        return false;
    }
    let unit = d / mag;
    a.vel -= unit * impulse;
    b.vel += unit * impulse;
    let push = (a.radius + b.radius - mag) * 0.5;
    a.pos -= unit * push;
    b.pos += unit * push;
    true
}

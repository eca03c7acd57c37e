//! Grid Brawl - a top-down tile-grid arena brawler
//!
//! Core modules:
//! - `room`: level parsing, the tile grid, autotiling, spatial transforms
//! - `sim`: deterministic simulation (movers, collision, world state, tick)
//! - `settings`: user preferences with JSON persistence
//!
//! Rendering, audio, and input binding are front-end concerns: they feed
//! `PlayerInput`s in and consume the event queue coming out.

pub mod room;
pub mod settings;
pub mod sim;

pub use room::{LevelMap, Room};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Tile pitch in world units
    pub const TILE_SIZE: f32 = 48.0;
    /// Viewport the grid is centered in
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Longest frame step the simulation will integrate; anything above is
    /// clamped so a stalled frame cannot tunnel a fast mover through a wall
    pub const MAX_FRAME_DT: f32 = 1.0 / 15.0;

    /// Wall bounce decel factors per mover kind
    pub const PLAYER_WALL_DECEL: f32 = 0.4;
    pub const SLIPPERY_WALL_DECEL: f32 = 0.7;
    pub const OBSTACLE_WALL_DECEL: f32 = 0.2;
    pub const ELASTIC_DECEL: f32 = 1.0;
    /// Extra gap left after a bounce by kinds that count their bounces
    pub const BOUNCE_CLEARANCE: f32 = 1.0;
    /// Below this speed a wall contact is too soft to announce
    pub const BOUNCE_EVENT_MIN_SPEED: f32 = 5.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 26.0;
    pub const PLAYER_MAX_HP: f32 = 100.0;
    /// Fraction of velocity kept per second while coasting
    pub const PLAYER_DRAG: f32 = 0.002;
    /// Impulse applied to each side of a player-player shoulder check
    pub const PLAYER_BUMP_IMPULSE: f32 = 200.0;
    /// Spin rates in degrees per second
    pub const SPIN_SPEED: f32 = 160.0;
    pub const CHARGED_SPIN_SPEED: f32 = 60.0;
    pub const FAST_SPIN_MULT: f32 = 2.5;
    pub const DEAD_SPIN_DECAY: f32 = 0.2;
    /// Seconds to reach full charge
    pub const CHARGE_TIME: f32 = 1.0;
    pub const FAST_CHARGE_MULT: f32 = 0.5;
    /// Minimum charge that releases as a shot
    pub const CHARGE_THRESHOLD: f32 = 0.7;
    pub const FAST_CHARGE_THRESHOLD: f32 = 0.5;
    /// Recoil speed at full charge
    pub const FIRE_KNOCKBACK: f32 = 800.0;
    pub const DOUBLE_SHOT_KNOCKBACK_MULT: f32 = 0.6;
    /// Spread of the two double-shot bullets, degrees off the facing
    pub const DOUBLE_SHOT_SPREAD: f32 = 15.0;
    /// Recoil glide window at full charge
    pub const SAIL_TIME: f32 = 0.1;
    pub const SLIPPERY_MAX_SPEED: f32 = 400.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 12.0;
    pub const BULLET_SPEED: f32 = 800.0;
    pub const BULLET_DAMAGE: f32 = 70.0;
    /// Fraction of bullet velocity passed to the victim as knockback
    pub const BULLET_KNOCKBACK_FACTOR: f32 = 0.3;
    /// Reflections a bouncy bullet gets; the next wall contact destroys it
    pub const BULLET_BOUNCE_LIMIT: u32 = 2;
    /// Seconds between trail particles behind a bullet
    pub const TRAIL_INTERVAL: f32 = 0.01;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 30.0;
    pub const ENEMY_HP: f32 = 1.0;
    pub const BOUNCER_SPEED: f32 = 100.0;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f32 = 5.0;
    pub const DEBRIS_DRAG: f32 = 0.05;
    pub const DEATH_DEBRIS_COUNT: u32 = 8;
    pub const TRAIL_TTL: f32 = 1.0;
    pub const FLASH_TTL: f32 = 0.4;

    /// Powerup defaults
    pub const POWERUP_RADIUS: f32 = 24.0;
    pub const POWERUP_FALL_SPEED: f32 = 600.0;
    /// Seconds between drops after the first
    pub const POWERUP_MIN_WAIT: f32 = 20.0;
    pub const POWERUP_MAX_WAIT: f32 = 40.0;
    pub const FIRST_POWERUP_WAIT: f32 = 10.0;
}

/// Unit facing vector for an angle in degrees CCW from +x, in a y-down
/// world.
#[inline]
pub fn facing(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

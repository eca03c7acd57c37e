//! Deterministic arena simulation
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Wall-clock deltas come in clamped, everything else is arithmetic
//! - Seeded RNG only
//! - Stable iteration order (per-category passes, reverse where removal
//!   can happen)
//! - No rendering, audio, or platform dependencies; outward signals go
//!   through the event queue

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    Body, Bounce, circle_hit, resolve_room_contacts, resolve_tile_contact, separate_pair,
};
pub use state::{
    Bullet, Effect, Enemy, EnemyKind, EntityId, Event, Particle, ParticleKind, Player, Powerup,
    PowerupKind, World,
};
pub use tick::{PlayerInput, tick};

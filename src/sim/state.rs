//! Entity and world state
//!
//! Everything the simulation owns lives here: the room, every mover
//! collection, the seeded RNG, and the event queue the frame loop fills for
//! the caller. No globals; the `World` is built by the owning loop and
//! passed into each update call.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use crate::consts::*;
use crate::room::Room;

pub type EntityId = u32;

/// Capabilities granted by powerups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Spin much faster, charged or not
    FastSpin,
    /// Skid along walls instead of thudding into them; no coasting drag
    SlipperySocks,
    /// Two bullets per shot at a spread, with softer recoil
    DoubleShot,
    /// Bullets reflect off walls instead of popping
    Bouncy,
    /// Half the charge time and a lower release threshold
    FastShooting,
}

impl PowerupKind {
    /// How long the effect lasts once collected.
    pub fn duration(self) -> f32 {
        match self {
            PowerupKind::FastSpin => 25.0,
            PowerupKind::SlipperySocks => 18.0,
            PowerupKind::DoubleShot => 18.0,
            PowerupKind::Bouncy => 18.0,
            PowerupKind::FastShooting => 25.0,
        }
    }
}

/// An active timed effect on a player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Effect {
    pub kind: PowerupKind,
    pub age: f32,
}

/// A player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    /// Facing angle in degrees CCW from +x (world y points down)
    pub angle: f32,
    pub hp: f32,
    pub dead: bool,
    pub charging: bool,
    /// Shot charge, 0 to 1
    pub charge: f32,
    /// Recoil glide after firing; coasting drag is suspended while true
    pub sailing: bool,
    pub since_fire: f32,
    /// How long the current sail lasts (scales with the fired charge)
    pub sail_window: f32,
    /// Base spin rate in degrees per second; randomized and decaying once dead
    pub spin_speed: f32,
    pub effects: Vec<Effect>,
    /// Entities this player's bullets will not damage
    pub friendly: Vec<EntityId>,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, PLAYER_RADIUS),
            angle: 0.0,
            hp: PLAYER_MAX_HP,
            dead: false,
            charging: false,
            charge: 0.0,
            sailing: false,
            since_fire: 0.0,
            sail_window: SAIL_TIME,
            spin_speed: SPIN_SPEED,
            effects: Vec::new(),
            friendly: vec![id],
        }
    }

    pub fn has(&self, kind: PowerupKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Grant an effect, refreshing its timer if already active.
    pub fn grant(&mut self, kind: PowerupKind) {
        if let Some(effect) = self.effects.iter_mut().find(|e| e.kind == kind) {
            effect.age = 0.0;
        } else {
            self.effects.push(Effect { kind, age: 0.0 });
        }
    }

    /// Current spin velocity in degrees per second: full speed uncharged,
    /// easing toward the slow charged rate as a shot builds. Zero while
    /// sailing from recoil.
    pub fn spin_velocity(&self) -> f32 {
        if self.sailing {
            return 0.0;
        }
        let mult = if self.has(PowerupKind::FastSpin) {
            FAST_SPIN_MULT
        } else {
            1.0
        };
        let charged = CHARGED_SPIN_SPEED * mult;
        charged + (self.spin_speed * mult - charged) * (1.0 - self.charge).powi(2)
    }

    pub fn charge_time(&self) -> f32 {
        if self.has(PowerupKind::FastShooting) {
            CHARGE_TIME * FAST_CHARGE_MULT
        } else {
            CHARGE_TIME
        }
    }

    /// Minimum charge that releases as a shot instead of fizzling.
    pub fn charge_threshold(&self) -> f32 {
        if self.has(PowerupKind::FastShooting) {
            FAST_CHARGE_THRESHOLD
        } else {
            CHARGE_THRESHOLD
        }
    }

    pub fn knockback(&self) -> f32 {
        if self.has(PowerupKind::DoubleShot) {
            FIRE_KNOCKBACK * DOUBLE_SHOT_KNOCKBACK_MULT
        } else {
            FIRE_KNOCKBACK
        }
    }

    /// Velocity multiplier for wall-reflected components.
    pub fn wall_decel(&self) -> f32 {
        if self.has(PowerupKind::SlipperySocks) {
            SLIPPERY_WALL_DECEL
        } else {
            PLAYER_WALL_DECEL
        }
    }

    /// Unit facing vector.
    pub fn facing(&self) -> Vec2 {
        crate::facing(self.angle)
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub owner: EntityId,
    pub body: Body,
    pub damage: f32,
    pub age: f32,
    /// Wall reflections so far; bouncy bullets stop reflecting past the limit
    pub bounces: u32,
    pub since_trail: f32,
    pub destroyed: bool,
}

impl Bullet {
    pub fn new(id: EntityId, owner: EntityId, pos: Vec2, vel: Vec2, damage: f32) -> Self {
        let mut body = Body::new(pos, BULLET_RADIUS);
        body.vel = vel;
        Self {
            id,
            owner,
            body,
            damage,
            age: 0.0,
            bounces: 0,
            since_trail: 0.0,
            destroyed: false,
        }
    }
}

/// Hostile entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Sits still until shoved; thuds into walls like furniture
    Lurker,
    /// Wanders at a fixed speed, reflecting elastically off walls
    Bouncer,
}

/// A hostile entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub body: Body,
    pub hp: f32,
    pub bounces: u32,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            body: Body::new(pos, ENEMY_RADIUS),
            hp: ENEMY_HP,
            bounces: 0,
        }
    }

    pub fn wall_decel(&self) -> f32 {
        match self.kind {
            EnemyKind::Lurker => OBSTACLE_WALL_DECEL,
            EnemyKind::Bouncer => ELASTIC_DECEL,
        }
    }
}

/// Decorative particle kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Chunk thrown off a dying player; tumbles and skids along walls
    Debris,
    /// Faint dot left behind a bullet every few milliseconds
    Trail,
    /// Expanding flash where a bullet died; anchored in place
    Flash,
}

/// A decorative particle. Debris and trails are full movers and bounce off
/// tiles with the shared resolver; flashes just age out where they spawned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub body: Body,
    /// Tumble rate in degrees per second, halving every second
    pub spin: f32,
    pub angle: f32,
    /// Fraction of velocity kept per second
    pub drag: f32,
    pub age: f32,
    pub ttl: Option<f32>,
}

impl Particle {
    pub fn debris(pos: Vec2, vel: Vec2, spin: f32) -> Self {
        let mut body = Body::new(pos, PARTICLE_RADIUS);
        body.vel = vel;
        Self {
            kind: ParticleKind::Debris,
            body,
            spin,
            angle: 0.0,
            drag: DEBRIS_DRAG,
            age: 0.0,
            ttl: None,
        }
    }

    pub fn trail(pos: Vec2) -> Self {
        Self {
            kind: ParticleKind::Trail,
            body: Body::new(pos, PARTICLE_RADIUS),
            spin: 0.0,
            angle: 0.0,
            drag: DEBRIS_DRAG,
            age: 0.0,
            ttl: Some(TRAIL_TTL),
        }
    }

    pub fn flash(pos: Vec2) -> Self {
        Self {
            kind: ParticleKind::Flash,
            body: Body::new(pos, PARTICLE_RADIUS),
            spin: 0.0,
            angle: 0.0,
            drag: 1.0,
            age: 0.0,
            ttl: Some(FLASH_TTL),
        }
    }
}

/// A powerup pickup. Drops in from above the arena, lands at its spawn
/// point, and is collected by the first player to touch it once landed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical offset of the falling sprite; negative until landing
    pub drop_offset: f32,
    pub landed: bool,
    pub age: f32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            radius: POWERUP_RADIUS,
            drop_offset: -pos.y,
            landed: false,
            age: 0.0,
        }
    }
}

/// Contact and lifecycle notifications, drained by the caller each frame.
/// The simulation never reads these back; they exist so audio and effect
/// front ends can react without the core knowing about them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ShotFired { player: EntityId },
    WallBounce { pos: Vec2 },
    BulletExploded { pos: Vec2 },
    PlayerHurt { player: EntityId },
    PlayerDied { player: EntityId },
    PlayersBumped { a: EntityId, b: EntityId },
    EnemyDied { enemy: EntityId },
    PowerupLanded { kind: PowerupKind },
    PowerupCollected { player: EntityId, kind: PowerupKind },
    DoorsUnlocked,
}

fn replay_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state for one arena session. Built when the session
/// starts, discarded when it ends; identical seeds and inputs replay
/// identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub seed: u64,
    #[serde(skip, default = "replay_rng")]
    pub(crate) rng: Pcg32,
    pub room: Room,
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub powerups: Vec<Powerup>,
    pub events: Vec<Event>,
    /// Simulated seconds since the session started
    pub time: f32,
    /// Seconds until the next powerup drop
    pub next_powerup: f32,
    next_id: EntityId,
}

impl World {
    pub fn new(room: Room, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            room,
            players: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            time: 0.0,
            next_powerup: FIRST_POWERUP_WAIT,
            next_id: 1,
        }
    }

    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seat a player at the room's numbered spawn point (1-4). Returns the
    /// new player's id, or `None` if the level has no such spawn.
    pub fn spawn_player(&mut self, slot: usize) -> Option<EntityId> {
        let pos = self.room.spawn(slot)?;
        let id = self.next_entity_id();
        self.players.push(Player::new(id, pos));
        Some(id)
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos));
        id
    }

    pub fn player(&self, id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Whether `target` is in the friendly set of `owner`'s bullets.
    pub fn is_friendly(&self, owner: EntityId, target: EntityId) -> bool {
        self.player(owner).is_some_and(|p| p.friendly.contains(&target))
    }

    /// Hand the accumulated events to the caller, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

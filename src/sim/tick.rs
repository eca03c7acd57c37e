//! Per-frame world update
//!
//! One call per rendered frame. The pass order is part of the contract:
//! room bookkeeping, powerup spawning, then particles, bullets, hostiles
//! (reverse order), players (reverse order), and pickups (reverse order),
//! so anything that removes itself mid-pass stays safe. Collections that
//! can shrink during their own pass are taken out of the world, walked, and
//! swept back in; cross-collection destruction goes through flags plus a
//! retain.

use glam::Vec2;
use rand::Rng;

use super::collision::{self, Body, Bounce};
use super::state::{
    Bullet, EnemyKind, EntityId, Event, Particle, ParticleKind, Player, Powerup, PowerupKind,
    World,
};
use crate::consts::*;

/// Per-player button state for one frame. Binding devices to players
/// happens outside the simulation; indices line up with `World::players`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Fire button went down this frame
    pub pressed: bool,
    /// Fire button came up this frame
    pub released: bool,
}

/// Spawn weights for timed powerup drops.
const POWERUP_WEIGHTS: &[(PowerupKind, u32)] = &[
    (PowerupKind::SlipperySocks, 10),
    (PowerupKind::FastSpin, 10),
    (PowerupKind::DoubleShot, 7),
    (PowerupKind::Bouncy, 7),
    (PowerupKind::FastShooting, 7),
];

/// Advance the world by one frame. `dt` is wall-clock seconds, clamped to
/// `MAX_FRAME_DT` so one long frame cannot tunnel a fast mover through a
/// wall.
pub fn tick(world: &mut World, inputs: &[PlayerInput], dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);
    world.time += dt;

    update_doors(world);
    update_powerup_spawning(world, dt);
    update_particles(world, dt);
    update_bullets(world, dt);
    update_enemies(world, dt);
    update_players(world, inputs, dt);
    update_powerups(world, dt);
}

/// Doors hold until the last hostile falls.
fn update_doors(world: &mut World) {
    if world.enemies.is_empty() && world.room.any_door_locked() {
        world.room.unlock_doors();
        world.events.push(Event::DoorsUnlocked);
    }
}

fn update_powerup_spawning(world: &mut World, dt: f32) {
    if world.room.powerup_spawns().is_empty() {
        return;
    }
    world.next_powerup -= dt;
    if world.next_powerup > 0.0 {
        return;
    }
    world.next_powerup = world.rng.random_range(POWERUP_MIN_WAIT..POWERUP_MAX_WAIT);

    let total: u32 = POWERUP_WEIGHTS.iter().map(|&(_, w)| w).sum();
    let mut roll = world.rng.random_range(0..total);
    let mut kind = POWERUP_WEIGHTS[0].0;
    for &(candidate, weight) in POWERUP_WEIGHTS {
        if roll < weight {
            kind = candidate;
            break;
        }
        roll -= weight;
    }

    let spot = world.rng.random_range(0..world.room.powerup_spawns().len());
    let pos = world.room.powerup_spawns()[spot];
    // A drop onto an occupied spot is skipped outright.
    if world.powerups.iter().any(|p| p.pos == pos) {
        return;
    }
    world.powerups.push(Powerup::new(kind, pos));
}

fn update_particles(world: &mut World, dt: f32) {
    let mut particles = std::mem::take(&mut world.particles);
    for particle in &mut particles {
        particle.age += dt;
        if particle.kind == ParticleKind::Flash {
            continue;
        }
        particle.body.vel *= particle.drag.powf(dt);
        particle.body.pos += particle.body.vel * dt;
        particle.angle += particle.spin * dt;
        particle.spin *= 0.5_f32.powf(dt);
        collision::resolve_room_contacts(
            &mut particle.body,
            &world.room,
            Bounce::cleared(OBSTACLE_WALL_DECEL),
        );
    }
    particles.retain(|p| p.ttl.is_none_or(|ttl| p.age <= ttl));
    world.particles = particles;
}

fn update_bullets(world: &mut World, dt: f32) {
    // Snapshot which owners currently shoot bouncy bullets; the capability
    // can expire while a bullet is in flight.
    let bouncy_owners: Vec<EntityId> = world
        .players
        .iter()
        .filter(|p| p.has(PowerupKind::Bouncy))
        .map(|p| p.id)
        .collect();

    let mut bullets = std::mem::take(&mut world.bullets);
    for bullet in &mut bullets {
        if bullet.destroyed {
            continue;
        }
        bullet.age += dt;
        bullet.since_trail += dt;
        while bullet.since_trail > TRAIL_INTERVAL {
            world.particles.push(Particle::trail(bullet.body.pos));
            bullet.since_trail -= TRAIL_INTERVAL;
        }
        bullet.body.pos += bullet.body.vel * dt;

        if bouncy_owners.contains(&bullet.owner) && bullet.bounces < BULLET_BOUNCE_LIMIT {
            if collision::resolve_room_contacts(
                &mut bullet.body,
                &world.room,
                Bounce::cleared(ELASTIC_DECEL),
            ) {
                bullet.bounces += 1;
                world.events.push(Event::WallBounce {
                    pos: bullet.body.pos,
                });
            }
        } else {
            // Plain bullets pop the moment their center enters a blocking
            // cell; so does a bouncy one that spent its reflections.
            let (cx, cy) = world.room.world_to_cell_discrete(bullet.body.pos);
            if world.room.cell_is_blocking(cx, cy) {
                explode_bullet(bullet, &mut world.particles, &mut world.events);
            }
        }
    }
    bullets.retain(|b| !b.destroyed);
    world.bullets = bullets;
}

fn explode_bullet(bullet: &mut Bullet, particles: &mut Vec<Particle>, events: &mut Vec<Event>) {
    bullet.destroyed = true;
    particles.push(Particle::flash(bullet.body.pos));
    events.push(Event::BulletExploded {
        pos: bullet.body.pos,
    });
}

/// Run every live bullet against one damageable body, skipping bullets
/// whose owner counts `target` as friendly. Returns the total damage dealt
/// and the velocity of the last bullet that connected, for knockback.
fn bullet_strikes(
    target: EntityId,
    body: Body,
    players: &[Player],
    bullets: &mut [Bullet],
    particles: &mut Vec<Particle>,
    events: &mut Vec<Event>,
) -> (f32, Option<Vec2>) {
    let mut damage = 0.0;
    let mut last_hit_vel = None;
    for bullet in bullets.iter_mut() {
        if bullet.destroyed {
            continue;
        }
        if !collision::circle_hit(body.pos, body.radius, bullet.body.pos, bullet.body.radius) {
            continue;
        }
        let friendly = players
            .iter()
            .find(|p| p.id == bullet.owner)
            .is_some_and(|p| p.friendly.contains(&target));
        if friendly {
            continue;
        }
        damage += bullet.damage;
        last_hit_vel = Some(bullet.body.vel);
        explode_bullet(bullet, particles, events);
    }
    (damage, last_hit_vel)
}

fn update_enemies(world: &mut World, dt: f32) {
    let mut enemies = std::mem::take(&mut world.enemies);
    let mut idx = enemies.len();
    while idx > 0 {
        idx -= 1;
        let enemy = &mut enemies[idx];
        enemy.body.pos += enemy.body.vel * dt;

        if enemy.kind == EnemyKind::Bouncer {
            if enemy.body.vel == Vec2::ZERO {
                let angle = world.rng.random_range(0.0..std::f32::consts::TAU);
                enemy.body.vel = Vec2::new(angle.sin(), angle.cos()) * BOUNCER_SPEED;
            }
            let speed = enemy.body.vel.length();
            if speed > 0.0 && speed < BOUNCER_SPEED {
                enemy.body.vel *= BOUNCER_SPEED / speed;
            }
        }

        let decel = enemy.wall_decel();
        if collision::resolve_room_contacts(
            &mut enemy.body,
            &world.room,
            Bounce::cleared(decel),
        ) {
            enemy.bounces += 1;
        }

        let (damage, _) = bullet_strikes(
            enemy.id,
            enemy.body,
            &world.players,
            &mut world.bullets,
            &mut world.particles,
            &mut world.events,
        );
        enemy.hp -= damage;
        if enemy.hp <= 0.0 {
            world.events.push(Event::EnemyDied { enemy: enemy.id });
            enemies.remove(idx);
        }
    }
    world.enemies = enemies;
}

fn update_players(world: &mut World, inputs: &[PlayerInput], dt: f32) {
    for i in (0..world.players.len()).rev() {
        let input = inputs.get(i).copied().unwrap_or_default();

        // Failsafe: a mover that somehow escaped the grid is brought back.
        {
            let (rx, ry, rw, rh) = world.room.bounds();
            let player = &mut world.players[i];
            let pos = player.body.pos;
            if pos.x < rx || pos.y < ry || pos.x > rx + rw || pos.y > ry + rh {
                log::warn!("player {} left the arena, resetting to center", player.id);
                player.body.pos = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
            }
        }

        // Effects age out.
        {
            let player = &mut world.players[i];
            for effect in &mut player.effects {
                effect.age += dt;
            }
            player.effects.retain(|e| e.age <= e.kind.duration());
        }

        // Charge begins on press; the shot resolves on release.
        let mut fire = false;
        {
            let player = &mut world.players[i];
            player.since_fire += dt;
            if player.since_fire >= player.sail_window {
                player.sailing = false;
            }
            if !player.dead {
                if input.pressed {
                    player.charging = true;
                }
                if input.released {
                    player.charging = false;
                    if player.charge > player.charge_threshold() {
                        fire = true;
                    } else {
                        player.charge = 0.0;
                    }
                }
            }
        }
        if fire {
            fire_shot(world, i);
        }

        // Incoming bullets; corpses are past caring.
        if !world.players[i].dead {
            let (damage, knock_vel) = bullet_strikes(
                world.players[i].id,
                world.players[i].body,
                &world.players,
                &mut world.bullets,
                &mut world.particles,
                &mut world.events,
            );
            if damage > 0.0 {
                let id = world.players[i].id;
                {
                    let player = &mut world.players[i];
                    player.hp -= damage;
                    if let Some(vel) = knock_vel {
                        player.body.vel += vel * BULLET_KNOCKBACK_FACTOR;
                    }
                }
                world.events.push(Event::PlayerHurt { player: id });
                if world.players[i].hp <= 0.0 && !world.players[i].dead {
                    kill_player(world, i);
                }
            }
        }

        separate_players(world, i);

        // Coasting drag, slippery speed cap, then integrate.
        {
            let player = &mut world.players[i];
            let slippery = player.has(PowerupKind::SlipperySocks);
            let speed = player.body.vel.length();
            if !player.sailing && speed > 0.0 && !slippery {
                player.body.vel *= PLAYER_DRAG.powf(dt);
            }
            if slippery && speed > SLIPPERY_MAX_SPEED {
                player.body.vel *= SLIPPERY_MAX_SPEED / speed;
            }
            player.body.pos += player.body.vel * dt;

            player.angle += player.spin_velocity() * dt;
            if player.charging {
                player.charge = (player.charge + dt / player.charge_time()).min(1.0);
            }
            if player.dead {
                player.spin_speed *= DEAD_SPIN_DECAY.powf(dt);
            }
        }

        // Walls last, so the frame ends with the player clear of geometry.
        {
            let decel = world.players[i].wall_decel();
            let mut body = world.players[i].body;
            let contact =
                collision::resolve_room_contacts(&mut body, &world.room, Bounce::flush(decel));
            world.players[i].body = body;
            if contact && body.vel.length() > BOUNCE_EVENT_MIN_SPEED {
                world.events.push(Event::WallBounce { pos: body.pos });
            }
        }
    }
}

fn fire_shot(world: &mut World, idx: usize) {
    let (id, pos, angle, charge, knockback, double) = {
        let player = &world.players[idx];
        (
            player.id,
            player.body.pos,
            player.angle,
            player.charge,
            player.knockback(),
            player.has(PowerupKind::DoubleShot),
        )
    };
    let offsets: &[f32] = if double {
        &[-DOUBLE_SHOT_SPREAD, DOUBLE_SHOT_SPREAD]
    } else {
        &[0.0]
    };

    let mut recoil = Vec2::ZERO;
    for &offset in offsets {
        let dir = crate::facing(angle + offset);
        recoil -= dir * knockback * charge;
        let bullet_id = world.next_entity_id();
        world
            .bullets
            .push(Bullet::new(bullet_id, id, pos, dir * BULLET_SPEED, BULLET_DAMAGE));
    }

    let player = &mut world.players[idx];
    player.body.vel += recoil;
    player.sailing = true;
    player.since_fire = 0.0;
    player.sail_window = SAIL_TIME * charge;
    player.charge = 0.0;
    world.events.push(Event::ShotFired { player: id });
}

fn kill_player(world: &mut World, idx: usize) {
    let (id, pos, vel, angle) = {
        let player = &mut world.players[idx];
        player.hp = 0.0;
        player.dead = true;
        player.charging = false;
        player.charge = 0.0;
        player.effects.clear();
        (player.id, player.body.pos, player.body.vel, player.angle)
    };
    for k in 0..DEATH_DEBRIS_COUNT {
        let theta =
            k as f32 / DEATH_DEBRIS_COUNT as f32 * std::f32::consts::TAU + angle.to_radians();
        let speed = world.rng.random::<f32>().powi(2) * 140.0 + 60.0;
        let burst = Vec2::new(speed * theta.cos() + vel.x, -speed * theta.sin() + vel.y);
        let spin = world.rng.random_range(-100.0..100.0);
        world.particles.push(Particle::debris(pos, burst, spin));
    }
    world.events.push(Event::PlayerDied { player: id });
}

/// Elastic shoulder-check between player `i` and every earlier player, so
/// each pair resolves once per frame. Both bodies move, both take the
/// impulse.
fn separate_players(world: &mut World, i: usize) {
    if i == 0 {
        return;
    }
    let (head, tail) = world.players.split_at_mut(i);
    let pi = &mut tail[0];
    for pj in head.iter_mut() {
        if collision::separate_pair(&mut pj.body, &mut pi.body, PLAYER_BUMP_IMPULSE) {
            world.events.push(Event::PlayersBumped { a: pj.id, b: pi.id });
            // A shoved husk picks up a fresh tumble.
            for p in [&mut *pj, &mut *pi] {
                if p.dead {
                    p.spin_speed = world.rng.random_range(-120.0..120.0);
                }
            }
        }
    }
}

fn update_powerups(world: &mut World, dt: f32) {
    let mut powerups = std::mem::take(&mut world.powerups);
    let mut idx = powerups.len();
    while idx > 0 {
        idx -= 1;
        let powerup = &mut powerups[idx];
        powerup.age += dt;
        if powerup.landed {
            // Hover bob while waiting to be picked up.
            powerup.drop_offset = 6.0 * (powerup.age * 6.0).sin();
        } else {
            powerup.drop_offset += POWERUP_FALL_SPEED * dt;
            if powerup.drop_offset >= 0.0 {
                powerup.drop_offset = 0.0;
                powerup.landed = true;
                world.events.push(Event::PowerupLanded { kind: powerup.kind });
            }
        }
        if powerup.landed {
            let mut collected = None;
            for player in &mut world.players {
                if player.body.pos.distance(powerup.pos) < player.body.radius + powerup.radius {
                    player.grant(powerup.kind);
                    collected = Some(player.id);
                    break;
                }
            }
            if let Some(player_id) = collected {
                world.events.push(Event::PowerupCollected {
                    player: player_id,
                    kind: powerup.kind,
                });
                powerups.remove(idx);
            }
        }
    }
    world.powerups = powerups;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;

    const BOX_LEVEL: &str = "\
XXXXXXXXX
X.......X
X.1...2.X
X...P...X
X.3...4.X
X.......X
XXXXXXXXX
";

    fn arena_world() -> World {
        World::new(Room::parse(BOX_LEVEL).unwrap(), 42)
    }

    #[test]
    fn oversized_frames_are_clamped() {
        let mut world = arena_world();
        tick(&mut world, &[], 10.0);
        assert_eq!(world.time, MAX_FRAME_DT);
    }

    #[test]
    fn bouncy_bullets_reflect_twice_then_pop() {
        let mut world = arena_world();
        let shooter = world.spawn_player(1).unwrap();
        world.player_mut(shooter).unwrap().grant(PowerupKind::Bouncy);

        // Launch along the open middle row, away from the shooter.
        let start = world.room.cell_to_world(4, 5);
        let id = world.next_entity_id();
        world
            .bullets
            .push(Bullet::new(id, shooter, start, Vec2::new(800.0, 0.0), BULLET_DAMAGE));

        let mut bounces = 0;
        let mut explosions = 0;
        for _ in 0..400 {
            tick(&mut world, &[], 1.0 / 64.0);
            for event in world.drain_events() {
                match event {
                    Event::WallBounce { .. } => bounces += 1,
                    Event::BulletExploded { .. } => explosions += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(bounces, 2);
        assert_eq!(explosions, 1);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn plain_bullets_pop_on_first_wall_contact() {
        let mut world = arena_world();
        let shooter = world.spawn_player(1).unwrap();
        let start = world.room.cell_to_world(4, 5);
        let id = world.next_entity_id();
        world
            .bullets
            .push(Bullet::new(id, shooter, start, Vec2::new(800.0, 0.0), BULLET_DAMAGE));

        let mut explosions = 0;
        for _ in 0..100 {
            tick(&mut world, &[], 1.0 / 64.0);
            for event in world.drain_events() {
                if matches!(event, Event::BulletExploded { .. }) {
                    explosions += 1;
                }
            }
        }
        assert_eq!(explosions, 1);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn friendly_targets_are_spared() {
        let mut world = arena_world();
        let shooter = world.spawn_player(1).unwrap();
        let buddy = world.spawn_player(2).unwrap();
        let target_pos = world.player(buddy).unwrap().body.pos;
        world.player_mut(shooter).unwrap().friendly.push(buddy);

        let id = world.next_entity_id();
        world
            .bullets
            .push(Bullet::new(id, shooter, target_pos, Vec2::ZERO, BULLET_DAMAGE));
        tick(&mut world, &[], 1.0 / 64.0);

        assert_eq!(world.player(buddy).unwrap().hp, PLAYER_MAX_HP);
        assert_eq!(world.bullets.len(), 1);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn hits_apply_damage_once_and_destroy_the_bullet() {
        let mut world = arena_world();
        let shooter = world.spawn_player(1).unwrap();
        let target = world.spawn_player(2).unwrap();
        let target_pos = world.player(target).unwrap().body.pos;

        let id = world.next_entity_id();
        world
            .bullets
            .push(Bullet::new(id, shooter, target_pos, Vec2::ZERO, BULLET_DAMAGE));
        tick(&mut world, &[], 1.0 / 64.0);

        let events = world.drain_events();
        assert_eq!(world.player(target).unwrap().hp, PLAYER_MAX_HP - BULLET_DAMAGE);
        assert!(world.bullets.is_empty());
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::BulletExploded { .. }))
                .count(),
            1
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::PlayerHurt { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn releasing_a_full_charge_fires_with_recoil() {
        let mut world = arena_world();
        world.spawn_player(1).unwrap();
        // Park at the room center so the recoil can't reach a wall this tick.
        world.players[0].body.pos = world.room.cell_to_world(4, 3);
        let dt = 1.0 / 16.0;

        tick(
            &mut world,
            &[PlayerInput {
                pressed: true,
                released: false,
            }],
            dt,
        );
        for _ in 0..20 {
            tick(&mut world, &[], dt);
        }
        assert_eq!(world.players[0].charge, 1.0);

        let angle = world.players[0].angle;
        tick(
            &mut world,
            &[PlayerInput {
                pressed: false,
                released: true,
            }],
            dt,
        );

        assert_eq!(world.bullets.len(), 1);
        let dir = crate::facing(angle);
        assert!((world.bullets[0].body.vel - dir * BULLET_SPEED).length() < 1e-3);
        assert!(world.players[0].sailing);
        assert!(world.players[0].body.vel.dot(dir) < 0.0);
        let id = world.players[0].id;
        assert!(world
            .drain_events()
            .contains(&Event::ShotFired { player: id }));
    }

    #[test]
    fn a_short_tap_fizzles() {
        let mut world = arena_world();
        world.spawn_player(1).unwrap();
        let dt = 1.0 / 16.0;
        tick(
            &mut world,
            &[PlayerInput {
                pressed: true,
                released: false,
            }],
            dt,
        );
        tick(
            &mut world,
            &[PlayerInput {
                pressed: false,
                released: true,
            }],
            dt,
        );
        assert!(world.bullets.is_empty());
        assert_eq!(world.players[0].charge, 0.0);
    }

    #[test]
    fn a_bullet_drops_a_hostile() {
        let mut world = arena_world();
        let shooter = world.spawn_player(1).unwrap();
        let pos = world.room.cell_to_world(6, 5);
        let enemy = world.spawn_enemy(EnemyKind::Lurker, pos);

        let id = world.next_entity_id();
        world
            .bullets
            .push(Bullet::new(id, shooter, pos, Vec2::ZERO, BULLET_DAMAGE));
        tick(&mut world, &[], 1.0 / 64.0);

        assert!(world.enemies.is_empty());
        assert!(world.bullets.is_empty());
        assert!(world.drain_events().contains(&Event::EnemyDied { enemy }));
    }

    #[test]
    fn bouncers_start_moving_at_full_speed() {
        let mut world = arena_world();
        world.spawn_enemy(EnemyKind::Bouncer, world.room.cell_to_world(4, 3));
        tick(&mut world, &[], 1.0 / 64.0);
        let speed = world.enemies[0].body.vel.length();
        assert!((speed - BOUNCER_SPEED).abs() < 1e-3);
    }

    #[test]
    fn doors_open_once_the_arena_is_clear() {
        let level = "XXXDXXX\nX.....X\nX.....X\nXXXXXXX\n";
        let mut world = World::new(Room::parse(level).unwrap(), 1);
        world.spawn_enemy(EnemyKind::Lurker, world.room.cell_to_world(3, 2));

        tick(&mut world, &[], 1.0 / 64.0);
        assert!(world.room.any_door_locked());
        world.drain_events();

        world.enemies.clear();
        tick(&mut world, &[], 1.0 / 64.0);
        assert!(!world.room.any_door_locked());
        assert!(world.drain_events().contains(&Event::DoorsUnlocked));
    }

    #[test]
    fn landed_powerups_grant_their_effect() {
        let mut world = arena_world();
        let player_id = world.spawn_player(1).unwrap();
        let pos = world.player(player_id).unwrap().body.pos;
        let mut drop = Powerup::new(PowerupKind::SlipperySocks, pos);
        drop.drop_offset = -1.0;
        world.powerups.push(drop);

        tick(&mut world, &[], 1.0 / 64.0);
        let events = world.drain_events();
        assert!(world.powerups.is_empty());
        assert!(world.player(player_id).unwrap().has(PowerupKind::SlipperySocks));
        assert!(events.contains(&Event::PowerupLanded {
            kind: PowerupKind::SlipperySocks
        }));
        assert!(events.contains(&Event::PowerupCollected {
            player: player_id,
            kind: PowerupKind::SlipperySocks
        }));
    }

    #[test]
    fn effects_age_out() {
        let mut world = arena_world();
        let id = world.spawn_player(1).unwrap();
        world.player_mut(id).unwrap().grant(PowerupKind::Bouncy);
        // 280 clamped frames is just past the 18 second duration.
        for _ in 0..280 {
            tick(&mut world, &[], 1.0);
        }
        assert!(!world.player(id).unwrap().has(PowerupKind::Bouncy));
    }

    #[test]
    fn overlapping_players_are_pushed_apart() {
        let mut world = arena_world();
        let a = world.spawn_player(1).unwrap();
        let b = world.spawn_player(2).unwrap();
        let pos = world.room.cell_to_world(4, 3);
        world.player_mut(a).unwrap().body.pos = pos;
        world.player_mut(b).unwrap().body.pos = pos + Vec2::new(30.0, 0.0);

        tick(&mut world, &[], 1.0 / 64.0);

        let pa = world.player(a).unwrap().body.pos;
        let pb = world.player(b).unwrap().body.pos;
        assert!(pa.distance(pb) >= 2.0 * PLAYER_RADIUS - 1e-3);
        assert!(world
            .drain_events()
            .iter()
            .any(|e| matches!(e, Event::PlayersBumped { .. })));
    }

    #[test]
    fn a_lethal_hit_kills_and_scatters_debris() {
        let mut world = arena_world();
        let shooter = world.spawn_player(1).unwrap();
        let victim = world.spawn_player(2).unwrap();
        world.player_mut(victim).unwrap().hp = BULLET_DAMAGE;
        let pos = world.player(victim).unwrap().body.pos;

        let id = world.next_entity_id();
        world
            .bullets
            .push(Bullet::new(id, shooter, pos, Vec2::ZERO, BULLET_DAMAGE));
        tick(&mut world, &[], 1.0 / 64.0);

        let events = world.drain_events();
        assert!(world.player(victim).unwrap().dead);
        assert_eq!(world.player(victim).unwrap().hp, 0.0);
        assert!(events.contains(&Event::PlayerDied { player: victim }));
        let debris = world
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Debris)
            .count();
        assert_eq!(debris, DEATH_DEBRIS_COUNT as usize);
    }
}

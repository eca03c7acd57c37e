//! Grid Brawl entry point
//!
//! Headless demo loop: loads a room (a bundled one, or a level file passed
//! as the first argument), seats two players and a wandering hostile, then
//! runs the simulation at a fixed cadence while logging the event stream.
//! Rendering/audio front ends sit on top of the library crate; this binary
//! exercises the whole simulation without them.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use grid_brawl::room::Room;
use grid_brawl::settings::Settings;
use grid_brawl::sim::{EnemyKind, PlayerInput, World, tick};

const FRAME_DT: f32 = 1.0 / 64.0;
const DEMO_SECONDS: u32 = 30;

const DEFAULT_LEVEL: &str = "\
XXXXXXXXXXXXXXXXX
X...............X
X.1...........2.X
X....XX..XX.....X
X....XX..XX.....D
X.......P.......X
X.3...........4.X
X.......P.......X
XXXXXXXXXXXXXXXXX
";

fn main() {
    env_logger::init();

    let settings = Settings::load(Path::new("settings.json"));

    let args: Vec<String> = std::env::args().collect();
    let room = match args.get(1) {
        Some(path) => Room::from_file(Path::new(path)),
        None => Room::parse(DEFAULT_LEVEL),
    };
    let room = match room {
        Ok(room) => room,
        Err(err) => {
            log::error!("failed to load level: {err}");
            std::process::exit(1);
        }
    };

    let seed = settings.fixed_seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    log::info!(
        "arena {}x{} tiles, {} door(s), seed {seed}",
        room.width(),
        room.height(),
        room.doors().len()
    );

    let mut world = World::new(room, seed);
    for slot in 1..=2 {
        if world.spawn_player(slot).is_none() {
            log::error!("level defines no spawn point {slot}");
            std::process::exit(1);
        }
    }
    let center = world
        .room
        .cell_to_world(world.room.width() / 2, world.room.height() / 2);
    world.spawn_enemy(EnemyKind::Bouncer, center);

    for frame in 0..DEMO_SECONDS * 64 {
        let t = frame as f32 * FRAME_DT;
        let inputs = [scripted_input(t, 0.0), scripted_input(t, 0.9)];
        tick(&mut world, &inputs, FRAME_DT);
        for event in world.drain_events() {
            log::info!("[{t:6.2}s] {event:?}");
        }
    }

    for player in &world.players {
        log::info!(
            "player {}: hp {:.0}{}",
            player.id,
            player.hp,
            if player.dead { " (down)" } else { "" }
        );
    }
    log::info!(
        "{} bullets, {} particles, {} powerups in flight after {DEMO_SECONDS}s",
        world.bullets.len(),
        world.particles.len(),
        world.powerups.len()
    );
}

/// Crude stand-in for a human: press at the top of each two-second cycle,
/// release a full charge 1.5 seconds in.
fn scripted_input(t: f32, phase: f32) -> PlayerInput {
    let cycle = (t + phase) % 2.0;
    PlayerInput {
        pressed: cycle < FRAME_DT,
        released: (cycle - 1.5).abs() < FRAME_DT / 2.0,
    }
}

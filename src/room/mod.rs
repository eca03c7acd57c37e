//! The arena room: a fixed grid of layered tile stacks
//!
//! A `Room` is built once from a level description when an arena session
//! starts and discarded when it ends. The grid extent never changes after
//! construction; the only mutable state is the blocking flag on door tiles.
//! Everything a mover needs is exposed as queries: world↔cell transforms,
//! per-cell blocking, spawn points, and the door registry.

pub mod autotile;
pub mod level;

pub use autotile::{Corner, TileVariant, classify};
pub use level::{LevelError, LevelMap, Symbol};

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, TILE_SIZE};

/// One entry in a cell's paint stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tile {
    /// Open floor, drawn under everything
    Floor,
    /// Solid wall with its boundary variant, classified once at build time
    Wall { variant: TileVariant },
    /// A wall that can open; `blocking` toggles through the room's door
    /// registry, the variant stays fixed
    Door { variant: TileVariant, blocking: bool },
}

impl Tile {
    /// Whether this entry currently blocks movement.
    pub fn is_blocking(&self) -> bool {
        match self {
            Tile::Floor => false,
            Tile::Wall { .. } => true,
            Tile::Door { blocking, .. } => *blocking,
        }
    }

    /// Draw layer: floors underneath movers, walls above them.
    pub fn layer(&self) -> u8 {
        match self {
            Tile::Floor => 0,
            Tile::Wall { .. } | Tile::Door { .. } => 2,
        }
    }

    /// Cached boundary variant, for wall-like entries.
    pub fn variant(&self) -> Option<TileVariant> {
        match self {
            Tile::Floor => None,
            Tile::Wall { variant } | Tile::Door { variant, .. } => Some(*variant),
        }
    }
}

/// A grid position's ordered tile stack. Paint order equals stack order;
/// the stack composition is fixed at build time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    tiles: Vec<Tile>,
}

impl Cell {
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// A cell blocks iff any entry in its stack blocks.
    pub fn is_blocking(&self) -> bool {
        self.tiles.iter().any(Tile::is_blocking)
    }
}

/// The arena grid plus everything else read off the level description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    width: i32,
    height: i32,
    /// World position of cell (0, 0)'s center; the grid is centered in the
    /// arena viewport at an integer pixel offset
    origin: Vec2,
    /// Row-major, `height * width`
    cells: Vec<Cell>,
    spawns: [Option<Vec2>; 4],
    powerup_spawns: Vec<Vec2>,
    /// Cell coordinates of every door tile
    doors: Vec<(i32, i32)>,
}

impl Room {
    /// Build a room from a parsed symbol grid.
    pub fn from_level(map: &LevelMap) -> Self {
        let width = map.width() as i32;
        let height = map.height() as i32;
        let origin = Vec2::new(
            ((ARENA_WIDTH - TILE_SIZE * (width - 1) as f32) / 2.0).floor(),
            ((ARENA_HEIGHT - TILE_SIZE * (height - 1) as f32) / 2.0).floor(),
        );
        let mut room = Self {
            width,
            height,
            origin,
            cells: vec![Cell::default(); (width * height) as usize],
            spawns: [None; 4],
            powerup_spawns: Vec::new(),
            doors: Vec::new(),
        };

        for cy in 0..height {
            for cx in 0..width {
                // Symbol presence is guaranteed in range, but stay total.
                let Some(symbol) = map.symbol(cx, cy) else {
                    continue;
                };
                let center = room.cell_to_world(cx, cy);
                let stack = &mut room.cells[(cy * width + cx) as usize].tiles;
                match symbol {
                    Symbol::Wall => stack.push(Tile::Wall {
                        variant: classify(map, cx, cy),
                    }),
                    Symbol::Door => {
                        stack.push(Tile::Door {
                            variant: classify(map, cx, cy),
                            blocking: true,
                        });
                        room.doors.push((cx, cy));
                    }
                    _ => {}
                }
                stack.push(Tile::Floor);
                match symbol {
                    Symbol::Spawn(n) => room.spawns[(n - 1) as usize] = Some(center),
                    Symbol::PowerupSpot => room.powerup_spawns.push(center),
                    _ => {}
                }
            }
        }
        room
    }

    /// Parse a level description and build the room in one step.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        Ok(Self::from_level(&LevelMap::parse(text)?))
    }

    /// Load a level file and build the room.
    pub fn from_file(path: &Path) -> Result<Self, LevelError> {
        Ok(Self::from_level(&LevelMap::from_file(path)?))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// World position of the numbered spawn point (1-4), if the level set it.
    pub fn spawn(&self, number: usize) -> Option<Vec2> {
        self.spawns.get(number.checked_sub(1)?).copied().flatten()
    }

    /// Powerup drop points in level order.
    pub fn powerup_spawns(&self) -> &[Vec2] {
        &self.powerup_spawns
    }

    /// World-space bounding rectangle of the grid as `(x, y, w, h)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let min = self.origin - Vec2::splat(TILE_SIZE / 2.0);
        (
            min.x,
            min.y,
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    /// Continuous grid coordinates of a world position.
    pub fn world_to_cell(&self, pos: Vec2) -> Vec2 {
        (pos - self.origin) / TILE_SIZE
    }

    /// Nearest cell to a world position, rounding half up on both axes.
    pub fn world_to_cell_discrete(&self, pos: Vec2) -> (i32, i32) {
        let c = self.world_to_cell(pos);
        ((c.x + 0.5).floor() as i32, (c.y + 0.5).floor() as i32)
    }

    /// World position of a cell's center. Exact inverse of `world_to_cell`
    /// on integer inputs: the tile pitch and origin are whole pixels, so
    /// the round trip has no drift.
    pub fn cell_to_world(&self, cx: i32, cy: i32) -> Vec2 {
        self.origin + Vec2::new(cx as f32, cy as f32) * TILE_SIZE
    }

    /// The cell at grid coordinates, or `None` outside the grid.
    pub fn cell(&self, cx: i32, cy: i32) -> Option<&Cell> {
        if cx < 0 || cy < 0 || cx >= self.width || cy >= self.height {
            return None;
        }
        Some(&self.cells[(cy * self.width + cx) as usize])
    }

    /// Whether the cell blocks movement. Coordinates outside the grid are
    /// defined as open, not an error.
    pub fn cell_is_blocking(&self, cx: i32, cy: i32) -> bool {
        self.cell(cx, cy).is_some_and(Cell::is_blocking)
    }

    /// Cell coordinates of every door tile.
    pub fn doors(&self) -> &[(i32, i32)] {
        &self.doors
    }

    pub fn lock_doors(&mut self) {
        self.set_doors_blocking(true);
    }

    pub fn unlock_doors(&mut self) {
        self.set_doors_blocking(false);
    }

    /// Whether any door is still closed.
    pub fn any_door_locked(&self) -> bool {
        self.doors
            .iter()
            .any(|&(cx, cy)| self.cell_is_blocking(cx, cy))
    }

    fn set_doors_blocking(&mut self, value: bool) {
        for &(cx, cy) in &self.doors {
            let idx = (cy * self.width + cx) as usize;
            for tile in &mut self.cells[idx].tiles {
                if let Tile::Door { blocking, .. } = tile {
                    *blocking = value;
                }
            }
        }
    }
}

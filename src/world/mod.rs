use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod maze;

/// Integer coordinates of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> TileCoord {
        TileCoord { x, y }
    }
}

/// Opaque handle into the external texture atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Sparse tile grid: a tile is a wall iff it has an entry, everything else is
/// open space. Built once at level load and read-only afterwards, so both the
/// collision probes and the ray traversals can share it without coordination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridWorld {
    tiles: HashMap<TileCoord, TextureId>,
}

impl GridWorld {
    pub fn new() -> GridWorld {
        GridWorld::default()
    }

    pub fn insert_wall(&mut self, tile: TileCoord, texture: TextureId) {
        self.tiles.insert(tile, texture);
    }

    pub fn is_wall(&self, tile: TileCoord) -> bool {
        self.tiles.contains_key(&tile)
    }

    pub fn texture_at(&self, tile: TileCoord) -> Option<TextureId> {
        self.tiles.get(&tile).copied()
    }

    pub fn wall_count(&self) -> usize {
        self.tiles.len()
    }

    /// Builds a world from a row-major layout. A `0` cell is open space, any
    /// other value becomes a wall carrying that texture id. Row index is the
    /// Y coordinate, column index the X coordinate.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<GridWorld, WorldError> {
        if rows.is_empty() || rows.iter().all(|row| row.is_empty()) {
            return Err(WorldError::Empty);
        }
        let mut world = GridWorld::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    world.insert_wall(TileCoord::new(x as i32, y as i32), TextureId(cell));
                }
            }
        }
        debug!(
            rows = rows.len(),
            walls = world.wall_count(),
            "built grid world from layout"
        );
        Ok(world)
    }

    /// Loads a level layout from its RON form.
    pub fn from_ron_str(source: &str) -> Result<GridWorld, WorldError> {
        let level: LevelFile = ron::from_str(source)?;
        GridWorld::from_rows(&level.rows)
    }
}

/// On-disk level shape: `(rows: [[1, 1, 1], [1, 0, 1], [1, 1, 1]])`.
#[derive(Debug, Deserialize)]
struct LevelFile {
    rows: Vec<Vec<u32>>,
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to parse level: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("level layout has no tiles")]
    Empty,
}

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::{GridWorld, TextureId, TileCoord};

/// Texture used when the caller passes an empty palette.
const FALLBACK_TEXTURE: TextureId = TextureId(1);

/// Carves a seeded depth-first maze over a `cells_wide` x `cells_high` cell
/// grid and rasterizes it into a closed tile world of
/// `(2 * cells_wide + 1) x (2 * cells_high + 1)` tiles. Cell `(cx, cy)` maps
/// to the open tile `(2 * cx + 1, 2 * cy + 1)`; carved passages open the tile
/// between two adjacent cell centers. Wall textures are drawn from `palette`.
///
/// The same seed always produces the same world.
pub fn generate(
    cells_wide: usize,
    cells_high: usize,
    seed: u64,
    palette: &[TextureId],
) -> GridWorld {
    assert!(cells_wide > 0 && cells_high > 0, "maze needs at least one cell");

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut visited = vec![false; cells_wide * cells_high];
    let mut open = HashSet::new();
    carve(0, cells_wide, cells_high, &mut visited, &mut open, &mut rng);

    let mut world = GridWorld::new();
    for y in 0..(2 * cells_high + 1) as i32 {
        for x in 0..(2 * cells_wide + 1) as i32 {
            let tile = TileCoord::new(x, y);
            if !open.contains(&tile) {
                let texture = palette
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(FALLBACK_TEXTURE);
                world.insert_wall(tile, texture);
            }
        }
    }
    debug!(
        cells_wide,
        cells_high,
        seed,
        walls = world.wall_count(),
        "generated maze world"
    );
    world
}

/// Center tile of a cell, always odd coordinates.
fn center_tile(cell: usize, cells_wide: usize) -> TileCoord {
    let cx = (cell % cells_wide) as i32;
    let cy = (cell / cells_wide) as i32;
    TileCoord::new(2 * cx + 1, 2 * cy + 1)
}

/// Grid neighbors of a cell in up/down/left/right order; `None` past an edge.
fn neighbors_of(cell: usize, cells_wide: usize, cells_high: usize) -> [Option<usize>; 4] {
    let num_cells = cells_wide * cells_high;

    let up = if cell < num_cells - cells_wide {
        Some(cell + cells_wide)
    } else {
        None
    };
    let down = if cell >= cells_wide {
        Some(cell - cells_wide)
    } else {
        None
    };
    let left = if cell % cells_wide != 0 {
        Some(cell - 1)
    } else {
        None
    };
    let right = if (cell + 1) % cells_wide != 0 {
        Some(cell + 1)
    } else {
        None
    };

    [up, down, left, right]
}

fn carve(
    cell: usize,
    cells_wide: usize,
    cells_high: usize,
    visited: &mut [bool],
    open: &mut HashSet<TileCoord>,
    rng: &mut SmallRng,
) {
    visited[cell] = true;
    open.insert(center_tile(cell, cells_wide));

    let mut frontier: Vec<usize> = neighbors_of(cell, cells_wide, cells_high)
        .into_iter()
        .flatten()
        .filter(|&n| !visited[n])
        .collect();
    frontier.shuffle(rng);

    for next in frontier {
        if !visited[next] {
            let here = center_tile(cell, cells_wide);
            let there = center_tile(next, cells_wide);
            open.insert(TileCoord::new(
                (here.x + there.x) / 2,
                (here.y + there.y) / 2,
            ));
            carve(next, cells_wide, cells_high, visited, open, rng);
        }
    }
}

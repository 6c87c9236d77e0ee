use crate::config::Config;
use crate::player::Viewpoint;
use crate::util::{frac, tile_of};
use crate::world::{GridWorld, TextureId, TileCoord};

/// Nudge applied to the fan's starting angle so no ray is ever exactly
/// axis-aligned; a sine or cosine of zero would blow up the grid-step terms.
const RAY_EPSILON: f32 = 1e-4;

/// Keeps a numerically zero corrected depth out of the projection divisor.
const DEPTH_EPSILON: f32 = 1e-4;

/// When stepping against an axis, the first grid line sits on a tile boundary;
/// backing off a hair keeps the floored lookup inside the tile being left.
const BACK_STEP: f32 = 1e-6;

/// The wall face a ray landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub texture: TextureId,
    /// Fractional position across the tile edge, in `[0, 1)`; picks the
    /// texture column so adjacent rays sample adjacent strips.
    pub offset: f32,
}

/// Per-ray cast result. `hit` is `None` when both traversals ran out of steps
/// without touching a wall; `depth` then holds the (very large) distance the
/// search reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySlice {
    /// Viewing-plane distance, fish-eye corrected.
    pub depth: f32,
    /// Raw projected wall height in pixels, before screen clipping.
    pub proj_height: f32,
    pub hit: Option<Surface>,
}

/// Result of one grid-line search: accumulated depth, the coordinate running
/// along the hit line (used for the texture offset), and the texture found,
/// if any.
struct AxisHit {
    depth: f32,
    along: f32,
    texture: Option<TextureId>,
}

/// Owns the per-frame result buffer and overwrites it wholesale every cast.
#[derive(Debug, Default)]
pub struct RayCaster {
    slices: Vec<RaySlice>,
}

impl RayCaster {
    pub fn new() -> RayCaster {
        RayCaster::default()
    }

    /// Casts the whole fan from the given viewpoint. Results are ordered left
    /// to right across the field of view, one per configured ray.
    pub fn cast_all(
        &mut self,
        pov: Viewpoint,
        world: &GridWorld,
        config: &Config,
    ) -> &[RaySlice] {
        self.slices.clear();
        self.slices.reserve(config.ray_count);

        let screen_dist = config.screen_dist();
        let delta_angle = config.delta_angle();

        let mut ray_angle = pov.angle - config.half_fov() + RAY_EPSILON;
        for _ in 0..config.ray_count {
            self.slices
                .push(cast_one(pov, ray_angle, world, config.max_depth, screen_dist));
            ray_angle += delta_angle;
        }
        &self.slices
    }

    /// The most recent frame's results.
    pub fn slices(&self) -> &[RaySlice] {
        &self.slices
    }
}

fn cast_one(
    pov: Viewpoint,
    ray_angle: f32,
    world: &GridWorld,
    max_depth: usize,
    screen_dist: f32,
) -> RaySlice {
    let sin_a = ray_angle.sin();
    let cos_a = ray_angle.cos();

    // Two independent searches: one stepping across horizontal grid lines,
    // one across vertical grid lines. The nearer of the two is the wall the
    // ray actually hits.
    let hor = horizontal_search(pov, sin_a, cos_a, world, max_depth);
    let vert = vertical_search(pov, sin_a, cos_a, world, max_depth);

    // Ties go to the vertical-line result.
    let (raw_depth, texture, offset) = if vert.depth <= hor.depth {
        // Offset runs along Y on a vertical line; flip it for rays heading
        // in -X so the texture is not mirrored.
        let along = frac(vert.along);
        let offset = if cos_a > 0.0 { along } else { 1.0 - along };
        (vert.depth, vert.texture, offset)
    } else {
        // Offset runs along X on a horizontal line; flip for rays heading
        // in +Y.
        let along = frac(hor.along);
        let offset = if sin_a > 0.0 { 1.0 - along } else { along };
        (hor.depth, hor.texture, offset)
    };

    // Radial distance would render equidistant walls taller at the screen
    // edges than at the center; projecting onto the viewing plane fixes it.
    let depth = raw_depth * (pov.angle - ray_angle).cos();
    let proj_height = screen_dist / (depth + DEPTH_EPSILON);

    RaySlice {
        depth,
        proj_height,
        hit: texture.map(|texture| Surface { texture, offset }),
    }
}

/// Steps the ray across successive horizontal grid lines in its Y direction,
/// at most `max_depth` times, accumulating exact depth along the ray.
fn horizontal_search(
    pov: Viewpoint,
    sin_a: f32,
    cos_a: f32,
    world: &GridWorld,
    max_depth: usize,
) -> AxisHit {
    let tile_y = tile_of(pov.y) as f32;

    let (mut y, dy) = if sin_a > 0.0 {
        (tile_y + 1.0, 1.0)
    } else {
        (tile_y - BACK_STEP, -1.0)
    };

    let mut depth = (y - pov.y) / sin_a;
    let mut x = pov.x + depth * cos_a;

    let delta_depth = dy / sin_a;
    let dx = delta_depth * cos_a;

    let mut texture = None;
    for _ in 0..max_depth {
        let tile = TileCoord::new(tile_of(x), tile_of(y));
        if let Some(id) = world.texture_at(tile) {
            texture = Some(id);
            break;
        }
        x += dx;
        y += dy;
        depth += delta_depth;
    }

    AxisHit {
        depth,
        along: x,
        texture,
    }
}

/// Symmetric search across vertical grid lines in the ray's X direction.
fn vertical_search(
    pov: Viewpoint,
    sin_a: f32,
    cos_a: f32,
    world: &GridWorld,
    max_depth: usize,
) -> AxisHit {
    let tile_x = tile_of(pov.x) as f32;

    let (mut x, dx) = if cos_a > 0.0 {
        (tile_x + 1.0, 1.0)
    } else {
        (tile_x - BACK_STEP, -1.0)
    };

    let mut depth = (x - pov.x) / cos_a;
    let mut y = pov.y + depth * sin_a;

    let delta_depth = dx / cos_a;
    let dy = delta_depth * sin_a;

    let mut texture = None;
    for _ in 0..max_depth {
        let tile = TileCoord::new(tile_of(x), tile_of(y));
        if let Some(id) = world.texture_at(tile) {
            texture = Some(id);
            break;
        }
        x += dx;
        y += dy;
        depth += delta_depth;
    }

    AxisHit {
        depth,
        along: y,
        texture,
    }
}

use crate::caster::RaySlice;
use crate::config::Config;
use crate::world::TextureId;

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect { x, y, w, h }
    }
}

/// One wall slice for the external renderer: blit `src` out of the texture
/// onto `dst` on screen. Commands arrive in ray order; `column` is the ray
/// index and maps 1:1 to screen columns left to right, so a skipped column
/// (ray miss) cannot shift its neighbors. `depth` lets the renderer order
/// walls against sprites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    pub column: usize,
    pub depth: f32,
    pub texture: TextureId,
    pub src: Rect,
    pub dst: Rect,
}

/// Converts a frame's ray results into render commands, reusing `out`.
/// Misses emit nothing, so the queue holds at most one command per ray.
pub fn build_render_queue(slices: &[RaySlice], config: &Config, out: &mut Vec<RenderCommand>) {
    out.clear();

    let screen_h = config.screen_height as f32;
    let tex_size = config.texture_size as f32;
    let col_w = config.column_width();

    for (column, slice) in slices.iter().enumerate() {
        let surface = match slice.hit {
            Some(surface) => surface,
            None => continue,
        };

        let sample_x = surface.offset * (tex_size - col_w);

        let (src, dst) = if slice.proj_height < screen_h {
            // Whole texture column, scaled to the projected height and
            // centered on the horizon.
            (
                Rect::new(sample_x, 0.0, col_w, tex_size),
                Rect::new(
                    column as f32 * col_w,
                    config.half_height() - slice.proj_height * 0.5,
                    col_w,
                    slice.proj_height,
                ),
            )
        } else {
            // Wall taller than the screen: sample only the span that will be
            // visible, centered on the texture's midline, and fill the full
            // screen height. Avoids scaling pixels that would be clipped.
            let visible = tex_size * screen_h / slice.proj_height;
            (
                Rect::new(sample_x, (tex_size - visible) * 0.5, col_w, visible),
                Rect::new(column as f32 * col_w, 0.0, col_w, screen_h),
            )
        };

        out.push(RenderCommand {
            column,
            depth: slice.depth,
            texture: surface.texture,
            src,
            dst,
        });
    }
}

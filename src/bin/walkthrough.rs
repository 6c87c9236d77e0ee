//! Headless soak run: generates a maze world, walks the player through it for
//! a few simulated seconds with a frame limiter, and logs what the renderer
//! would have been given. Useful for eyeballing the core without a frontend.
//!
//! `RUST_LOG=debug cargo run --bin walkthrough`

use std::thread;
use std::time::{Duration, Instant};

use tracing::info;
use tracing_subscriber::EnvFilter;

use gridcaster::world::maze;
use gridcaster::{Config, ConfigError, Engine, InputSnapshot, TextureId};

const FRAME: Duration = Duration::from_millis(16);
const TOTAL_FRAMES: u32 = 600;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::default();
    config.spawn_x = 1.5;
    config.spawn_y = 1.5;

    let palette = [TextureId(1), TextureId(2), TextureId(3)];
    let world = maze::generate(12, 12, 7, &palette);
    info!(walls = world.wall_count(), "maze ready");

    let mut engine = Engine::new(config, world)?;

    let mut last = Instant::now();
    for frame in 0..TOTAL_FRAMES {
        // Walk forward, sweeping the view left and right.
        let input = InputSnapshot {
            forward: true,
            look_delta: if (frame / 120) % 2 == 0 { 6.0 } else { -6.0 },
            ..InputSnapshot::default()
        };

        let dt = last.elapsed().as_secs_f32();
        last = Instant::now();
        let commands = engine.advance(&input, dt);

        if frame % 120 == 0 {
            let nearest = commands
                .iter()
                .map(|c| c.depth)
                .fold(f32::INFINITY, f32::min);
            let columns = commands.len();
            let view = engine.player().viewpoint();
            info!(
                frame,
                x = view.x,
                y = view.y,
                angle = view.angle,
                columns,
                nearest,
                "frame"
            );
        }

        // Coarse frame-rate limiter; the core itself never blocks.
        if let Some(remaining) = FRAME.checked_sub(last.elapsed()) {
            thread::sleep(remaining);
        }
    }

    let view = engine.player().viewpoint();
    info!(
        x = view.x,
        y = view.y,
        health = engine.player().health(),
        "walkthrough finished"
    );
    Ok(())
}

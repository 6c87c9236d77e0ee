//! First-person rendering core for a 2D tile grid.
//!
//! For each screen column a ray is cast from the player's eye across the
//! grid; the nearest wall intersection becomes a depth-corrected wall slice,
//! and the slices become render commands for an external renderer. The same
//! grid drives player collision, so movement and visibility always agree.
//!
//! - [`world`]: sparse tile grid, level loading, maze generation
//! - [`player`]: movement, axis-separated collision, health
//! - [`caster`]: dual grid-line ray traversal with fish-eye correction
//! - [`view`]: projection of ray results into render commands
//! - [`engine`]: per-frame orchestration and the game-over cycle
//!
//! The core is synchronous and frame-stepped: hand [`Engine::advance`] an
//! input snapshot and the elapsed seconds, draw the commands it returns.

pub mod caster;
pub mod config;
pub mod engine;
pub mod events;
pub mod input;
pub mod player;
pub mod util;
pub mod view;
pub mod world;

pub use caster::{RayCaster, RaySlice, Surface};
pub use config::{Config, ConfigError};
pub use engine::{Engine, Phase};
pub use events::{GameEvents, NullEvents};
pub use input::InputSnapshot;
pub use player::{Player, Viewpoint};
pub use view::{Rect, RenderCommand};
pub use world::{GridWorld, TextureId, TileCoord, WorldError};

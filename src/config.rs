use core::f32::consts::PI;

use serde::Deserialize;
use thiserror::Error;

/// Everything the core reads at startup, fixed for the lifetime of a session.
///
/// The defaults assume tile-sized wall cells and a pinhole projection plane;
/// derived quantities (`screen_dist`, `delta_angle`, `column_width`) are
/// computed on demand rather than cached so the struct stays plain data.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output surface width in pixels.
    pub screen_width: u32,
    /// Output surface height in pixels.
    pub screen_height: u32,
    /// Field of view in radians.
    pub fov: f32,
    /// Number of rays in the fan, one per screen column group.
    pub ray_count: usize,
    /// Maximum grid-line steps per traversal before a ray counts as a miss.
    pub max_depth: usize,
    /// Wall texture edge length in pixels (textures are square).
    pub texture_size: u32,
    /// Movement speed in tiles per second.
    pub move_speed: f32,
    /// Heading change per unit of look delta per second.
    pub look_sensitivity: f32,
    /// Largest look delta accepted in a single frame.
    pub max_look_delta: f32,
    /// Collision probe lead, in tiles scaled by `1 / dt`.
    pub player_radius: f32,
    /// Upper bound an update step is clamped to, in seconds. Keeps a stalled
    /// frame from stepping the player farther than the collision probe reaches.
    pub max_frame_step: f32,
    pub max_health: i32,
    /// Seconds between single points of passive health recovery.
    pub recovery_interval: f32,
    /// Seconds the game-over freeze lasts before the session resets.
    pub game_over_delay: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub spawn_angle: f32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            screen_width: 1600,
            screen_height: 900,
            fov: PI / 3.0,
            ray_count: 800,
            max_depth: 20,
            texture_size: 256,
            move_speed: 4.0,
            look_sensitivity: 0.3,
            max_look_delta: 40.0,
            player_radius: 0.06,
            max_frame_step: 0.05,
            max_health: 100,
            recovery_interval: 0.7,
            game_over_delay: 1.5,
            spawn_x: 1.5,
            spawn_y: 5.0,
            spawn_angle: 0.0,
        }
    }
}

impl Config {
    /// Parses a RON config, falling back to defaults for absent fields.
    pub fn from_ron_str(source: &str) -> Result<Config, ConfigError> {
        let config: Config = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the projection math cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Invalid("screen dimensions must be non-zero"));
        }
        if self.ray_count == 0 {
            return Err(ConfigError::Invalid("ray count must be non-zero"));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max traversal depth must be non-zero"));
        }
        if self.texture_size == 0 {
            return Err(ConfigError::Invalid("texture size must be non-zero"));
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(ConfigError::Invalid("field of view must be in (0, pi)"));
        }
        if !(self.max_frame_step > 0.0) {
            return Err(ConfigError::Invalid("max frame step must be positive"));
        }
        if self.max_health < 1 {
            return Err(ConfigError::Invalid("max health must be at least 1"));
        }
        Ok(())
    }

    pub fn half_fov(&self) -> f32 {
        self.fov * 0.5
    }

    /// Angle between adjacent rays in the fan.
    pub fn delta_angle(&self) -> f32 {
        self.fov / self.ray_count as f32
    }

    /// Distance from the eye to the projection plane, in pixels. Chosen so the
    /// fan exactly spans the screen width.
    pub fn screen_dist(&self) -> f32 {
        self.screen_width as f32 * 0.5 / self.half_fov().tan()
    }

    /// On-screen width of one ray's wall slice, in pixels.
    pub fn column_width(&self) -> f32 {
        self.screen_width as f32 / self.ray_count as f32
    }

    pub fn half_height(&self) -> f32 {
        self.screen_height as f32 * 0.5
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn screen_dist_spans_half_width() {
        let config = Config::default();
        // screen_dist * tan(half_fov) must land on the screen edge.
        let edge = config.screen_dist() * config.half_fov().tan();
        assert!((edge - config.screen_width as f32 * 0.5).abs() < 1e-2);
    }

    #[test]
    fn fan_covers_fov() {
        let config = Config::default();
        let span = config.delta_angle() * config.ray_count as f32;
        assert!((span - config.fov).abs() < 1e-5);
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut config = Config::default();
        config.ray_count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fov = PI;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.screen_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_ron() {
        let config = Config::from_ron_str("(ray_count: 160, screen_width: 320)").unwrap();
        assert_eq!(config.ray_count, 160);
        assert_eq!(config.screen_width, 320);
        // Unlisted fields keep their defaults.
        assert_eq!(config.max_depth, 20);
    }

    #[test]
    fn rejects_malformed_ron() {
        assert!(matches!(
            Config::from_ron_str("(ray_count: )"),
            Err(ConfigError::Parse(_))
        ));
    }
}

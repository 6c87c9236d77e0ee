use core::f32::consts::FRAC_1_SQRT_2;

use tracing::debug;

use crate::config::Config;
use crate::events::GameEvents;
use crate::input::InputSnapshot;
use crate::util::{tile_of, wrap_angle};
use crate::world::{GridWorld, TileCoord};

/// Read-only view of the player the ray caster needs: eye position and heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

/// Continuous position and heading, plus the health pool and the pending-shot
/// flag the external weapon reads. Movement never leaves the player inside a
/// wall tile; collision is resolved here against the same grid the ray caster
/// traverses.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    x: f32,
    y: f32,
    angle: f32,
    health: i32,
    shot: bool,
    recovery_timer: f32,
}

impl Player {
    pub fn spawn(config: &Config) -> Player {
        Player {
            x: config.spawn_x,
            y: config.spawn_y,
            angle: wrap_angle(config.spawn_angle),
            health: config.max_health,
            shot: false,
            recovery_timer: 0.0,
        }
    }

    /// Advances position, heading and passive recovery by one frame.
    pub fn update(&mut self, input: &InputSnapshot, dt: f32, world: &GridWorld, config: &Config) {
        self.movement(input, dt, world, config);
        self.look(input, dt, config);
        self.recover_health(dt, config);
    }

    fn movement(&mut self, input: &InputSnapshot, dt: f32, world: &GridWorld, config: &Config) {
        // The collision probe divides by dt; a zero-length frame moves nobody.
        if dt <= 0.0 {
            return;
        }

        let sin_a = self.angle.sin();
        let cos_a = self.angle.cos();
        let speed = config.move_speed * dt;
        let speed_sin = speed * sin_a;
        let speed_cos = speed * cos_a;

        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.forward {
            dx += speed_cos;
            dy += speed_sin;
        }
        if input.backward {
            dx -= speed_cos;
            dy -= speed_sin;
        }
        if input.strafe_left {
            dx += speed_sin;
            dy -= speed_cos;
        }
        if input.strafe_right {
            dx -= speed_sin;
            dy += speed_cos;
        }

        // Two held directions add up to sqrt(2) times the speed; pull the
        // resultant back down. Exact for the four axis-aligned inputs.
        if input.active_directions() > 1 {
            dx *= FRAC_1_SQRT_2;
            dy *= FRAC_1_SQRT_2;
        }

        self.slide_against_walls(dx, dy, dt, world, config);
    }

    /// Axis-separated collision: each delta is tested on its own, with the
    /// probe leading the player by `player_radius / dt` along that axis, so a
    /// move blocked on one axis can still slide along the other.
    fn slide_against_walls(
        &mut self,
        dx: f32,
        dy: f32,
        dt: f32,
        world: &GridWorld,
        config: &Config,
    ) {
        let scale = config.player_radius / dt;

        let probe_x = TileCoord::new(tile_of(self.x + dx * scale), tile_of(self.y));
        if !world.is_wall(probe_x) {
            self.x += dx;
        }

        let probe_y = TileCoord::new(tile_of(self.x), tile_of(self.y + dy * scale));
        if !world.is_wall(probe_y) {
            self.y += dy;
        }
    }

    fn look(&mut self, input: &InputSnapshot, dt: f32, config: &Config) {
        let rel = input
            .look_delta
            .clamp(-config.max_look_delta, config.max_look_delta);
        self.angle = wrap_angle(self.angle + rel * config.look_sensitivity * dt);
    }

    /// Restores one point of health per elapsed recovery interval, up to cap.
    fn recover_health(&mut self, dt: f32, config: &Config) {
        self.recovery_timer += dt;
        if self.recovery_timer >= config.recovery_interval {
            self.recovery_timer = 0.0;
            if self.health < config.max_health {
                self.health += 1;
            }
        }
    }

    /// Applies damage and raises the damaged side effect. Returns true when
    /// the hit was fatal; the caller owns the game-over transition.
    pub fn take_damage(&mut self, amount: i32, events: &mut dyn GameEvents) -> bool {
        self.health -= amount;
        debug!(amount, health = self.health, "player damaged");
        events.on_player_damaged();
        self.health < 1
    }

    /// Queues a shot unless one is already pending or the external weapon is
    /// reloading. Returns whether the shot was accepted.
    pub fn queue_shot(&mut self, weapon_reloading: bool) -> bool {
        if self.shot || weapon_reloading {
            return false;
        }
        self.shot = true;
        true
    }

    /// Cleared by the weapon collaborator once the shot is consumed.
    pub fn clear_shot(&mut self) {
        self.shot = false;
    }

    pub fn shot_pending(&self) -> bool {
        self.shot
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint {
            x: self.x,
            y: self.y,
            angle: self.angle,
        }
    }

    pub fn tile(&self) -> TileCoord {
        TileCoord::new(tile_of(self.x), tile_of(self.y))
    }
}

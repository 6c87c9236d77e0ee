use tracing::info;

use crate::caster::RayCaster;
use crate::config::{Config, ConfigError};
use crate::events::GameEvents;
use crate::input::InputSnapshot;
use crate::player::Player;
use crate::view::{self, RenderCommand};
use crate::world::GridWorld;

/// Where the session is in the play / game-over cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Playing,
    /// The viewpoint is frozen; `elapsed` counts toward the reset delay.
    GameOver { elapsed: f32 },
}

/// Owns the session: configuration, world, player, the ray caster and the
/// per-frame command buffer. One `advance` call is one frame; collaborators
/// (renderer, weapon, object handler) talk to it through the methods below
/// and the `GameEvents` capability, never through shared state.
pub struct Engine {
    config: Config,
    world: GridWorld,
    player: Player,
    caster: RayCaster,
    commands: Vec<RenderCommand>,
    phase: Phase,
}

impl Engine {
    pub fn new(config: Config, world: GridWorld) -> Result<Engine, ConfigError> {
        config.validate()?;
        let player = Player::spawn(&config);
        Ok(Engine {
            config,
            world,
            player,
            caster: RayCaster::new(),
            commands: Vec::new(),
            phase: Phase::Playing,
        })
    }

    /// Runs one frame: player update (while playing), ray cast, projection.
    /// Returns the frame's render commands in ray order.
    ///
    /// `dt` is clamped to `max_frame_step` so a stalled frame cannot step the
    /// player past the collision probe. During the game-over freeze the
    /// player stops updating but frames still render the frozen viewpoint.
    pub fn advance(&mut self, input: &InputSnapshot, dt: f32) -> &[RenderCommand] {
        let dt = dt.min(self.config.max_frame_step);

        match self.phase {
            Phase::Playing => {
                self.player.update(input, dt, &self.world, &self.config);
            }
            Phase::GameOver { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.config.game_over_delay {
                    self.reset();
                } else {
                    self.phase = Phase::GameOver { elapsed };
                }
            }
        }

        let slices = self
            .caster
            .cast_all(self.player.viewpoint(), &self.world, &self.config);
        view::build_render_queue(slices, &self.config, &mut self.commands);
        &self.commands
    }

    /// Entry point for the external object handler (enemy attacks). A fatal
    /// hit raises `on_game_over` and starts the freeze/reset sequence.
    pub fn damage_player(&mut self, amount: i32, events: &mut dyn GameEvents) {
        if !matches!(self.phase, Phase::Playing) {
            return;
        }
        if self.player.take_damage(amount, events) {
            info!("player eliminated, starting game-over sequence");
            events.on_game_over();
            self.phase = Phase::GameOver { elapsed: 0.0 };
        }
    }

    /// Fire gating for the external weapon: accepted only when no shot is
    /// pending and the weapon is not reloading.
    pub fn queue_shot(&mut self, weapon_reloading: bool) -> bool {
        matches!(self.phase, Phase::Playing) && self.player.queue_shot(weapon_reloading)
    }

    /// Called by the weapon collaborator once the queued shot is consumed.
    pub fn clear_shot(&mut self) {
        self.player.clear_shot();
    }

    fn reset(&mut self) {
        info!("game-over delay elapsed, resetting session");
        self.player = Player::spawn(&self.config);
        self.phase = Phase::Playing;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The most recent frame's commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{TextureId, TileCoord};

    /// Counts the side effects the engine raises.
    #[derive(Default)]
    struct Recorder {
        damaged: u32,
        game_overs: u32,
    }

    impl GameEvents for Recorder {
        fn on_player_damaged(&mut self) {
            self.damaged += 1;
        }
        fn on_game_over(&mut self) {
            self.game_overs += 1;
        }
    }

    fn sealed_engine() -> Engine {
        let mut world = GridWorld::new();
        for y in 4..=6 {
            for x in 4..=6 {
                if (x, y) != (5, 5) {
                    world.insert_wall(TileCoord::new(x, y), TextureId(1));
                }
            }
        }
        let mut config = Config::default();
        config.spawn_x = 5.5;
        config.spawn_y = 5.5;
        Engine::new(config, world).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = Config::default();
        config.ray_count = 0;
        assert!(Engine::new(config, GridWorld::new()).is_err());
    }

    #[test]
    fn advance_produces_a_full_frame() {
        let mut engine = sealed_engine();
        let emitted = engine.advance(&InputSnapshot::default(), 0.016).len();

        // Fully enclosed cell: every ray hits, one command per ray.
        assert_eq!(emitted, engine.config().ray_count);
        for (i, cmd) in engine.commands().iter().enumerate() {
            assert_eq!(cmd.column, i);
        }
    }

    #[test]
    fn oversized_dt_is_clamped() {
        let mut engine = sealed_engine();
        let input = InputSnapshot {
            forward: true,
            ..InputSnapshot::default()
        };

        // A pathological ten-second frame must not tunnel the player out of
        // the sealed cell.
        for _ in 0..100 {
            engine.advance(&input, 10.0);
            assert_eq!(engine.player().tile(), TileCoord::new(5, 5));
        }
    }

    #[test]
    fn fatal_damage_runs_the_game_over_cycle() {
        let mut engine = sealed_engine();
        let mut events = Recorder::default();

        engine.damage_player(30, &mut events);
        assert_eq!(events.damaged, 1);
        assert_eq!(events.game_overs, 0);
        assert!(matches!(engine.phase(), Phase::Playing));

        engine.damage_player(1000, &mut events);
        assert_eq!(events.game_overs, 1);
        assert!(matches!(engine.phase(), Phase::GameOver { .. }));

        // Frozen: further damage is ignored, movement does nothing, but
        // frames still render.
        engine.damage_player(1000, &mut events);
        assert_eq!(events.game_overs, 1);
        let before = engine.player().viewpoint();
        let input = InputSnapshot {
            forward: true,
            ..InputSnapshot::default()
        };
        let emitted = engine.advance(&input, 0.016).len();
        assert!(emitted > 0);
        assert_eq!(engine.player().viewpoint(), before);

        // After the delay the session resets to spawn at full health.
        let frames = (engine.config().game_over_delay / 0.016) as usize + 2;
        for _ in 0..frames {
            engine.advance(&InputSnapshot::default(), 0.016);
        }
        assert!(matches!(engine.phase(), Phase::Playing));
        assert_eq!(engine.player().health(), engine.config().max_health);
        let view = engine.player().viewpoint();
        assert_eq!((view.x, view.y), (5.5, 5.5));
    }

    #[test]
    fn shots_are_gated_by_phase_and_reload() {
        let mut engine = sealed_engine();

        assert!(!engine.queue_shot(true));
        assert!(engine.queue_shot(false));
        assert!(!engine.queue_shot(false));
        engine.clear_shot();
        assert!(engine.queue_shot(false));

        let mut events = Recorder::default();
        engine.damage_player(1000, &mut events);
        engine.clear_shot();
        assert!(!engine.queue_shot(false), "no firing while game over");
    }
}

/// Side effects the core raises during a player update. Implemented by the
/// presentation layer (damage flash, pain sound, game-over screen); calls are
/// synchronous and must return promptly.
pub trait GameEvents {
    fn on_player_damaged(&mut self);
    fn on_game_over(&mut self);
}

/// Ignores every event. Handy for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvents;

impl GameEvents for NullEvents {
    fn on_player_damaged(&mut self) {}
    fn on_game_over(&mut self) {}
}

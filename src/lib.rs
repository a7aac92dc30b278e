//! Catch Game - a falling-ball arcade catcher
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, combos, power-ups, game state)
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD view derived from the simulation for the renderer
//! - `highscores`: High score store (text file natively, LocalStorage on web)
//! - `audio`: Sound cue dispatch
//! - `platform`: Logging init per target
//! - `runner`: Frame driver with fixed-step accumulator

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod runner;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::{FileStore, HighScoreStore, MemoryStore};
pub use runner::Runner;
pub use sim::{GameEvent, GamePhase, PowerUpKind, Session, TickInput, tick};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ball speed curve (units per tick)
    pub const BALL_BASE_SPEED: f32 = 4.0;
    pub const BALL_EARLY_RAMP: f32 = 0.05;
    pub const BALL_RAMP_END_SCORE: u64 = 250;
    pub const BALL_STEP: f32 = 0.5;

    /// Health bar width at full health
    pub const HEALTH_BAR_WIDTH: f32 = 90.0;

    /// Particle bursts
    pub const CATCH_PARTICLES: u32 = 8;
    pub const MISS_PARTICLES: u32 = 5;
    pub const PICKUP_PARTICLES: u32 = 15;
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs.max(0.0) * consts::TICK_RATE).round() as u32
}

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Palette shared by the simulation and the renderer
pub mod palette {
    use super::Rgba;

    pub const PADDLE: Rgba = [0.2, 0.6, 1.0, 1.0];
    pub const PADDLE_FLASH: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const BALL_GLOW: Rgba = [1.0, 0.3, 0.3, 0.25];
    pub const CATCH_BURST: Rgba = [0.0, 1.0, 0.0, 1.0];
    pub const MISS_BURST: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const PICKUP_BURST: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const SCORE_TEXT: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const HIGHLIGHT_TEXT: Rgba = [1.0, 1.0, 0.0, 1.0];
    pub const GAME_OVER_TEXT: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BG: Rgba = [0.2, 0.2, 0.2, 1.0];
    pub const HEALTH_FG: Rgba = [1.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(7.0), 420);
        assert_eq!(secs_to_ticks(8.0), 480);
        assert_eq!(secs_to_ticks(0.4), 24);
        assert_eq!(secs_to_ticks(-1.0), 0);
    }
}

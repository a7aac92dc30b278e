//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, timers counted in ticks
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies (those get events)

pub mod collision;
pub mod effects;
pub mod health;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{BallOutcome, PowerUpOutcome, classify_ball, classify_powerup};
pub use effects::{ActiveEffects, PaddleSize, apply_powerup};
pub use health::{Health, MissOutcome};
pub use scoring::{Combo, ball_speed, multiplier_for};
pub use state::{
    Ball, GameEvent, GamePhase, MAX_PARTICLES, Paddle, Particle, PowerUp, PowerUpKind, Session,
    SoundCue,
};
pub use tick::{TickInput, tick};

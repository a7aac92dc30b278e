//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.
//!
//! Per tick, in order:
//! 1. restart / pause inputs
//! 2. cosmetic countdowns (paddle flash, particles), which run even while paused
//! 3. phase body: Ready counts down; Playing moves the paddle, ticks immunity
//!    and effects, moves and resolves power-ups, then moves and resolves the ball

use glam::Vec2;

use super::collision::{BallOutcome, PowerUpOutcome, classify_ball, classify_powerup};
use super::effects::{collect_powerup, maybe_spawn_powerup, update_effects};
use super::health::MissOutcome;
use super::state::{GameEvent, GamePhase, Session, SoundCue};
use crate::consts::*;
use crate::palette;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position in field coordinates
    pub pointer: Option<Vec2>,
    /// Pointer pressed (restarts after game over)
    pub pointer_down: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput) {
    if session.phase == GamePhase::GameOver && (input.pointer_down || input.idle_mode) {
        session.restart();
    }

    // Handle pause toggle
    if input.pause {
        match session.phase {
            GamePhase::Playing => session.set_phase(GamePhase::Paused),
            GamePhase::Paused => session.set_phase(GamePhase::Playing),
            GamePhase::Ready | GamePhase::GameOver => {}
        }
    }

    session.time_ticks += 1;

    session.health.tick_flash();
    session.update_particles();

    match session.phase {
        GamePhase::Ready => {
            session.health.tick_immunity();
            session.ready_ticks = session.ready_ticks.saturating_sub(1);
            if session.ready_ticks == 0 {
                session.reset_ball();
                session.set_phase(GamePhase::Playing);
            }
        }
        GamePhase::Playing => step_playing(session, input),
        GamePhase::Paused | GamePhase::GameOver => {}
    }
}

fn step_playing(session: &mut Session, input: &TickInput) {
    let pointer = if input.idle_mode {
        Some(autopilot_target(session))
    } else {
        input.pointer
    };

    // Update paddle position
    if let Some(pointer) = pointer
        && pointer.y > session.tuning.pointer_dead_zone
    {
        session.paddle.move_to(pointer.x, session.tuning.field_width);
    }

    session.health.tick_immunity();
    update_effects(session);
    update_powerups(session);

    let speed_factor = if session.effects.slow_motion() {
        session.tuning.slow_factor
    } else {
        1.0
    };
    session.ball.advance(speed_factor);

    match classify_ball(&session.ball, &session.paddle) {
        BallOutcome::Catch => on_catch(session),
        BallOutcome::Miss => on_miss(session),
        BallOutcome::None => {}
    }
}

fn update_powerups(session: &mut Session) {
    let paddle = session.paddle.clone();
    let tolerance = session.tuning.powerup_pickup_tolerance;

    let mut collected = Vec::new();
    session.powerups.retain_mut(|powerup| {
        powerup.advance();
        match classify_powerup(powerup, &paddle, tolerance) {
            PowerUpOutcome::Falling => true,
            PowerUpOutcome::Expired => false,
            PowerUpOutcome::Collected => {
                collected.push(powerup.clone());
                false
            }
        }
    });

    for powerup in collected {
        collect_powerup(session, &powerup);
    }
}

fn on_catch(session: &mut Session) {
    let pos = session.ball.pos;
    let points = session.combo.on_catch(
        session.effects.double_points(),
        session.tuning.combo_step,
        session.tuning.max_multiplier,
    );
    session.score += points;
    log::debug!(
        "Catch +{} (combo {}, x{}) score {}",
        points,
        session.combo.count,
        session.combo.multiplier,
        session.score
    );

    session.emit(GameEvent::Caught {
        points,
        combo: session.combo.count,
        multiplier: session.combo.multiplier,
    });
    session.emit(GameEvent::Sound(SoundCue::Catch));
    session.burst(pos, palette::CATCH_BURST, CATCH_PARTICLES);

    session.reset_ball();
    maybe_spawn_powerup(session);
}

fn on_miss(session: &mut Session) {
    let pos = session.ball.pos;
    let outcome = session.health.record_miss(
        session.tuning.max_misses,
        session.tuning.immunity_ticks(),
        session.tuning.flash_ticks(),
    );

    if outcome == MissOutcome::Ignored {
        session.reset_ball();
        return;
    }

    session.combo.reset();
    log::debug!("Miss {}/{}", session.misses(), session.tuning.max_misses);
    session.emit(GameEvent::Missed {
        misses: session.misses(),
    });
    session.emit(GameEvent::Sound(SoundCue::Miss));
    session.burst(pos, palette::MISS_BURST, MISS_PARTICLES);

    match outcome {
        MissOutcome::Fatal => game_over(session),
        _ => session.reset_ball(),
    }
}

fn game_over(session: &mut Session) {
    session.set_phase(GamePhase::GameOver);
    if session.score > session.high_score {
        log::info!(
            "New high score {} (was {})",
            session.score,
            session.high_score
        );
        session.high_score = session.score;
        session.emit(GameEvent::NewHighScore(session.score));
    }
    log::info!("Game over with score {}", session.score);
    session.emit(GameEvent::Sound(SoundCue::GameOver));
}

/// Where the demo AI points this tick
///
/// Tracks the ball with a slow drifting offset so it eventually misses, and
/// detours for a useful falling power-up while the ball is still high.
fn autopilot_target(session: &Session) -> Vec2 {
    let tuning = &session.tuning;
    let ball = &session.ball;
    let aim_y = tuning.field_height / 2.0;

    let ball_is_safe = ball.bottom() > tuning.field_height * 0.5;
    let target_pickup = if ball_is_safe {
        session
            .powerups
            .iter()
            .filter(|p| p.kind.is_beneficial())
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|p| p.pos.x)
    } else {
        None
    };

    if let Some(x) = target_pickup {
        return Vec2::new(x, aim_y);
    }

    // Oscillating offset to avoid perfect play
    let time_factor = session.time_ticks as f32 * 0.013;
    let wobble = time_factor.sin() * 0.6 + (time_factor * 0.55).sin() * 0.5;
    Vec2::new(ball.pos.x + wobble * session.paddle.half_width(), aim_y)
}

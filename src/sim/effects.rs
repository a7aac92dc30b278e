//! Timed power-up effects
//!
//! | kind    | effect                   | duration |
//! |---------|--------------------------|----------|
//! | slow    | ball speed x0.5          | 7s       |
//! | double  | score gain x2            | 7s       |
//! | life    | one miss undone          | instant  |
//! | wide    | paddle width x2          | 8s       |
//! | shrink  | paddle width x0.4        | 8s       |
//! | reverse | nothing (never spawned)  | -        |
//!
//! Re-collecting a running effect restarts its countdown. Wide and shrink share
//! the paddle-size slot, so the latest one replaces the other.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, PowerUp, PowerUpKind, Session};
use crate::consts::PICKUP_PARTICLES;
use crate::palette;

/// Paddle size modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleSize {
    Wide,
    Shrink,
}

impl PaddleSize {
    pub fn kind(&self) -> PowerUpKind {
        match self {
            PaddleSize::Wide => PowerUpKind::Wide,
            PaddleSize::Shrink => PowerUpKind::Shrink,
        }
    }
}

/// Active power-up effects (ticks remaining)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub slow_ticks: u32,
    pub double_ticks: u32,
    pub paddle: Option<(PaddleSize, u32)>,
}

impl ActiveEffects {
    pub fn slow_motion(&self) -> bool {
        self.slow_ticks > 0
    }

    pub fn double_points(&self) -> bool {
        self.double_ticks > 0
    }

    pub fn paddle_size(&self) -> Option<PaddleSize> {
        self.paddle.map(|(size, _)| size)
    }

    /// Count every running effect down one tick; returns the ones that ended
    pub fn tick(&mut self) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();

        if self.slow_ticks > 0 {
            self.slow_ticks -= 1;
            if self.slow_ticks == 0 {
                expired.push(PowerUpKind::Slow);
            }
        }
        if self.double_ticks > 0 {
            self.double_ticks -= 1;
            if self.double_ticks == 0 {
                expired.push(PowerUpKind::Double);
            }
        }
        if let Some((size, ticks)) = self.paddle {
            if ticks <= 1 {
                self.paddle = None;
                expired.push(size.kind());
            } else {
                self.paddle = Some((size, ticks - 1));
            }
        }

        expired
    }
}

/// Apply a collected power-up to the session
pub fn apply_powerup(session: &mut Session, kind: PowerUpKind) {
    let field_width = session.tuning.field_width;
    match kind {
        PowerUpKind::Slow => {
            session.effects.slow_ticks = session.tuning.slow_ticks();
        }
        PowerUpKind::Double => {
            session.effects.double_ticks = session.tuning.double_ticks();
        }
        PowerUpKind::Life => {
            session.health.heal();
        }
        PowerUpKind::Wide => {
            let width = session.paddle.default_width * session.tuning.wide_factor;
            session.paddle.set_width(width, field_width);
            session.effects.paddle = Some((PaddleSize::Wide, session.tuning.paddle_effect_ticks()));
        }
        PowerUpKind::Shrink => {
            let width = session.paddle.default_width * session.tuning.shrink_factor;
            session.paddle.set_width(width, field_width);
            session.effects.paddle =
                Some((PaddleSize::Shrink, session.tuning.paddle_effect_ticks()));
        }
        PowerUpKind::Reverse => {
            log::debug!("Reverse power-up has no effect");
        }
    }
}

/// Count effects down and undo the ones that ran out
pub fn update_effects(session: &mut Session) {
    for kind in session.effects.tick() {
        if matches!(kind, PowerUpKind::Wide | PowerUpKind::Shrink) {
            session.paddle.reset_width(session.tuning.field_width);
        }
        log::debug!("Effect expired: {}", kind.as_str());
        session.emit(GameEvent::EffectExpired(kind));
    }
}

/// Drop probability forced into 0..=1 (NaN counts as never)
fn spawn_chance(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Roll for a power-up drop after a catch
pub fn maybe_spawn_powerup(session: &mut Session) {
    let chance = spawn_chance(session.tuning.powerup_chance);
    if !session.rng.random_bool(chance) {
        return;
    }
    let pool = PowerUpKind::SPAWN_POOL;
    let kind = pool[session.rng.random_range(0..pool.len())];
    spawn_powerup(session, kind);
}

/// Drop a power-up of `kind` from a random spot along the top of the field
pub fn spawn_powerup(session: &mut Session, kind: PowerUpKind) {
    let size = session.tuning.powerup_size;
    let min_x = (size / 2.0 + session.tuning.ball_launch_margin).round() as i32;
    let max_x = (session.tuning.field_width - min_x as f32).round() as i32;
    let max_x = max_x.max(min_x);
    let x = session.rng.random_range(min_x..=max_x) as f32;
    let y = session.tuning.field_height - session.tuning.powerup_spawn_drop + size / 2.0;

    session.powerups.push(PowerUp {
        kind,
        pos: Vec2::new(x, y),
        size,
        fall_speed: session.tuning.powerup_fall_speed,
    });
    log::debug!("Spawned {} power-up at x={}", kind.as_str(), x);
    session.emit(GameEvent::PowerUpSpawned(kind));
}

/// Collect a power-up: particles, event, effect
pub fn collect_powerup(session: &mut Session, powerup: &PowerUp) {
    log::debug!("Collected {} power-up", powerup.kind.as_str());
    session.burst(powerup.pos, palette::PICKUP_BURST, PICKUP_PARTICLES);
    session.emit(GameEvent::PowerUpCollected(powerup.kind));
    apply_powerup(session, powerup.kind);
}

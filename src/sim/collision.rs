//! Catch, miss and pickup detection
//!
//! All checks are plain axis-aligned comparisons against the paddle's top edge.
//! Catch is tested before miss, so a ball that has already dropped below the
//! field but is still over the paddle in the same tick counts as caught.

use super::state::{Ball, Paddle, PowerUp};

/// What happened to the ball this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    /// Still in flight
    None,
    Catch,
    Miss,
}

/// What happened to a power-up this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpOutcome {
    Falling,
    Collected,
    /// Left the bottom of the field
    Expired,
}

/// Horizontal centers close enough for the paddle to cover
#[inline]
fn over_paddle(x: f32, paddle: &Paddle) -> bool {
    (x - paddle.x).abs() < paddle.half_width()
}

/// Ball is falling, level with or below the paddle top, and over the paddle
pub fn ball_caught(ball: &Ball, paddle: &Paddle) -> bool {
    ball.vel_y < 0.0 && ball.bottom() <= paddle.top() && over_paddle(ball.pos.x, paddle)
}

/// Ball dropped past the bottom of the field
pub fn ball_missed(ball: &Ball) -> bool {
    ball.bottom() < 0.0
}

pub fn classify_ball(ball: &Ball, paddle: &Paddle) -> BallOutcome {
    if ball_caught(ball, paddle) {
        BallOutcome::Catch
    } else if ball_missed(ball) {
        BallOutcome::Miss
    } else {
        BallOutcome::None
    }
}

/// Expiry is checked first, then pickup within `tolerance` above the paddle top
pub fn classify_powerup(powerup: &PowerUp, paddle: &Paddle, tolerance: f32) -> PowerUpOutcome {
    if powerup.bottom() < 0.0 {
        PowerUpOutcome::Expired
    } else if powerup.bottom() <= paddle.top() + tolerance && over_paddle(powerup.pos.x, paddle) {
        PowerUpOutcome::Collected
    } else {
        PowerUpOutcome::Falling
    }
}

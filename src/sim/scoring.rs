//! Combo multiplier and difficulty curve

use crate::consts::*;

/// Multiplier for a combo count
///
/// 1 until the second consecutive catch, then one step per `step` catches,
/// capped at `max`.
pub fn multiplier_for(combo: u32, step: u32, max: u32) -> u32 {
    if combo <= 1 {
        1
    } else {
        (1 + combo / step.max(1)).min(max.max(1))
    }
}

/// Ball fall speed (units per tick) for a score
///
/// Fast ramp until 250, then half-unit steps at widening intervals.
pub fn ball_speed(score: u64) -> f32 {
    let ramp_top = BALL_BASE_SPEED + BALL_RAMP_END_SCORE as f32 * BALL_EARLY_RAMP;
    let steps = |from: u64, every: u64| ((score - from) / every) as f32 * BALL_STEP;

    if score < BALL_RAMP_END_SCORE {
        BALL_BASE_SPEED + score as f32 * BALL_EARLY_RAMP
    } else if score < 400 {
        ramp_top + steps(250, 150)
    } else if score < 800 {
        ramp_top + BALL_STEP + steps(400, 400)
    } else {
        ramp_top + 2.0 * BALL_STEP + steps(800, 800)
    }
}

/// Consecutive-catch tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combo {
    pub count: u32,
    pub multiplier: u32,
}

impl Default for Combo {
    fn default() -> Self {
        Self {
            count: 0,
            multiplier: 1,
        }
    }
}

impl Combo {
    /// Register a catch and return the points it is worth
    pub fn on_catch(&mut self, double_points: bool, step: u32, max: u32) -> u64 {
        self.count += 1;
        self.multiplier = multiplier_for(self.count, step, max);
        let bonus = if double_points { 2 } else { 1 };
        u64::from(self.multiplier) * bonus
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Label text, shown only while a combo is running
    pub fn label(&self) -> Option<String> {
        let Combo { count, multiplier } = *self;
        if count > 1 {
            Some(format!("Combo x{count}! Multiplier: {multiplier}x"))
        } else {
            None
        }
    }
}

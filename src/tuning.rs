//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Durations are stored in seconds and converted to ticks by the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::secs_to_ticks;

/// Errors raised while loading tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    /// Tuning file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning file is not valid JSON for this struct
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of its allowed range
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Pointer moves at or below this height are ignored
    pub pointer_dead_zone: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Bottom edge of the paddle
    pub paddle_y: f32,
    pub wide_factor: f32,
    pub shrink_factor: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Keep the ball this far from the side walls at launch
    pub ball_launch_margin: f32,
    pub slow_factor: f32,

    // === Power-ups ===
    pub powerup_size: f32,
    /// Units per tick
    pub powerup_fall_speed: f32,
    /// Bottom edge of a freshly spawned power-up, measured down from the top
    pub powerup_spawn_drop: f32,
    /// Extra reach above the paddle when collecting
    pub powerup_pickup_tolerance: f32,
    /// Probability of a spawn after each catch
    pub powerup_chance: f64,

    // === Timers (seconds) ===
    pub slow_secs: f32,
    pub double_secs: f32,
    pub paddle_effect_secs: f32,
    pub immunity_secs: f32,
    pub flash_secs: f32,
    pub ready_secs: f32,
    pub particle_life_secs: f32,

    // === Rules ===
    pub max_misses: u8,
    /// Catches per multiplier step
    pub combo_step: u32,
    pub max_multiplier: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 360.0,
            field_height: 640.0,
            pointer_dead_zone: 100.0,

            paddle_width: 100.0,
            paddle_height: 20.0,
            paddle_y: 20.0,
            wide_factor: 2.0,
            shrink_factor: 0.4,

            ball_size: 20.0,
            ball_launch_margin: 20.0,
            slow_factor: 0.5,

            powerup_size: 24.0,
            powerup_fall_speed: 3.0,
            powerup_spawn_drop: 40.0,
            powerup_pickup_tolerance: 10.0,
            powerup_chance: 0.1,

            slow_secs: 7.0,
            double_secs: 7.0,
            paddle_effect_secs: 8.0,
            immunity_secs: 1.0,
            flash_secs: 0.4,
            ready_secs: 2.0,
            particle_life_secs: 0.5,

            max_misses: 3,
            combo_step: 5,
            max_multiplier: 5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values that would break geometry or timing
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("powerup_size", self.powerup_size),
            ("powerup_fall_speed", self.powerup_fall_speed),
            ("wide_factor", self.wide_factor),
            ("shrink_factor", self.shrink_factor),
            ("slow_factor", self.slow_factor),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }
        if self.paddle_width * self.wide_factor > self.field_width {
            return Err(TuningError::Invalid {
                field: "wide_factor",
                reason: "wide paddle must fit inside the field",
            });
        }
        if self.ball_launch_margin * 2.0 > self.field_width {
            return Err(TuningError::Invalid {
                field: "ball_launch_margin",
                reason: "launch margins must leave room to launch",
            });
        }
        if self.powerup_size > self.field_width {
            return Err(TuningError::Invalid {
                field: "powerup_size",
                reason: "power-up must fit inside the field",
            });
        }
        if !(0.0..=1.0).contains(&self.powerup_chance) {
            return Err(TuningError::Invalid {
                field: "powerup_chance",
                reason: "must be a probability in 0..=1",
            });
        }
        if self.max_misses == 0 {
            return Err(TuningError::Invalid {
                field: "max_misses",
                reason: "must allow at least one miss",
            });
        }
        if self.combo_step == 0 {
            return Err(TuningError::Invalid {
                field: "combo_step",
                reason: "must be at least 1",
            });
        }
        if self.max_multiplier == 0 {
            return Err(TuningError::Invalid {
                field: "max_multiplier",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub fn slow_ticks(&self) -> u32 {
        secs_to_ticks(self.slow_secs)
    }

    pub fn double_ticks(&self) -> u32 {
        secs_to_ticks(self.double_secs)
    }

    pub fn paddle_effect_ticks(&self) -> u32 {
        secs_to_ticks(self.paddle_effect_secs)
    }

    pub fn immunity_ticks(&self) -> u32 {
        secs_to_ticks(self.immunity_secs)
    }

    pub fn flash_ticks(&self) -> u32 {
        secs_to_ticks(self.flash_secs)
    }

    pub fn ready_ticks(&self) -> u32 {
        secs_to_ticks(self.ready_secs)
    }

    pub fn particle_life_ticks(&self) -> u32 {
        secs_to_ticks(self.particle_life_secs).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.slow_ticks(), 420);
        assert_eq!(tuning.paddle_effect_ticks(), 480);
        assert_eq!(tuning.immunity_ticks(), 60);
        assert_eq!(tuning.ready_ticks(), 120);
        assert_eq!(tuning.particle_life_ticks(), 30);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "powerup_chance": 0.5, "max_misses": 5 }"#).unwrap();
        assert_eq!(tuning.powerup_chance, 0.5);
        assert_eq!(tuning.max_misses, 5);
        assert_eq!(tuning.field_width, 360.0);
        assert_eq!(tuning.paddle_width, 100.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "powerup_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "powerup_chance",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "paddle_width": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "paddle_width",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "wide_factor": 4.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "wide_factor",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Tuning::load("/definitely/not/here/tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}

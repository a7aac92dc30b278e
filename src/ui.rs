//! HUD and render snapshot
//!
//! Everything a renderer needs for one frame, derived from the session without
//! mutating it. Text is preformatted; shapes are plain rectangles and circles
//! in field coordinates (origin bottom-left, centers).

use glam::Vec2;
use serde::Serialize;

use crate::Rgba;
use crate::consts::HEALTH_BAR_WIDTH;
use crate::palette;
use crate::sim::{GamePhase, Session};

/// Primitive the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    Rect,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub shape: Shape,
    pub center: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

/// Particle dot diameter
pub const PARTICLE_SIZE: f32 = 5.0;
/// Glow extends this far past the ball on each axis (half on each side)
pub const BALL_GLOW_PAD: f32 = 20.0;

impl Sprite {
    fn rect(center: Vec2, size: Vec2, color: Rgba) -> Self {
        Self {
            shape: Shape::Rect,
            center,
            size,
            color,
        }
    }

    fn circle(center: Vec2, diameter: f32, color: Rgba) -> Self {
        Self {
            shape: Shape::Circle,
            center,
            size: Vec2::splat(diameter),
            color,
        }
    }
}

/// Overlay text shown for non-playing phases
pub fn banner(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Ready => Some("Ready..."),
        GamePhase::Playing => None,
        GamePhase::Paused => Some("Paused"),
        GamePhase::GameOver => Some("Game Over! Tap to Restart"),
    }
}

/// Banner color: red for game over, yellow otherwise
pub fn banner_color(phase: GamePhase) -> Rgba {
    match phase {
        GamePhase::GameOver => palette::GAME_OVER_TEXT,
        _ => palette::HIGHLIGHT_TEXT,
    }
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

pub fn high_score_text(high_score: u64) -> String {
    format!("High Score: {high_score}")
}

/// Health bar fill width for a fraction in [0, 1]
pub fn health_bar_width(fraction: f32) -> f32 {
    HEALTH_BAR_WIDTH * fraction.clamp(0.0, 1.0)
}

/// Text and gauges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: String,
    pub high_score: String,
    pub combo: Option<String>,
    pub banner: Option<&'static str>,
    pub banner_color: Rgba,
    /// Score labels use `text_color`, the combo label `highlight_color`
    pub text_color: Rgba,
    pub highlight_color: Rgba,
    pub health_fraction: f32,
    pub health_bar_width: f32,
    pub paddle_flashing: bool,
    pub health_bg: Rgba,
    pub health_fg: Rgba,
}

impl Hud {
    pub fn from_session(session: &Session) -> Self {
        let fraction = session.health_fraction();
        Self {
            score: score_text(session.score),
            high_score: high_score_text(session.high_score),
            combo: session.combo.label(),
            banner: banner(session.phase),
            banner_color: banner_color(session.phase),
            text_color: palette::SCORE_TEXT,
            highlight_color: palette::HIGHLIGHT_TEXT,
            health_fraction: fraction,
            health_bar_width: health_bar_width(fraction),
            paddle_flashing: session.health.is_flashing(),
            health_bg: palette::HEALTH_BG,
            health_fg: palette::HEALTH_FG,
        }
    }
}

/// Full frame for the render collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub field: Vec2,
    pub ball: Sprite,
    /// Soft halo drawn under the ball
    pub ball_glow: Sprite,
    pub paddle: Sprite,
    pub powerups: Vec<Sprite>,
    pub particles: Vec<Sprite>,
    pub hud: Hud,
}

impl RenderFrame {
    pub fn from_session(session: &Session) -> Self {
        let paddle = &session.paddle;
        let ball = &session.ball;

        let powerups = session
            .powerups
            .iter()
            .map(|p| Sprite::rect(p.pos, Vec2::splat(p.size), p.kind.color()))
            .collect();

        let particles = session
            .particles
            .iter()
            .map(|p| {
                let mut color = p.color;
                color[3] *= p.alpha();
                Sprite::circle(p.pos, PARTICLE_SIZE, color)
            })
            .collect();

        Self {
            field: Vec2::new(session.tuning.field_width, session.tuning.field_height),
            ball: Sprite::circle(ball.pos, ball.size, palette::BALL),
            ball_glow: Sprite::circle(ball.pos, ball.size + BALL_GLOW_PAD, palette::BALL_GLOW),
            paddle: Sprite::rect(
                paddle.center(),
                Vec2::new(paddle.width, paddle.height),
                session.paddle_color(),
            ),
            powerups,
            particles,
            hud: Hud::from_session(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUpKind, TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_banners() {
        assert_eq!(banner(GamePhase::Ready), Some("Ready..."));
        assert_eq!(banner(GamePhase::Playing), None);
        assert_eq!(banner(GamePhase::Paused), Some("Paused"));
        assert_eq!(
            banner(GamePhase::GameOver),
            Some("Game Over! Tap to Restart")
        );
        assert_eq!(banner_color(GamePhase::GameOver), palette::GAME_OVER_TEXT);
        assert_eq!(banner_color(GamePhase::Paused), palette::HIGHLIGHT_TEXT);
    }

    #[test]
    fn test_health_bar() {
        assert_eq!(health_bar_width(1.0), 90.0);
        assert!((health_bar_width(1.0 / 3.0) - 30.0).abs() < 1e-4);
        assert_eq!(health_bar_width(-0.5), 0.0);
    }

    #[test]
    fn test_hud_for_fresh_session() {
        let session = Session::new(3, Tuning::default(), 17);
        let hud = Hud::from_session(&session);
        assert_eq!(hud.score, "Score: 0");
        assert_eq!(hud.high_score, "High Score: 17");
        assert_eq!(hud.combo, None);
        assert_eq!(hud.banner, Some("Ready..."));
        assert_eq!(hud.health_bar_width, 90.0);
        assert!(!hud.paddle_flashing);
    }

    #[test]
    fn test_combo_label_and_flash() {
        let mut session = Session::new(3, Tuning::default(), 0);
        session.combo.count = 5;
        session.combo.multiplier = 2;
        session.health.misses = 1;
        session.health.flash_ticks = 10;
        let hud = Hud::from_session(&session);
        assert_eq!(hud.combo.as_deref(), Some("Combo x5! Multiplier: 2x"));
        assert!((hud.health_bar_width - 60.0).abs() < 1e-4);
        assert!(hud.paddle_flashing);
        let frame = RenderFrame::from_session(&session);
        assert_eq!(frame.paddle.color, palette::PADDLE_FLASH);
    }

    #[test]
    fn test_frame_sprites() {
        let mut session = Session::new(3, Tuning::default(), 0);
        crate::sim::effects::spawn_powerup(&mut session, PowerUpKind::Double);
        session.burst(Vec2::new(100.0, 100.0), palette::CATCH_BURST, 8);
        tick(&mut session, &TickInput::default());

        let frame = RenderFrame::from_session(&session);
        assert_eq!(frame.field, Vec2::new(360.0, 640.0));
        assert_eq!(frame.paddle.size, Vec2::new(100.0, 20.0));
        assert_eq!(frame.paddle.center.y, 30.0);
        assert_eq!(frame.ball.size, Vec2::splat(20.0));
        assert_eq!(frame.ball_glow.size, Vec2::splat(40.0));
        assert_eq!(frame.ball_glow.center, frame.ball.center);

        assert_eq!(frame.powerups.len(), 1);
        let powerup = &frame.powerups[0];
        assert_eq!(powerup.shape, Shape::Rect);
        assert_eq!(powerup.size, Vec2::splat(24.0));
        assert_eq!(powerup.color, PowerUpKind::Double.color());

        assert_eq!(frame.particles.len(), 8);
        for particle in &frame.particles {
            assert_eq!(particle.shape, Shape::Circle);
            assert_eq!(particle.size, Vec2::splat(PARTICLE_SIZE));
            assert!(particle.color[3] < 1.0);
        }
    }
}

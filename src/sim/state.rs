//! Session state and core simulation types
//!
//! Field coordinates: origin bottom-left, y grows upward. Entity positions are
//! centers; sizes are full extents. Velocities are in units per tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::health::Health;
use super::scoring::{Combo, ball_speed};
use crate::tuning::Tuning;
use crate::{Rgba, palette};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Countdown before the ball drops; input disabled
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Round ended, waiting for restart
    GameOver,
}

/// The falling ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Signed vertical velocity (negative = falling)
    pub vel_y: f32,
    pub size: f32,
}

impl Ball {
    pub fn new(size: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel_y: 0.0,
            size,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y + self.size / 2.0
    }

    /// Move one tick, scaled by the slow-motion factor (1.0 when inactive)
    pub fn advance(&mut self, speed_factor: f32) {
        self.pos.y += self.vel_y * speed_factor;
    }

    /// Put the ball at the top of the field and start it falling
    pub fn launch(&mut self, center_x: f32, field_height: f32, speed: f32) {
        self.pos = Vec2::new(center_x, field_height - self.size / 2.0);
        self.vel_y = -speed.abs();
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Center x
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub default_width: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.field_width / 2.0,
            y: tuning.paddle_y,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            default_width: tuning.paddle_width,
        }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.half_width()
    }

    pub fn right(&self) -> f32 {
        self.x + self.half_width()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height / 2.0)
    }

    /// Center the paddle on `x`, keeping it inside the field
    pub fn move_to(&mut self, x: f32, field_width: f32) {
        let half = self.half_width();
        self.x = x.max(half).min(field_width - half);
    }

    /// Resize around the current center, then re-clamp
    pub fn set_width(&mut self, width: f32, field_width: f32) {
        self.width = width;
        self.move_to(self.x, field_width);
    }

    pub fn reset_width(&mut self, field_width: f32) {
        self.set_width(self.default_width, field_width);
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Slow,
    Double,
    Life,
    Wide,
    Shrink,
    /// Defined but never spawned and has no effect
    Reverse,
}

impl PowerUpKind {
    /// Kinds that can drop after a catch
    pub const SPAWN_POOL: [PowerUpKind; 5] = [
        PowerUpKind::Slow,
        PowerUpKind::Double,
        PowerUpKind::Life,
        PowerUpKind::Wide,
        PowerUpKind::Shrink,
    ];

    pub fn color(&self) -> Rgba {
        match self {
            PowerUpKind::Slow => [0.0, 1.0, 1.0, 1.0],
            PowerUpKind::Double => [1.0, 1.0, 0.0, 1.0],
            PowerUpKind::Life => [0.0, 1.0, 0.0, 1.0],
            PowerUpKind::Wide => [0.5, 0.5, 1.0, 1.0],
            PowerUpKind::Shrink => [1.0, 0.5, 0.0, 1.0],
            PowerUpKind::Reverse => [1.0, 0.0, 1.0, 1.0],
        }
    }

    /// Whether the demo autopilot should chase this pickup
    pub fn is_beneficial(&self) -> bool {
        !matches!(self, PowerUpKind::Shrink | PowerUpKind::Reverse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Slow => "slow",
            PowerUpKind::Double => "double",
            PowerUpKind::Life => "life",
            PowerUpKind::Wide => "wide",
            PowerUpKind::Shrink => "shrink",
            PowerUpKind::Reverse => "reverse",
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    /// Units per tick, downward
    pub fall_speed: f32,
}

impl PowerUp {
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size / 2.0
    }

    pub fn advance(&mut self) {
        self.pos.y -= self.fall_speed;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    pub age_ticks: u32,
    pub life_ticks: u32,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.age_ticks += 1;
    }

    pub fn is_dead(&self) -> bool {
        self.age_ticks >= self.life_ticks
    }

    /// Opacity fading linearly over the lifetime
    pub fn alpha(&self) -> f32 {
        1.0 - (self.age_ticks as f32 / self.life_ticks as f32).min(1.0)
    }
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Audio cues for the sound collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Startup,
    Catch,
    Miss,
    GameOver,
}

/// Things that happened during a tick, for collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Spawn `count` particles of `color` at `pos`
    ParticleBurst {
        pos: Vec2,
        color: Rgba,
        count: u32,
    },
    PhaseChanged(GamePhase),
    Caught {
        points: u64,
        /// Combo count after this catch
        combo: u32,
        multiplier: u32,
    },
    Missed { misses: u8 },
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    /// Score beat the stored high score; persist it
    NewHighScore(u64),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (ball launch and power-up drops)
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Ready countdown (ticks remaining)
    pub ready_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub high_score: u64,
    pub combo: Combo,
    pub health: Health,
    pub effects: ActiveEffects,
    pub ball: Ball,
    pub paddle: Paddle,
    pub powerups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a session in the Ready phase
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ball: Ball::new(tuning.ball_size),
            paddle: Paddle::new(&tuning),
            ready_ticks: 0,
            tuning,
            phase: GamePhase::Ready,
            time_ticks: 0,
            score: 0,
            high_score,
            combo: Combo::default(),
            health: Health::default(),
            effects: ActiveEffects::default(),
            powerups: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        };
        session.reset_ball();
        session.enter_ready();
        session
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    /// Start the ready countdown
    pub fn enter_ready(&mut self) {
        self.ready_ticks = self.tuning.ready_ticks();
        self.set_phase(GamePhase::Ready);
        self.emit(GameEvent::Sound(SoundCue::Startup));
    }

    /// Relaunch the ball from the top at the speed for the current score
    pub fn reset_ball(&mut self) {
        let margin = self.tuning.ball_launch_margin;
        let min_x = margin.round() as i32;
        let max_x = (self.tuning.field_width - margin).round() as i32;
        let max_x = max_x.max(min_x);
        let x = self.rng.random_range(min_x..=max_x) as f32;
        let speed = ball_speed(self.score);
        self.ball.launch(x, self.tuning.field_height, speed);
    }

    /// Clear the round and return to Ready
    pub fn restart(&mut self) {
        log::info!("Restarting (last score {})", self.score);
        self.score = 0;
        self.combo.reset();
        self.health = Health::default();
        self.effects = ActiveEffects::default();
        self.paddle.reset_width(self.tuning.field_width);
        self.powerups.clear();
        self.reset_ball();
        self.enter_ready();
    }

    /// Signal a particle burst and spawn the cosmetic particles
    pub fn burst(&mut self, pos: Vec2, color: Rgba, count: u32) {
        self.emit(GameEvent::ParticleBurst { pos, color, count });

        let life_ticks = self.tuning.particle_life_ticks();
        let particle_seed = self.time_ticks as u32;
        for i in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                // Remove oldest particles to make room
                self.particles.remove(0);
            }
            // Deterministic spread without touching the gameplay RNG
            let hash = particle_seed
                .wrapping_mul(2654435761)
                .wrapping_add(i.wrapping_mul(7919))
                .wrapping_mul(2246822519);
            let vx = (hash % 11) as f32 - 5.0;
            let vy = 2.0 + ((hash / 11) % 5) as f32;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(vx, vy),
                color,
                age_ticks: 0,
                life_ticks,
            });
        }
    }

    /// Advance and cull cosmetic particles
    pub fn update_particles(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.advance();
        }
        self.particles.retain(|p| !p.is_dead());
    }

    pub fn misses(&self) -> u8 {
        self.health.misses
    }

    pub fn multiplier(&self) -> u32 {
        self.combo.multiplier
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_immune(&self) -> bool {
        self.health.is_immune()
    }

    pub fn health_fraction(&self) -> f32 {
        self.health.fraction(self.tuning.max_misses)
    }

    /// Paddle color, white while the post-miss flash runs
    pub fn paddle_color(&self) -> Rgba {
        if self.health.is_flashing() {
            palette::PADDLE_FLASH
        } else {
            palette::PADDLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_ready() {
        let session = Session::new(7, Tuning::default(), 42);
        assert_eq!(session.phase, GamePhase::Ready);
        assert_eq!(session.ready_ticks, 120);
        assert_eq!(session.high_score, 42);
        assert_eq!(session.score, 0);
        assert!(
            session
                .events()
                .contains(&GameEvent::Sound(SoundCue::Startup))
        );
    }

    #[test]
    fn test_reset_ball_launch_position() {
        let mut session = Session::new(3, Tuning::default(), 0);
        for _ in 0..100 {
            session.reset_ball();
            assert!(session.ball.pos.x >= 20.0 && session.ball.pos.x <= 340.0);
            assert_eq!(session.ball.top(), 640.0);
            assert_eq!(session.ball.vel_y, -4.0);
        }
        session.score = 100;
        session.reset_ball();
        assert!((session.ball.vel_y + 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_clamped_to_field() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.move_to(-500.0, tuning.field_width);
        assert_eq!(paddle.left(), 0.0);
        paddle.move_to(10_000.0, tuning.field_width);
        assert_eq!(paddle.right(), 360.0);
    }

    #[test]
    fn test_paddle_resize_keeps_center_and_clamps() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.move_to(180.0, tuning.field_width);
        paddle.set_width(200.0, tuning.field_width);
        assert_eq!(paddle.x, 180.0);

        paddle.reset_width(tuning.field_width);
        paddle.move_to(350.0, tuning.field_width);
        assert_eq!(paddle.x, 310.0);
        paddle.set_width(200.0, tuning.field_width);
        assert_eq!(paddle.right(), 360.0);
        assert_eq!(paddle.x, 260.0);
    }

    #[test]
    fn test_particles_fade_and_die() {
        let mut session = Session::new(1, Tuning::default(), 0);
        session.burst(Vec2::new(100.0, 100.0), palette::CATCH_BURST, 8);
        assert_eq!(session.particles.len(), 8);
        for p in &session.particles {
            assert!((-5.0..=5.0).contains(&p.vel.x));
            assert!((2.0..=6.0).contains(&p.vel.y));
        }
        for _ in 0..29 {
            session.update_particles();
        }
        assert_eq!(session.particles.len(), 8);
        assert!(session.particles[0].alpha() > 0.0);
        session.update_particles();
        assert!(session.particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut session = Session::new(1, Tuning::default(), 0);
        for _ in 0..40 {
            session.burst(Vec2::ZERO, palette::MISS_BURST, 15);
        }
        assert_eq!(session.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_drain_events() {
        let mut session = Session::new(1, Tuning::default(), 0);
        assert!(!session.drain_events().is_empty());
        assert!(session.events().is_empty());
    }
}

//! Frame driver
//!
//! Hosts call [`Runner::update`] once per rendered frame with the elapsed wall
//! time. The runner converts that into whole fixed ticks, feeds the latest
//! input to the simulation and hands the resulting events to the audio and
//! high score collaborators.

use glam::Vec2;

use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScoreStore;
use crate::sim::{GameEvent, Session, TickInput, tick};
use crate::tuning::{Tuning, TuningError};
use crate::ui::RenderFrame;

pub struct Runner<S: HighScoreStore, A: AudioSink> {
    session: Session,
    store: S,
    audio: AudioManager<A>,
    input: TickInput,
    accumulator: f32,
}

impl<S: HighScoreStore, A: AudioSink> Runner<S, A> {
    /// Start a session seeded with `seed`, picking up the stored high score.
    /// Fails if `tuning` does not validate.
    pub fn new(seed: u64, tuning: Tuning, store: S, audio: A) -> Result<Self, TuningError> {
        tuning.validate()?;
        let high_score = store.load();
        log::info!("Session seed {seed}, high score {high_score}");
        Ok(Self {
            session: Session::new(seed, tuning, high_score),
            store,
            audio: AudioManager::new(audio),
            input: TickInput::default(),
            accumulator: 0.0,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<A> {
        &mut self.audio
    }

    /// Pointer position in field coordinates
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer = Some(Vec2::new(x, y));
    }

    pub fn pointer_down(&mut self) {
        self.input.pointer_down = true;
    }

    pub fn pause_toggle(&mut self) {
        self.input.pause = true;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        if self.input.idle_mode != idle {
            log::info!("Idle mode: {}", idle);
        }
        self.input.idle_mode = idle;
    }

    pub fn idle_mode(&self) -> bool {
        self.input.idle_mode
    }

    /// Run as many fixed ticks as `frame_dt` seconds cover and dispatch the
    /// events they produced. Returns the dispatched events.
    pub fn update(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.session, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pointer_down = false;
            self.input.pause = false;
        }

        // Drop the backlog we refused to simulate
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            self.accumulator = 0.0;
        }

        let events = self.session.drain_events();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(cue) => self.audio.play(*cue),
            GameEvent::NewHighScore(score) => self.store.save(*score),
            _ => {}
        }
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::from_session(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSink;
    use crate::highscores::MemoryStore;
    use crate::sim::{GamePhase, SoundCue};

    #[derive(Default)]
    struct Recorder {
        cues: Vec<SoundCue>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, _volume: f32) {
            self.cues.push(cue);
        }
    }

    type TestRunner = Runner<MemoryStore, Recorder>;

    fn runner_with(stored: Option<u64>, tuning: Tuning) -> TestRunner {
        let store = MemoryStore {
            score: stored,
            saves: 0,
        };
        Runner::new(5, tuning, store, Recorder::default()).unwrap()
    }

    fn runner(stored: Option<u64>) -> TestRunner {
        runner_with(stored, Tuning::default())
    }

    /// Runner without power-up drops, already past the Ready countdown
    fn playing_runner(stored: Option<u64>) -> TestRunner {
        let tuning = Tuning {
            powerup_chance: 0.0,
            ..Default::default()
        };
        let mut r = runner_with(stored, tuning);
        run_ticks(&mut r, 120);
        assert_eq!(r.session().phase, GamePhase::Playing);
        r
    }

    /// Advance exactly `ticks` fixed ticks
    fn run_ticks(runner: &mut TestRunner, ticks: u32) {
        for _ in 0..ticks {
            runner.update(SIM_DT);
        }
    }

    fn cue_count(runner: &TestRunner, cue: SoundCue) -> usize {
        let cues = &runner.audio().sink().cues;
        cues.iter().filter(|&&c| c == cue).count()
    }

    /// Track the ball until the next catch lands
    fn catch_one(r: &mut TestRunner) {
        let score = r.session().score;
        let mut guard = 0;
        while r.session().score == score && guard < 1_000 {
            let x = r.session().ball.pos.x;
            r.pointer_move(x, 400.0);
            r.update(SIM_DT);
            guard += 1;
        }
        assert!(r.session().score > score);
    }

    /// Keep the paddle away from every ball until the round ends
    fn miss_until_game_over(r: &mut TestRunner) {
        let mut guard = 0;
        while r.session().phase != GamePhase::GameOver && guard < 10_000 {
            let x = if r.session().ball.pos.x < 180.0 {
                360.0
            } else {
                0.0
            };
            r.pointer_move(x, 400.0);
            r.update(SIM_DT);
            guard += 1;
        }
        assert_eq!(r.session().phase, GamePhase::GameOver);
    }

    #[test]
    fn test_loads_high_score() {
        let r = runner(Some(77));
        assert_eq!(r.session().high_score, 77);
        assert_eq!(r.frame().hud.high_score, "High Score: 77");
        assert_eq!(runner(None).session().high_score, 0);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            powerup_chance: 1.5,
            ..Default::default()
        };
        let result = Runner::new(1, tuning, MemoryStore::default(), NullSink);
        assert!(matches!(
            result,
            Err(TuningError::Invalid {
                field: "powerup_chance",
                ..
            })
        ));
    }

    #[test]
    fn test_idle_session_with_null_sink() {
        let tuning = Tuning {
            powerup_chance: 1.0,
            ..Default::default()
        };
        let mut r = Runner::new(1, tuning, MemoryStore::default(), NullSink).unwrap();
        assert!(!r.idle_mode());
        r.set_idle_mode(true);
        assert!(r.idle_mode());
        for _ in 0..6_000 {
            r.update(SIM_DT);
        }
        assert_eq!(r.session().time_ticks, 6_000);
    }

    #[test]
    fn test_accumulator_runs_whole_ticks() {
        let mut r = runner(None);
        r.update(SIM_DT * 0.5);
        assert_eq!(r.session().time_ticks, 0);
        r.update(SIM_DT * 0.6);
        assert_eq!(r.session().time_ticks, 1);
    }

    #[test]
    fn test_long_frame_capped() {
        let mut r = runner(None);
        // Clamped to 0.1s, about six ticks
        r.update(5.0);
        let ticks = r.session().time_ticks;
        assert!((5..=6).contains(&ticks));
        r.update(-1.0);
        assert_eq!(r.session().time_ticks, ticks);
    }

    #[test]
    fn test_startup_cue_reaches_audio() {
        let mut r = runner(None);
        // The startup cue from construction is delivered on the first update
        r.update(SIM_DT);
        assert_eq!(r.audio().sink().cues, vec![SoundCue::Startup]);
    }

    #[test]
    fn test_pause_is_one_shot() {
        let mut r = runner(None);
        run_ticks(&mut r, 120);
        assert_eq!(r.session().phase, GamePhase::Playing);

        r.pause_toggle();
        run_ticks(&mut r, 3);
        assert_eq!(r.session().phase, GamePhase::Paused);
        assert_eq!(r.frame().hud.banner, Some("Paused"));

        r.pause_toggle();
        run_ticks(&mut r, 1);
        assert_eq!(r.session().phase, GamePhase::Playing);
    }

    #[test]
    fn test_pointer_moves_paddle() {
        let mut r = runner(None);
        run_ticks(&mut r, 120);
        r.pointer_move(300.0, 400.0);
        run_ticks(&mut r, 1);
        assert_eq!(r.session().paddle.x, 300.0);
    }

    #[test]
    fn test_game_over_without_record_skips_save() {
        let mut r = playing_runner(Some(0));
        miss_until_game_over(&mut r);
        assert_eq!(r.session().score, 0);
        assert_eq!(r.store().saves, 0);
        assert_eq!(cue_count(&r, SoundCue::GameOver), 1);
        assert_eq!(cue_count(&r, SoundCue::Miss), 3);

        r.pointer_down();
        r.update(SIM_DT);
        assert_eq!(r.session().phase, GamePhase::Ready);
    }

    #[test]
    fn test_new_record_saved_once() {
        let mut r = playing_runner(Some(0));
        catch_one(&mut r);
        assert_eq!(r.session().score, 1);
        assert_eq!(cue_count(&r, SoundCue::Catch), 1);
        assert_eq!(r.store().saves, 0);

        miss_until_game_over(&mut r);
        assert_eq!(r.store().score, Some(1));
        assert_eq!(r.store().saves, 1);
        assert_eq!(r.session().high_score, 1);
    }

    #[test]
    fn test_tying_record_not_saved() {
        let mut r = playing_runner(Some(1));
        catch_one(&mut r);
        miss_until_game_over(&mut r);
        assert_eq!(r.session().score, 1);
        assert_eq!(r.session().high_score, 1);
        assert_eq!(r.store().saves, 0);
        assert_eq!(r.store().score, Some(1));
    }

    #[test]
    fn test_idle_mode_persists_new_high_score() {
        let mut r = runner(None);
        r.set_idle_mode(true);
        let mut best = 0;
        for _ in 0..60 * 600 {
            for event in r.update(SIM_DT) {
                if let GameEvent::NewHighScore(score) = event {
                    best = score;
                }
            }
        }
        assert!(best > 0);
        assert_eq!(r.store().score, Some(best));
        assert!(r.store().saves >= 1);
        assert_eq!(r.session().time_ticks, 60 * 600);
    }

    #[test]
    fn test_muted_audio_is_silent() {
        let mut r = runner(None);
        r.audio_mut().set_muted(true);
        r.update(SIM_DT);
        assert!(r.audio().sink().cues.is_empty());
    }
}

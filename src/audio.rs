//! Audio output
//!
//! The simulation only names cues; an [`AudioSink`] decides what they sound
//! like. [`AudioManager`] sits in front of the sink and applies volume and mute.
//! On the web the sink synthesizes tones with the Web Audio API, natively the
//! cues are logged.

use crate::sim::SoundCue;

/// Something that can play a cue at a given volume (0.0 - 1.0)
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Writes cues to the log instead of a speaker
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("Sound cue {:?} at volume {:.2}", cue, volume);
    }
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink + Default> Default for AudioManager<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue; silent when muted or at zero volume
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::AudioSink;
    use crate::sim::SoundCue;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Procedural tones through the Web Audio API
    pub struct WebAudioSink {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudioSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioSink {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Sequence of short notes, `step` seconds apart
        fn arpeggio(
            ctx: &AudioContext,
            notes: &[f32],
            step: f64,
            osc_type: OscillatorType,
            vol: f32,
        ) {
            for (i, freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = Self::create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * step;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + step * 1.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + step * 2.0).ok();
            }
        }
    }

    impl AudioSink for WebAudioSink {
        fn play(&mut self, cue: SoundCue, vol: f32) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers start suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Startup => Self::arpeggio(
                    ctx,
                    &[400.0, 500.0, 600.0, 800.0],
                    0.08,
                    OscillatorType::Triangle,
                    vol * 0.25,
                ),
                SoundCue::Catch => Self::arpeggio(
                    ctx,
                    &[880.0, 1320.0],
                    0.05,
                    OscillatorType::Sine,
                    vol * 0.3,
                ),
                SoundCue::Miss => Self::arpeggio(
                    ctx,
                    &[150.0, 90.0],
                    0.1,
                    OscillatorType::Sawtooth,
                    vol * 0.3,
                ),
                SoundCue::GameOver => Self::arpeggio(
                    ctx,
                    &[400.0, 350.0, 300.0, 200.0],
                    0.2,
                    OscillatorType::Sine,
                    vol * 0.3,
                ),
            }
        }
    }
}

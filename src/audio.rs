//! Sound cues
//!
//! The simulation only names the sound it wants; an [`AudioSink`] decides what
//! to do with it. On the web the cues are procedurally generated with Web Audio
//! oscillators, natively they are logged.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player weapon fired
    Shoot,
    /// Player took damage
    Damage,
    /// Power-up collected
    PowerUp,
    /// Minion (small) or boss (large) destroyed
    Explosion { large: bool },
    /// Boss fired a volley
    BossShot,
    /// Level increased
    LevelUp,
}

/// Fire-and-forget consumer of sound cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);

    /// Apply new volume settings; sinks without a notion of volume ignore it
    fn set_volume(&mut self, _volume: Volume) {}
}

/// Volume state shared by every sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub master: f32,
    pub sfx: f32,
    pub muted: bool,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            master: 0.8,
            sfx: 1.0,
            muted: false,
        }
    }
}

impl Volume {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master: settings.master_volume.clamp(0.0, 1.0),
            sfx: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Get effective volume
    pub fn effective(&self) -> f32 {
        if self.muted { 0.0 } else { self.master * self.sfx }
    }
}

/// Native sink: records and logs cues
#[derive(Debug, Default)]
pub struct LogAudio {
    pub volume: Volume,
    pub played: Vec<SoundCue>,
}

impl LogAudio {
    pub fn new(volume: Volume) -> Self {
        Self {
            volume,
            played: Vec::new(),
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        if self.volume.effective() <= 0.0 {
            return;
        }
        log::trace!("sfx {:?}", cue);
        self.played.push(cue);
    }

    fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
    }
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue, Volume};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: Volume,
    }

    impl AudioManager {
        pub fn new(volume: Volume) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// One oscillator sweeping from `from` to `to` Hz while fading out
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            gain_level: f32,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(gain_level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }

        /// Level up - rising arpeggio
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let start = t + i as f64 * 0.08;
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain().set_value_at_time(vol * 0.3, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.2)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + 0.25).ok();
                }
            }
        }
    }

    impl AudioSink for AudioManager {
        fn set_volume(&mut self, volume: Volume) {
            self.volume = volume;
        }

        fn play(&mut self, cue: SoundCue) {
            let vol = self.volume.effective();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Shoot => self.sweep(ctx, OscillatorType::Square, 880.0, 220.0, vol * 0.08, 0.08),
                SoundCue::Damage => self.sweep(ctx, OscillatorType::Sawtooth, 200.0, 50.0, vol * 0.4, 0.25),
                SoundCue::PowerUp => self.sweep(ctx, OscillatorType::Sine, 400.0, 1600.0, vol * 0.3, 0.3),
                SoundCue::Explosion { large: false } => {
                    self.sweep(ctx, OscillatorType::Sawtooth, 100.0, 30.0, vol * 0.35, 0.25)
                }
                SoundCue::Explosion { large: true } => {
                    self.sweep(ctx, OscillatorType::Sawtooth, 120.0, 20.0, vol * 0.6, 1.0);
                    self.sweep(ctx, OscillatorType::Square, 1500.0, 200.0, vol * 0.2, 0.3);
                }
                SoundCue::BossShot => self.sweep(ctx, OscillatorType::Triangle, 300.0, 120.0, vol * 0.25, 0.15),
                SoundCue::LevelUp => self.play_level_up(ctx, vol),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut volume = Volume::default();
        assert!((volume.effective() - 0.8).abs() < 1e-6);
        volume.muted = true;
        assert_eq!(volume.effective(), 0.0);
    }

    #[test]
    fn test_log_audio_respects_mute() {
        let mut sink = LogAudio::new(Volume {
            muted: true,
            ..Volume::default()
        });
        sink.play(SoundCue::Shoot);
        assert!(sink.played.is_empty());

        let mut sink = LogAudio::default();
        sink.play(SoundCue::Explosion { large: true });
        assert_eq!(sink.played, vec![SoundCue::Explosion { large: true }]);

        sink.set_volume(Volume {
            muted: true,
            ..Volume::default()
        });
        sink.play(SoundCue::Shoot);
        assert_eq!(sink.played.len(), 1);
    }
}

//! Positional ambient sources and the speed-driven scroll feedback.

use crate::constants::{
    AUDIO_SMOOTHING_RATE, DEFAULT_CLICK_PITCH_MAX, DEFAULT_CLICK_PITCH_MIN, DEFAULT_CLICK_STEP,
    DEFAULT_FADE_IN_SEC, DEFAULT_FADE_OUT_SEC, DEFAULT_MAX_CUTOFF_HZ, DEFAULT_MAX_NOISE_VOLUME,
    DEFAULT_MIN_CUTOFF_HZ, DEFAULT_SPEED_FOR_MAX_VOLUME, NOISE_PITCH_MAX,
};
use crate::math::{clamp01, lerp, Easing};
use crate::registry::{DistanceSubscriber, FrameServices, SoftToggle};
use crate::sink::{SinkWrite, TargetId};
use crate::transition::Transition;
use crate::zone::{DistanceFrame, HysteresisBand, HysteresisZone, ZoneAnchor, ZoneTransition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A looping source that fades in when the observer comes close and fades
/// out once they move away.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbientSoundConfig {
    pub target: TargetId,
    pub anchor: ZoneAnchor,
    #[serde(default = "default_activation")]
    pub activation_distance: f32,
    #[serde(default = "default_deactivation")]
    pub deactivation_distance: f32,
    #[serde(default = "default_max_volume")]
    pub max_volume: f32,
    #[serde(default = "default_fade_in")]
    pub fade_in: f32,
    #[serde(default = "default_fade_out")]
    pub fade_out: f32,
}

fn default_activation() -> f32 {
    10.0
}
fn default_deactivation() -> f32 {
    12.0
}
fn default_max_volume() -> f32 {
    1.0
}
fn default_fade_in() -> f32 {
    DEFAULT_FADE_IN_SEC
}
fn default_fade_out() -> f32 {
    DEFAULT_FADE_OUT_SEC
}

#[derive(Clone, Debug)]
struct AmbientSource {
    config: AmbientSoundConfig,
    zone: HysteresisZone,
    gain: Transition,
    playing: bool,
}

pub struct AmbientSounds {
    sources: Vec<AmbientSource>,
}

impl AmbientSounds {
    pub fn new(configs: &[AmbientSoundConfig]) -> Self {
        let sources = configs
            .iter()
            .map(|c| AmbientSource {
                zone: HysteresisZone::new(
                    HysteresisBand::new(c.activation_distance, c.deactivation_distance, 0.0),
                    false,
                ),
                config: c.clone(),
                gain: Transition::settled(0.0),
                playing: false,
            })
            .collect();
        Self { sources }
    }

    pub fn gain_of(&self, target: TargetId) -> Option<f32> {
        self.sources
            .iter()
            .find(|s| s.config.target == target)
            .map(|s| s.gain.value())
    }
}

impl DistanceSubscriber for AmbientSounds {
    fn name(&self) -> &str {
        "ambient_sounds"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        _services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        for src in &mut self.sources {
            let target = src.config.target;
            match src.zone.update(src.config.anchor.separation(frame), frame.dt) {
                Some(ZoneTransition::Activated) => {
                    if !src.playing {
                        out.push(SinkWrite::AudioPlay { target });
                        src.playing = true;
                    }
                    src.gain
                        .retarget(src.config.max_volume, src.config.fade_in, Easing::Linear);
                }
                Some(ZoneTransition::Deactivated) => {
                    src.gain.retarget(0.0, src.config.fade_out, Easing::Linear);
                }
                None => {}
            }
            if !src.playing {
                continue;
            }
            let gain = src.gain.tick(frame.dt);
            out.push(SinkWrite::AudioGain { target, gain });
            if !src.zone.is_active() && src.gain.is_finished() {
                out.push(SinkWrite::AudioStop { target });
                src.playing = false;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollAudioConfig {
    /// Register the scroll audio subscriber at all.
    pub enabled: bool,
    pub noise_target: TargetId,
    pub click_target: TargetId,
    /// Metres travelled between two step clicks.
    pub step_distance: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub max_noise_volume: f32,
    /// Speed (m/s) at which the noise reaches full volume.
    pub speed_for_max_volume: f32,
    pub min_cutoff_hz: f32,
    pub max_cutoff_hz: f32,
    pub seed: u64,
}

impl Default for ScrollAudioConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            noise_target: TargetId(0),
            click_target: TargetId(1),
            step_distance: DEFAULT_CLICK_STEP,
            pitch_min: DEFAULT_CLICK_PITCH_MIN,
            pitch_max: DEFAULT_CLICK_PITCH_MAX,
            max_noise_volume: DEFAULT_MAX_NOISE_VOLUME,
            speed_for_max_volume: DEFAULT_SPEED_FOR_MAX_VOLUME,
            min_cutoff_hz: DEFAULT_MIN_CUTOFF_HZ,
            max_cutoff_hz: DEFAULT_MAX_CUTOFF_HZ,
            seed: 0x5EED,
        }
    }
}

/// Movement feedback: a noise bed whose gain and brightness follow the
/// observer's speed, plus a click every `step_distance` metres.
pub struct ScrollAudio {
    config: ScrollAudioConfig,
    rng: StdRng,
    enabled: bool,
    last_distance: Option<f32>,
    last_click_at: f32,
    noise_gain: f32,
    cutoff_hz: f32,
    speed: f32,
}

impl ScrollAudio {
    pub fn new(mut config: ScrollAudioConfig) -> Self {
        if config.pitch_min > config.pitch_max {
            std::mem::swap(&mut config.pitch_min, &mut config.pitch_max);
        }
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            enabled: true,
            cutoff_hz: config.min_cutoff_hz,
            config,
            last_distance: None,
            last_click_at: 0.0,
            noise_gain: 0.0,
            speed: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn noise_gain(&self) -> f32 {
        self.noise_gain
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }
}

impl DistanceSubscriber for ScrollAudio {
    fn name(&self) -> &str {
        "scroll_audio"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        _services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        let d = frame.actual_distance;
        let Some(prev) = self.last_distance else {
            self.last_distance = Some(d);
            self.last_click_at = d;
            out.push(SinkWrite::AudioPlay {
                target: self.config.noise_target,
            });
            return;
        };
        self.last_distance = Some(d);
        if frame.dt <= 0.0 || !frame.dt.is_finite() {
            return;
        }
        let cfg = &self.config;
        self.speed = (d - prev).abs() / frame.dt;

        if cfg.step_distance > 0.0 && (d - self.last_click_at).abs() >= cfg.step_distance {
            let pitch = self.rng.gen_range(cfg.pitch_min..=cfg.pitch_max);
            out.push(SinkWrite::AudioOneShot {
                target: cfg.click_target,
                pitch,
            });
            self.last_click_at = d;
        }

        let norm = if cfg.speed_for_max_volume > 0.0 {
            clamp01(self.speed / cfg.speed_for_max_volume)
        } else {
            0.0
        };
        let k = (frame.dt * AUDIO_SMOOTHING_RATE).min(1.0);
        self.noise_gain = lerp(self.noise_gain, norm * cfg.max_noise_volume, k);
        self.cutoff_hz = lerp(
            self.cutoff_hz,
            lerp(cfg.min_cutoff_hz, cfg.max_cutoff_hz, norm),
            k,
        );
        out.push(SinkWrite::AudioGain {
            target: cfg.noise_target,
            gain: self.noise_gain,
        });
        out.push(SinkWrite::AudioFilter {
            target: cfg.noise_target,
            cutoff_hz: self.cutoff_hz,
            pitch: lerp(1.0, NOISE_PITCH_MAX, norm),
        });
    }

    fn soft_toggle(&mut self) -> Option<&mut dyn SoftToggle> {
        Some(self)
    }
}

impl SoftToggle for ScrollAudio {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            // Resume without a speed spike.
            self.last_distance = None;
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

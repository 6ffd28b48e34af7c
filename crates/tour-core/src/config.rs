use crate::animation::{ScrubConfig, ScrubWindow};
use crate::audio::{AmbientSoundConfig, ScrollAudioConfig};
use crate::constants::DEFAULT_CROSSFADE_SEC;
use crate::culling::CullingConfig;
use crate::error::ConfigIssue;
use crate::gesture::GestureConfig;
use crate::idle::IdleConfig;
use crate::keyframes::first_unsorted;
use crate::lighting::{group_by_target, LightConfig};
use crate::music::MusicZoneConfig;
use crate::navigator::NavigatorConfig;
use crate::speed_profile::SpeedEvent;
use crate::triggers::TriggerConfig;
use crate::yaw::LookConfig;
use crate::zone::HysteresisBand;
use crate::zoom::ZoomConfig;
use serde::{Deserialize, Serialize};

/// Complete static description of a tour, supplied once at start-up.
///
/// Every section may be omitted; missing values fall back to the tuning
/// constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub navigator: NavigatorConfig,
    pub gestures: GestureConfig,
    pub look: LookConfig,
    pub zoom: ZoomConfig,
    pub idle: IdleConfig,
    pub speed_events: Vec<SpeedEvent>,
    pub lights: Vec<LightConfig>,
    pub animations: Vec<ScrubConfig>,
    pub triggers: Vec<TriggerConfig>,
    pub culling: CullingConfig,
    pub ambient_sounds: Vec<AmbientSoundConfig>,
    pub music_crossfade: f32,
    pub music_zones: Vec<MusicZoneConfig>,
    pub scroll_audio: ScrollAudioConfig,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            navigator: NavigatorConfig::default(),
            gestures: GestureConfig::default(),
            look: LookConfig::default(),
            zoom: ZoomConfig::default(),
            idle: IdleConfig::default(),
            speed_events: Vec::new(),
            lights: Vec::new(),
            animations: Vec::new(),
            triggers: Vec::new(),
            culling: CullingConfig::default(),
            ambient_sounds: Vec::new(),
            music_crossfade: DEFAULT_CROSSFADE_SEC,
            music_zones: Vec::new(),
            scroll_audio: ScrollAudioConfig::default(),
        }
    }
}

fn check_band(owner: String, band: &HysteresisBand, issues: &mut Vec<ConfigIssue>) {
    if band.activation_radius <= 0.0 {
        issues.push(ConfigIssue::NonPositiveRadius {
            owner,
            radius: band.activation_radius,
        });
    } else if band.is_inverted() {
        issues.push(ConfigIssue::InvertedHysteresis {
            owner,
            activation: band.activation_radius,
            deactivation: band.deactivation_radius,
        });
    }
}

impl TourConfig {
    /// Every problem in this configuration for a track of `track_length` metres.
    ///
    /// Findings are informational: building a [`crate::Tour`] from a config
    /// with issues still succeeds and neutralises the affected entries.
    pub fn validate(&self, track_length: f32) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if track_length - self.navigator.end_offset.max(0.0) <= 0.0 {
            issues.push(ConfigIssue::EmptyPath);
        }
        let damping = self.navigator.damping;
        if !(0.0..1.0).contains(&damping) {
            issues.push(ConfigIssue::DampingOutOfRange(damping));
        }

        for ev in &self.speed_events {
            if ev.length < 0.0 || ev.ease_in < 0.0 || ev.ease_out < 0.0 {
                issues.push(ConfigIssue::NegativeSpeedEvent {
                    label: ev.label.clone(),
                });
            }
        }

        for (target, _, keys) in group_by_target(&self.lights) {
            if let Some(index) = first_unsorted(&keys) {
                issues.push(ConfigIssue::UnsortedKeyframes {
                    owner: ConfigIssue::owner(target, "light"),
                    index,
                });
            }
        }

        for anim in &self.animations {
            if let ScrubWindow::Reveal { reveal_radius, .. } = anim.window {
                if reveal_radius <= 0.0 {
                    issues.push(ConfigIssue::NonPositiveRadius {
                        owner: ConfigIssue::owner(anim.target, "animation"),
                        radius: reveal_radius,
                    });
                }
            }
        }

        for trig in &self.triggers {
            if trig.radius <= 0.0 {
                issues.push(ConfigIssue::NonPositiveRadius {
                    owner: ConfigIssue::owner(trig.target, "trigger"),
                    radius: trig.radius,
                });
            }
        }

        check_band(
            "culling defaults".to_string(),
            &self.culling.defaults,
            &mut issues,
        );
        for entry in &self.culling.entries {
            if let Some(band) = &entry.band {
                check_band(ConfigIssue::owner(entry.target, "mesh"), band, &mut issues);
            }
        }

        for snd in &self.ambient_sounds {
            let band = HysteresisBand::new(snd.activation_distance, snd.deactivation_distance, 0.0);
            check_band(ConfigIssue::owner(snd.target, "sound"), &band, &mut issues);
        }

        for issue in &issues {
            log::warn!("[config] {}", issue);
        }
        issues
    }
}

//! Background music: a shared two-channel crossfading director and the
//! track zones that request clips from it.

use crate::constants::DEFAULT_CROSSFADE_SEC;
use crate::math::Easing;
use crate::registry::{DistanceSubscriber, FrameServices};
use crate::sink::{ClipId, SinkWrite};
use crate::transition::Transition;
use crate::zone::{DistanceFrame, ZoneAnchor};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default)]
struct MusicChannel {
    clip: Option<ClipId>,
    gain: Transition,
}

/// Owner of the two music channels.
///
/// One instance lives in the [`crate::Tour`] and is handed to subscribers
/// through [`FrameServices`]. `play` starts a crossfade from the active
/// channel to the idle one; a request for the clip that is already playing
/// (or already fading in) is ignored, and a new request during a crossfade
/// replaces it: the outgoing channel keeps fading from its current gain and
/// the new clip fades in from 0.
#[derive(Clone, Debug)]
pub struct MusicDirector {
    crossfade_duration: f32,
    channels: [MusicChannel; 2],
    active: usize,
    crossfading: bool,
    pending: Vec<SinkWrite>,
}

impl MusicDirector {
    pub fn new(crossfade_duration: f32) -> Self {
        Self {
            crossfade_duration: crossfade_duration.max(0.0),
            channels: [MusicChannel::default(); 2],
            active: 0,
            crossfading: false,
            pending: Vec::new(),
        }
    }

    pub fn active_clip(&self) -> Option<ClipId> {
        self.channels[self.active].clip
    }

    pub fn is_crossfading(&self) -> bool {
        self.crossfading
    }

    /// Current gain of `channel` (0 or 1).
    pub fn channel_gain(&self, channel: usize) -> f32 {
        self.channels
            .get(channel)
            .map(|c| c.gain.value())
            .unwrap_or(0.0)
    }

    /// Request `clip`. Returns false when the request was ignored.
    pub fn play(&mut self, clip: ClipId) -> bool {
        let incoming = 1 - self.active;
        if self.active_clip() == Some(clip)
            || (self.crossfading && self.channels[incoming].clip == Some(clip))
        {
            return false;
        }
        log::info!(
            "[music] crossfade to {} over {:.1}s",
            clip,
            self.crossfade_duration
        );
        let duration = self.crossfade_duration;
        let out = &mut self.channels[self.active];
        out.gain.retarget(0.0, duration, Easing::Linear);

        let inc = &mut self.channels[incoming];
        inc.clip = Some(clip);
        // A replacement clip always starts from silence.
        inc.gain = Transition::new(0.0, 1.0, duration, Easing::Linear);
        self.crossfading = true;
        self.pending.push(SinkWrite::MusicClip {
            channel: incoming as u8,
            clip,
        });
        true
    }

    pub fn tick(&mut self, dt: f32, out: &mut Vec<SinkWrite>) {
        out.append(&mut self.pending);
        if !self.crossfading {
            return;
        }
        for (i, ch) in self.channels.iter_mut().enumerate() {
            let gain = ch.gain.tick(dt);
            out.push(SinkWrite::MusicGain {
                channel: i as u8,
                gain,
            });
        }
        let incoming = 1 - self.active;
        if self.channels[incoming].gain.is_finished() {
            if self.channels[self.active].clip.take().is_some() {
                out.push(SinkWrite::MusicStop {
                    channel: self.active as u8,
                });
            }
            self.channels[self.active].gain = Transition::settled(0.0);
            self.channels[incoming].gain = Transition::settled(1.0);
            self.active = incoming;
            self.crossfading = false;
            log::debug!("[music] crossfade finished, channel {} active", incoming);
        }
    }
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new(DEFAULT_CROSSFADE_SEC)
    }
}

/// A track region that switches the background music on entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MusicZoneConfig {
    pub clip: ClipId,
    pub anchor: ZoneAnchor,
    /// Extra margin around the anchor counted as inside.
    #[serde(default)]
    pub radius: f32,
}

#[derive(Clone, Debug)]
struct MusicZone {
    config: MusicZoneConfig,
    inside: bool,
}

pub struct MusicZones {
    zones: Vec<MusicZone>,
}

impl MusicZones {
    pub fn new(configs: &[MusicZoneConfig]) -> Self {
        Self {
            zones: configs
                .iter()
                .map(|c| MusicZone {
                    config: c.clone(),
                    inside: false,
                })
                .collect(),
        }
    }
}

impl DistanceSubscriber for MusicZones {
    fn name(&self) -> &str {
        "music_zones"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        services: &mut FrameServices<'_>,
        _out: &mut Vec<SinkWrite>,
    ) {
        for zone in &mut self.zones {
            let inside = zone.config.anchor.separation(frame) <= zone.config.radius.max(0.0);
            if inside && !zone.inside {
                services.music.play(zone.config.clip);
            }
            zone.inside = inside;
        }
    }
}

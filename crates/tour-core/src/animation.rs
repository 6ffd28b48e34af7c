use crate::math::inverse_lerp;
use crate::registry::{DistanceSubscriber, FrameServices};
use crate::sink::{SinkWrite, TargetId};
use crate::zone::{progress, DistanceFrame};
use serde::{Deserialize, Serialize};

/// Track region over which a clip is scrubbed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrubWindow {
    /// Clip reaches its end at `trigger_distance`, starting `reveal_radius` before it.
    Reveal {
        trigger_distance: f32,
        reveal_radius: f32,
    },
    /// Clip runs from its start at `start` to its end at `end`.
    Span { start: f32, end: f32 },
}

impl ScrubWindow {
    /// Distance at which the clip leaves its first frame.
    pub fn entry(&self) -> f32 {
        match *self {
            ScrubWindow::Reveal {
                trigger_distance,
                reveal_radius,
            } => trigger_distance - reveal_radius.max(0.0),
            ScrubWindow::Span { start, end } => start.min(end),
        }
    }

    /// Normalized clip time at `d`, ignoring history.
    pub fn raw_progress(&self, d: f32) -> f32 {
        match *self {
            ScrubWindow::Reveal {
                trigger_distance,
                reveal_radius,
            } => progress(d, trigger_distance, reveal_radius),
            ScrubWindow::Span { start, end } => inverse_lerp(start, end, d),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrubConfig {
    pub target: TargetId,
    pub window: ScrubWindow,
    /// Clip length in seconds, used for the absolute time in the write.
    #[serde(default = "default_clip_length")]
    pub clip_length: f32,
}

fn default_clip_length() -> f32 {
    1.0
}

#[derive(Clone, Debug)]
struct Scrubber {
    config: ScrubConfig,
    last_t: f32,
}

impl Scrubber {
    fn step(&mut self, d: f32) -> f32 {
        let raw = self.config.window.raw_progress(d);
        // Past the entry the clip may only move forward.
        self.last_t = if d >= self.config.window.entry() {
            raw.max(self.last_t)
        } else {
            raw
        };
        self.last_t
    }
}

/// Drives animation clip time from the virtual distance.
///
/// A clip never plays backwards while the observer is past the window entry,
/// even if the distance dips; it only rewinds once the observer falls back
/// before the entry.
pub struct AnimationScrub {
    scrubbers: Vec<Scrubber>,
}

impl AnimationScrub {
    pub fn new(configs: &[ScrubConfig]) -> Self {
        Self {
            scrubbers: configs
                .iter()
                .map(|c| Scrubber {
                    config: c.clone(),
                    last_t: 0.0,
                })
                .collect(),
        }
    }

    pub fn progress_of(&self, target: TargetId) -> Option<f32> {
        self.scrubbers
            .iter()
            .find(|s| s.config.target == target)
            .map(|s| s.last_t)
    }
}

impl DistanceSubscriber for AnimationScrub {
    fn name(&self) -> &str {
        "animations"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        _services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        if !frame.virtual_distance.is_finite() {
            return;
        }
        for s in &mut self.scrubbers {
            let t = s.step(frame.virtual_distance);
            out.push(SinkWrite::ClipTime {
                target: s.config.target,
                normalized: t,
                seconds: t * s.config.clip_length.max(0.0),
            });
        }
    }
}

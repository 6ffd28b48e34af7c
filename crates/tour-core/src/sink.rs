//! Output boundary.
//!
//! The core never touches lights, clips, meshes or audio sources directly.
//! Every subscriber describes the value it wants applied as a [`SinkWrite`]
//! and the host routes those writes to its own objects by [`TargetId`].
//! Writes are produced once per frame and never read back.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-side object a write is addressed to (a light, an animator, a mesh, an audio source).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-side audio clip handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub u32);

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clip {}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SinkWrite {
    LightIntensity {
        target: TargetId,
        intensity: f32,
    },
    /// Animation clip time. `normalized` never decreases while the observer
    /// stays past the zone start.
    ClipTime {
        target: TargetId,
        normalized: f32,
        seconds: f32,
    },
    Visibility {
        target: TargetId,
        visible: bool,
    },
    AudioGain {
        target: TargetId,
        gain: f32,
    },
    AudioFilter {
        target: TargetId,
        cutoff_hz: f32,
        pitch: f32,
    },
    AudioOneShot {
        target: TargetId,
        pitch: f32,
    },
    AudioPlay {
        target: TargetId,
    },
    AudioStop {
        target: TargetId,
    },
    /// Music channel (0 or 1) switched to `clip`.
    MusicClip {
        channel: u8,
        clip: ClipId,
    },
    MusicGain {
        channel: u8,
        gain: f32,
    },
    MusicStop {
        channel: u8,
    },
    TriggerProgress {
        target: TargetId,
        progress: f32,
    },
    Fire {
        target: TargetId,
    },
    DollyPosition {
        distance: f32,
        position: Vec3,
    },
    Orientation {
        yaw_degrees: f32,
        fov_degrees: f32,
        sway_gain: f32,
    },
    IdleTimeout,
}

/// Receiver for per-frame writes, implemented by the host.
pub trait OutputSink {
    fn apply(&mut self, write: &SinkWrite);
}

impl OutputSink for Vec<SinkWrite> {
    fn apply(&mut self, write: &SinkWrite) {
        self.push(write.clone());
    }
}

/// Drain `writes` into `sink` in production order.
pub fn flush(writes: &mut Vec<SinkWrite>, sink: &mut dyn OutputSink) {
    for w in writes.drain(..) {
        sink.apply(&w);
    }
}

//! Device-agnostic gesture sampling.
//!
//! Hosts feed one [`InputFrame`] per rendered frame: for each logical channel
//! (scroll and look) whether the pointer/touch is pressed and where it is on
//! screen, optionally with a device-reported delta. The sampler turns that
//! into per-frame deltas and classifies each press as a tap or a hold on
//! release. Taps do not arm momentum; two taps in quick succession on the
//! scroll channel are reported as a double tap.

use crate::constants::{
    DEFAULT_DEADZONE_PX, DOUBLE_TAP_WINDOW_SEC, TAP_MAX_DURATION_SEC, TAP_MAX_TRAVEL_PX,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Raw state of one logical input channel for the current frame.
///
/// Fields:
/// - `pressed`: pointer button / touch currently down for this channel
/// - `screen_pos`: pointer position in screen pixels (Y up)
/// - `delta_hint`: device delta for this frame, preferred over position differences when present
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelInput {
    pub pressed: bool,
    pub screen_pos: Vec2,
    pub delta_hint: Option<Vec2>,
}

impl ChannelInput {
    pub fn pressed_at(x: f32, y: f32) -> Self {
        Self {
            pressed: true,
            screen_pos: Vec2::new(x, y),
            delta_hint: None,
        }
    }

    pub fn released() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub scroll: ChannelInput,
    pub look: ChannelInput,
}

/// How a completed press was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressKind {
    Tap,
    Hold,
}

/// Per-frame result for one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelSample {
    /// Movement since the previous frame after the deadzone was applied.
    pub delta: Vec2,
    /// Channel is currently pressed.
    pub active: bool,
    /// Set on the frame the press ended.
    pub released: Option<PressKind>,
    /// True when the release should keep the accumulated momentum.
    pub momentum_armed: bool,
    pub double_tap: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureFrame {
    pub scroll: ChannelSample,
    pub look: ChannelSample,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub tap_max_duration: f32,
    pub tap_max_travel_px: f32,
    pub double_tap_window: f32,
    /// Per-frame deltas shorter than this (in pixels) are dropped.
    pub deadzone_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_duration: TAP_MAX_DURATION_SEC,
            tap_max_travel_px: TAP_MAX_TRAVEL_PX,
            double_tap_window: DOUBLE_TAP_WINDOW_SEC,
            deadzone_px: DEFAULT_DEADZONE_PX,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct ChannelTracker {
    pressed: bool,
    last_pos: Vec2,
    held_for: f32,
    travel: f32,
}

impl ChannelTracker {
    fn step(&mut self, dt: f32, input: &ChannelInput, cfg: &GestureConfig) -> ChannelSample {
        if input.pressed {
            let raw = if !self.pressed {
                // First pressed frame only anchors the position.
                self.pressed = true;
                self.held_for = 0.0;
                self.travel = 0.0;
                input.delta_hint.unwrap_or(Vec2::ZERO)
            } else {
                self.held_for += dt;
                input
                    .delta_hint
                    .unwrap_or(input.screen_pos - self.last_pos)
            };
            self.last_pos = input.screen_pos;

            let raw = if raw.is_finite() {
                raw
            } else {
                log::warn!("[gesture] dropping non-finite delta {:?}", raw);
                Vec2::ZERO
            };
            self.travel += raw.length();
            let delta = if raw.length() < cfg.deadzone_px {
                Vec2::ZERO
            } else {
                raw
            };
            ChannelSample {
                delta,
                active: true,
                ..Default::default()
            }
        } else if self.pressed {
            self.pressed = false;
            let kind = if self.held_for <= cfg.tap_max_duration
                && self.travel < cfg.tap_max_travel_px
            {
                PressKind::Tap
            } else {
                PressKind::Hold
            };
            ChannelSample {
                released: Some(kind),
                momentum_armed: kind == PressKind::Hold,
                ..Default::default()
            }
        } else {
            ChannelSample::default()
        }
    }
}

/// Turns raw per-frame channel state into deltas and tap/hold events.
///
/// Typical usage:
/// - Construct once with `GestureSampler::new(config)`
/// - Call `sample(dt, &input)` exactly once per frame before the navigator tick
#[derive(Clone, Debug, Default)]
pub struct GestureSampler {
    config: GestureConfig,
    scroll: ChannelTracker,
    look: ChannelTracker,
    clock: f32,
    last_tap_at: Option<f32>,
}

impl GestureSampler {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn sample(&mut self, dt: f32, input: &InputFrame) -> GestureFrame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;
        let mut scroll = self.scroll.step(dt, &input.scroll, &self.config);
        let look = self.look.step(dt, &input.look, &self.config);

        if scroll.released == Some(PressKind::Tap) {
            match self.last_tap_at {
                Some(prev) if self.clock - prev <= self.config.double_tap_window => {
                    scroll.double_tap = true;
                    self.last_tap_at = None;
                }
                _ => self.last_tap_at = Some(self.clock),
            }
        }

        GestureFrame { scroll, look }
    }
}

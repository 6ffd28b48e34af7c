//! Velocity integrator turning scroll drags into a position along the track.

use crate::constants::{
    DEFAULT_DAMPING, DEFAULT_END_OFFSET, DEFAULT_METERS_PER_PIXEL, MAX_DAMPING, VELOCITY_SNAP,
    VIRTUAL_SYNC_EPSILON,
};
use crate::math::{damping_factor, round2};
use crate::speed_profile::SpeedProfile;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Metres of velocity added per pixel of vertical drag.
    pub meters_per_pixel: f32,
    /// Retained velocity fraction per 1/60 s frame, in `[0, 1)`.
    pub damping: f32,
    pub invert_scroll: bool,
    /// Metres blocked before the end of the track.
    pub end_offset: f32,
    pub start_distance: f32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            meters_per_pixel: DEFAULT_METERS_PER_PIXEL,
            damping: DEFAULT_DAMPING,
            invert_scroll: false,
            end_offset: DEFAULT_END_OFFSET,
            start_distance: 0.0,
        }
    }
}

/// Snapshot published after each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigatorState {
    pub actual: f32,
    pub virtual_distance: f32,
    /// Commanded velocity after damping (m/s, before the speed multiplier).
    pub velocity: f32,
    pub speed_multiplier: f32,
    /// Observer is pinned at a bound and was pushing outward this frame.
    pub clamped: bool,
}

impl NavigatorState {
    pub fn divergence(&self) -> f32 {
        self.virtual_distance - self.actual
    }
}

/// Owns the actual and virtual distance.
///
/// Per frame: `velocity` is scaled by the speed profile at the current
/// position, integrated and clamped to `[0, usable_max]`. Hitting the end
/// while still pushing outward zeroes the velocity (hard stop) and the part
/// of the motion cut off by the clamp is remembered as the virtual offset,
/// so event logic past the end still sees the commanded travel. The offset
/// is dropped as soon as the observer rests at the end or reaches the start;
/// otherwise the virtual distance equals the actual distance.
#[derive(Clone, Debug)]
pub struct Navigator {
    config: NavigatorConfig,
    track_length: f32,
    usable_max: f32,
    actual: f32,
    velocity: f32,
    virtual_offset: f32,
    virtual_distance: f32,
    clamped: bool,
    speed_multiplier: f32,
}

impl Navigator {
    pub fn new(mut config: NavigatorConfig, track_length: f32) -> Self {
        if !config.damping.is_finite() || config.damping >= 1.0 {
            log::warn!(
                "[navigator] damping {} would coast forever, using {}",
                config.damping,
                MAX_DAMPING
            );
            config.damping = MAX_DAMPING;
        } else if config.damping < 0.0 {
            log::warn!("[navigator] negative damping {}, using 0", config.damping);
            config.damping = 0.0;
        }
        let track_length = if track_length.is_finite() {
            track_length.max(0.0)
        } else {
            0.0
        };
        let usable_max = (track_length - config.end_offset.max(0.0)).max(0.0);
        if usable_max <= 0.0 {
            log::warn!("[navigator] usable track length is 0, navigator frozen");
        }
        let actual = config.start_distance.clamp(0.0, usable_max);
        Self {
            config,
            track_length,
            usable_max,
            actual,
            velocity: 0.0,
            virtual_offset: 0.0,
            virtual_distance: round2(actual),
            clamped: false,
            speed_multiplier: 1.0,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn track_length(&self) -> f32 {
        self.track_length
    }

    pub fn usable_max(&self) -> f32 {
        self.usable_max
    }

    pub fn actual(&self) -> f32 {
        self.actual
    }

    pub fn virtual_distance(&self) -> f32 {
        self.virtual_distance
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    /// Add one vertical drag sample (pixels, Y up).
    pub fn apply_drag(&mut self, delta_y: f32) {
        if self.usable_max <= 0.0 || !delta_y.is_finite() {
            return;
        }
        let direction = if self.config.invert_scroll { -1.0 } else { 1.0 };
        self.velocity += delta_y * self.config.meters_per_pixel * direction;
    }

    /// Drop all momentum, e.g. after a tap.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    /// Teleport to `distance`, dropping momentum and any virtual offset.
    pub fn jump_to(&mut self, distance: f32) {
        if !distance.is_finite() {
            return;
        }
        self.actual = distance.clamp(0.0, self.usable_max);
        self.velocity = 0.0;
        self.clamped = false;
        self.resync_virtual();
    }

    /// Forget the overshoot accumulated at the track bounds.
    pub fn resync_virtual(&mut self) {
        if self.virtual_offset != 0.0 {
            log::debug!(
                "[navigator] resync virtual distance (offset {:.2})",
                self.virtual_offset
            );
        }
        self.virtual_offset = 0.0;
        self.virtual_distance = round2(self.actual);
    }

    pub fn state(&self) -> NavigatorState {
        NavigatorState {
            actual: self.actual,
            virtual_distance: self.virtual_distance,
            velocity: self.velocity,
            speed_multiplier: self.speed_multiplier,
            clamped: self.clamped,
        }
    }

    pub fn tick(&mut self, dt: f32, speed: &SpeedProfile) -> NavigatorState {
        if !dt.is_finite() || dt <= 0.0 {
            return self.state();
        }

        self.speed_multiplier = speed.evaluate(self.actual);
        let effective = self.velocity * self.speed_multiplier;
        let proposed = self.actual + effective * dt;
        self.actual = proposed.clamp(0.0, self.usable_max);

        let pushing_out = (self.actual >= self.usable_max && self.velocity > 0.0)
            || (self.actual <= 0.0 && self.velocity < 0.0);
        let at_start = self.actual <= VIRTUAL_SYNC_EPSILON;
        let at_end = self.actual >= self.usable_max - VIRTUAL_SYNC_EPSILON;
        if at_start || (at_end && !pushing_out) {
            // Hard sync: virtual never runs below 0 and settles back onto the end.
            self.virtual_offset = 0.0;
        } else if pushing_out && !self.clamped {
            // A fresh hit replaces the previous excursion instead of adding to it.
            self.virtual_offset = proposed - self.actual;
        }
        self.virtual_distance = round2(self.actual + self.virtual_offset);

        if pushing_out {
            if !self.clamped {
                log::debug!("[navigator] clamped at {:.2}", self.actual);
            }
            self.clamped = true;
            self.velocity = 0.0;
        } else {
            self.clamped = false;
        }

        self.velocity *= damping_factor(self.config.damping, dt);
        if self.velocity.abs() < VELOCITY_SNAP {
            self.velocity = 0.0;
        }

        self.state()
    }
}

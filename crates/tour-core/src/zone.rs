//! Generic distance zones: continuous progress, one-shot triggers and
//! hysteresis bands shared by every reactive subscriber.

use crate::constants::{
    DEFAULT_ACTIVATION_RADIUS, DEFAULT_DEACTIVATION_RADIUS, DEFAULT_HYSTERESIS_DELAY_SEC,
};
use crate::math::clamp01;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The shared per-frame signal broadcast to all subscribers.
///
/// Fields:
/// - `dt`: frame time in seconds
/// - `virtual_distance`: drives all event logic
/// - `actual_distance`: clamped observer position
/// - `world_position`: observer position in scene space
/// - `velocity`: commanded velocity after damping
/// - `speed_multiplier`: speed profile value at `actual_distance`
/// - `clamped`: observer is pinned at a bound
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DistanceFrame {
    pub dt: f32,
    pub virtual_distance: f32,
    pub actual_distance: f32,
    pub world_position: Vec3,
    pub velocity: f32,
    pub speed_multiplier: f32,
    pub clamped: bool,
}

impl DistanceFrame {
    /// A frame at rest at `distance` (actual and virtual equal).
    pub fn at(distance: f32, dt: f32) -> Self {
        Self {
            dt,
            virtual_distance: distance,
            actual_distance: distance,
            speed_multiplier: 1.0,
            ..Default::default()
        }
    }
}

/// Where a zone sits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneAnchor {
    /// A single track distance.
    Point { distance: f32 },
    /// A track interval, zero separation anywhere inside it.
    Span { start: f32, end: f32 },
    /// A scene point measured by straight-line distance from the observer.
    World { position: Vec3 },
}

impl ZoneAnchor {
    pub fn separation(&self, frame: &DistanceFrame) -> f32 {
        let d = frame.virtual_distance;
        match *self {
            ZoneAnchor::Point { distance } => (d - distance).abs(),
            ZoneAnchor::Span { start, end } => {
                let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
                if d < lo {
                    lo - d
                } else if d > hi {
                    d - hi
                } else {
                    0.0
                }
            }
            ZoneAnchor::World { position } => frame.world_position.distance(position),
        }
    }
}

/// Continuous closeness to `trigger`: 1 at the trigger, 0 at `radius` and beyond.
///
/// A non-positive radius yields 0 everywhere.
pub fn progress(d: f32, trigger: f32, radius: f32) -> f32 {
    if radius <= 0.0 || !d.is_finite() {
        return 0.0;
    }
    1.0 - clamp01((d - trigger).abs() / radius)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggerUpdate {
    pub progress: f32,
    pub fired: bool,
}

/// Progress evaluator with an optional one-shot fire on forward crossing.
///
/// The trigger fires when the distance moves from below `trigger_distance`
/// to at or past it while armed. With `trigger_once` it stays disarmed for
/// the rest of the session; otherwise it re-arms once the distance leaves
/// the radius. The very first sample only seeds the history.
#[derive(Clone, Debug)]
pub struct DistanceTrigger {
    pub trigger_distance: f32,
    pub radius: f32,
    pub trigger_once: bool,
    armed: bool,
    last_distance: Option<f32>,
    fire_count: u32,
}

impl DistanceTrigger {
    pub fn new(trigger_distance: f32, radius: f32, trigger_once: bool) -> Self {
        Self {
            trigger_distance,
            radius,
            trigger_once,
            armed: radius > 0.0,
            last_distance: None,
            fire_count: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn fire_count(&self) -> u32 {
        self.fire_count
    }

    pub fn evaluate(&mut self, d: f32) -> TriggerUpdate {
        if !d.is_finite() {
            return TriggerUpdate::default();
        }
        let progress = progress(d, self.trigger_distance, self.radius);
        if self.radius <= 0.0 {
            self.last_distance = Some(d);
            return TriggerUpdate {
                progress,
                fired: false,
            };
        }

        if !self.armed
            && !self.trigger_once
            && (d - self.trigger_distance).abs() > self.radius
        {
            self.armed = true;
        }

        let crossed = matches!(self.last_distance, Some(prev) if prev < self.trigger_distance && d >= self.trigger_distance);
        let fired = self.armed && crossed;
        if fired {
            self.armed = false;
            self.fire_count += 1;
        }
        self.last_distance = Some(d);
        TriggerUpdate { progress, fired }
    }
}

/// Activation/deactivation radius pair plus the delay before switching off.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HysteresisBand {
    pub activation_radius: f32,
    pub deactivation_radius: f32,
    pub delay: f32,
}

impl Default for HysteresisBand {
    fn default() -> Self {
        Self {
            activation_radius: DEFAULT_ACTIVATION_RADIUS,
            deactivation_radius: DEFAULT_DEACTIVATION_RADIUS,
            delay: DEFAULT_HYSTERESIS_DELAY_SEC,
        }
    }
}

impl HysteresisBand {
    pub fn new(activation_radius: f32, deactivation_radius: f32, delay: f32) -> Self {
        Self {
            activation_radius,
            deactivation_radius,
            delay,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.activation_radius > self.deactivation_radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneTransition {
    Activated,
    Deactivated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BandMode {
    Normal,
    // activation radius <= 0
    NeverActive,
    // activation radius > deactivation radius
    AlwaysActive,
}

/// Binary on/off state driven by a [`HysteresisBand`].
///
/// On immediately inside the activation radius. Off only after the
/// separation has stayed beyond the deactivation radius for `delay`
/// seconds without interruption; coming back inside the deactivation
/// radius cancels the pending switch-off.
#[derive(Clone, Debug)]
pub struct HysteresisZone {
    band: HysteresisBand,
    mode: BandMode,
    active: bool,
    pending_off: Option<f32>,
}

impl HysteresisZone {
    pub fn new(band: HysteresisBand, initially_active: bool) -> Self {
        let mode = if band.activation_radius <= 0.0 {
            BandMode::NeverActive
        } else if band.is_inverted() {
            log::warn!(
                "[zones] activation radius {} > deactivation radius {}, zone will never cull",
                band.activation_radius,
                band.deactivation_radius
            );
            BandMode::AlwaysActive
        } else {
            BandMode::Normal
        };
        let active = match mode {
            BandMode::NeverActive => false,
            BandMode::AlwaysActive => true,
            BandMode::Normal => initially_active,
        };
        Self {
            band,
            mode,
            active,
            pending_off: None,
        }
    }

    pub fn band(&self) -> &HysteresisBand {
        &self.band
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_pending_off(&self) -> bool {
        self.pending_off.is_some()
    }

    /// Advance with the current separation from the zone anchor.
    pub fn update(&mut self, separation: f32, dt: f32) -> Option<ZoneTransition> {
        if self.mode != BandMode::Normal || !separation.is_finite() {
            return None;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if !self.active {
            if separation <= self.band.activation_radius {
                self.active = true;
                self.pending_off = None;
                return Some(ZoneTransition::Activated);
            }
            return None;
        }

        if separation > self.band.deactivation_radius {
            let waited = match self.pending_off {
                None => 0.0,
                Some(t) => t + dt,
            };
            if waited >= self.band.delay {
                self.active = false;
                self.pending_off = None;
                return Some(ZoneTransition::Deactivated);
            }
            self.pending_off = Some(waited);
        } else {
            self.pending_off = None;
        }
        None
    }
}

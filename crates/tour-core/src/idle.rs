use crate::constants::{DEFAULT_IDLE_MOVEMENT_THRESHOLD, DEFAULT_IDLE_TIMEOUT_SEC};
use crate::registry::{DistanceSubscriber, FrameServices, SoftToggle};
use crate::sink::SinkWrite;
use crate::zone::DistanceFrame;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    pub enabled: bool,
    /// Seconds without movement before the timeout is reported.
    pub timeout: f32,
    /// Metres the observer must move to count as active.
    pub movement_threshold: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: DEFAULT_IDLE_TIMEOUT_SEC,
            movement_threshold: DEFAULT_IDLE_MOVEMENT_THRESHOLD,
        }
    }
}

/// Reports an abandoned session once.
///
/// The timer resets whenever the actual distance has moved more than the
/// threshold from where it was last reset. After the timeout a single
/// `IdleTimeout` write is produced; the next movement re-arms it.
pub struct IdleDetector {
    config: IdleConfig,
    enabled: bool,
    anchor: Option<f32>,
    idle_for: f32,
    reported: bool,
}

impl IdleDetector {
    pub fn new(config: IdleConfig) -> Self {
        Self {
            enabled: config.enabled,
            config,
            anchor: None,
            idle_for: 0.0,
            reported: false,
        }
    }

    pub fn idle_for(&self) -> f32 {
        self.idle_for
    }

    pub fn has_timed_out(&self) -> bool {
        self.reported
    }
}

impl DistanceSubscriber for IdleDetector {
    fn name(&self) -> &str {
        "idle"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        _services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        let d = frame.actual_distance;
        let anchor = *self.anchor.get_or_insert(d);
        if (d - anchor).abs() > self.config.movement_threshold {
            self.anchor = Some(d);
            self.idle_for = 0.0;
            self.reported = false;
            return;
        }
        if frame.dt.is_finite() && frame.dt > 0.0 {
            self.idle_for += frame.dt;
        }
        if !self.reported && self.idle_for >= self.config.timeout {
            log::info!("[idle] no movement for {:.0}s at {:.2}", self.idle_for, d);
            self.reported = true;
            out.push(SinkWrite::IdleTimeout);
        }
    }

    fn soft_toggle(&mut self) -> Option<&mut dyn SoftToggle> {
        Some(self)
    }
}

impl SoftToggle for IdleDetector {
    fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.anchor = None;
            self.idle_for = 0.0;
            self.reported = false;
        }
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

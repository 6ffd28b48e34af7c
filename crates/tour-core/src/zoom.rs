use crate::constants::{
    DEFAULT_FOV, DEFAULT_ZOOMED_FOV, DEFAULT_ZOOM_HOLD_SEC, DEFAULT_ZOOM_SPEED,
    ZOOM_SETTLE_EPSILON,
};
use crate::math::lerp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub enabled: bool,
    pub default_fov: f32,
    pub zoomed_fov: f32,
    /// Seconds spent at the zoomed field of view.
    pub hold_duration: f32,
    pub zoom_speed: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_fov: DEFAULT_FOV,
            zoomed_fov: DEFAULT_ZOOMED_FOV,
            hold_duration: DEFAULT_ZOOM_HOLD_SEC,
            zoom_speed: DEFAULT_ZOOM_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomPhase {
    Idle,
    ZoomingIn,
    Holding { elapsed: f32 },
    ZoomingOut,
}

/// Double-tap zoom: ease in, hold, ease back out.
#[derive(Clone, Debug)]
pub struct ZoomController {
    config: ZoomConfig,
    fov: f32,
    phase: ZoomPhase,
}

impl ZoomController {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            fov: config.default_fov,
            config,
            phase: ZoomPhase::Idle,
        }
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn phase(&self) -> ZoomPhase {
        self.phase
    }

    pub fn is_zooming(&self) -> bool {
        self.phase != ZoomPhase::Idle
    }

    /// Start a zoom cycle. Ignored while one is running or when disabled.
    pub fn trigger(&mut self) -> bool {
        if !self.config.enabled || self.is_zooming() {
            return false;
        }
        log::debug!("[zoom] zooming to {} deg", self.config.zoomed_fov);
        self.phase = ZoomPhase::ZoomingIn;
        true
    }

    pub fn tick(&mut self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return self.fov;
        }
        let step = (dt * self.config.zoom_speed).min(1.0);
        self.phase = match self.phase {
            ZoomPhase::Idle => ZoomPhase::Idle,
            ZoomPhase::ZoomingIn => {
                self.fov = lerp(self.fov, self.config.zoomed_fov, step);
                if (self.fov - self.config.zoomed_fov).abs() <= ZOOM_SETTLE_EPSILON {
                    ZoomPhase::Holding { elapsed: 0.0 }
                } else {
                    ZoomPhase::ZoomingIn
                }
            }
            ZoomPhase::Holding { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.config.hold_duration {
                    ZoomPhase::ZoomingOut
                } else {
                    ZoomPhase::Holding { elapsed }
                }
            }
            ZoomPhase::ZoomingOut => {
                self.fov = lerp(self.fov, self.config.default_fov, step);
                if (self.fov - self.config.default_fov).abs() <= ZOOM_SETTLE_EPSILON {
                    self.fov = self.config.default_fov;
                    ZoomPhase::Idle
                } else {
                    ZoomPhase::ZoomingOut
                }
            }
        };
        self.fov
    }
}

use crate::constants::{
    DEFAULT_LOOK_SPEED, DEFAULT_MAX_YAW, DEFAULT_MIN_YAW, DEFAULT_ROTATION_DAMPING,
    YAW_DAMPING_EXPONENT, YAW_RETURN_RATE,
};
use crate::math::lerp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees of yaw per pixel of horizontal drag, before damping.
    pub look_speed: f32,
    pub rotation_damping: f32,
    pub min_yaw: f32,
    pub max_yaw: f32,
    /// Rate at which the yaw relaxes to 0 once the drag ends.
    pub return_rate: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            look_speed: DEFAULT_LOOK_SPEED,
            rotation_damping: DEFAULT_ROTATION_DAMPING,
            min_yaw: DEFAULT_MIN_YAW,
            max_yaw: DEFAULT_MAX_YAW,
            return_rate: YAW_RETURN_RATE,
        }
    }
}

/// Bounded look-around offset on top of the path tangent.
///
/// Drags get progressively stiffer the further the view is turned
/// (`1 / (1 + |yaw|^1.2 * damping)`), and the yaw eases back to straight
/// ahead whenever the look channel is released.
#[derive(Clone, Debug)]
pub struct YawController {
    config: LookConfig,
    yaw: f32,
    dragging: bool,
}

impl YawController {
    pub fn new(mut config: LookConfig) -> Self {
        if config.min_yaw > config.max_yaw {
            log::warn!(
                "[look] min yaw {} above max yaw {}, swapping",
                config.min_yaw,
                config.max_yaw
            );
            std::mem::swap(&mut config.min_yaw, &mut config.max_yaw);
        }
        Self {
            config,
            yaw: 0.0,
            dragging: false,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn apply_look(&mut self, dx: f32) {
        if !dx.is_finite() {
            return;
        }
        let stiffness = self.yaw.abs().powf(YAW_DAMPING_EXPONENT) * self.config.rotation_damping;
        let damp = 1.0 / (1.0 + stiffness);
        self.yaw = (self.yaw + dx * self.config.look_speed * damp)
            .clamp(self.config.min_yaw, self.config.max_yaw);
    }

    pub fn tick(&mut self, dt: f32) -> f32 {
        if !self.dragging && dt.is_finite() && dt > 0.0 {
            self.yaw = lerp(self.yaw, 0.0, (dt * self.config.return_rate).min(1.0));
        }
        self.yaw = self.yaw.clamp(self.config.min_yaw, self.config.max_yaw);
        self.yaw
    }
}

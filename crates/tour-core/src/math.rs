//! Scalar helpers shared by the navigator, the speed profile and the blenders.

use crate::constants::{REFERENCE_FPS, VIRTUAL_ROUNDING};
use serde::{Deserialize, Serialize};

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// A degenerate range (`a == b`) yields 0.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        clamp01((value - a) / (b - a))
    }
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// Round to centimetres, the resolution the virtual distance is published at.
#[inline]
pub fn round2(v: f32) -> f32 {
    (v * VIRTUAL_ROUNDING).round() / VIRTUAL_ROUNDING
}

/// Retained velocity fraction after `dt` seconds for a per-frame `damping`
/// factor defined at [`REFERENCE_FPS`].
#[inline]
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    damping.powf(dt * REFERENCE_FPS)
}

/// Shaping curve applied to a normalized `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseIn,
    EaseOut,
    EaseInOut,
    SineWave,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = clamp01(t);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => smoothstep(t),
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
                }
            }
            Easing::SineWave => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_lerp_degenerate_range_is_zero() {
        assert_eq!(inverse_lerp(3.0, 3.0, 10.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 10.0, 15.0), 1.0);
        assert_eq!(inverse_lerp(0.0, 10.0, -5.0), 0.0);
    }

    #[test]
    fn every_easing_pins_endpoints() {
        for e in [
            Easing::Linear,
            Easing::SmoothStep,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::SineWave,
        ] {
            assert!(e.apply(0.0).abs() < 1e-6, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?} at 1");
        }
    }

    #[test]
    fn round2_keeps_centimetres() {
        assert_eq!(round2(0.016_67), 0.02);
        assert_eq!(round2(12.344), 12.34);
    }
}

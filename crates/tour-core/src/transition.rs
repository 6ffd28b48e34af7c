use crate::math::{lerp, Easing};

/// Incremental interpolation polled once per frame.
///
/// A transition never blocks: callers `tick(dt)` it and read `value()`.
/// Starting a new one over a running one is done with [`Transition::retarget`],
/// which restarts from the current value (last writer wins, nothing is queued).
///
/// Fields:
/// - `start`, `target`: endpoint values
/// - `elapsed`, `duration`: seconds; `duration <= 0` finishes immediately
/// - `easing`: curve applied to `elapsed / duration`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub start: f32,
    pub target: f32,
    pub elapsed: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl Transition {
    pub fn new(start: f32, target: f32, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration,
            easing,
        }
    }

    /// A finished transition resting at `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0.0, Easing::Linear)
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.target;
        }
        lerp(self.start, self.target, self.easing.apply(self.elapsed / self.duration))
    }

    pub fn is_finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }

    pub fn tick(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.value()
    }

    /// Replace this transition with one heading to `target` from the current value.
    pub fn retarget(&mut self, target: f32, duration: f32, easing: Easing) {
        *self = Self::new(self.value(), target, duration, easing);
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::settled(0.0)
    }
}

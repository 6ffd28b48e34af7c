use crate::math::{inverse_lerp, lerp, smoothstep};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One step of an ordered keyframe sequence.
///
/// The value reaches `target_value` at `trigger_distance` and blends in over
/// the `reveal_radius` metres before it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub trigger_distance: f32,
    #[serde(default = "default_reveal_radius")]
    pub reveal_radius: f32,
    pub target_value: f32,
}

fn default_reveal_radius() -> f32 {
    5.0
}

impl Keyframe {
    pub fn new(trigger_distance: f32, reveal_radius: f32, target_value: f32) -> Self {
        Self {
            trigger_distance,
            reveal_radius,
            target_value,
        }
    }

    fn window_start(&self) -> f32 {
        self.trigger_distance - self.reveal_radius.max(0.0)
    }
}

/// Index of the first keyframe whose trigger is below its predecessor's.
pub fn first_unsorted(keys: &[Keyframe]) -> Option<usize> {
    keys.windows(2)
        .position(|w| w[1].trigger_distance < w[0].trigger_distance)
        .map(|i| i + 1)
}

/// Distance-to-value blend shared by lights and other keyframed targets.
///
/// For distance `d`, `to` is the first keyframe with `trigger >= d` and
/// `from` is its predecessor (or the initial value):
/// - past every keyframe the last value holds permanently
/// - inside `[to.trigger - to.radius, to.trigger]` the value is
///   `lerp(from, to, smoothstep(t))`
/// - elsewhere `from` holds (plateau)
///
/// A sequence that is not sorted by trigger distance is rejected at
/// construction and always yields the initial value.
#[derive(Clone, Debug)]
pub struct KeyframeSequence {
    initial: f32,
    keys: SmallVec<[Keyframe; 4]>,
    valid: bool,
}

impl KeyframeSequence {
    pub fn new(initial: f32, keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let keys: SmallVec<[Keyframe; 4]> = keys.into_iter().collect();
        let valid = match first_unsorted(&keys) {
            Some(i) => {
                log::warn!(
                    "[zones] keyframe {} at {} comes before its predecessor, sequence disabled",
                    i,
                    keys[i].trigger_distance
                );
                false
            }
            None => true,
        };
        Self {
            initial,
            keys,
            valid,
        }
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn blend(&self, d: f32) -> f32 {
        if !self.valid || self.keys.is_empty() || !d.is_finite() {
            return self.initial;
        }
        let Some(i) = self.keys.iter().position(|k| d <= k.trigger_distance) else {
            return self.keys[self.keys.len() - 1].target_value;
        };
        let to = self.keys[i];
        let from = if i > 0 {
            self.keys[i - 1].target_value
        } else {
            self.initial
        };
        let start = to.window_start();
        if d >= start {
            let t = inverse_lerp(start, to.trigger_distance, d);
            lerp(from, to.target_value, smoothstep(t))
        } else {
            from
        }
    }
}

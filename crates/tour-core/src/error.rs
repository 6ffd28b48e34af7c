use crate::sink::TargetId;
use thiserror::Error;

/// A configuration finding reported by [`crate::TourConfig::validate`].
///
/// None of these abort a session: builders log them and fall back to a
/// deterministic "never trigger / never cull" behavior for the affected entry.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("{owner}: keyframe {index} is not sorted by trigger distance")]
    UnsortedKeyframes { owner: String, index: usize },

    #[error("{owner}: activation radius {activation} exceeds deactivation radius {deactivation}")]
    InvertedHysteresis {
        owner: String,
        activation: f32,
        deactivation: f32,
    },

    #[error("{owner}: radius {radius} is not positive, zone will never be active")]
    NonPositiveRadius { owner: String, radius: f32 },

    #[error("navigator damping {0} is outside [0, 1)")]
    DampingOutOfRange(f32),

    #[error("speed event '{label}' has a negative length or ease")]
    NegativeSpeedEvent { label: String },

    #[error("track has zero length, the observer cannot move")]
    EmptyPath,
}

impl ConfigIssue {
    pub(crate) fn owner(target: TargetId, kind: &str) -> String {
        format!("{kind} {target}")
    }
}

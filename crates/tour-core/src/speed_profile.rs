//! Distance to speed-multiplier mapping.
//!
//! Designers describe slow-downs and speed-ups as [`SpeedEvent`]s (ease in,
//! plateau, ease out). The profile expands them into a sorted keyframe list
//! of [`SpeedSection`]s and interpolates between neighbours.

use crate::constants::{DEFAULT_EASE_IN, DEFAULT_EASE_OUT, MIN_SPEED_MULTIPLIER};
use crate::math::{inverse_lerp, lerp, Easing};
use serde::{Deserialize, Serialize};

/// High-level description of one speed change along the track.
///
/// Fields:
/// - `start_distance`: where the plateau begins (metres)
/// - `length`: plateau length; 0 collapses the plateau to a single keyframe
/// - `ease_in` / `ease_out`: ramp lengths before and after the plateau
/// - `speed_multiplier`: multiplier held across the plateau
/// - `easing`: shaping curve used while the observer is inside this event's window
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedEvent {
    pub label: String,
    pub start_distance: f32,
    pub length: f32,
    pub ease_in: f32,
    pub ease_out: f32,
    pub speed_multiplier: f32,
    pub easing: Easing,
}

impl Default for SpeedEvent {
    fn default() -> Self {
        Self {
            label: "New Event".to_string(),
            start_distance: 0.0,
            length: 0.0,
            ease_in: DEFAULT_EASE_IN,
            ease_out: DEFAULT_EASE_OUT,
            speed_multiplier: 1.0,
            easing: Easing::SmoothStep,
        }
    }
}

impl SpeedEvent {
    /// `[start - ease_in, start + length + ease_out]`
    pub fn window(&self) -> (f32, f32) {
        (
            self.start_distance - self.ease_in.max(0.0),
            self.start_distance + self.length.max(0.0) + self.ease_out.max(0.0),
        )
    }

    fn is_finite(&self) -> bool {
        self.start_distance.is_finite()
            && self.length.is_finite()
            && self.ease_in.is_finite()
            && self.ease_out.is_finite()
            && self.speed_multiplier.is_finite()
    }
}

/// One generated keyframe of the profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedSection {
    pub start_distance: f32,
    pub speed_multiplier: f32,
    pub easing: Easing,
}

#[derive(Clone, Debug, Default)]
pub struct SpeedProfile {
    events: Vec<SpeedEvent>,
    sections: Vec<SpeedSection>,
}

impl SpeedProfile {
    pub fn new(events: Vec<SpeedEvent>) -> Self {
        let mut profile = Self::default();
        profile.set_events(events);
        profile
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SpeedEvent] {
        &self.events
    }

    pub fn sections(&self) -> &[SpeedSection] {
        &self.sections
    }

    /// Replace the events and regenerate the section table.
    pub fn set_events(&mut self, events: Vec<SpeedEvent>) {
        self.events = events;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.sections.clear();
        for ev in &self.events {
            if !ev.is_finite() {
                log::warn!("[speed] skipping event '{}' with non-finite fields", ev.label);
                continue;
            }
            if ev.length < 0.0 || ev.ease_in < 0.0 || ev.ease_out < 0.0 {
                log::warn!(
                    "[speed] event '{}' has negative length/ease, clamping to 0",
                    ev.label
                );
            }
            let start = ev.start_distance;
            let plateau_end = start + ev.length.max(0.0);
            let section = |d: f32, m: f32| SpeedSection {
                start_distance: d,
                speed_multiplier: m,
                easing: ev.easing,
            };

            if ev.ease_in > 0.0 {
                self.sections.push(section(start - ev.ease_in, 1.0));
            }
            self.sections.push(section(start, ev.speed_multiplier));
            if ev.length > 0.0 {
                self.sections.push(section(plateau_end, ev.speed_multiplier));
            }
            if ev.ease_out > 0.0 {
                self.sections.push(section(plateau_end + ev.ease_out, 1.0));
            }
        }
        // Stable: equal distances keep declaration order.
        self.sections
            .sort_by(|a, b| a.start_distance.total_cmp(&b.start_distance));
        log::debug!(
            "[speed] regenerated {} sections from {} events",
            self.sections.len(),
            self.events.len()
        );
    }

    /// Curve of the first event whose window contains `d`, linear otherwise.
    pub fn easing_for_distance(&self, d: f32) -> Easing {
        self.events
            .iter()
            .filter(|ev| ev.is_finite())
            .find(|ev| {
                let (lo, hi) = ev.window();
                d >= lo && d <= hi
            })
            .map(|ev| ev.easing)
            .unwrap_or(Easing::Linear)
    }

    /// Speed multiplier at track distance `d`. Never below [`MIN_SPEED_MULTIPLIER`];
    /// 1 for an empty profile.
    pub fn evaluate(&self, d: f32) -> f32 {
        let (first, last) = match (self.sections.first(), self.sections.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 1.0,
        };
        if !d.is_finite() {
            return 1.0;
        }
        if d < first.start_distance {
            return first.speed_multiplier.max(MIN_SPEED_MULTIPLIER);
        }
        if d > last.start_distance {
            return last.speed_multiplier.max(MIN_SPEED_MULTIPLIER);
        }
        for pair in self.sections.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.start_distance <= d && d <= b.start_distance {
                let t = inverse_lerp(a.start_distance, b.start_distance, d);
                let eased = self.easing_for_distance(d).apply(t);
                return lerp(a.speed_multiplier, b.speed_multiplier, eased)
                    .max(MIN_SPEED_MULTIPLIER);
            }
        }
        // Single section: d sits exactly on it.
        first.speed_multiplier.max(MIN_SPEED_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_event_emits_three_sections() {
        let p = SpeedProfile::new(vec![SpeedEvent {
            start_distance: 10.0,
            speed_multiplier: 3.0,
            ..Default::default()
        }]);
        let ds: Vec<f32> = p.sections().iter().map(|s| s.start_distance).collect();
        assert_eq!(ds, vec![8.0, 10.0, 12.0]);
    }
}

//! Scripted gesture sessions.
//!
//! A script is a list of high-level steps ("drag 40 frames at 12 px per
//! frame", "double tap", "coast for two seconds") expanded into one cue per
//! frame before the replay starts.

use serde::{Deserialize, Serialize};
use tour_core::{ChannelInput, InputFrame};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Vertical drag on the scroll channel, released afterwards.
    Drag { frames: u32, pixels_per_frame: f32 },
    /// Horizontal drag on the look channel, released afterwards.
    Look { frames: u32, pixels_per_frame: f32 },
    Tap,
    DoubleTap,
    /// No input at all.
    Coast { frames: u32 },
    /// Teleport the observer.
    Jump { distance: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Input(InputFrame),
    Jump(f32),
}

fn scroll_at(y: f32) -> Cue {
    Cue::Input(InputFrame {
        scroll: ChannelInput::pressed_at(0.0, y),
        ..Default::default()
    })
}

fn look_at(x: f32) -> Cue {
    Cue::Input(InputFrame {
        look: ChannelInput::pressed_at(x, 0.0),
        ..Default::default()
    })
}

fn idle() -> Cue {
    Cue::Input(InputFrame::default())
}

/// Expand `steps` into per-frame cues. Every press ends with a release frame.
pub fn expand(steps: &[ScriptStep]) -> Vec<Cue> {
    let mut cues = Vec::new();
    for step in steps {
        match *step {
            ScriptStep::Drag {
                frames,
                pixels_per_frame,
            } => {
                cues.extend((0..=frames).map(|i| scroll_at(i as f32 * pixels_per_frame)));
                cues.push(idle());
            }
            ScriptStep::Look {
                frames,
                pixels_per_frame,
            } => {
                cues.extend((0..=frames).map(|i| look_at(i as f32 * pixels_per_frame)));
                cues.push(idle());
            }
            ScriptStep::Tap => {
                cues.push(scroll_at(0.0));
                cues.push(idle());
            }
            ScriptStep::DoubleTap => {
                cues.extend([scroll_at(0.0), idle(), scroll_at(0.0), idle()]);
            }
            ScriptStep::Coast { frames } => {
                cues.extend((0..frames).map(|_| idle()));
            }
            ScriptStep::Jump { distance } => cues.push(Cue::Jump(distance)),
        }
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_holds_then_releases() {
        let cues = expand(&[ScriptStep::Drag {
            frames: 3,
            pixels_per_frame: 10.0,
        }]);
        assert_eq!(cues.len(), 5);
        assert_eq!(cues[3], scroll_at(30.0));
        assert_eq!(cues[4], idle());
    }

    #[test]
    fn mixed_script_expands_in_order() {
        let cues = expand(&[
            ScriptStep::Jump { distance: 12.0 },
            ScriptStep::DoubleTap,
            ScriptStep::Coast { frames: 2 },
        ]);
        assert_eq!(cues.len(), 7);
        assert_eq!(cues[0], Cue::Jump(12.0));
        assert_eq!(cues[3], scroll_at(0.0));
        assert_eq!(cues[6], idle());
    }
}

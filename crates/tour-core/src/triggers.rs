use crate::registry::{DistanceSubscriber, FrameServices};
use crate::sink::{SinkWrite, TargetId};
use crate::zone::{DistanceFrame, DistanceTrigger};
use serde::{Deserialize, Serialize};

/// A named point on the track that fires once when passed going forward.
///
/// Fields:
/// - `target`: host object notified with a `Fire` write (e.g. play a clip from 0)
/// - `trigger_distance`, `radius`: crossing point and progress radius
/// - `trigger_once`: false re-arms the trigger after the observer leaves the radius
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub target: TargetId,
    #[serde(default)]
    pub name: String,
    pub trigger_distance: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_trigger_once")]
    pub trigger_once: bool,
}

fn default_radius() -> f32 {
    1.0
}

fn default_trigger_once() -> bool {
    true
}

#[derive(Clone, Debug)]
struct NamedTrigger {
    target: TargetId,
    name: String,
    trigger: DistanceTrigger,
}

pub struct EventTriggers {
    triggers: Vec<NamedTrigger>,
}

impl EventTriggers {
    pub fn new(configs: &[TriggerConfig]) -> Self {
        let triggers = configs
            .iter()
            .map(|c| {
                if c.radius <= 0.0 {
                    log::warn!(
                        "[zones] trigger '{}' has radius {}, it will never fire",
                        c.name,
                        c.radius
                    );
                }
                NamedTrigger {
                    target: c.target,
                    name: c.name.clone(),
                    trigger: DistanceTrigger::new(c.trigger_distance, c.radius, c.trigger_once),
                }
            })
            .collect();
        Self { triggers }
    }

    /// How often the trigger called `name` has fired.
    pub fn fire_count(&self, name: &str) -> Option<u32> {
        self.triggers
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.trigger.fire_count())
    }
}

impl DistanceSubscriber for EventTriggers {
    fn name(&self) -> &str {
        "triggers"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        _services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        for t in &mut self.triggers {
            let update = t.trigger.evaluate(frame.virtual_distance);
            out.push(SinkWrite::TriggerProgress {
                target: t.target,
                progress: update.progress,
            });
            if update.fired {
                log::info!(
                    "[zones] trigger '{}' fired at {:.2}",
                    t.name,
                    frame.virtual_distance
                );
                out.push(SinkWrite::Fire { target: t.target });
            }
        }
    }
}

use crate::keyframes::{Keyframe, KeyframeSequence};
use crate::registry::{DistanceSubscriber, FrameServices};
use crate::sink::{SinkWrite, TargetId};
use crate::zone::DistanceFrame;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Keyframed intensity for one light.
///
/// Several entries for the same `target` are merged in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub target: TargetId,
    #[serde(default)]
    pub initial_intensity: f32,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Clone, Debug)]
struct LightTrack {
    target: TargetId,
    sequence: KeyframeSequence,
    current: f32,
}

/// Blends light intensities from the virtual distance.
pub struct LightBlend {
    lights: Vec<LightTrack>,
}

/// Merge entries sharing a target, keeping first-seen target order and the
/// first entry's initial intensity.
pub(crate) fn group_by_target(configs: &[LightConfig]) -> Vec<(TargetId, f32, Vec<Keyframe>)> {
    let mut order: Vec<TargetId> = Vec::new();
    let mut grouped: FnvHashMap<TargetId, (f32, Vec<Keyframe>)> = FnvHashMap::default();
    for cfg in configs {
        let entry = grouped.entry(cfg.target).or_insert_with(|| {
            order.push(cfg.target);
            (cfg.initial_intensity, Vec::new())
        });
        entry.1.extend_from_slice(&cfg.keyframes);
    }
    order
        .into_iter()
        .filter_map(|target| {
            grouped
                .remove(&target)
                .map(|(initial, keys)| (target, initial, keys))
        })
        .collect()
}

impl LightBlend {
    pub fn new(configs: &[LightConfig]) -> Self {
        let lights = group_by_target(configs)
            .into_iter()
            .map(|(target, initial, keys)| {
                let sequence = KeyframeSequence::new(initial, keys);
                if !sequence.is_valid() {
                    log::warn!("[lights] light {} keeps its initial intensity", target);
                }
                LightTrack {
                    target,
                    sequence,
                    current: initial,
                }
            })
            .collect();
        Self { lights }
    }

    pub fn intensity(&self, target: TargetId) -> Option<f32> {
        self.lights
            .iter()
            .find(|l| l.target == target)
            .map(|l| l.current)
    }
}

impl DistanceSubscriber for LightBlend {
    fn name(&self) -> &str {
        "lights"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        _services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        for light in &mut self.lights {
            light.current = light.sequence.blend(frame.virtual_distance);
            out.push(SinkWrite::LightIntensity {
                target: light.target,
                intensity: light.current,
            });
        }
    }
}

use crate::registry::{DistanceSubscriber, FrameServices, SoftToggle};
use crate::sink::{SinkWrite, TargetId};
use crate::zone::{DistanceFrame, HysteresisBand, HysteresisZone, ZoneAnchor, ZoneTransition};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CullConfig {
    pub target: TargetId,
    pub anchor: ZoneAnchor,
    /// Overrides the culling defaults for this object.
    #[serde(default)]
    pub band: Option<HysteresisBand>,
    #[serde(default = "default_start_visible")]
    pub start_visible: bool,
}

fn default_start_visible() -> bool {
    true
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    pub defaults: HysteresisBand,
    pub entries: Vec<CullConfig>,
}

#[derive(Clone, Debug)]
struct CulledObject {
    target: TargetId,
    anchor: ZoneAnchor,
    zone: HysteresisZone,
}

/// Proximity-based visibility with hysteresis.
///
/// Objects switch on as soon as they come within their activation radius and
/// switch off only after staying beyond the deactivation radius for the band
/// delay. Disabling freezes every object in its last state.
pub struct VisibilityCulling {
    objects: Vec<CulledObject>,
    enabled: bool,
}

impl VisibilityCulling {
    pub fn new(config: &CullingConfig) -> Self {
        let objects = config
            .entries
            .iter()
            .map(|e| CulledObject {
                target: e.target,
                anchor: e.anchor,
                zone: HysteresisZone::new(e.band.unwrap_or(config.defaults), e.start_visible),
            })
            .collect();
        Self {
            objects,
            enabled: true,
        }
    }

    pub fn is_visible(&self, target: TargetId) -> Option<bool> {
        self.objects
            .iter()
            .find(|o| o.target == target)
            .map(|o| o.zone.is_active())
    }
}

impl DistanceSubscriber for VisibilityCulling {
    fn name(&self) -> &str {
        "culling"
    }

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        _services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        for obj in &mut self.objects {
            let separation = obj.anchor.separation(frame);
            match obj.zone.update(separation, frame.dt) {
                Some(ZoneTransition::Activated) => {
                    log::debug!("[zones] {} visible at {:.2}", obj.target, separation)
                }
                Some(ZoneTransition::Deactivated) => {
                    log::debug!("[zones] {} culled at {:.2}", obj.target, separation)
                }
                None => {}
            }
            out.push(SinkWrite::Visibility {
                target: obj.target,
                visible: obj.zone.is_active(),
            });
        }
    }

    fn soft_toggle(&mut self) -> Option<&mut dyn SoftToggle> {
        Some(self)
    }
}

impl SoftToggle for VisibilityCulling {
    fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::info!("[zones] culling enabled={}", enabled);
        }
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

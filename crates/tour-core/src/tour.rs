//! Per-frame orchestration.
//!
//! `Tour` owns every stateful component and runs them in a fixed order each
//! frame: gestures, navigator (with the speed lookup), distance broadcast to
//! the registered subscribers, shared music service, look and zoom, and
//! finally the camera writes. All output goes into the caller's write buffer.

use crate::animation::AnimationScrub;
use crate::audio::{AmbientSounds, ScrollAudio};
use crate::config::TourConfig;
use crate::culling::VisibilityCulling;
use crate::gesture::{GestureSampler, InputFrame};
use crate::idle::IdleDetector;
use crate::lighting::LightBlend;
use crate::music::{MusicDirector, MusicZones};
use crate::navigator::{Navigator, NavigatorState};
use crate::path::{anchor_distance, PathProvider};
use crate::registry::{FrameServices, ZoneRegistry};
use crate::sink::SinkWrite;
use crate::speed_profile::{SpeedEvent, SpeedProfile};
use crate::triggers::EventTriggers;
use crate::yaw::YawController;
use crate::zone::DistanceFrame;
use crate::zoom::ZoomController;
use glam::Vec3;

/// What happened this frame, for hosts that do not want to scan the writes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub navigator: NavigatorState,
    pub world_position: Vec3,
    pub yaw: f32,
    pub fov: f32,
    pub scrolling: bool,
    pub looking: bool,
}

pub struct Tour {
    path: Box<dyn PathProvider>,
    gestures: GestureSampler,
    navigator: Navigator,
    speed: SpeedProfile,
    yaw: YawController,
    zoom: ZoomController,
    registry: ZoneRegistry,
    music: MusicDirector,
    last: FrameReport,
}

impl Tour {
    /// Build a tour over `path` and register a subscriber for every
    /// configured zone family.
    pub fn from_config(path: Box<dyn PathProvider>, config: &TourConfig) -> Self {
        let length = path.length();
        let issues = config.validate(length);
        if !issues.is_empty() {
            log::warn!("[tour] configuration has {} issue(s)", issues.len());
        }

        let mut registry = ZoneRegistry::new();
        if !config.lights.is_empty() {
            registry.register(Box::new(LightBlend::new(&config.lights)));
        }
        if !config.animations.is_empty() {
            registry.register(Box::new(AnimationScrub::new(&config.animations)));
        }
        if !config.triggers.is_empty() {
            registry.register(Box::new(EventTriggers::new(&config.triggers)));
        }
        if !config.culling.entries.is_empty() {
            registry.register(Box::new(VisibilityCulling::new(&config.culling)));
        }
        if !config.ambient_sounds.is_empty() {
            registry.register(Box::new(AmbientSounds::new(&config.ambient_sounds)));
        }
        if !config.music_zones.is_empty() {
            registry.register(Box::new(MusicZones::new(&config.music_zones)));
        }
        if config.scroll_audio.enabled {
            registry.register(Box::new(ScrollAudio::new(config.scroll_audio.clone())));
        }
        registry.register(Box::new(IdleDetector::new(config.idle.clone())));

        let navigator = Navigator::new(config.navigator.clone(), length);
        log::info!(
            "[tour] track {:.2} m (usable {:.2} m), {} subscriber(s)",
            length,
            navigator.usable_max(),
            registry.len()
        );

        let mut tour = Self {
            gestures: GestureSampler::new(config.gestures.clone()),
            navigator,
            speed: SpeedProfile::new(config.speed_events.clone()),
            yaw: YawController::new(config.look.clone()),
            zoom: ZoomController::new(config.zoom.clone()),
            registry,
            music: MusicDirector::new(config.music_crossfade),
            last: FrameReport::default(),
            path,
        };
        tour.last = tour.idle_report();
        tour
    }

    fn idle_report(&self) -> FrameReport {
        FrameReport {
            navigator: self.navigator.state(),
            world_position: self.world_position(self.navigator.actual()),
            yaw: self.yaw.yaw(),
            fov: self.zoom.fov(),
            scrolling: false,
            looking: false,
        }
    }

    fn world_position(&self, distance: f32) -> Vec3 {
        let length = self.path.length();
        let t = if length > 0.0 { distance / length } else { 0.0 };
        self.path.position_at(t)
    }

    pub fn path(&self) -> &dyn PathProvider {
        self.path.as_ref()
    }

    /// Track distance closest to a scene point.
    pub fn anchor_distance(&self, point: Vec3) -> f32 {
        anchor_distance(self.path.as_ref(), point)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn speed_profile(&self) -> &SpeedProfile {
        &self.speed
    }

    pub fn set_speed_events(&mut self, events: Vec<SpeedEvent>) {
        self.speed.set_events(events);
    }

    pub fn yaw(&self) -> &YawController {
        &self.yaw
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn music(&self) -> &MusicDirector {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicDirector {
        &mut self.music
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ZoneRegistry {
        &mut self.registry
    }

    pub fn last_report(&self) -> &FrameReport {
        &self.last
    }

    /// Advance one frame of `dt` seconds.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &InputFrame,
        out: &mut Vec<SinkWrite>,
    ) -> FrameReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let gestures = self.gestures.sample(dt, input);

        let scroll = gestures.scroll;
        if scroll.active {
            self.navigator.apply_drag(scroll.delta.y);
        }
        if scroll.released.is_some() && !scroll.momentum_armed {
            self.navigator.stop();
        }
        if scroll.double_tap {
            self.zoom.trigger();
        }

        let look = gestures.look;
        if look.active {
            self.yaw.apply_look(look.delta.x);
        }
        self.yaw.set_dragging(look.active);

        let state = self.navigator.tick(dt, &self.speed);
        let world_position = self.world_position(state.actual);

        let frame = DistanceFrame {
            dt,
            virtual_distance: state.virtual_distance,
            actual_distance: state.actual,
            world_position,
            velocity: state.velocity,
            speed_multiplier: state.speed_multiplier,
            clamped: state.clamped,
        };
        let mut services = FrameServices {
            music: &mut self.music,
        };
        self.registry.broadcast(&frame, &mut services, out);
        self.music.tick(dt, out);

        let yaw = self.yaw.tick(dt);
        let fov = self.zoom.tick(dt);
        let sway_gain = if scroll.active || look.active { 0.0 } else { 1.0 };
        out.push(SinkWrite::DollyPosition {
            distance: state.actual,
            position: world_position,
        });
        out.push(SinkWrite::Orientation {
            yaw_degrees: yaw,
            fov_degrees: fov,
            sway_gain,
        });

        self.last = FrameReport {
            navigator: state,
            world_position,
            yaw,
            fov,
            scrolling: scroll.active,
            looking: look.active,
        };
        self.last
    }

    /// Labelled values for an on-screen or log readout.
    pub fn readout(&self) -> Vec<(&'static str, String)> {
        let nav = &self.last.navigator;
        vec![
            ("Speed Multiplier", format!("{:.2}", nav.speed_multiplier)),
            ("Scroll Velocity", format!("{:.2}", nav.velocity)),
            ("Actual Distance", format!("{:.2}", nav.actual)),
            ("Virtual Distance", format!("{:.2}", nav.virtual_distance)),
            ("Diff", format!("{:.2}", nav.divergence())),
            ("Yaw", format!("{:.2}", self.last.yaw)),
            ("Zooming", self.zoom.is_zooming().to_string()),
            ("Clamped", nav.clamped.to_string()),
        ]
    }
}

//! Explicit subscriber registry.
//!
//! Everything that reacts to the observer's position is registered here once
//! at start-up and receives the same [`DistanceFrame`] every tick, in
//! registration order. Nothing is discovered at runtime.

use crate::music::MusicDirector;
use crate::sink::SinkWrite;
use crate::zone::DistanceFrame;

/// Shared services a subscriber may use during its frame.
pub struct FrameServices<'a> {
    pub music: &'a mut MusicDirector,
}

/// A consumer of the per-frame distance signal.
pub trait DistanceSubscriber {
    fn name(&self) -> &str;

    fn on_frame(
        &mut self,
        frame: &DistanceFrame,
        services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    );

    /// Opt-in soft enable/disable capability.
    fn soft_toggle(&mut self) -> Option<&mut dyn SoftToggle> {
        None
    }
}

/// Runtime enable/disable switch a subscriber can expose.
pub trait SoftToggle {
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

#[derive(Default)]
pub struct ZoneRegistry {
    subscribers: Vec<Box<dyn DistanceSubscriber>>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, subscriber: Box<dyn DistanceSubscriber>) {
        log::debug!("[zones] registered {}", subscriber.name());
        self.subscribers.push(subscriber);
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.subscribers.iter().map(|s| s.name()).collect()
    }

    /// Deliver `frame` to every enabled subscriber.
    pub fn broadcast(
        &mut self,
        frame: &DistanceFrame,
        services: &mut FrameServices<'_>,
        out: &mut Vec<SinkWrite>,
    ) {
        for sub in &mut self.subscribers {
            let enabled = sub.soft_toggle().map(|t| t.is_enabled()).unwrap_or(true);
            if enabled {
                sub.on_frame(frame, services, out);
            }
        }
    }

    /// Enable or disable every subscriber exposing [`SoftToggle`].
    /// Returns how many were switched.
    pub fn set_all_enabled(&mut self, enabled: bool) -> usize {
        let mut count = 0;
        for sub in &mut self.subscribers {
            if let Some(toggle) = sub.soft_toggle() {
                toggle.set_enabled(enabled);
                count += 1;
            }
        }
        log::info!("[zones] set {} toggleable subscriber(s) enabled={}", count, enabled);
        count
    }

    /// Enable or disable a single subscriber by name. False if it does not
    /// exist or cannot be toggled.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        for sub in &mut self.subscribers {
            if sub.name() == name {
                if let Some(toggle) = sub.soft_toggle() {
                    toggle.set_enabled(enabled);
                    return true;
                }
                return false;
            }
        }
        false
    }
}

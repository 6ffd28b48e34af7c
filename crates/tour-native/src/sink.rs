use std::collections::BTreeMap;
use tour_core::{OutputSink, SinkWrite, TargetId};

/// Stand-in for a scene: remembers the last value per target and logs the
/// discrete changes such as fires, visibility flips and music switches.
#[derive(Debug, Default)]
pub struct LoggingSink {
    frame: u64,
    writes: u64,
    fires: u64,
    visible: BTreeMap<TargetId, bool>,
    intensity: BTreeMap<TargetId, f32>,
    idle_timeouts: u32,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn fires(&self) -> u64 {
        self.fires
    }

    pub fn idle_timeouts(&self) -> u32 {
        self.idle_timeouts
    }

    pub fn visible_count(&self) -> usize {
        self.visible.values().filter(|v| **v).count()
    }

    /// Lights currently above zero intensity.
    pub fn lit_count(&self) -> usize {
        self.intensity.values().filter(|i| **i > 0.0).count()
    }
}

impl OutputSink for LoggingSink {
    fn apply(&mut self, write: &SinkWrite) {
        self.writes += 1;
        let frame = self.frame;
        match *write {
            SinkWrite::LightIntensity { target, intensity } => {
                self.intensity.insert(target, intensity);
            }
            SinkWrite::Visibility { target, visible } => {
                if self.visible.insert(target, visible) != Some(visible) {
                    log::info!("[scene] frame {frame}: {target} visible={visible}");
                }
            }
            SinkWrite::Fire { target } => {
                self.fires += 1;
                log::info!("[scene] frame {frame}: fire {target}");
            }
            SinkWrite::AudioPlay { target } => log::info!("[scene] frame {frame}: play {target}"),
            SinkWrite::AudioStop { target } => log::info!("[scene] frame {frame}: stop {target}"),
            SinkWrite::MusicClip { channel, clip } => {
                log::info!("[scene] frame {frame}: music channel {channel} -> {clip}")
            }
            SinkWrite::MusicStop { channel } => {
                log::info!("[scene] frame {frame}: music channel {channel} stopped")
            }
            SinkWrite::IdleTimeout => {
                self.idle_timeouts += 1;
                log::info!("[scene] frame {frame}: idle timeout");
            }
            SinkWrite::DollyPosition { distance, position } => {
                log::trace!("[scene] dolly {distance:.2} at {position}");
            }
            ref other => log::trace!("[scene] {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembers_latest_values() {
        let mut sink = LoggingSink::new();
        sink.apply(&SinkWrite::LightIntensity {
            target: TargetId(1),
            intensity: 0.5,
        });
        sink.apply(&SinkWrite::LightIntensity {
            target: TargetId(1),
            intensity: 0.75,
        });
        sink.apply(&SinkWrite::Visibility {
            target: TargetId(2),
            visible: true,
        });
        sink.apply(&SinkWrite::Fire {
            target: TargetId(3),
        });
        assert_eq!(sink.writes(), 4);
        assert_eq!(sink.intensity.get(&TargetId(1)), Some(&0.75));
        assert_eq!(sink.lit_count(), 1);
        assert_eq!(sink.visible_count(), 1);
        assert_eq!(sink.fires(), 1);
    }
}

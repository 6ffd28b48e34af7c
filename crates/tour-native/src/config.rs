//! Loading of the TOML tour description used by the native driver.

use crate::script::ScriptStep;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tour_core::TourConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Track knots, in scene units (metres).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    pub points: Vec<Vec3>,
}

/// Scripted gesture session replayed at a fixed frame rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub fps: f32,
    /// Log the readout every this many frames (0 disables).
    pub readout_every: u32,
    pub script: Vec<ScriptStep>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            readout_every: 60,
            script: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NativeConfig {
    pub track: TrackConfig,
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl NativeConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tour_core::{Easing, TargetId, ZoneAnchor};

    const BUNDLED: &str = include_str!("../assets/tour.toml");

    #[test]
    fn bundled_tour_parses_and_validates() {
        let cfg = NativeConfig::from_toml(BUNDLED).unwrap();
        assert!(cfg.track.points.len() >= 2);
        assert!(!cfg.session.script.is_empty());
        assert!(!cfg.tour.lights.is_empty());
        assert!(cfg.tour.validate(200.0).is_empty());
    }

    #[test]
    fn omitted_sections_use_defaults() {
        let cfg = NativeConfig::from_toml(
            r#"
            [track]
            points = [[0.0, 0.0, 0.0], [0.0, 0.0, 10.0]]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.tour, TourConfig::default());
        assert_eq!(cfg.session, SessionConfig::default());
    }

    #[test]
    fn nested_records_deserialize() {
        let cfg = NativeConfig::from_toml(
            r#"
            [track]
            points = [[0.0, 0.0, 0.0], [0.0, 0.0, 10.0]]

            [[tour.speed_events]]
            label = "bridge"
            start_distance = 40.0
            length = 10.0
            speed_multiplier = 0.5
            easing = "ease_in_out"

            [[tour.culling.entries]]
            target = 3
            anchor = { kind = "world", position = [1.0, 0.0, 5.0] }
            "#,
        )
        .unwrap();
        let ev = &cfg.tour.speed_events[0];
        assert_eq!(ev.easing, Easing::EaseInOut);
        assert_eq!(ev.ease_in, 2.0);
        let cull = &cfg.tour.culling.entries[0];
        assert_eq!(cull.target, TargetId(3));
        assert!(matches!(cull.anchor, ZoneAnchor::World { .. }));
        assert!(cull.start_visible);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = NativeConfig::from_toml("[track]\npoints = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = NativeConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

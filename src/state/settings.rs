//! Application settings.
//!
//! Settings are read from an optional JSON file. Any field missing from the
//! file keeps its default, so a file only needs the values it overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::viz::ZoomLimits;
use crate::error::MapError;
use crate::geo::RenderStyle;
use crate::graph::{DanglingPolicy, DEFAULT_ROAD_KEY};
use crate::osm::DEFAULT_API_URL;

const DEFAULT_FPS: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// OSM API base URL (without the trailing `/map`)
    pub api_url: String,
    /// Half-size in degrees of the box fetched around a center point.
    pub fetch_radius_deg: f64,
    pub request_timeout_secs: u64,
    /// Tag key that marks a way as a street.
    pub road_key: String,
    pub dangling_policy: DanglingPolicy,
    pub window_width: f32,
    pub window_height: f32,
    /// Target loop iterations per second.
    pub target_fps: f64,
    /// Blank border around the map, in pixels.
    pub margin: f64,
    pub style: RenderStyle,
    pub zoom: ZoomLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fetch_radius_deg: 0.01,
            request_timeout_secs: 60,
            road_key: DEFAULT_ROAD_KEY.to_string(),
            dangling_policy: DanglingPolicy::default(),
            window_width: 800.0,
            window_height: 600.0,
            target_fps: DEFAULT_FPS,
            margin: 20.0,
            style: RenderStyle::default(),
            zoom: ZoomLimits::default(),
        }
    }
}

impl Settings {
    /// Parses settings from a JSON string and checks the zoom limits.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.zoom.validate()?;
        Ok(settings)
    }

    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Loads settings from `path` if given and present, defaults otherwise.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, MapError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::warn!(
                    "Settings file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Delay between loop iterations.
    pub fn frame_interval(&self) -> Duration {
        let fps = if self.target_fps.is_finite() && self.target_fps > 0.0 {
            self.target_fps
        } else {
            log::warn!(
                "Invalid target_fps {}, using {}",
                self.target_fps,
                DEFAULT_FPS
            );
            DEFAULT_FPS
        };
        Duration::from_secs_f64(1.0 / fps)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{
                "road_key": "railway",
                "dangling_policy": "abort",
                "style": { "node_radius": 5.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.road_key, "railway");
        assert_eq!(settings.dangling_policy, DanglingPolicy::Abort);
        assert_eq!(settings.style.node_radius, 5.0);
        assert_eq!(settings.style.street_width, 2.0);
        assert_eq!(settings.margin, 20.0);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(MapError::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "dangling_policy": "sometimes" }"#),
            Err(MapError::Settings(_))
        ));
    }

    #[test]
    fn test_inverted_zoom_limits_rejected() {
        let result = Settings::from_json(r#"{ "zoom": { "min_zoom": 5.0, "max_zoom": 1.0 } }"#);
        assert!(matches!(result, Err(MapError::InvalidSettings(_))));

        let result = Settings::from_json(r#"{ "zoom": { "min_rate": 3.0, "max_rate": 2.0 } }"#);
        assert!(matches!(result, Err(MapError::InvalidSettings(_))));
    }

    #[test]
    fn test_inverted_zoom_file_fails_to_load() {
        let path = std::env::temp_dir().join(format!(
            "streetmap-workbench-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "zoom": { "min_zoom": 5.0, "max_zoom": 1.0 } }"#).unwrap();

        let result = Settings::load_or_default(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(MapError::InvalidSettings(_))));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_frame_interval() {
        let settings = Settings::default();
        assert_eq!(settings.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));

        let broken = Settings {
            target_fps: 0.0,
            ..Default::default()
        };
        assert_eq!(broken.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings =
            Settings::load_or_default(Some(Path::new("/nonexistent/streetmap.json"))).unwrap();
        assert_eq!(settings, Settings::default());
    }
}

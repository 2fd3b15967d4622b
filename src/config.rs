//! Settings for the swarm, its camera and the picking ray.
//!
//! Everything is plain data passed by reference into the components that
//! need it. Settings can be loaded from a JSON file where every field is
//! optional:
//!
//! ```json
//! { "swarm": { "count": 50000, "speed": 0.01 }, "camera": { "fov_degrees": 75 } }
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Range of the `spread` control.
pub const SPREAD_RANGE: RangeInclusive<f32> = 0.0..=1000.0;
/// Step of the `spread` control.
pub const SPREAD_STEP: f32 = 100.0;
/// Range of the `size` control.
pub const SIZE_RANGE: RangeInclusive<f32> = 0.01..=0.5;
/// Step of the `size` control.
pub const SIZE_STEP: f32 = 0.01;
/// Range of the `count` control.
pub const COUNT_RANGE: RangeInclusive<u32> = 0..=100_000;
/// Step of the `count` control.
pub const COUNT_STEP: u32 = 1000;
/// Range of the `speed` control.
pub const SPEED_RANGE: RangeInclusive<f32> = 0.001..=0.1;
/// Step of the `speed` control.
pub const SPEED_STEP: f32 = 0.001;

/// Squared distance from the Y axis below which a camera start is rejected.
const START_AXIS_EPSILON: f32 = 1e-6;

/// Particle swarm parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Edge length of the cube particles are placed in, centred on the origin.
    pub spread: f32,
    /// Upper bound of the per-particle progress increment.
    pub speed: f32,
    /// Number of particles.
    pub count: u32,
    /// Rendered point size in world units.
    pub size: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            spread: 100.0,
            speed: 0.005,
            count: 25_000,
            size: 0.05,
        }
    }
}

impl SwarmConfig {
    /// Whether moving from `self` to `next` requires rebuilding the particle store.
    ///
    /// Only `count` and `speed` are baked into the store; `spread` and
    /// `size` are read again at each use.
    pub fn needs_rebuild(&self, next: &SwarmConfig) -> bool {
        self.count != next.count || self.speed != next.speed
    }

    /// Clamp every field into the range exposed by the control surface.
    pub fn clamped(&self) -> SwarmConfig {
        SwarmConfig {
            spread: clamp_range(self.spread, &SPREAD_RANGE),
            speed: clamp_range(self.speed, &SPEED_RANGE),
            count: self.count.clamp(*COUNT_RANGE.start(), *COUNT_RANGE.end()),
            size: clamp_range(self.size, &SIZE_RANGE),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(invalid("swarm.spread", "must be finite and non-negative"));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(invalid("swarm.speed", "must be finite and positive"));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(invalid("swarm.size", "must be finite and positive"));
        }
        if self.count > *COUNT_RANGE.end() {
            return Err(invalid("swarm.count", "must not exceed 100000"));
        }
        Ok(())
    }
}

/// Perspective camera and follow behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera position.
    pub start: Vec3,
    /// Fraction of the remaining distance covered per tick.
    pub follow_rate: f32,
    /// Once an axis exceeds this, it snaps back to zero.
    pub wrap_bound: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 100.0,
            near: 0.001,
            far: 100.0,
            start: Vec3::new(0.0, 0.0, 50.0),
            follow_rate: 0.01,
            wrap_bound: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("camera.fov_degrees", "must lie in (0, 180)"));
        }
        if !self.near.is_finite() || self.near <= 0.0 {
            return Err(invalid("camera.near", "must be finite and positive"));
        }
        if !self.far.is_finite() || self.far <= self.near {
            return Err(invalid("camera.far", "must be finite and greater than near"));
        }
        if !self.start.is_finite() {
            return Err(invalid("camera.start", "must be finite"));
        }
        // The camera looks at the origin with +Y up, so it cannot sit on the Y axis.
        if Vec2::new(self.start.x, self.start.z).length_squared() < START_AXIS_EPSILON {
            return Err(invalid("camera.start", "must not lie on the Y axis"));
        }
        if !self.follow_rate.is_finite() {
            return Err(invalid("camera.follow_rate", "must be finite"));
        }
        if !self.wrap_bound.is_finite() {
            return Err(invalid("camera.wrap_bound", "must be finite"));
        }
        Ok(())
    }
}

/// Picking ray and target marker parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickConfig {
    /// A point counts as hit when the ray passes within this distance of it.
    pub point_threshold: f32,
    /// Radius of the invisible marker sphere kept at the target.
    pub marker_radius: f32,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            point_threshold: 1.0,
            marker_radius: 0.1,
        }
    }
}

impl PickConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.point_threshold.is_finite() || self.point_threshold < 0.0 {
            return Err(invalid("picking.point_threshold", "must be finite and non-negative"));
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(invalid("picking.marker_radius", "must be finite and non-negative"));
        }
        Ok(())
    }
}

/// All tunables of a running swarm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub swarm: SwarmConfig,
    pub camera: CameraConfig,
    pub picking: PickConfig,
}

impl Settings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        tracing::info!(target: "swarm::config", ?path, "loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.swarm.validate()?;
        self.camera.validate()?;
        self.picking.validate()
    }
}

fn clamp_range(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.swarm.count, 25_000);
        assert_eq!(settings.camera.start, Vec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r#"{ "swarm": { "count": 3000 }, "picking": { "point_threshold": 2.5 } }"#)
                .unwrap();
        assert_eq!(settings.swarm.count, 3000);
        assert_eq!(settings.swarm.speed, SwarmConfig::default().speed);
        assert_eq!(settings.picking.point_threshold, 2.5);
        assert_eq!(settings.camera, CameraConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = Settings::from_json(r#"{ "swarm": { "speed": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "swarm.speed", .. }));
    }

    #[test]
    fn test_rejects_far_before_near() {
        let err = Settings::from_json(r#"{ "camera": { "near": 10.0, "far": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.far", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ swarm: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here/swarm.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_needs_rebuild_only_for_count_and_speed() {
        let base = SwarmConfig::default();
        assert!(!base.needs_rebuild(&SwarmConfig { spread: 500.0, ..base }));
        assert!(!base.needs_rebuild(&SwarmConfig { size: 0.3, ..base }));
        assert!(base.needs_rebuild(&SwarmConfig { count: 1000, ..base }));
        assert!(base.needs_rebuild(&SwarmConfig { speed: 0.05, ..base }));
    }

    #[test]
    fn test_rejects_count_above_range() {
        let err = Settings::from_json(r#"{ "swarm": { "count": 4000000000 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "swarm.count", .. }));
        assert!(Settings::from_json(r#"{ "swarm": { "count": 100000 } }"#).is_ok());
    }

    #[test]
    fn test_rejects_camera_start_on_up_axis() {
        for start in ["[0.0, 0.0, 0.0]", "[0.0, 25.0, 0.0]", "[0.0, -3.0, 0.0]"] {
            let json = format!(r#"{{ "camera": {{ "start": {start} }} }}"#);
            let err = Settings::from_json(&json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: "camera.start", .. }),
                "start {} accepted",
                start
            );
        }
        assert!(Settings::from_json(r#"{ "camera": { "start": [0.0, 25.0, 1.0] } }"#).is_ok());
    }

    #[test]
    fn test_clamped_uses_control_ranges() {
        let wild = SwarmConfig {
            spread: 5000.0,
            speed: 0.0,
            count: 1_000_000,
            size: 2.0,
        };
        let clamped = wild.clamped();
        assert_eq!(clamped.spread, 1000.0);
        assert_eq!(clamped.speed, 0.001);
        assert_eq!(clamped.count, 100_000);
        assert_eq!(clamped.size, 0.5);
    }
}

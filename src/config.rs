// config.rs: 灵敏度、反转、平滑、俯仰限制与视场角参数

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::angle::deg_to_rad;
use crate::error::ConfigError;

/// Viewer settings. Field names serialize in camelCase and every field
/// has a default, so a partial settings blob merges over the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Drag multiplier on top of the base 0.003 rad/px.
    pub drag_sensitivity: f32,
    pub gyro_sensitivity: f32,
    /// 0-100; look-direction smoothing factor is `smoothness / 100`.
    pub smoothness: f32,
    /// Vertical look limit in degrees.
    pub pitch_limit: f32,
    /// Default field of view in degrees.
    pub fov: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    pub invert_drag: bool,
    pub invert_gyro: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drag_sensitivity: 1.0,
            gyro_sensitivity: 1.0,
            smoothness: 50.0,
            pitch_limit: 80.0,
            fov: 75.0,
            min_fov: 40.0,
            max_fov: 100.0,
            invert_drag: false,
            invert_gyro: false,
        }
    }
}

impl Config {
    /// Checks every field and hands the config back if it is usable.
    /// Controllers assume a validated config and never re-check it.
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("dragSensitivity", self.drag_sensitivity),
            ("gyroSensitivity", self.gyro_sensitivity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Sensitivity { field, value });
            }
        }
        if !(self.smoothness > 0.0 && self.smoothness <= 100.0) {
            return Err(ConfigError::Smoothness(self.smoothness));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit <= 90.0) {
            return Err(ConfigError::PitchLimit(self.pitch_limit));
        }
        if !(self.min_fov > 0.0 && self.min_fov <= self.max_fov && self.max_fov < 180.0) {
            return Err(ConfigError::FovRange {
                min: self.min_fov,
                max: self.max_fov,
            });
        }
        if !(self.fov >= self.min_fov && self.fov <= self.max_fov) {
            return Err(ConfigError::Fov {
                fov: self.fov,
                min: self.min_fov,
                max: self.max_fov,
            });
        }
        Ok(self)
    }

    /// Parses a JSON settings blob (missing keys take defaults) and validates it.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn pitch_limit_rad(&self) -> f32 {
        deg_to_rad(self.pitch_limit)
    }

    /// Look-direction smoothing factor in `(0, 1]`.
    pub fn smoothing_factor(&self) -> f32 {
        self.smoothness / 100.0
    }

    pub fn clamp_fov(&self, fov: f32) -> f32 {
        crate::angle::clamp(fov, self.min_fov, self.max_fov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default().validate().unwrap();
        assert_eq!(config.smoothing_factor(), 0.5);
        assert_eq!(config.min_fov, 40.0);
        assert_eq!(config.max_fov, 100.0);
    }

    #[test]
    fn partial_json_merges_over_defaults() {
        let config =
            Config::from_json_str(r#"{ "smoothness": 20, "invertGyro": true }"#).unwrap();
        assert_eq!(config.smoothness, 20.0);
        assert!(config.invert_gyro);
        assert_eq!(config.fov, 75.0);
        assert_eq!(config.pitch_limit, 80.0);
    }

    #[test]
    fn wider_fov_profile_is_accepted() {
        let config = Config::from_json_str(r#"{ "maxFov": 120 }"#).unwrap();
        assert_eq!(config.clamp_fov(150.0), 120.0);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let bad = |c: Config| c.validate().unwrap_err();

        assert!(matches!(
            bad(Config { smoothness: 0.0, ..Config::default() }),
            ConfigError::Smoothness(_)
        ));
        assert!(matches!(
            bad(Config { smoothness: 101.0, ..Config::default() }),
            ConfigError::Smoothness(_)
        ));
        assert!(matches!(
            bad(Config { pitch_limit: 0.0, ..Config::default() }),
            ConfigError::PitchLimit(_)
        ));
        assert!(matches!(
            bad(Config { drag_sensitivity: f32::NAN, ..Config::default() }),
            ConfigError::Sensitivity { field: "dragSensitivity", .. }
        ));
        assert!(matches!(
            bad(Config { min_fov: 90.0, max_fov: 60.0, ..Config::default() }),
            ConfigError::FovRange { .. }
        ));
        assert!(matches!(
            bad(Config { fov: 30.0, ..Config::default() }),
            ConfigError::Fov { .. }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Config::from_json_str("{ smoothness: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

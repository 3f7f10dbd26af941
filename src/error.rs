//! Configuration errors.
//!
//! Only the configuration boundary can fail. Malformed input events are
//! dropped inside the controller and never reach the caller.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// A sensitivity multiplier that is not a positive finite number.
    Sensitivity { field: &'static str, value: f32 },
    /// Smoothness outside `(0, 100]`.
    Smoothness(f32),
    /// Pitch limit outside `(0, 90]` degrees.
    PitchLimit(f32),
    /// `min_fov`/`max_fov` not an ordered range inside `(0, 180)`.
    FovRange { min: f32, max: f32 },
    /// Default fov outside `[min_fov, max_fov]`.
    Fov { fov: f32, min: f32, max: f32 },
    /// Malformed JSON.
    Parse(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensitivity { field, value } => {
                write!(f, "{field} must be a positive number, got {value}")
            }
            Self::Smoothness(v) => write!(f, "smoothness must be in (0, 100], got {v}"),
            Self::PitchLimit(v) => write!(f, "pitch limit must be in (0, 90] degrees, got {v}"),
            Self::FovRange { min, max } => {
                write!(f, "fov range [{min}, {max}] must satisfy 0 < min <= max < 180")
            }
            Self::Fov { fov, min, max } => {
                write!(f, "default fov {fov} lies outside [{min}, {max}]")
            }
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

use std::path::Path;

use armeasure_overlay::{ConfigError, OverlayStyle};
use serde::{Deserialize, Serialize};

/// Near and far clipping distances in meters used to build projection matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipPlanes {
    /// Distance to the near clipping plane.
    pub near: f32,
    /// Distance to the far clipping plane.
    pub far: f32,
}

impl Default for ClipPlanes {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
        }
    }
}

impl ClipPlanes {
    /// Check that `0 < near < far` and both are finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::InvalidClipPlanes(self.near, self.far));
        }
        Ok(())
    }
}

/// Configuration of a measurement session.
///
/// # Example
///
/// ```
/// use armeasure_tracking::SessionConfig;
///
/// let config = SessionConfig::from_json_str(r#"{ "clip": { "far": 20.0 } }"#)?;
/// assert_eq!(config.clip.near, 0.1);
/// assert_eq!(config.clip.far, 20.0);
/// # Ok::<(), armeasure_overlay::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Clipping planes passed to the provider.
    pub clip: ClipPlanes,
    /// Overlay appearance.
    pub style: OverlayStyle,
}

impl SessionConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a JSON file and validate it.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to the JSON file.
    pub fn from_json_file(file_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(file_path)?;
        Self::from_json_str(&json)
    }

    /// Check the clipping planes and the style.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clip.validate()?;
        self.style.validate()
    }
}

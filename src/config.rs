//! Configuration for a Warpfield run.
//!
//! Every constant the simulation and the window runner depend on lives in
//! [`StarfieldConfig`]. It can be built in code, or loaded from a JSON file
//! where any omitted field falls back to its default:
//!
//! ```json
//! {
//!     "initial_density": 800,
//!     "light_threshold": 70.0,
//!     "seed": 1234
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable constants for the starfield and its host window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of stars at startup.
    pub initial_density: usize,
    /// Stars added or removed per density change.
    pub density_step: usize,
    /// Density never drops below this.
    pub min_density: usize,
    /// Upper bound on travel speed.
    pub max_speed: f32,
    /// Speed at which Doppler and cone effects begin.
    pub light_threshold: f32,
    /// Speed change per speed-up/slow-down action.
    pub speed_step: f32,
    /// Initial window size in logical pixels.
    pub window_width: u32,
    pub window_height: u32,
    /// Frame background, RGB.
    pub background: [u8; 3],
    /// Fixed RNG seed for reproducible star layouts. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Directory snapshots are written to.
    pub snapshot_dir: String,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            initial_density: 500,
            density_step: 100,
            min_density: 100,
            max_speed: 100.0,
            light_threshold: 80.0,
            speed_step: 1.0,
            window_width: 1280,
            window_height: 720,
            background: [0, 0, 0],
            seed: None,
            snapshot_dir: ".".to_string(),
        }
    }
}

impl StarfieldConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if !(self.light_threshold > 0.0 && self.light_threshold < self.max_speed) {
            return Err(ConfigError::Invalid(format!(
                "light_threshold must be in (0, {}), got {}",
                self.max_speed, self.light_threshold
            )));
        }
        if !(self.speed_step.is_finite() && self.speed_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "speed_step must be positive, got {}",
                self.speed_step
            )));
        }
        if self.min_density == 0 {
            return Err(ConfigError::Invalid("min_density must be positive".into()));
        }
        if self.density_step == 0 {
            return Err(ConfigError::Invalid("density_step must be positive".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        Ok(())
    }
}

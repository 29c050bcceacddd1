//! Configuration for the teleoperation core – reads a TOML file.
//!
//! Every field has a working default (the values tuned on the robot), so an
//! empty file – or no file at all – yields a usable configuration and a
//! partial file only overrides what it names.
//!
//! ```toml
//! [shaper]
//! deadband = 0.10
//! max_speed_mps = 5.12
//!
//! [camera]
//! name = "Arducam_OV9281_USB_Camera"
//!
//! [filter]
//! min_target_area = 20000.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use teleo_control::ShaperConfig;
use teleo_perception::vision::CameraConfig;
use teleo_perception::FilterConfig;
use teleo_types::TeleoError;

/// Top-level configuration bundle for the teleoperation core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeleopConfig {
    /// Input-shaping parameters.
    #[serde(default)]
    pub shaper: ShaperConfig,
    /// Camera identity and mounting transform.
    #[serde(default)]
    pub camera: CameraConfig,
    /// Vision measurement-filter thresholds.
    #[serde(default)]
    pub filter: FilterConfig,
}

impl TeleopConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TeleoError::Config`] when the text is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, TeleoError> {
        toml::from_str(text).map_err(|e| TeleoError::Config(e.to_string()))
    }

    /// Load a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`TeleoError::Config`] when the file cannot be read or
    /// parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TeleoError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            TeleoError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }
}

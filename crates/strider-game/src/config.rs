//! Controller configuration

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::error::ConfigError;
use crate::locomotion::LocomotionConfig;

/// Every tunable the controller reads, grouped by component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
}

impl ControllerConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        self.camera.validate()
    }
}

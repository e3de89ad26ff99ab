//! Camera configuration

use serde::{Deserialize, Serialize};

use crate::error::{check_positive, check_range, ConfigError};

/// Squared look magnitude below which look input is ignored
pub const LOOK_THRESHOLD: f32 = 0.01;

/// Placement of one viewpoint relative to the follow target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewpointConfig {
    /// Distance behind the follow target
    pub distance: f32,
    /// Horizontal offset to the right (over-the-shoulder view)
    pub shoulder_offset: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Look sensitivity outside aim mode
    pub look_speed: f32,
    /// Look sensitivity while aiming (usually slower)
    pub aim_speed: f32,
    /// How far up the camera can look, in degrees
    pub top_clamp: f32,
    /// How far down the camera can look, in degrees
    pub bottom_clamp: f32,
    /// Extra pitch added on top of the target pitch, in degrees
    pub angle_override: f32,
    /// Ignore look input entirely
    pub lock_position: bool,
    /// Height of the follow target above the character's feet
    pub follow_height: f32,
    /// Collision radius for camera placement
    pub collision_radius: f32,
    /// Default third-person viewpoint
    pub normal: ViewpointConfig,
    /// Over-the-shoulder aim viewpoint
    pub aim: ViewpointConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_speed: 1.0,
            aim_speed: 0.5,
            top_clamp: 70.0,
            bottom_clamp: -30.0,
            angle_override: 0.0,
            lock_position: false,
            follow_height: 1.375,
            collision_radius: 0.2,
            normal: ViewpointConfig {
                distance: 4.0,
                shoulder_offset: 0.5,
                fov: 60.0,
            },
            aim: ViewpointConfig {
                distance: 1.5,
                shoulder_offset: 0.9,
                fov: 40.0,
            },
        }
    }
}

impl CameraConfig {
    /// Look sensitivity for the current aim state
    pub fn device_speed(&self, aiming: bool) -> f32 {
        if aiming {
            self.aim_speed
        } else {
            self.look_speed
        }
    }

    /// Check the configuration for values the rig cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bottom_clamp > self.top_clamp {
            return Err(ConfigError::InvertedClamp {
                bottom: self.bottom_clamp,
                top: self.top_clamp,
            });
        }
        check_positive("look_speed", self.look_speed)?;
        check_positive("aim_speed", self.aim_speed)?;
        check_range("top_clamp", self.top_clamp, -360.0, 360.0)?;
        check_range("bottom_clamp", self.bottom_clamp, -360.0, 360.0)?;
        check_range("normal.fov", self.normal.fov, 1.0, 179.0)?;
        check_range("aim.fov", self.aim.fov, 1.0, 179.0)?;
        check_range("normal.distance", self.normal.distance, 0.0, f32::MAX)?;
        check_range("aim.distance", self.aim.distance, 0.0, f32::MAX)?;
        Ok(())
    }
}

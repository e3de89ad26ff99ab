//! Locomotion configuration and constants

use serde::{Deserialize, Serialize};

use crate::error::{check_positive, check_range, ConfigError};

/// Maximum downward speed in meters per second
pub const TERMINAL_VELOCITY: f32 = 53.0;

/// Speed band around the target inside which speed snaps instead of easing
pub const SPEED_OFFSET: f32 = 0.1;

/// Decimal places kept when easing speed
pub const SPEED_DECIMALS: i32 = 3;

/// Animation blend values below this read as zero
pub const BLEND_DEAD_ZONE: f32 = 0.01;

/// Vertical velocity held while grounded to keep contact with the floor
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Locomotion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Walking speed in meters per second
    pub move_speed: f32,
    /// Sprinting speed in meters per second
    pub sprint_speed: f32,
    /// Time to turn toward the movement direction, in seconds (0.0 to 0.3)
    pub rotation_smooth_time: f32,
    /// How quickly speed changes, per second
    pub speed_change_rate: f32,
    /// Height of a jump in meters
    pub jump_height: f32,
    /// Gravity acceleration (negative is down)
    pub gravity: f32,
    /// Delay after landing before another jump is allowed
    pub jump_timeout: f32,
    /// Airborne time before the free-fall state kicks in
    pub fall_timeout: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            sprint_speed: 5.335,
            rotation_smooth_time: 0.12,
            speed_change_rate: 10.0,
            jump_height: 1.2,
            gravity: -15.0,
            jump_timeout: 0.5,
            fall_timeout: 0.15,
        }
    }
}

impl LocomotionConfig {
    /// Get the target speed based on sprint state
    pub fn target_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.sprint_speed
        } else {
            self.move_speed
        }
    }

    /// Upper bound for the eased speed
    pub fn max_speed(&self) -> f32 {
        self.move_speed.max(self.sprint_speed)
    }

    /// Initial vertical velocity that reaches `jump_height` under `gravity`
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).max(0.0).sqrt()
    }

    /// Check the configuration for values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("move_speed", self.move_speed, 0.0, f32::MAX)?;
        check_range("sprint_speed", self.sprint_speed, 0.0, f32::MAX)?;
        check_range("rotation_smooth_time", self.rotation_smooth_time, 0.0, 0.3)?;
        check_positive("speed_change_rate", self.speed_change_rate)?;
        check_range("jump_height", self.jump_height, 0.0, f32::MAX)?;
        check_range("gravity", self.gravity, f32::MIN, 0.0)?;
        check_range("jump_timeout", self.jump_timeout, 0.0, f32::MAX)?;
        check_range("fall_timeout", self.fall_timeout, 0.0, f32::MAX)?;
        Ok(())
    }
}

//! Core types used throughout Strider

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::math;

/// Position and orientation of the controlled entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform at a position facing the given yaw (degrees)
    pub fn from_position_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw_degrees.to_radians()),
        }
    }

    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Get the forward direction (positive Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Facing yaw in degrees, in `[0, 360)`
    pub fn yaw_degrees(&self) -> f32 {
        math::direction_to_yaw(self.forward()).unwrap_or(0.0)
    }

    /// Replace the orientation with a pure yaw rotation
    pub fn set_yaw_degrees(&mut self, yaw_degrees: f32) {
        self.rotation = Quat::from_rotation_y(yaw_degrees.to_radians());
    }

    /// Face along the horizontal component of `forward`.
    ///
    /// Directions with no horizontal extent leave the rotation untouched.
    pub fn set_forward(&mut self, forward: Vec3) {
        if let Some(yaw) = math::direction_to_yaw(forward) {
            self.set_yaw_degrees(yaw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.matrix();
        let translation = matrix.col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_yaw_round_trip() {
        let mut transform = Transform::default();
        transform.set_yaw_degrees(-90.0);
        assert!((transform.yaw_degrees() - 270.0).abs() < 1e-3);
        assert!((transform.forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_set_forward_ignores_vertical() {
        let mut transform = Transform::from_position_yaw(Vec3::ZERO, 45.0);
        transform.set_forward(Vec3::Y);
        assert!((transform.yaw_degrees() - 45.0).abs() < 1e-3);

        transform.set_forward(Vec3::new(1.0, 5.0, 0.0));
        assert!((transform.yaw_degrees() - 90.0).abs() < 1e-3);
        assert!(transform.forward().y.abs() < 1e-5);
    }
}

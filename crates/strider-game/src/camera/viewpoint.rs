//! Camera viewpoints and screen-space rays
//!
//! World convention: Y up, Z forward, X right (left-handed view matrices).

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use strider_core::{Ray, SceneQuery};

use super::config::ViewpointConfig;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// Closest the camera is pulled in toward the follow target on obstruction
const MIN_DISTANCE: f32 = 0.5;

/// Which of the two cameras is live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viewpoint {
    /// Default third-person follow view
    #[default]
    Normal,
    /// Tighter over-the-shoulder view used while aiming
    Aim,
}

/// World placement of the active viewpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewpointPose {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl ViewpointPose {
    /// Get the camera's forward direction
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Get the camera's up direction
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_lh(self.position, self.forward(), self.up())
    }

    /// Get a projection matrix
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov.to_radians(), aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    /// Ray from the near plane through a pixel.
    ///
    /// `point` is in pixels with the origin at the top-left corner. An empty
    /// viewport yields the forward ray from the camera position.
    pub fn screen_point_to_ray(&self, point: Vec2, viewport: Vec2) -> Ray {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Ray::new(self.position, self.forward());
        }

        let ndc = Vec2::new(
            point.x / viewport.x * 2.0 - 1.0,
            1.0 - point.y / viewport.y * 2.0,
        );
        let aspect_ratio = viewport.x / viewport.y;
        let inverse = (self.projection_matrix(aspect_ratio) * self.view_matrix()).inverse();

        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }

    /// Ray through the middle of the screen
    pub fn screen_center_ray(&self, viewport: Vec2) -> Ray {
        self.screen_point_to_ray(viewport * 0.5, viewport)
    }
}

/// Place a viewpoint behind `pivot`, pulled in when geometry is in the way
pub fn place_viewpoint(
    pivot: Vec3,
    rotation: Quat,
    config: &ViewpointConfig,
    collision_radius: f32,
    scene: &impl SceneQuery,
) -> Vec3 {
    let forward = rotation * Vec3::Z;
    let shoulder = pivot + rotation * Vec3::X * config.shoulder_offset;
    if config.distance <= 0.0 {
        return shoulder;
    }

    let back_ray = Ray::new(shoulder, -forward);
    match scene.raycast(&back_ray, config.distance + collision_radius) {
        Some(hit) => {
            let safe_distance = (hit.distance - collision_radius).max(MIN_DISTANCE);
            shoulder - forward * safe_distance
        }
        None => shoulder - forward * config.distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::{EmptyScene, RayHit};

    struct Wall {
        z: f32,
    }

    impl SceneQuery for Wall {
        fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
            if ray.direction.z.abs() < 1e-6 {
                return None;
            }
            let distance = (self.z - ray.origin.z) / ray.direction.z;
            (distance >= 0.0 && distance <= max_distance).then(|| RayHit {
                point: ray.at(distance),
                normal: Vec3::new(0.0, 0.0, -ray.direction.z.signum()),
                distance,
            })
        }
    }

    fn pose(rotation: Quat) -> ViewpointPose {
        ViewpointPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation,
            fov: 60.0,
        }
    }

    #[test]
    fn test_center_ray_matches_forward() {
        let rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.7, 0.2, 0.0);
        let pose = pose(rotation);
        let ray = pose.screen_center_ray(Vec2::new(1920.0, 1080.0));
        assert!(ray.direction.dot(pose.forward()) > 0.9999);
        // Origin sits on the near plane
        assert!(((ray.origin - pose.position).length() - NEAR_PLANE).abs() < 1e-3);
    }

    #[test]
    fn test_screen_edges_map_to_camera_axes() {
        let pose = pose(Quat::IDENTITY);
        let viewport = Vec2::new(800.0, 600.0);

        let right = pose.screen_point_to_ray(Vec2::new(800.0, 300.0), viewport);
        assert!(right.direction.x > 0.0);

        let top = pose.screen_point_to_ray(Vec2::new(400.0, 0.0), viewport);
        assert!(top.direction.y > 0.0);

        // Half the vertical fov at the top edge
        let angle = top.direction.dot(Vec3::Z).acos().to_degrees();
        assert!((angle - 30.0).abs() < 0.05);
    }

    #[test]
    fn test_empty_viewport_uses_forward() {
        let pose = pose(Quat::IDENTITY);
        let ray = pose.screen_center_ray(Vec2::ZERO);
        assert_eq!(ray.origin, pose.position);
        assert_eq!(ray.direction, Vec3::Z);
    }

    #[test]
    fn test_placement_unobstructed() {
        let config = ViewpointConfig {
            distance: 4.0,
            shoulder_offset: 0.5,
            fov: 60.0,
        };
        let position = place_viewpoint(Vec3::ZERO, Quat::IDENTITY, &config, 0.2, &EmptyScene);
        assert!((position - Vec3::new(0.5, 0.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn test_placement_pulled_in_by_wall() {
        let config = ViewpointConfig {
            distance: 4.0,
            shoulder_offset: 0.0,
            fov: 60.0,
        };
        let wall = Wall { z: -2.0 };
        let position = place_viewpoint(Vec3::ZERO, Quat::IDENTITY, &config, 0.2, &wall);
        assert!((position.z + 1.8).abs() < 1e-4);

        let close = Wall { z: -0.3 };
        let position = place_viewpoint(Vec3::ZERO, Quat::IDENTITY, &config, 0.2, &close);
        assert!((position.z + MIN_DISTANCE).abs() < 1e-4);
    }
}

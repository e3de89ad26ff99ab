//! Aim targeting
//!
//! While aim is held the character turns to face whatever sits under the
//! screen center, instead of its movement direction.

use glam::Vec3;
use strider_core::math::exp_blend;
use strider_core::SceneQuery;
use tracing::debug;

use crate::camera::{CameraHandle, Viewpoint};
use crate::input::InputState;

/// How far the aim ray reaches, and where the aim point lands on a miss
pub const AIM_DISTANCE: f32 = 999.0;

/// Turn rate toward the aim direction, per second
pub const AIM_TURN_RATE: f32 = 20.0;

/// Aim state carried across frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimState {
    /// Rig blend weight: exactly 1 while aiming, 0 otherwise
    pub weight: f32,
    /// Latest aim point in world space
    pub world_point: Vec3,
    /// Whether the latest aim ray hit geometry
    pub hit: bool,
}

impl AimState {
    /// Whether aim mode is active
    pub fn is_aiming(&self) -> bool {
        self.weight > 0.0
    }
}

/// Result of one aim step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimOutput {
    /// Facing override for the entity; `None` when not aiming
    pub facing: Option<Vec3>,
    /// Rig blend weight for the animation layer
    pub weight: f32,
    /// Raw aim point for a target marker
    pub world_point: Vec3,
    /// Whether the aim ray hit geometry
    pub hit: bool,
}

/// Aim targeting
#[derive(Debug, Clone, Copy, Default)]
pub struct AimTargeting;

impl AimTargeting {
    /// Create aim targeting
    pub fn new() -> Self {
        Self
    }

    /// Select the viewpoint for the aim state and, while aiming, turn toward
    /// the point under the screen center.
    pub fn update<S: SceneQuery>(
        &self,
        state: &mut AimState,
        input: &InputState,
        camera: &mut CameraHandle<'_, S>,
        entity_position: Vec3,
        entity_forward: Vec3,
        dt: f32,
    ) -> AimOutput {
        let was_aiming = state.is_aiming();

        if !input.aim {
            camera.set_active(Viewpoint::Normal);
            state.weight = 0.0;
            if was_aiming {
                debug!("Aim released");
            }
            return AimOutput {
                facing: None,
                weight: state.weight,
                world_point: state.world_point,
                hit: state.hit,
            };
        }

        camera.set_active(Viewpoint::Aim);
        state.weight = 1.0;
        if !was_aiming {
            debug!("Aim engaged");
        }

        let ray = camera.screen_center_ray();
        let (world_point, hit) = match camera.scene().raycast(&ray, AIM_DISTANCE) {
            Some(hit) => (hit.point, true),
            None => (ray.at(AIM_DISTANCE), false),
        };
        state.world_point = world_point;
        state.hit = hit;

        let facing = Self::turn_toward(entity_position, entity_forward, world_point, dt);

        AimOutput {
            facing: Some(facing),
            weight: state.weight,
            world_point,
            hit,
        }
    }

    /// Ease `forward` toward the horizontal direction of `target`
    fn turn_toward(position: Vec3, forward: Vec3, target: Vec3, dt: f32) -> Vec3 {
        let flat_target = Vec3::new(target.x, position.y, target.z);
        let aim_direction = (flat_target - position).normalize_or_zero();
        if aim_direction == Vec3::ZERO {
            return forward;
        }

        let turned = forward
            .lerp(aim_direction, exp_blend(AIM_TURN_RATE, dt))
            .normalize_or_zero();
        // Exactly opposite directions cancel halfway through the blend
        if turned == Vec3::ZERO {
            aim_direction
        } else {
            turned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraRig, CameraState};
    use glam::Vec2;
    use strider_core::{EmptyScene, Ray, RayHit};

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    /// Vertical plane at a fixed z that every forward ray hits
    struct Backstop {
        z: f32,
    }

    impl SceneQuery for Backstop {
        fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
            if ray.direction.z <= 0.0 {
                return None;
            }
            let distance = (self.z - ray.origin.z) / ray.direction.z;
            (distance >= 0.0 && distance <= max_distance).then(|| RayHit {
                point: ray.at(distance),
                normal: Vec3::NEG_Z,
                distance,
            })
        }
    }

    fn aim_input() -> InputState {
        InputState {
            aim: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_weight_switches_instantly() {
        let rig = CameraRig::new();
        let mut camera_state = CameraState::default();
        let mut state = AimState::default();
        let targeting = AimTargeting::new();

        let mut camera = CameraHandle::new(&rig, &mut camera_state, Vec3::Y, &EmptyScene, VIEWPORT);
        let output = targeting.update(
            &mut state,
            &aim_input(),
            &mut camera,
            Vec3::ZERO,
            Vec3::Z,
            0.016,
        );
        assert_eq!(output.weight, 1.0);
        assert_eq!(camera.active(), Viewpoint::Aim);

        let output = targeting.update(
            &mut state,
            &InputState::default(),
            &mut camera,
            Vec3::ZERO,
            Vec3::Z,
            0.016,
        );
        assert_eq!(output.weight, 0.0);
        assert_eq!(output.facing, None);
        assert_eq!(camera.active(), Viewpoint::Normal);
    }

    #[test]
    fn test_miss_lands_on_far_point() {
        let rig = CameraRig::new();
        let mut camera_state = CameraState {
            yaw: 90.0,
            pitch: 20.0,
            active: Viewpoint::Normal,
        };
        let mut state = AimState::default();
        let pivot = rig.follow_point(Vec3::ZERO);

        let mut camera = CameraHandle::new(&rig, &mut camera_state, pivot, &EmptyScene, VIEWPORT);
        let output = AimTargeting::new().update(
            &mut state,
            &aim_input(),
            &mut camera,
            Vec3::ZERO,
            Vec3::Z,
            0.016,
        );

        let ray = camera.screen_center_ray();
        assert!(!output.hit);
        assert!((output.world_point - ray.at(AIM_DISTANCE)).length() < 1e-2);
        // Pitched down, but facing stays horizontal
        assert!(output.world_point.y < 0.0);
        let facing = output.facing.unwrap();
        assert_eq!(facing.y, 0.0);
        assert!((facing.length() - 1.0).abs() < 1e-5);
        assert!(facing.x > 0.0);
    }

    #[test]
    fn test_hit_point_is_reported() {
        let rig = CameraRig::new();
        let mut camera_state = CameraState::default();
        let mut state = AimState::default();
        let scene = Backstop { z: 20.0 };
        let pivot = rig.follow_point(Vec3::ZERO);

        let mut camera = CameraHandle::new(&rig, &mut camera_state, pivot, &scene, VIEWPORT);
        let output = AimTargeting::new().update(
            &mut state,
            &aim_input(),
            &mut camera,
            Vec3::ZERO,
            Vec3::Z,
            0.016,
        );

        assert!(output.hit);
        assert!(state.hit);
        assert!((output.world_point.z - 20.0).abs() < 1e-3);
        assert_eq!(state.world_point, output.world_point);
    }

    #[test]
    fn test_facing_converges_on_target() {
        let position = Vec3::ZERO;
        let target = Vec3::new(10.0, 5.0, 0.0);
        let mut forward = Vec3::Z;

        for _ in 0..60 {
            forward = AimTargeting::turn_toward(position, forward, target, 0.016);
        }
        assert!((forward - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn test_opposite_target_does_not_collapse() {
        let target = Vec3::new(0.0, 0.0, -5.0);
        let facing = AimTargeting::turn_toward(Vec3::ZERO, Vec3::Z, target, 0.0347);
        assert!((facing.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_target_overhead_keeps_forward() {
        let target = Vec3::new(0.0, 50.0, 0.0);
        let facing = AimTargeting::turn_toward(Vec3::ZERO, Vec3::X, target, 0.016);
        assert_eq!(facing, Vec3::X);
    }
}

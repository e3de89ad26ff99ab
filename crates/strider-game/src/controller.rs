//! Third-person controller: locomotion, aim and camera composed per frame

use glam::{Quat, Vec2, Vec3};
use strider_core::{CharacterMover, SceneQuery, Transform};

use crate::aim::{AimState, AimTargeting};
use crate::camera::{CameraHandle, CameraRig, CameraState, Viewpoint, ViewpointPose};
use crate::config::ControllerConfig;
use crate::input::{DeviceClass, InputState};
use crate::locomotion::{LocomotionController, MotionState};

/// Signals for the external animation layer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationSignals {
    /// Smoothed speed for blend trees
    pub speed: f32,
    /// Input magnitude
    pub motion_speed: f32,
    /// Eased speed times the forward input component
    pub forward_speed: f32,
    pub grounded: bool,
    pub jump: bool,
    pub free_fall: bool,
    /// Aim rig weight
    pub aim_weight: f32,
}

/// Everything a frame produced, for rendering and debugging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Displacement handed to the mover
    pub displacement: Vec3,
    /// Entity position after the move
    pub position: Vec3,
    /// Entity facing yaw in degrees
    pub facing_yaw: f32,
    pub camera_yaw: f32,
    pub camera_pitch: f32,
    /// Rig rotation including the angle override
    pub camera_rotation: Quat,
    /// Pose of the live viewpoint after the camera update
    pub camera_pose: ViewpointPose,
    pub viewpoint: Viewpoint,
    /// Aim point for a target marker
    pub aim_point: Vec3,
    pub aim_hit: bool,
    pub animation: AnimationSignals,
}

/// Third-person controller for a single character
pub struct ThirdPersonController {
    pub locomotion: LocomotionController,
    pub aim: AimTargeting,
    pub camera: CameraRig,
    pub motion: MotionState,
    pub camera_state: CameraState,
    pub aim_state: AimState,
    /// Entity transform; facing is written by locomotion or aim, never both
    pub transform: Transform,
    /// Viewport size in pixels, for screen-center rays
    pub viewport: Vec2,
}

impl ThirdPersonController {
    /// Create a controller for a character spawned at `spawn`
    pub fn new(config: ControllerConfig, spawn: Transform) -> Self {
        let yaw = spawn.yaw_degrees();
        Self {
            motion: MotionState::new(&config.locomotion, yaw),
            camera_state: CameraState {
                yaw,
                ..Default::default()
            },
            aim_state: AimState::default(),
            locomotion: LocomotionController::with_config(config.locomotion),
            aim: AimTargeting::new(),
            camera: CameraRig::with_config(config.camera),
            transform: spawn,
            viewport: Vec2::new(1920.0, 1080.0),
        }
    }

    /// Set the viewport size used for screen-center rays
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Run one frame: move, then aim, then rotate the camera
    pub fn tick<M, S>(
        &mut self,
        input: &InputState,
        device: DeviceClass,
        mover: &mut M,
        scene: &S,
        dt: f32,
    ) -> FrameReport
    where
        M: CharacterMover,
        S: SceneQuery,
    {
        let locomotion = self.locomotion.move_character(
            &mut self.motion,
            input,
            mover,
            self.transform.yaw_degrees(),
            self.camera_state.yaw,
            dt,
        );
        self.transform.position = mover.position();
        if !input.aim {
            if let Some(yaw) = locomotion.facing_yaw {
                self.transform.set_yaw_degrees(yaw);
            }
        }

        let follow_point = self.camera.follow_point(self.transform.position);
        let aim = {
            let mut camera = CameraHandle::new(
                &self.camera,
                &mut self.camera_state,
                follow_point,
                scene,
                self.viewport,
            );
            self.aim.update(
                &mut self.aim_state,
                input,
                &mut camera,
                self.transform.position,
                self.transform.forward(),
                dt,
            )
        };
        if let Some(forward) = aim.facing {
            self.transform.set_forward(forward);
        }

        let (camera_yaw, camera_pitch) =
            self.camera.update(&mut self.camera_state, input, device, dt);

        FrameReport {
            displacement: locomotion.displacement,
            position: self.transform.position,
            facing_yaw: self.transform.yaw_degrees(),
            camera_yaw,
            camera_pitch,
            camera_rotation: self.camera.rotation(&self.camera_state),
            camera_pose: self.camera.pose(&self.camera_state, follow_point, scene),
            viewpoint: self.camera_state.active,
            aim_point: aim.world_point,
            aim_hit: aim.hit,
            animation: AnimationSignals {
                speed: locomotion.animation_blend,
                motion_speed: locomotion.motion_speed,
                forward_speed: locomotion.anim_speed,
                grounded: locomotion.grounded,
                jump: locomotion.jump,
                free_fall: locomotion.free_fall,
                aim_weight: aim.weight,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::{EmptyScene, MoverFeedback};

    struct FlatMover {
        position: Vec3,
        feedback: MoverFeedback,
    }

    impl FlatMover {
        fn new() -> Self {
            Self {
                position: Vec3::ZERO,
                feedback: MoverFeedback {
                    velocity: Vec3::ZERO,
                    grounded: true,
                },
            }
        }
    }

    impl CharacterMover for FlatMover {
        fn position(&self) -> Vec3 {
            self.position
        }

        fn feedback(&self) -> MoverFeedback {
            self.feedback
        }

        fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoverFeedback {
            let horizontal = Vec3::new(displacement.x, 0.0, displacement.z);
            self.position += horizontal;
            self.feedback.velocity = if dt > 0.0 { horizontal / dt } else { Vec3::ZERO };
            self.feedback
        }
    }

    fn controller() -> ThirdPersonController {
        ThirdPersonController::new(ControllerConfig::default(), Transform::default())
    }

    #[test]
    fn test_walking_turns_character() {
        let mut controller = controller();
        let mut mover = FlatMover::new();
        let input = InputState {
            move_axis: Vec2::new(1.0, 0.0),
            ..Default::default()
        };

        let mut report = None;
        for _ in 0..120 {
            report = Some(controller.tick(
                &input,
                DeviceClass::Pointer,
                &mut mover,
                &EmptyScene,
                0.016,
            ));
        }
        let report = report.unwrap();
        assert!((report.facing_yaw - 90.0).abs() < 0.1);
        assert!(report.position.x > 0.0);
        assert_eq!(report.viewpoint, Viewpoint::Normal);
        assert_eq!(report.animation.aim_weight, 0.0);
    }

    #[test]
    fn test_aim_overrides_locomotion_facing() {
        let mut controller = controller();
        controller.camera_state.yaw = 90.0;
        let mut mover = FlatMover::new();
        // Strafe left relative to a camera looking along +X
        let input = InputState {
            move_axis: Vec2::new(-1.0, 0.0),
            aim: true,
            ..Default::default()
        };

        let mut report = None;
        for _ in 0..120 {
            report = Some(controller.tick(
                &input,
                DeviceClass::Pointer,
                &mut mover,
                &EmptyScene,
                0.016,
            ));
        }
        let report = report.unwrap();
        // Faces the aim direction, not the movement direction (yaw 0)
        assert!((report.facing_yaw - 90.0).abs() < 2.0);
        assert!(report.position.z > 0.0);
        assert_eq!(report.viewpoint, Viewpoint::Aim);
        assert_eq!(report.animation.aim_weight, 1.0);
        assert!(!report.aim_hit);
    }

    #[test]
    fn test_idle_keeps_facing() {
        let mut controller = ThirdPersonController::new(
            ControllerConfig::default(),
            Transform::from_position_yaw(Vec3::ZERO, 45.0),
        );
        let mut mover = FlatMover::new();

        let report = controller.tick(
            &InputState::default(),
            DeviceClass::Pointer,
            &mut mover,
            &EmptyScene,
            0.016,
        );
        assert!((report.facing_yaw - 45.0).abs() < 1e-3);
        assert!((controller.motion.target_rotation - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_camera_runs_after_movement() {
        let mut controller = controller();
        let mut mover = FlatMover::new();
        let input = InputState {
            move_axis: Vec2::new(0.0, 1.0),
            look: Vec2::new(90.0, 0.0),
            ..Default::default()
        };

        let report = controller.tick(&input, DeviceClass::Pointer, &mut mover, &EmptyScene, 0.016);
        // This frame's movement used last frame's camera yaw
        assert_eq!(controller.motion.target_rotation, 0.0);
        assert_eq!(report.camera_yaw, 90.0);

        controller.tick(&input, DeviceClass::Pointer, &mut mover, &EmptyScene, 0.016);
        assert_eq!(controller.motion.target_rotation, 90.0);
    }

    #[test]
    fn test_aim_weight_is_instant_across_toggles() {
        let mut controller = controller();
        let mut mover = FlatMover::new();
        let aiming = InputState {
            aim: true,
            ..Default::default()
        };

        let report = controller.tick(&aiming, DeviceClass::Pointer, &mut mover, &EmptyScene, 0.016);
        assert_eq!(report.animation.aim_weight, 1.0);

        let report = controller.tick(
            &InputState::default(),
            DeviceClass::Pointer,
            &mut mover,
            &EmptyScene,
            0.016,
        );
        assert_eq!(report.animation.aim_weight, 0.0);
        assert_eq!(report.viewpoint, Viewpoint::Normal);
    }
}

//! Camera rig with look input, pitch clamping and viewpoint selection

use glam::{EulerRot, Quat, Vec2, Vec3};
use strider_core::math::clamp_angle;
use strider_core::{Ray, SceneQuery};
use tracing::debug;

use crate::input::{DeviceClass, InputState};

use super::config::{ViewpointConfig, LOOK_THRESHOLD};
use super::viewpoint::{place_viewpoint, Viewpoint, ViewpointPose};
use super::CameraConfig;

/// Rig angles and the live viewpoint, carried across frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    /// Target yaw in degrees
    pub yaw: f32,
    /// Target pitch in degrees (positive looks down)
    pub pitch: f32,
    /// The one viewpoint currently enabled
    pub active: Viewpoint,
}

impl CameraState {
    /// Enable exactly one viewpoint; returns whether the selection changed
    pub fn set_active(&mut self, viewpoint: Viewpoint) -> bool {
        if self.active == viewpoint {
            return false;
        }
        debug!(from = ?self.active, to = ?viewpoint, "Switching viewpoint");
        self.active = viewpoint;
        true
    }
}

/// Camera rig
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    /// Configuration
    pub config: CameraConfig,
}

impl CameraRig {
    /// Create a new camera rig
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera rig with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        Self { config }
    }

    /// Apply this frame's look input and return the (yaw, pitch) targets
    pub fn update(
        &self,
        state: &mut CameraState,
        input: &InputState,
        device: DeviceClass,
        dt: f32,
    ) -> (f32, f32) {
        if input.look.length_squared() >= LOOK_THRESHOLD && !self.config.lock_position {
            // Pointer deltas are already per-frame
            let multiplier = match device {
                DeviceClass::Pointer => self.config.device_speed(input.aim),
                DeviceClass::Rate => dt,
            };
            state.yaw += input.look.x * multiplier;
            state.pitch += input.look.y * multiplier;
        }

        state.yaw = clamp_angle(state.yaw, f32::MIN, f32::MAX);
        state.pitch = clamp_angle(state.pitch, self.config.bottom_clamp, self.config.top_clamp);

        (state.yaw, state.pitch)
    }

    /// Rig rotation: Euler(pitch + override, yaw, 0)
    pub fn rotation(&self, state: &CameraState) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            state.yaw.to_radians(),
            (state.pitch + self.config.angle_override).to_radians(),
            0.0,
        )
    }

    /// Point the viewpoints orbit, given the character's feet position
    pub fn follow_point(&self, feet: Vec3) -> Vec3 {
        feet + Vec3::Y * self.config.follow_height
    }

    /// Configuration of a viewpoint
    pub fn viewpoint_config(&self, viewpoint: Viewpoint) -> &ViewpointConfig {
        match viewpoint {
            Viewpoint::Normal => &self.config.normal,
            Viewpoint::Aim => &self.config.aim,
        }
    }

    /// Pose of the active viewpoint around `follow_point`
    pub fn pose(
        &self,
        state: &CameraState,
        follow_point: Vec3,
        scene: &impl SceneQuery,
    ) -> ViewpointPose {
        let rotation = self.rotation(state);
        let config = self.viewpoint_config(state.active);
        ViewpointPose {
            position: place_viewpoint(
                follow_point,
                rotation,
                config,
                self.config.collision_radius,
                scene,
            ),
            rotation,
            fov: config.fov,
        }
    }
}

/// The active camera as seen by aim targeting for one frame
pub struct CameraHandle<'a, S> {
    rig: &'a CameraRig,
    state: &'a mut CameraState,
    follow_point: Vec3,
    scene: &'a S,
    viewport: Vec2,
}

impl<'a, S: SceneQuery> CameraHandle<'a, S> {
    /// Borrow the rig, its state and the scene for one frame
    pub fn new(
        rig: &'a CameraRig,
        state: &'a mut CameraState,
        follow_point: Vec3,
        scene: &'a S,
        viewport: Vec2,
    ) -> Self {
        Self {
            rig,
            state,
            follow_point,
            scene,
            viewport,
        }
    }

    /// Currently enabled viewpoint
    pub fn active(&self) -> Viewpoint {
        self.state.active
    }

    /// Enable exactly one viewpoint
    pub fn set_active(&mut self, viewpoint: Viewpoint) -> bool {
        self.state.set_active(viewpoint)
    }

    /// Pose of the active viewpoint
    pub fn pose(&self) -> ViewpointPose {
        self.rig.pose(&*self.state, self.follow_point, self.scene)
    }

    /// Ray from the screen center through the active viewpoint
    pub fn screen_center_ray(&self) -> Ray {
        self.pose().screen_center_ray(self.viewport)
    }

    /// Scene the camera looks into
    pub fn scene(&self) -> &S {
        self.scene
    }
}

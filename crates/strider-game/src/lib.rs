//! Strider Game - Third-person character controller
//!
//! Provides input handling, locomotion, aim targeting and the camera rig, and
//! a controller that runs them in order once per frame.

pub mod aim;
pub mod camera;
pub mod config;
pub mod controller;
mod error;
pub mod input;
pub mod locomotion;

pub use aim::{AimOutput, AimState, AimTargeting};
pub use camera::{
    CameraConfig, CameraHandle, CameraRig, CameraState, Viewpoint, ViewpointConfig, ViewpointPose,
};
pub use config::ControllerConfig;
pub use controller::{AnimationSignals, FrameReport, ThirdPersonController};
pub use error::ConfigError;
pub use input::{DeviceClass, InputAction, InputBinding, InputBindings, InputHandler, InputState};
pub use locomotion::{LocomotionConfig, LocomotionController, LocomotionOutput, MotionState};

//! Camera system module
//!
//! Third-person camera rig with two viewpoints (normal and aim) and
//! device-aware look sensitivity.

mod config;
mod rig;
mod viewpoint;

pub use config::{CameraConfig, ViewpointConfig};
pub use rig::{CameraHandle, CameraRig, CameraState};
pub use viewpoint::{place_viewpoint, Viewpoint, ViewpointPose};

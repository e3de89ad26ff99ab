//! Locomotion module
//!
//! Speed shaping, camera-relative facing and gravity for the controlled
//! character. Collision resolution is left to a [`strider_core::CharacterMover`].

mod config;
mod controller;

pub use config::{LocomotionConfig, TERMINAL_VELOCITY};
pub use controller::{LocomotionController, LocomotionOutput, MotionState};

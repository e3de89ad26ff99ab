//! Strider Core - Core types and utilities for the Strider controller
//!
//! This crate provides the foundational pieces shared by every other crate:
//! - Mathematical primitives (re-exported from glam) and smoothing helpers
//! - Transform component for the controlled entity
//! - Frame clock for clamped, scalable delta time
//! - World query seams (character mover, scene raycasts)

pub mod math;
pub mod query;
pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use query::{CharacterMover, EmptyScene, MoverFeedback, Ray, RayHit, SceneQuery};
pub use time::{ClockConfig, FrameClock};
pub use types::Transform;

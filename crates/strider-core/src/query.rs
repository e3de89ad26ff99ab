//! Seams between the controller and the world it moves through
//!
//! The controller never resolves collisions itself. It hands displacements to
//! a [`CharacterMover`] and asks a [`SceneQuery`] for ray hits.

use glam::Vec3;

/// A ray with a unit (or zero) direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at `distance` along the ray
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Ray intersection with world geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// Distance along the ray
    pub distance: f32,
}

/// Scene raycast primitive
pub trait SceneQuery {
    /// First hit along `ray` within `max_distance`, if any
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;
}

/// A scene with no geometry; every ray misses
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl SceneQuery for EmptyScene {
    fn raycast(&self, _ray: &Ray, _max_distance: f32) -> Option<RayHit> {
        None
    }
}

/// What the mover reports back after applying a displacement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoverFeedback {
    /// Velocity actually achieved after collision resolution
    pub velocity: Vec3,
    /// Whether the character is standing on something
    pub grounded: bool,
}

impl MoverFeedback {
    /// Magnitude of the velocity on the XZ plane
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

/// Collision-swept translation of a single character
pub trait CharacterMover {
    /// Current feet position
    fn position(&self) -> Vec3;

    /// Feedback from the last applied move
    fn feedback(&self) -> MoverFeedback;

    /// Apply a displacement for this frame and return the new feedback
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoverFeedback;
}

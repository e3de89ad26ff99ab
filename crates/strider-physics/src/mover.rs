//! Character mover using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use strider_core::{CharacterMover, MoverFeedback};
use tracing::debug;

use crate::PhysicsWorld;

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.25m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
            snap_to_ground: true,
            ground_snap_distance: 0.2,
        }
    }
}

/// Capsule-shaped kinematic body swept through a [`PhysicsWorld`].
///
/// The capsule is not inserted into the world, so scene raycasts never hit
/// the character itself.
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Current feet position
    pub position: Vec3,
    /// Velocity achieved by the last move
    pub velocity: Vec3,
    /// Whether the character is on the ground
    pub grounded: bool,
    shape: SharedShape,
    controller: KinematicCharacterController,
}

impl CharacterBody {
    /// Create a new character body with default config
    pub fn new(position: Vec3) -> Self {
        Self::with_config(CharacterBodyConfig::default(), position)
    }

    /// Create a new character body with custom config
    pub fn with_config(config: CharacterBodyConfig, position: Vec3) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        controller.snap_to_ground = if config.snap_to_ground {
            Some(CharacterLength::Absolute(config.ground_snap_distance))
        } else {
            None
        };
        controller.offset = CharacterLength::Absolute(config.skin_width);

        let half_height = (config.height - 2.0 * config.radius) / 2.0;
        let shape = SharedShape::capsule_y(half_height.max(0.01), config.radius);

        Self {
            config,
            position,
            velocity: Vec3::ZERO,
            grounded: false,
            shape,
            controller,
        }
    }

    /// Sweep the capsule by `desired_translation`, sliding along obstacles
    pub fn move_character(
        &mut self,
        world: &PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> MoverFeedback {
        let current_pos = Isometry::translation(
            self.position.x,
            self.position.y + self.config.height / 2.0,
            self.position.z,
        );

        let movement = self.controller.move_shape(
            dt,
            &world.rigid_body_set,
            &world.collider_set,
            world.query_pipeline(),
            &*self.shape,
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default(),
            |_| {},
        );

        let effective = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );

        if movement.grounded != self.grounded {
            debug!(grounded = movement.grounded, "Character ground contact changed");
        }

        self.grounded = movement.grounded;
        self.position += effective;
        self.velocity = if dt > 0.0 { effective / dt } else { Vec3::ZERO };

        self.feedback()
    }

    /// Feedback from the last move
    pub fn feedback(&self) -> MoverFeedback {
        MoverFeedback {
            velocity: self.velocity,
            grounded: self.grounded,
        }
    }
}

/// A [`CharacterBody`] bound to the world it moves through for one frame
pub struct WorldMover<'w> {
    pub body: &'w mut CharacterBody,
    pub world: &'w PhysicsWorld,
}

impl<'w> WorldMover<'w> {
    /// Bind `body` to `world` for this frame's move
    pub fn new(body: &'w mut CharacterBody, world: &'w PhysicsWorld) -> Self {
        Self { body, world }
    }
}

impl CharacterMover for WorldMover<'_> {
    fn position(&self) -> Vec3 {
        self.body.position
    }

    fn feedback(&self) -> MoverFeedback {
        self.body.feedback()
    }

    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoverFeedback {
        self.body.move_character(self.world, displacement, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use strider_core::Transform;
    use strider_game::{
        ControllerConfig, DeviceClass, FrameReport, InputState, ThirdPersonController,
    };

    #[test]
    fn test_character_body_config() {
        let config = CharacterBodyConfig::default();
        assert_eq!(config.height, 1.8);
        assert_eq!(config.radius, 0.4);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_move_in_open_space() {
        let world = PhysicsWorld::new();
        let mut body = CharacterBody::new(Vec3::new(0.0, 5.0, 0.0));
        let mut mover = WorldMover::new(&mut body, &world);

        let feedback = mover.move_by(Vec3::new(0.1, 0.0, 0.0), 0.1);
        assert!((mover.position().x - 0.1).abs() < 1e-3);
        assert!((feedback.horizontal_speed() - 1.0).abs() < 1e-2);
        assert!(!feedback.grounded);
    }

    #[test]
    fn test_falling_stops_on_ground() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let mut body = CharacterBody::new(Vec3::new(0.0, 0.5, 0.0));

        for _ in 0..30 {
            body.move_character(&world, Vec3::new(0.0, -0.1, 0.0), 0.016);
        }
        assert!(body.position.y >= -0.05);
        assert!(body.position.y < 0.1);
        assert!(body.grounded);
    }

    fn controller_on_ground() -> (PhysicsWorld, CharacterBody, ThirdPersonController) {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let body = CharacterBody::new(Vec3::new(0.0, 0.05, 0.0));
        let controller = ThirdPersonController::new(
            ControllerConfig::default(),
            Transform::from_position(body.position),
        );
        (world, body, controller)
    }

    fn tick(
        controller: &mut ThirdPersonController,
        body: &mut CharacterBody,
        world: &PhysicsWorld,
        input: &InputState,
    ) -> FrameReport {
        let mut mover = WorldMover::new(body, world);
        controller.tick(input, DeviceClass::Pointer, &mut mover, world, 0.016)
    }

    #[test]
    fn test_walk_settles_at_move_speed() {
        let (world, mut body, mut controller) = controller_on_ground();
        let input = InputState {
            move_axis: Vec2::new(0.0, 1.0),
            ..Default::default()
        };

        for _ in 0..120 {
            tick(&mut controller, &mut body, &world, &input);
        }
        assert_eq!(controller.motion.speed, 2.0);
        assert!(body.grounded);
        assert!(body.position.z > 2.0);
        assert!(body.position.y.abs() < 0.1);
    }

    #[test]
    fn test_sprint_settles_at_sprint_speed() {
        let (world, mut body, mut controller) = controller_on_ground();
        let input = InputState {
            move_axis: Vec2::new(0.0, 1.0),
            sprint: true,
            ..Default::default()
        };

        for _ in 0..180 {
            tick(&mut controller, &mut body, &world, &input);
        }
        assert_eq!(controller.motion.speed, controller.locomotion.config.sprint_speed);
        assert!(body.grounded);
    }

    #[test]
    fn test_held_jump_rises_and_lands_once() {
        let (world, mut body, mut controller) = controller_on_ground();
        let input = InputState {
            jump: true,
            ..Default::default()
        };

        let mut jumps = 0;
        let mut peak: f32 = 0.0;
        for _ in 0..150 {
            let report = tick(&mut controller, &mut body, &world, &input);
            if report.animation.jump {
                jumps += 1;
            }
            peak = peak.max(report.position.y);
        }
        assert_eq!(jumps, 1);
        assert!(peak > 1.0);
        assert!(peak < 1.3);
        assert!(body.grounded);
        assert!(body.position.y.abs() < 0.1);
    }

    #[test]
    fn test_zero_dt_reports_zero_velocity() {
        let world = PhysicsWorld::new();
        let mut body = CharacterBody::new(Vec3::ZERO);
        let feedback = body.move_character(&world, Vec3::ZERO, 0.0);
        assert_eq!(feedback.velocity, Vec3::ZERO);
    }
}

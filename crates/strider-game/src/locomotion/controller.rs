//! Locomotion controller: speed easing, facing and vertical motion

use glam::{Vec2, Vec3};
use strider_core::math::{self, exp_blend};
use strider_core::{CharacterMover, MoverFeedback};
use tracing::debug;

use crate::input::InputState;

use super::config::{
    BLEND_DEAD_ZONE, GROUNDED_VERTICAL_VELOCITY, SPEED_DECIMALS, SPEED_OFFSET, TERMINAL_VELOCITY,
};
use super::LocomotionConfig;

/// Per-character motion state carried across frames
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    /// Eased horizontal speed in meters per second
    pub speed: f32,
    /// Smoothed speed for the animation layer
    pub animation_blend: f32,
    /// Yaw the character is heading toward, in degrees
    pub target_rotation: f32,
    /// Angular velocity memory for facing smoothing
    pub rotation_velocity: f32,
    /// Vertical velocity (jumping/falling)
    pub vertical_velocity: f32,
    /// Time left before another jump is allowed
    pub jump_timeout_delta: f32,
    /// Airborne time left before free fall
    pub fall_timeout_delta: f32,
    /// The current jump press already launched a jump
    pub jump_consumed: bool,
}

impl MotionState {
    /// Fresh state for a character spawned facing `yaw_degrees`
    pub fn new(config: &LocomotionConfig, yaw_degrees: f32) -> Self {
        Self {
            speed: 0.0,
            animation_blend: 0.0,
            target_rotation: yaw_degrees,
            rotation_velocity: 0.0,
            vertical_velocity: 0.0,
            jump_timeout_delta: config.jump_timeout,
            fall_timeout_delta: config.fall_timeout,
            jump_consumed: false,
        }
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(&LocomotionConfig::default(), 0.0)
    }
}

/// Result of one locomotion step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionOutput {
    /// Displacement requested from the mover this frame
    pub displacement: Vec3,
    /// New facing yaw, present only when there was movement input
    pub facing_yaw: Option<f32>,
    /// Eased speed times the forward input component
    pub anim_speed: f32,
    /// Smoothed speed for blend trees
    pub animation_blend: f32,
    /// Input magnitude (1.0 for digital input)
    pub motion_speed: f32,
    /// Ground contact used for this step
    pub grounded: bool,
    /// A jump started this frame
    pub jump: bool,
    /// Airborne longer than the fall timeout
    pub free_fall: bool,
}

/// Locomotion controller handling speed, facing and gravity
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    /// Locomotion configuration
    pub config: LocomotionConfig,
}

impl LocomotionController {
    /// Create a new locomotion controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a locomotion controller with custom config
    pub fn with_config(config: LocomotionConfig) -> Self {
        Self { config }
    }

    /// Compute this frame's motion from the mover's last feedback.
    ///
    /// `facing_yaw` is the entity's current yaw and `camera_yaw` the camera's;
    /// movement is camera-relative.
    pub fn update(
        &self,
        state: &mut MotionState,
        input: &InputState,
        feedback: MoverFeedback,
        facing_yaw: f32,
        camera_yaw: f32,
        dt: f32,
    ) -> LocomotionOutput {
        let (jump, free_fall) = self.jump_and_gravity(state, input, feedback.grounded, dt);

        let moving = input.move_axis != Vec2::ZERO;
        let target_speed = if moving {
            self.config.target_speed(input.sprint)
        } else {
            0.0
        };

        let current_speed = feedback.horizontal_speed();
        let input_magnitude = if input.analog_movement {
            input.move_axis.length().min(1.0)
        } else {
            1.0
        };

        let blend = exp_blend(self.config.speed_change_rate, dt);

        state.speed = if (current_speed - target_speed).abs() > SPEED_OFFSET {
            let eased = math::lerp(current_speed, target_speed * input_magnitude, blend);
            math::round_to(eased, SPEED_DECIMALS).clamp(0.0, self.config.max_speed())
        } else {
            target_speed
        };

        state.animation_blend = math::lerp(state.animation_blend, target_speed, blend);
        if state.animation_blend < BLEND_DEAD_ZONE {
            state.animation_blend = 0.0;
        }

        let mut new_facing = None;
        if moving {
            let input_direction =
                Vec3::new(input.move_axis.x, 0.0, input.move_axis.y).normalize_or_zero();
            state.target_rotation =
                input_direction.x.atan2(input_direction.z).to_degrees() + camera_yaw;

            let rotation = math::smooth_damp_angle(
                facing_yaw,
                state.target_rotation,
                &mut state.rotation_velocity,
                self.config.rotation_smooth_time,
                dt,
            );
            new_facing = Some(math::normalize_degrees(rotation));
        }

        let target_direction = math::yaw_to_direction(state.target_rotation).normalize_or_zero();
        let displacement = target_direction * (state.speed * dt)
            + Vec3::new(0.0, state.vertical_velocity, 0.0) * dt;

        LocomotionOutput {
            displacement,
            facing_yaw: new_facing,
            anim_speed: state.speed * input.move_axis.y,
            animation_blend: state.animation_blend,
            motion_speed: input_magnitude,
            grounded: feedback.grounded,
            jump,
            free_fall,
        }
    }

    /// [`update`](Self::update), then hand the displacement to `mover`
    pub fn move_character(
        &self,
        state: &mut MotionState,
        input: &InputState,
        mover: &mut impl CharacterMover,
        facing_yaw: f32,
        camera_yaw: f32,
        dt: f32,
    ) -> LocomotionOutput {
        let output = self.update(state, input, mover.feedback(), facing_yaw, camera_yaw, dt);
        mover.move_by(output.displacement, dt);
        output
    }

    /// Update vertical velocity; returns (jump started, free fall)
    fn jump_and_gravity(
        &self,
        state: &mut MotionState,
        input: &InputState,
        grounded: bool,
        dt: f32,
    ) -> (bool, bool) {
        let mut jump = false;
        let mut free_fall = false;

        // A held press launches one jump; it must be released to jump again
        if !input.jump {
            state.jump_consumed = false;
        }

        if grounded {
            state.fall_timeout_delta = self.config.fall_timeout;

            if state.vertical_velocity < 0.0 {
                state.vertical_velocity = GROUNDED_VERTICAL_VELOCITY;
            }

            if input.jump && !state.jump_consumed && state.jump_timeout_delta <= 0.0 {
                state.vertical_velocity = self.config.jump_velocity();
                state.jump_consumed = true;
                jump = true;
                debug!(velocity = state.vertical_velocity, "Jump started");
            }

            if state.jump_timeout_delta >= 0.0 {
                state.jump_timeout_delta -= dt;
            }
        } else {
            state.jump_timeout_delta = self.config.jump_timeout;

            if state.fall_timeout_delta >= 0.0 {
                state.fall_timeout_delta -= dt;
            } else {
                free_fall = true;
            }
        }

        state.vertical_velocity =
            (state.vertical_velocity + self.config.gravity * dt).max(-TERMINAL_VELOCITY);

        (jump, free_fall)
    }
}

//! Scalar, angle and direction helpers
//!
//! Angles are in degrees. Yaw follows the controller's convention: a yaw of 0
//! faces +Z and positive yaw turns toward +X.

use glam::Vec3;

/// Linear interpolation with `t` clamped to `[0, 1]`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Interpolation factor for an exponential approach at `rate` per second.
///
/// Independent of frame rate: two steps of `dt` equal one step of `2 * dt`.
pub fn exp_blend(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10.0_f32.powi(decimals);
    (value * scale).round() / scale
}

/// Wrap `t` into `[0, length]`
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Shortest signed difference from `current` to `target`, in `(-180, 180]`
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Shift an angle by one turn at most, then clamp it.
///
/// The single add/subtract is not a modulo: an angle beyond ±720 stays
/// outside `[-360, 360]`. Inverted bounds never panic; `max` wins.
pub fn clamp_angle(angle: f32, min: f32, max: f32) -> f32 {
    let mut angle = angle;
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.max(min).min(max)
}

/// Critically damped follow of `target` with velocity memory.
///
/// `velocity` is carried across calls by the caller. A `max_speed` of
/// `f32::INFINITY` leaves the rate unbounded.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let original_target = target;
    let target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Never overshoot the original target
    if (original_target - current > 0.0) == (output > original_target) {
        output = original_target;
        *velocity = if dt > 0.0 {
            (output - original_target) / dt
        } else {
            0.0
        };
    }

    output
}

/// [`smooth_damp`] for angles in degrees, taking the shortest way around.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, f32::INFINITY, dt)
}

/// Horizontal unit direction for a yaw angle
pub fn yaw_to_direction(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw angle of a direction's horizontal component, in `[0, 360)`.
///
/// Returns `None` for directions with no horizontal extent.
pub fn direction_to_yaw(direction: Vec3) -> Option<f32> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(normalize_degrees(direction.x.atan2(direction.z).to_degrees()))
}

/// Normalize an angle into `[0, 360)`
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = repeat(angle, 360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

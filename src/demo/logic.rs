use bevy::math::{Quat, Vec3};

/// Radians per second along the patrol curve
pub const PATROL_SPEED: f32 = 0.8;

/// Position on a figure-eight lying in the XZ plane around `center`.
/// `elapsed` is the time spent walking it, in seconds.
pub fn patrol_position(elapsed: f32, center: Vec3, radius: f32) -> Vec3 {
    let angle = elapsed * PATROL_SPEED;
    let (sin, cos) = angle.sin_cos();
    center + Vec3::new(radius * sin, 0.0, radius * sin * cos)
}

/// Yaw that faces from `from` toward `to`, ignoring height.
/// None when the two points share the same XZ position.
pub fn heading(from: Vec3, to: Vec3) -> Option<Quat> {
    let delta = (to - from).with_y(0.0);
    if delta.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(delta.x.atan2(delta.z)))
}

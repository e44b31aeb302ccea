use glam::Vec3;

/// Remembers where the owner was the last time it moved far enough to count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTracker {
    last_position: Vec3,
}

impl MotionTracker {
    pub fn new(position: Vec3) -> Self {
        Self {
            last_position: position,
        }
    }

    /// Returns true and resamples when the displacement is at least `threshold`.
    pub fn sample(&mut self, position: Vec3, threshold: f32) -> bool {
        if position.distance(self.last_position) >= threshold {
            self.last_position = position;
            true
        } else {
            false
        }
    }
}

/// Fixed wall-clock cadence for a cooperative task.
///
/// The first tick is due immediately; every following tick is due `interval`
/// seconds after the previous one. Large frame deltas yield several due ticks.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cadence {
    interval: f32,
    wait: f32,
}

impl Cadence {
    pub(crate) fn new(interval: f32) -> Self {
        Self {
            interval,
            wait: 0.0,
        }
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        self.wait -= dt;
    }

    /// Consumes one due tick, if any.
    pub(crate) fn take(&mut self) -> bool {
        if self.wait <= 0.0 {
            self.wait += self.interval;
            true
        } else {
            false
        }
    }
}

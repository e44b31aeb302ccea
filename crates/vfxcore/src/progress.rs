/// Direction of a progress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 0 -> 1, the surface dissolves.
    Forward,
    /// 1 -> 0, the surface materializes.
    Reverse,
}

impl Direction {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    pub fn start_value(self) -> f32 {
        match self {
            Direction::Forward => 0.0,
            Direction::Reverse => 1.0,
        }
    }

    fn signed(self, rate: f32) -> f32 {
        match self {
            Direction::Forward => rate.abs(),
            Direction::Reverse => -rate.abs(),
        }
    }
}

/// A normalized value stepped by a signed rate until it leaves [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    rate: f32,
    current: f32,
    direction: Direction,
}

impl ProgressAnimation {
    /// The sign of `rate` is ignored; it is forced to match `direction`.
    pub fn new(rate: f32, direction: Direction) -> Self {
        Self {
            rate: direction.signed(rate),
            current: direction.start_value(),
            direction,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Rate with the sign a fresh run starts from.
    pub fn canonical_rate(&self) -> f32 {
        self.rate.abs()
    }

    pub fn in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.current)
    }

    /// Steps once and returns the raw, unclamped value.
    pub fn advance(&mut self) -> f32 {
        self.current += self.rate;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run_to_end(mut animation: ProgressAnimation) -> Vec<f32> {
        let mut written = Vec::new();
        while animation.in_range() {
            written.push(animation.advance());
            assert!(written.len() < 10_000, "animation never terminated");
        }
        written
    }

    #[rstest]
    #[case(Direction::Forward, 0.0, 0.25)]
    #[case(Direction::Reverse, 1.0, -0.25)]
    fn test_start_value_and_sign(
        #[case] direction: Direction,
        #[case] expected_start: f32,
        #[case] expected_rate: f32,
    ) {
        for rate in [0.25, -0.25] {
            let animation = ProgressAnimation::new(rate, direction);
            assert_eq!(animation.current(), expected_start);
            assert_eq!(animation.rate(), expected_rate);
            assert_eq!(animation.canonical_rate(), 0.25);
        }
    }

    #[rstest]
    #[case(0.01)]
    #[case(0.03)]
    #[case(0.05)]
    #[case(0.07)]
    #[case(0.1)]
    #[case(0.3)]
    #[case(1.5)]
    fn test_terminates_within_bound(#[case] rate: f32) {
        let bound = (1.0 / rate).ceil() as usize + 1;
        for direction in [Direction::Forward, Direction::Reverse] {
            let ticks = run_to_end(ProgressAnimation::new(rate, direction)).len();
            assert!(ticks <= bound, "{ticks} ticks for rate {rate}, bound {bound}");
        }
    }

    #[test]
    fn test_forward_ends_on_first_value_above_one() {
        let written = run_to_end(ProgressAnimation::new(0.25, Direction::Forward));
        assert_eq!(written, vec![0.25, 0.5, 0.75, 1.0, 1.25]);
    }

    #[test]
    fn test_reverse_ends_on_first_value_below_zero() {
        let written = run_to_end(ProgressAnimation::new(0.25, Direction::Reverse));
        assert_eq!(written, vec![0.75, 0.5, 0.25, 0.0, -0.25]);
    }

    #[test]
    fn test_overshoot_in_single_step_still_terminates() {
        let written = run_to_end(ProgressAnimation::new(3.0, Direction::Forward));
        assert_eq!(written, vec![3.0]);
    }
}

/// How delivered progress follows the raw scroll position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scrub {
    /// Deliver the raw progress as soon as the scroll position changes.
    Off,
    /// Catch up with the raw progress over roughly this many seconds.
    Seconds(f64),
}

impl Default for Scrub {
    fn default() -> Self {
        Scrub::Seconds(1.0)
    }
}

// Fraction of the gap left after one full scrub period: e^-K == 1%.
const CATCH_UP_K: f64 = 4.605_170_185_988_091;
const SNAP_EPS: f64 = 1e-4;

/// Exponential approach of a delivered value towards a target.
#[derive(Clone, Debug)]
pub struct ScrubSmoother {
    scrub: Scrub,
    current: f64,
    target: f64,
}

impl ScrubSmoother {
    pub fn new(scrub: Scrub) -> Self {
        Self {
            scrub,
            current: 0.0,
            target: 0.0,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Set a new target. Returns the delivered value if it changed immediately.
    pub fn set_target(&mut self, target: f64) -> Option<f64> {
        self.target = target;
        match self.scrub {
            Scrub::Seconds(s) if s > 0.0 && s.is_finite() => None,
            _ => self.jump(),
        }
    }

    /// Advance by `dt` seconds. Returns the delivered value if it moved.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        if self.is_settled() {
            return None;
        }
        let seconds = match self.scrub {
            Scrub::Seconds(s) if s > 0.0 && s.is_finite() => s,
            _ => return self.jump(),
        };
        if dt.is_nan() || dt <= 0.0 {
            return None;
        }

        let alpha = 1.0 - (-CATCH_UP_K * dt / seconds).exp();
        let next = self.current + (self.target - self.current) * alpha;
        if (self.target - next).abs() < SNAP_EPS {
            return self.jump();
        }
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }

    fn jump(&mut self) -> Option<f64> {
        if self.current == self.target {
            return None;
        }
        self.current = self.target;
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_delivers_immediately() {
        let mut s = ScrubSmoother::new(Scrub::Off);
        assert_eq!(s.set_target(0.4), Some(0.4));
        assert_eq!(s.set_target(0.4), None);
        assert_eq!(s.tick(0.016), None);
    }

    #[test]
    fn seconds_catches_up_monotonically_without_overshoot() {
        let mut s = ScrubSmoother::new(Scrub::Seconds(1.0));
        assert_eq!(s.set_target(1.0), None);

        let mut last = 0.0;
        let mut steps = 0;
        while let Some(v) = s.tick(1.0 / 60.0) {
            assert!(v > last, "not monotonic: {v} <= {last}");
            assert!(v <= 1.0, "overshoot: {v}");
            last = v;
            steps += 1;
            assert!(steps < 10_000, "never settled");
        }
        assert!(s.is_settled());
        assert_eq!(s.current(), 1.0);
    }

    #[test]
    fn one_period_covers_most_of_the_gap() {
        let mut s = ScrubSmoother::new(Scrub::Seconds(1.0));
        s.set_target(1.0);
        s.tick(1.0);
        assert!(s.current() > 0.98 && s.current() < 1.0);
    }

    #[test]
    fn retarget_mid_flight_reverses_direction() {
        let mut s = ScrubSmoother::new(Scrub::Seconds(0.5));
        s.set_target(1.0);
        s.tick(0.1);
        let mid = s.current();
        s.set_target(0.0);
        let v = s.tick(0.1).unwrap();
        assert!(v < mid && v >= 0.0);
    }

    #[test]
    fn non_positive_dt_is_ignored() {
        let mut s = ScrubSmoother::new(Scrub::Seconds(1.0));
        s.set_target(1.0);
        assert_eq!(s.tick(0.0), None);
        assert_eq!(s.tick(-1.0), None);
        assert_eq!(s.tick(f64::NAN), None);
    }

    #[test]
    fn zero_seconds_behaves_like_off() {
        let mut s = ScrubSmoother::new(Scrub::Seconds(0.0));
        assert_eq!(s.set_target(0.7), Some(0.7));
    }
}

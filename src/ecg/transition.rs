use std::time::Duration;

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

fn lerp(from: f64, to: f64, k: f64) -> f64 {
    from + (to - from) * k
}

/// Animates the displayed time window towards a target. Purely visual: the
/// chart's real domain is already at `to` while this runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    from: (f64, f64),
    to: (f64, f64),
    duration: Duration,
    elapsed: Duration,
}

impl Transition {
    pub fn new(from: (f64, f64), to: (f64, f64), duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn current(&self) -> (f64, f64) {
        if self.is_finished() {
            return self.to;
        }
        let k = ease_cubic_in_out(self.elapsed.as_secs_f64() / self.duration.as_secs_f64());
        (lerp(self.from.0, self.to.0, k), lerp(self.from.1, self.to.1, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_its_ends_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn transition_settles_exactly_on_target() {
        let mut t = Transition::new((0.0, 4.0), (1.0, 2.0), Duration::from_millis(1000));
        assert_eq!(t.current(), (0.0, 4.0));
        t.advance(Duration::from_millis(500));
        let (a, b) = t.current();
        assert!((a - 0.5).abs() < 1e-12 && (b - 3.0).abs() < 1e-12);
        t.advance(Duration::from_millis(700));
        assert!(t.is_finished());
        assert_eq!(t.current(), (1.0, 2.0));
    }

    #[test]
    fn zero_duration_jumps() {
        let t = Transition::new((0.0, 4.0), (1.0, 2.0), Duration::ZERO);
        assert!(t.is_finished());
        assert_eq!(t.current(), (1.0, 2.0));
    }
}

//! Call-rate helpers and a count-up animation, all driven by caller-supplied
//! timestamps in milliseconds.

/// Admits one call, then rejects calls until `limit_ms` has passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    open_at: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms,
            open_at: None,
        }
    }

    pub fn try_acquire(&mut self, now: f64) -> bool {
        if self.open_at.is_some_and(|at| now < at) {
            return false;
        }
        self.open_at = Some(now + self.limit_ms);
        true
    }
}

/// Only the most recent of a burst of calls fires, once its wait elapses.
///
/// The host arms a timer per [`schedule`](Self::schedule) and asks
/// [`fire`](Self::fire) when it expires; superseded timers are ignored.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    generation: u64,
    fired: bool,
}

impl Debounce {
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.fired = false;
        self.generation
    }

    pub fn fire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.fired {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Integer counter animating linearly from `start` to `end`.
#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    pub start: f64,
    pub end: f64,
    pub duration_ms: f64,
    pub started_at: f64,
}

impl CountUp {
    /// Value to display at `now` and whether the animation has finished.
    pub fn sample(&self, now: f64) -> (i64, bool) {
        let progress = if self.duration_ms > 0.0 {
            ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let value = (progress * (self.end - self.start) + self.start).floor() as i64;
        (value, progress >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_blocks_within_limit() {
        let mut t = Throttle::new(100.0);
        assert!(t.try_acquire(0.0));
        assert!(!t.try_acquire(50.0));
        assert!(!t.try_acquire(99.9));
        assert!(t.try_acquire(100.0));
        assert!(!t.try_acquire(150.0));
    }

    #[test]
    fn debounce_fires_latest_once() {
        let mut d = Debounce::default();
        let first = d.schedule();
        let second = d.schedule();
        assert!(!d.fire(first));
        assert!(d.fire(second));
        assert!(!d.fire(second));
        let third = d.schedule();
        assert!(d.fire(third));
    }

    #[test]
    fn count_up_floors_and_finishes() {
        let anim = CountUp {
            start: 0.0,
            end: 100.0,
            duration_ms: 1000.0,
            started_at: 500.0,
        };
        assert_eq!(anim.sample(500.0), (0, false));
        assert_eq!(anim.sample(755.0), (25, false));
        assert_eq!(anim.sample(1500.0), (100, true));
        assert_eq!(anim.sample(9000.0), (100, true));
    }

    #[test]
    fn count_up_counts_down_too() {
        let anim = CountUp {
            start: 10.0,
            end: 0.0,
            duration_ms: 100.0,
            started_at: 0.0,
        };
        assert_eq!(anim.sample(50.0), (5, false));
        assert_eq!(anim.sample(100.0), (0, true));
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let anim = CountUp {
            start: 3.0,
            end: 7.0,
            duration_ms: 0.0,
            started_at: 0.0,
        };
        assert_eq!(anim.sample(0.0), (7, true));
    }
}

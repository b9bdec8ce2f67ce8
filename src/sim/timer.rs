//! Interval gate for stepped motion

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fires at most once per `interval`.
///
/// Keeps an absolute next-fire time; a due check advances it by exactly one
/// interval, so a late caller catches up one step per check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    interval: Duration,
    next: Duration,
}

impl Timer {
    pub fn new(interval: Duration, start: Duration, fire_immediately: bool) -> Self {
        let next = if fire_immediately {
            start
        } else {
            start + interval
        };
        Self { interval, next }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when `now` has reached the next fire time
    pub fn is_due(&mut self, now: Duration) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn immediate_timer_fires_on_first_check() {
        let mut t = Timer::new(10 * MS, Duration::ZERO, true);
        assert!(t.is_due(Duration::ZERO));
        assert!(!t.is_due(Duration::ZERO));
        assert!(!t.is_due(9 * MS));
        assert!(t.is_due(10 * MS));
    }

    #[test]
    fn delayed_timer_waits_one_interval() {
        let mut t = Timer::new(10 * MS, 5 * MS, false);
        assert!(!t.is_due(5 * MS));
        assert!(!t.is_due(14 * MS));
        assert!(t.is_due(15 * MS));
    }

    #[test]
    fn false_check_has_no_side_effects() {
        let mut t = Timer::new(10 * MS, Duration::ZERO, false);
        let before = t;
        assert!(!t.is_due(3 * MS));
        assert_eq!(t, before);
    }

    #[test]
    fn late_checks_catch_up_one_step_at_a_time() {
        let mut t = Timer::new(10 * MS, Duration::ZERO, false);
        assert!(t.is_due(35 * MS));
        assert!(t.is_due(35 * MS));
        assert!(t.is_due(35 * MS));
        assert!(!t.is_due(35 * MS));
    }
}

use std::time::{Duration, Instant};

/// Fixed-cadence schedule for animation frames.
///
/// Frames missed while the loop was busy are dropped rather than replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    interval: Duration,
    next_frame: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_frame: now,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    pub fn mark(&mut self, now: Instant) {
        self.next_frame = now + self.interval;
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_due_immediately() {
        let now = Instant::now();
        let clock = FrameClock::new(Duration::from_millis(33), now);

        assert!(clock.is_due(now));
        assert_eq!(clock.until_next(now), Duration::ZERO);
    }

    #[test]
    fn marking_schedules_one_interval_later() {
        let now = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(33), now);
        clock.mark(now);

        assert!(!clock.is_due(now + Duration::from_millis(32)));
        assert!(clock.is_due(now + Duration::from_millis(33)));
        assert_eq!(
            clock.until_next(now + Duration::from_millis(10)),
            Duration::from_millis(23)
        );
    }

    #[test]
    fn missed_frames_are_not_replayed() {
        let now = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(10), now);
        let late = now + Duration::from_millis(100);

        clock.mark(late);

        assert!(!clock.is_due(late + Duration::from_millis(5)));
    }
}

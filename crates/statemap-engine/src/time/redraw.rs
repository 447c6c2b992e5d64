use std::time::{Duration, Instant};

/// Default redraw rate, in frames per second.
pub const DEFAULT_REDRAW_RATE: u32 = 60;

/// Fixed-rate redraw schedule.
///
/// The runtime asks `poll` on every event-loop wake-up; it answers whether a
/// redraw is due and when the loop should wake up next. It never blocks.
#[derive(Debug, Clone)]
pub struct RedrawSchedule {
    interval: Duration,
    next: Instant,
}

impl RedrawSchedule {
    pub fn new(rate_hz: u32) -> Self {
        Self::starting_at(rate_hz, Instant::now())
    }

    pub fn starting_at(rate_hz: u32, start: Instant) -> Self {
        let rate_hz = rate_hz.max(1);
        Self {
            interval: Duration::from_secs(1) / rate_hz,
            next: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the instant of the next scheduled redraw.
    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Returns `true` if a redraw is due at `now` and advances the deadline.
    ///
    /// After a stall the deadline is re-anchored to `now` instead of firing a
    /// burst of catch-up redraws.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}

impl Default for RedrawSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_REDRAW_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_hz_interval() {
        let s = RedrawSchedule::new(60);
        assert_eq!(s.interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut s = RedrawSchedule::starting_at(10, start);

        assert!(s.poll(start));
        assert!(!s.poll(start + Duration::from_millis(50)));
        assert!(s.poll(start + Duration::from_millis(100)));
        assert_eq!(s.next_deadline(), start + Duration::from_millis(200));
    }

    #[test]
    fn stall_does_not_burst() {
        let start = Instant::now();
        let mut s = RedrawSchedule::starting_at(10, start);

        assert!(s.poll(start));
        let late = start + Duration::from_secs(5);
        assert!(s.poll(late));
        assert!(!s.poll(late));
        assert_eq!(s.next_deadline(), late + Duration::from_millis(100));
    }

    #[test]
    fn zero_rate_is_treated_as_one_hz() {
        let s = RedrawSchedule::new(0);
        assert_eq!(s.interval(), Duration::from_secs(1));
    }
}

//! Polled interval timers for the tick loop.
//!
//! Nothing here sleeps or reads the clock. Callers pass the tick timestamp in, which
//! keeps the animations deterministic under test.

use embassy_time::{Duration, Instant};

/// Fires once every `period`, checked by polling.
///
/// However many periods pass between two polls, one poll reports at most one elapse.
/// When the timer is polled late the next deadline is taken from the poll time, so a
/// stalled loop does not cause a burst of catch-up toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    deadline: Instant,
}

impl IntervalTimer {
    /// Create a timer whose first deadline is one period after `start`
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            deadline: start + period,
        }
    }

    /// Create a timer that is already due
    pub fn due_at(period: Duration, start: Instant) -> Self {
        Self {
            period,
            deadline: start,
        }
    }

    /// Restart the current period from `now`
    pub fn reset(&mut self, now: Instant) {
        self.deadline = now + self.period;
    }

    /// True once per elapsed period
    pub fn elapsed(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        self.deadline += self.period;
        if self.deadline <= now {
            self.deadline = now + self.period;
        }
        true
    }
}

/// A timer driven on/off toggle, the building block of every blink pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blinker {
    timer: IntervalTimer,
    on: bool,
}

impl Blinker {
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            timer: IntervalTimer::new(period, start),
            on: false,
        }
    }

    /// Advance the toggle if a period has passed and return the current phase
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.elapsed(now) {
            self.on = !self.on;
        }
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Instant {
        Instant::from_millis(v)
    }

    #[test]
    fn fires_on_period_boundaries() {
        let mut timer = IntervalTimer::new(Duration::from_millis(250), ms(0));
        let fired: heapless::Vec<u64, 16> = (0..=1000)
            .step_by(50)
            .filter(|t| timer.elapsed(ms(*t)))
            .collect();
        assert_eq!(fired.as_slice(), &[250, 500, 750, 1000]);
    }

    #[test]
    fn late_poll_fires_once() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100), ms(0));
        assert!(timer.elapsed(ms(1000)));
        assert!(!timer.elapsed(ms(1050)));
        assert!(timer.elapsed(ms(1100)));
    }

    #[test]
    fn reset_restarts_period() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100), ms(0));
        timer.reset(ms(90));
        assert!(!timer.elapsed(ms(100)));
        assert!(timer.elapsed(ms(190)));
    }

    #[test]
    fn due_at_fires_immediately() {
        let mut timer = IntervalTimer::due_at(Duration::from_secs(60), ms(0));
        assert!(timer.elapsed(ms(0)));
        assert!(!timer.elapsed(ms(59_999)));
        assert!(timer.elapsed(ms(60_000)));
    }

    #[test]
    fn blinker_toggles() {
        let mut blink = Blinker::new(Duration::from_millis(250), ms(0));
        assert!(!blink.poll(ms(100)));
        assert!(blink.poll(ms(250)));
        assert!(blink.poll(ms(400)));
        assert!(!blink.poll(ms(500)));
    }
}

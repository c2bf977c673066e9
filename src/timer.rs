use log::debug;
use std::time::{Duration, Instant};

/// A running timer: when timing began and when the next display sample is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    started_at: Instant,
    next_sample: Instant,
}

impl TimerHandle {
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

/// Game timer with a fixed display cadence.
///
/// At most one handle is live. `start` replaces any running handle, and
/// `stop`/`cancel` are safe to call when nothing is running.
pub struct GameTimer {
    interval: Duration,
    handle: Option<TimerHandle>,
    displayed: Duration,
}

impl GameTimer {
    /// Create a stopped timer sampling every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            handle: None,
            displayed: Duration::ZERO,
        }
    }

    /// Start timing from `now`, dropping any previous handle
    pub fn start(&mut self, now: Instant) {
        if self.handle.is_some() {
            debug!("replacing running timer handle");
        }
        self.handle = Some(TimerHandle {
            started_at: now,
            next_sample: now + self.interval,
        });
        self.displayed = Duration::ZERO;
    }

    /// Update the displayed value if a sample is due; returns the new sample
    pub fn sample(&mut self, now: Instant) -> Option<Duration> {
        let handle = self.handle.as_mut()?;
        if now < handle.next_sample {
            return None;
        }
        self.displayed = now.saturating_duration_since(handle.started_at);
        // Skip missed samples instead of replaying them
        while handle.next_sample <= now {
            handle.next_sample += self.interval;
        }
        Some(self.displayed)
    }

    /// Stop timing and return the exact elapsed time at `now`
    pub fn stop(&mut self, now: Instant) -> Option<Duration> {
        let handle = self.handle.take()?;
        let elapsed = now.saturating_duration_since(handle.started_at);
        self.displayed = elapsed;
        Some(elapsed)
    }

    /// Drop the running handle without recording anything
    pub fn cancel(&mut self) {
        if self.handle.take().is_some() {
            debug!("timer canceled");
        }
    }

    /// Cancel and zero the display
    pub fn reset(&mut self) {
        self.cancel();
        self.displayed = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    /// Last sampled (or final) value, for display
    pub fn displayed(&self) -> Duration {
        self.displayed
    }

    /// When the next display sample is due, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.handle.map(|handle| handle.next_sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_samples_on_cadence() {
        let t0 = Instant::now();
        let mut timer = GameTimer::new(ms(10));
        timer.start(t0);

        assert_eq!(timer.sample(t0 + ms(5)), None);
        assert_eq!(timer.sample(t0 + ms(10)), Some(ms(10)));
        assert_eq!(timer.next_deadline(), Some(t0 + ms(20)));

        // A late tick catches up without replaying every missed sample
        assert_eq!(timer.sample(t0 + ms(57)), Some(ms(57)));
        assert_eq!(timer.next_deadline(), Some(t0 + ms(60)));
        assert_eq!(timer.displayed(), ms(57));
    }

    #[test]
    fn test_stop_returns_exact_elapsed() {
        let t0 = Instant::now();
        let mut timer = GameTimer::new(ms(10));
        timer.start(t0);
        timer.sample(t0 + ms(1230));
        assert_eq!(timer.stop(t0 + ms(1234)), Some(ms(1234)));
        assert!(!timer.is_running());
        assert_eq!(timer.displayed(), ms(1234));
        assert_eq!(timer.next_deadline(), None);
    }

    #[test]
    fn test_stop_and_cancel_are_idempotent() {
        let t0 = Instant::now();
        let mut timer = GameTimer::new(ms(10));
        assert_eq!(timer.stop(t0), None);
        timer.cancel();
        timer.start(t0);
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_running());
        assert_eq!(timer.sample(t0 + ms(100)), None);
    }

    #[test]
    fn test_restart_replaces_handle() {
        let t0 = Instant::now();
        let mut timer = GameTimer::new(ms(10));
        timer.start(t0);
        timer.start(t0 + ms(500));
        assert_eq!(timer.handle().unwrap().started_at(), t0 + ms(500));
        assert_eq!(timer.stop(t0 + ms(700)), Some(ms(200)));
    }

    #[test]
    fn test_reset_zeroes_display() {
        let t0 = Instant::now();
        let mut timer = GameTimer::new(ms(10));
        timer.start(t0);
        timer.sample(t0 + ms(40));
        timer.reset();
        assert_eq!(timer.displayed(), Duration::ZERO);
        assert!(!timer.is_running());
    }
}

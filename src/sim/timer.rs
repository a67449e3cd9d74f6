//! Repeating millisecond timers driven by host wall-clock time

use serde::{Deserialize, Serialize};

/// A repeating timer fed with elapsed milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub interval_ms: u32,
    elapsed_ms: u64,
    running: bool,
}

impl Timer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0,
            running: false,
        }
    }

    /// (Re)start from zero
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    /// Continue after a stop, keeping the time already accumulated
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Stop; keeps accumulated time for a later resume
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed elapsed time. Ignored while stopped.
    pub fn accumulate(&mut self, dt_ms: u64) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        }
    }

    /// Consume one interval if enough time has built up
    pub fn try_fire(&mut self) -> bool {
        let interval = u64::from(self.interval_ms.max(1));
        if self.running && self.elapsed_ms >= interval {
            self.elapsed_ms -= interval;
            true
        } else {
            false
        }
    }

    /// Drop any backlog beyond `intervals` pending firings
    pub fn clamp_backlog(&mut self, intervals: u32) {
        let cap = u64::from(self.interval_ms.max(1)) * u64::from(intervals);
        self.elapsed_ms = self.elapsed_ms.min(cap);
    }

    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_each_interval() {
        let mut timer = Timer::new(16);
        timer.start();
        timer.accumulate(40);
        assert!(timer.try_fire());
        assert!(timer.try_fire());
        assert!(!timer.try_fire());
        assert_eq!(timer.elapsed_ms(), 8);
    }

    #[test]
    fn test_stopped_timer_ignores_time() {
        let mut timer = Timer::new(16);
        timer.accumulate(100);
        assert!(!timer.try_fire());

        timer.start();
        timer.accumulate(10);
        timer.stop();
        timer.accumulate(100);
        assert_eq!(timer.elapsed_ms(), 10);
        assert!(!timer.try_fire());
    }

    #[test]
    fn test_restart_resets_elapsed() {
        let mut timer = Timer::new(5000);
        timer.start();
        timer.accumulate(4999);
        timer.start();
        timer.accumulate(1);
        assert!(!timer.try_fire());
    }

    #[test]
    fn test_resume_keeps_progress() {
        let mut timer = Timer::new(5000);
        timer.start();
        timer.accumulate(4000);
        timer.stop();
        timer.resume();
        timer.accumulate(1000);
        assert!(timer.try_fire());
    }

    #[test]
    fn test_clamp_backlog() {
        let mut timer = Timer::new(16);
        timer.start();
        timer.accumulate(1000);
        timer.clamp_backlog(8);
        assert_eq!(timer.elapsed_ms(), 128);
    }
}

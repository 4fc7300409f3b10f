//! Frame-driven timers
//!
//! All periodic behaviour runs on the UI thread. Timers are advanced with the
//! elapsed frame time (or virtual time in headless runs) and report how many
//! times they fired.

use std::time::Duration;

/// Repeating timer
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance by `dt`, returning the number of periods completed
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let fires = (self.elapsed.as_nanos() / self.period.as_nanos()) as u32;
        self.elapsed -= self.period * fires;
        fires
    }
}

/// One-shot timer
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: Option<Duration>,
}

impl Countdown {
    pub fn new(delay: Duration) -> Self {
        Self {
            remaining: Some(delay),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt`; returns true exactly once, when the delay expires
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(remaining) if dt >= remaining => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - dt);
                false
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }
}

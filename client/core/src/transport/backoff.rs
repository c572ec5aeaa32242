//! Reconnect Backoff
//!
//! Exponential backoff with a ceiling: the n-th consecutive failure waits
//! `min(base * 2^n, cap)`. A successful connect resets the counter.

use std::time::Duration;

/// Exponential reconnect backoff
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backoff {
    attempts: u32,
    base: Duration,
    cap: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(10_000))
    }
}

impl Backoff {
    /// Create a backoff starting at `base` and never exceeding `cap`
    #[must_use]
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            attempts: 0,
            base,
            cap,
        }
    }

    /// Number of closes since the last successful connect
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Delay for a given attempt number without touching the counter
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.cap)
    }

    /// Delay for the current attempt, then advance the counter
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.delay_for(self.attempts);
        self.attempts = self.attempts.saturating_add(1);
        delay
    }

    /// Back to the first attempt
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

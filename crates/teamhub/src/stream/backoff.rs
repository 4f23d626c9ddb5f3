//! Reconnect delay policy

use std::time::Duration;

/// Doubling reconnect delay with an upper bound.
///
/// The n-th consecutive failure waits `min(initial * 2^(n-1), max)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub const DEFAULT_INITIAL: Duration = Duration::from_millis(500);
    pub const DEFAULT_MAX: Duration = Duration::from_millis(600_000);

    pub fn new(initial: Duration, max: Duration) -> Self {
        let max = max.max(initial);
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Delay to wait before the next attempt; doubles the following one
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    /// Back to the initial delay, after a connection opened
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// Delay the next failure would wait
    pub fn current(&self) -> Duration {
        self.current
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL, Self::DEFAULT_MAX)
    }
}

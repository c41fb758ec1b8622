//! Fixed-delay retry policy for upstream calls.
//!
//! The executor makes up to `max_attempts` total calls, pausing
//! `retry_delay` between consecutive attempts. The pause is a cooperative
//! suspension; no lock is held across it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry policy configuration. Immutable after construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total call attempts before giving up (default: 3).
    pub max_attempts: u32,
    /// Fixed pause between consecutive attempts (default: 1s).
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy.
    #[must_use]
    pub const fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }

    /// A policy that never retries: a single attempt, no delay.
    #[must_use]
    pub const fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            retry_delay: Duration::ZERO,
        }
    }

    /// Total attempts, never less than one.
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }

    /// Whether another attempt remains after `attempt` (1-based) failed.
    #[must_use]
    pub const fn has_remaining(&self, attempt: u32) -> bool {
        attempt < self.total_attempts()
    }
}

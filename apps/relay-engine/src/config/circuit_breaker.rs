//! Circuit breaker configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Circuit breaker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerSettings {
    /// Failure rate threshold to open the circuit (0.0-1.0).
    #[serde(default = "default_failure_rate_threshold")]
    pub failure_rate_threshold: f64,
    /// Sliding window size in calls.
    #[serde(default = "default_sliding_window_size")]
    pub sliding_window_size: u32,
    /// Duration in open state (seconds).
    #[serde(default = "default_wait_duration")]
    pub wait_duration_secs: u64,
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            failure_rate_threshold: default_failure_rate_threshold(),
            sliding_window_size: default_sliding_window_size(),
            wait_duration_secs: default_wait_duration(),
        }
    }
}

impl CircuitBreakerSettings {
    /// Convert settings to the resilience module's `CircuitBreakerConfig`.
    #[must_use]
    pub fn to_resilience_config(&self) -> crate::resilience::CircuitBreakerConfig {
        crate::resilience::CircuitBreakerConfig {
            failure_rate_threshold: self.failure_rate_threshold,
            sliding_window_size: self.sliding_window_size,
            wait_duration_in_open: Duration::from_secs(self.wait_duration_secs),
        }
    }
}

const fn default_failure_rate_threshold() -> f64 {
    0.5
}

const fn default_sliding_window_size() -> u32 {
    10
}

const fn default_wait_duration() -> u64 {
    10
}

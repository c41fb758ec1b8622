//! Executor configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Executor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorSettings {
    /// Per-attempt upstream call bound (seconds).
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_secs: u64,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            attempt_timeout_secs: default_attempt_timeout(),
        }
    }
}

impl ExecutorSettings {
    /// The per-attempt bound as a `Duration`.
    #[must_use]
    pub const fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }
}

const fn default_attempt_timeout() -> u64 {
    5
}

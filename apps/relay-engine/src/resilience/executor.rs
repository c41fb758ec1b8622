//! Resilient call executor.
//!
//! Composes input validation, the circuit breaker gate, a per-attempt
//! timeout and a fixed-delay retry loop around one upstream invocation.
//!
//! # Call flow
//!
//! ```text
//! execute(query)
//!     → validate (empty input fails fast, breaker untouched)
//!     → breaker.permit() (open circuit fails fast, no upstream call)
//!     → attempt loop: invoke with timeout, retry with fixed delay
//!     → record ONE outcome on the breaker per execute call
//! ```
//!
//! A timeout and an upstream error are both retryable and both count
//! toward the attempt budget. A circuit-open rejection and an invalid
//! input are never retried and never consume a breaker window slot.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::UpstreamPort;
use crate::error::ExecuteError;
use crate::resilience::circuit_breaker::CircuitBreaker;
use crate::resilience::retry::RetryPolicy;

/// Default per-attempt upstream call bound.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Executes upstream calls with timeout, retry and circuit breaking.
#[derive(Debug)]
pub struct ResilientCallExecutor<U> {
    upstream: Arc<U>,
    breaker: Arc<CircuitBreaker>,
    retry: RetryPolicy,
    attempt_timeout: Duration,
}

impl<U: UpstreamPort> ResilientCallExecutor<U> {
    /// Create a new executor around an upstream capability.
    #[must_use]
    pub fn new(
        upstream: Arc<U>,
        breaker: Arc<CircuitBreaker>,
        retry: RetryPolicy,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            upstream,
            breaker,
            retry,
            attempt_timeout,
        }
    }

    /// The breaker this executor records outcomes on.
    #[must_use]
    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// Execute one resilient upstream call.
    ///
    /// Returns the raw upstream payload on success, or the typed failure
    /// of the last attempt.
    pub async fn execute(&self, query: &str) -> Result<String, ExecuteError> {
        if query.is_empty() {
            tracing::error!("Rejecting request: missing request data");
            return Err(ExecuteError::invalid_input("request data cannot be empty"));
        }

        if !self.breaker.permit() {
            tracing::warn!(
                breaker = %self.breaker.name(),
                "Rejecting call: circuit breaker is open"
            );
            return Err(ExecuteError::CircuitOpen);
        }

        let total_attempts = self.retry.total_attempts();
        let mut last_error = ExecuteError::Upstream {
            detail: "no attempt made".to_string(),
        };

        for attempt in 1..=total_attempts {
            match tokio::time::timeout(self.attempt_timeout, self.upstream.invoke(query)).await {
                Ok(Ok(payload)) => {
                    tracing::debug!(attempt, "Upstream call succeeded");
                    self.breaker.record_success();
                    return Ok(payload);
                }
                Ok(Err(e)) => {
                    last_error = ExecuteError::Upstream {
                        detail: e.to_string(),
                    };
                }
                Err(_) => {
                    last_error = ExecuteError::Timeout {
                        timeout: self.attempt_timeout,
                    };
                }
            }

            if self.retry.has_remaining(attempt) {
                tracing::warn!(
                    attempt,
                    total_attempts,
                    error = %last_error,
                    delay_ms = self.retry.retry_delay.as_millis(),
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(self.retry.retry_delay).await;
            }
        }

        // One net outcome per execute call, not one per attempt
        self.breaker.record_failure();
        tracing::error!(
            total_attempts,
            error = %last_error,
            "Upstream call failed after all attempts"
        );
        Err(last_error)
    }
}

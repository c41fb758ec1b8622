//! Circuit breaker for upstream dependency protection.
//!
//! Prevents cascading failures when the external data service becomes
//! unavailable or unresponsive.
//!
//! # State Machine
//!
//! ```text
//! CLOSED → OPEN (window full and failure rate >= threshold)
//! OPEN → HALF_OPEN (wait duration elapsed)
//! HALF_OPEN → CLOSED (trial call succeeds; window cleared)
//! HALF_OPEN → OPEN (trial call fails; timer reset)
//! ```
//!
//! # Configuration
//!
//! - `failure_rate_threshold`: Open at this failure rate (default: 50%)
//! - `sliding_window_size`: Number of calls to track (default: 10)
//! - `wait_duration_in_open`: Time to stay open (default: 10s)
//!
//! The window must reach capacity once before the CLOSED→OPEN rule is
//! evaluated, so a cold-starting breaker cannot open on a short sample.
//! HALF_OPEN admits exactly one trial call: `permit` claims the trial
//! atomically and every other concurrent caller is rejected as if OPEN.
//!
//! # Example
//!
//! ```rust,ignore
//! use relay_engine::resilience::{CircuitBreaker, CircuitBreakerConfig};
//!
//! let breaker = CircuitBreaker::new("external-api", CircuitBreakerConfig::default());
//!
//! if breaker.permit() {
//!     match call_upstream().await {
//!         Ok(_) => breaker.record_success(),
//!         Err(_) => breaker.record_failure(),
//!     }
//! } else {
//!     // Circuit is open, fail fast
//! }
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    /// Circuit is closed, calls flow normally.
    Closed,
    /// Circuit is open, calls are rejected.
    Open,
    /// Circuit permits a single trial call.
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open => write!(f, "OPEN"),
            Self::HalfOpen => write!(f, "HALF_OPEN"),
        }
    }
}

/// Circuit breaker configuration. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Failure rate threshold to open circuit (0.0-1.0).
    pub failure_rate_threshold: f64,
    /// Number of calls in the sliding window.
    pub sliding_window_size: u32,
    /// Duration to stay in `OPEN` state before permitting a trial.
    pub wait_duration_in_open: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 0.5, // 50%
            sliding_window_size: 10,
            wait_duration_in_open: Duration::from_secs(10),
        }
    }
}

/// Outcome of a call for sliding window tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallOutcome {
    Success,
    Failure,
}

/// Mutable breaker state. All transitions happen under one lock so a
/// torn state/window combination cannot be observed.
#[derive(Debug)]
struct BreakerCore {
    state: CircuitState,
    /// Sliding window of the last `sliding_window_size` outcomes.
    window: VecDeque<CallOutcome>,
    /// When the circuit last entered `OPEN`.
    opened_at: Option<Instant>,
    /// Whether the single `HALF_OPEN` trial has been claimed.
    trial_in_flight: bool,
}

/// Circuit breaker for upstream service calls.
///
/// Cheap to share: clone an `Arc<CircuitBreaker>` across concurrent
/// executions. Only `permit`, `record_success` and `record_failure`
/// mutate breaker state.
#[derive(Debug)]
pub struct CircuitBreaker {
    /// Service name for logging.
    name: String,
    config: CircuitBreakerConfig,
    core: Mutex<BreakerCore>,
    /// Total calls counter (for metrics).
    total_calls: AtomicU64,
    /// Total failures counter (for metrics).
    total_failures: AtomicU64,
    /// State transitions counter (for metrics).
    state_transitions: AtomicU64,
}

impl CircuitBreaker {
    /// Create a new circuit breaker in the `CLOSED` state.
    #[must_use]
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            core: Mutex::new(BreakerCore {
                state: CircuitState::Closed,
                window: VecDeque::new(),
                opened_at: None,
                trial_in_flight: false,
            }),
            total_calls: AtomicU64::new(0),
            total_failures: AtomicU64::new(0),
            state_transitions: AtomicU64::new(0),
        }
    }

    /// Get the service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current state, applying the `OPEN` → `HALF_OPEN` timer.
    #[must_use]
    pub fn state(&self) -> CircuitState {
        let mut core = self.lock_core();
        self.check_open_elapsed(&mut core);
        core.state
    }

    /// Check whether a call is permitted.
    ///
    /// In `HALF_OPEN` this claims the single trial: the first caller after
    /// the open duration elapses gets `true`, every other caller gets
    /// `false` until the trial outcome is recorded.
    #[must_use]
    pub fn permit(&self) -> bool {
        let mut core = self.lock_core();
        self.check_open_elapsed(&mut core);

        match core.state {
            CircuitState::Closed => true,
            CircuitState::Open => false,
            CircuitState::HalfOpen => {
                if core.trial_in_flight {
                    false
                } else {
                    core.trial_in_flight = true;
                    true
                }
            }
        }
    }

    /// Record a successful call.
    pub fn record_success(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.record_outcome(CallOutcome::Success);
    }

    /// Record a failed call.
    pub fn record_failure(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.total_failures.fetch_add(1, Ordering::Relaxed);
        self.record_outcome(CallOutcome::Failure);
    }

    /// Record call outcome and apply transition rules.
    fn record_outcome(&self, outcome: CallOutcome) {
        let mut core = self.lock_core();
        self.check_open_elapsed(&mut core);

        match core.state {
            CircuitState::Closed => {
                core.window.push_back(outcome);
                while core.window.len() > self.config.sliding_window_size as usize {
                    core.window.pop_front();
                }
                self.evaluate_closed_state(&mut core);
            }
            CircuitState::HalfOpen => {
                core.trial_in_flight = false;
                if outcome == CallOutcome::Success {
                    self.transition_to_closed(&mut core);
                } else {
                    self.transition_to_open(&mut core);
                }
            }
            CircuitState::Open => {
                // Calls should be rejected before reaching the upstream in OPEN
                tracing::warn!(
                    name = %self.name,
                    "Call outcome recorded while circuit is OPEN"
                );
            }
        }
    }

    /// Evaluate CLOSED state and potentially transition to OPEN.
    ///
    /// The failure rate is only evaluated over a full window; a partially
    /// filled window never opens the circuit.
    fn evaluate_closed_state(&self, core: &mut BreakerCore) {
        if core.window.len() < self.config.sliding_window_size as usize {
            return;
        }

        let failures = core
            .window
            .iter()
            .filter(|o| **o == CallOutcome::Failure)
            .count();
        let failure_rate = failures as f64 / core.window.len() as f64;

        if failure_rate >= self.config.failure_rate_threshold {
            self.transition_to_open(core);
        }
    }

    /// Apply the `OPEN` → `HALF_OPEN` transition once the timer elapses.
    fn check_open_elapsed(&self, core: &mut BreakerCore) {
        if core.state == CircuitState::Open
            && let Some(opened) = core.opened_at
            && opened.elapsed() >= self.config.wait_duration_in_open
        {
            core.state = CircuitState::HalfOpen;
            core.trial_in_flight = false;
            self.state_transitions.fetch_add(1, Ordering::Relaxed);

            tracing::info!(
                name = %self.name,
                from = "OPEN",
                to = "HALF_OPEN",
                "Circuit breaker permitting trial call"
            );
        }
    }

    /// Transition to `OPEN` and (re)start the open timer.
    fn transition_to_open(&self, core: &mut BreakerCore) {
        let previous = core.state;
        core.state = CircuitState::Open;
        core.opened_at = Some(Instant::now());
        core.trial_in_flight = false;
        self.state_transitions.fetch_add(1, Ordering::Relaxed);

        tracing::warn!(
            name = %self.name,
            from = %previous,
            to = "OPEN",
            "Circuit breaker opened"
        );
    }

    /// Transition to `CLOSED` with a cleared window.
    fn transition_to_closed(&self, core: &mut BreakerCore) {
        let previous = core.state;
        core.state = CircuitState::Closed;
        core.window.clear();
        core.opened_at = None;
        core.trial_in_flight = false;
        self.state_transitions.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            name = %self.name,
            from = %previous,
            to = "CLOSED",
            "Circuit breaker closed"
        );
    }

    /// Get metrics for this circuit breaker.
    #[must_use]
    pub fn metrics(&self) -> CircuitBreakerMetrics {
        let (state, failure_rate) = {
            let mut core = self.lock_core();
            self.check_open_elapsed(&mut core);
            (core.state, Self::window_failure_rate(&core))
        };

        CircuitBreakerMetrics {
            name: self.name.clone(),
            state,
            total_calls: self.total_calls.load(Ordering::Relaxed),
            total_failures: self.total_failures.load(Ordering::Relaxed),
            state_transitions: self.state_transitions.load(Ordering::Relaxed),
            failure_rate,
        }
    }

    fn window_failure_rate(core: &BreakerCore) -> f64 {
        if core.window.is_empty() {
            return 0.0;
        }
        let failures = core
            .window
            .iter()
            .filter(|o| **o == CallOutcome::Failure)
            .count();
        failures as f64 / core.window.len() as f64
    }

    /// Force the circuit breaker to open (for testing or emergency).
    pub fn force_open(&self) {
        let mut core = self.lock_core();
        self.transition_to_open(&mut core);
    }

    /// Force the circuit breaker to close (for testing or recovery).
    pub fn force_close(&self) {
        let mut core = self.lock_core();
        self.transition_to_closed(&mut core);
    }

    fn lock_core(&self) -> std::sync::MutexGuard<'_, BreakerCore> {
        self.core
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Point-in-time metrics snapshot for a circuit breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerMetrics {
    /// Service name.
    pub name: String,
    /// Current state.
    pub state: CircuitState,
    /// Total calls.
    pub total_calls: u64,
    /// Total failures.
    pub total_failures: u64,
    /// Number of state transitions.
    pub state_transitions: u64,
    /// Current failure rate over the sliding window (0.0-1.0).
    pub failure_rate: f64,
}

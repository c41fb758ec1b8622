//! Resilience patterns for the upstream call path.
//!
//! Composition order for one call:
//!
//! ```text
//! executor.rs (validate → breaker gate → timeout → retry → record outcome)
//!     → circuit_breaker.rs (sliding window, CLOSED/OPEN/HALF_OPEN)
//!     → retry.rs (fixed-delay attempt budget)
//! ```

mod circuit_breaker;
mod executor;
mod retry;

pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitState,
};
pub use executor::{DEFAULT_ATTEMPT_TIMEOUT, ResilientCallExecutor};
pub use retry::RetryPolicy;

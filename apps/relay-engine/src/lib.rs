// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::default_trait_access
    )
)]

//! Relay Engine - Resilient Call Execution Core
//!
//! Accepts a client-submitted request, forwards a derived query to an
//! external HTTP data service, and returns a mapped response. The heart of
//! the crate is the resilient call-execution layer: invoking an unreliable
//! upstream safely, bounding latency, retrying transient failures, and
//! protecting callers from cascading failure when the upstream degrades.
//!
//! # Layers
//!
//! - **Resilience**: circuit breaker, fixed-delay retry policy, and the
//!   executor that composes validation, timeout, retry and the breaker
//!   around one upstream invocation.
//! - **Application**: the `UpstreamPort` capability and the
//!   `ProcessRequestUseCase` that derives the query and maps the payload
//!   into the response document.
//! - **Infrastructure**: the reqwest adapter implementing `UpstreamPort`
//!   against the configured upstream base address.
//!
//! HTTP server wiring, persistence and content negotiation live outside
//! this crate; the surrounding service calls [`ProcessRequestUseCase`]
//! with an already-deserialized request document.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use relay_engine::{
//!     CircuitBreaker, CircuitBreakerConfig, HttpUpstreamClient,
//!     ProcessRequest, ProcessRequestUseCase, ResilientCallExecutor,
//!     RetryPolicy, UpstreamConfig,
//! };
//!
//! let upstream = Arc::new(HttpUpstreamClient::new(&UpstreamConfig::default())?);
//! let breaker = Arc::new(CircuitBreaker::new("external-api", CircuitBreakerConfig::default()));
//! let executor = ResilientCallExecutor::new(
//!     upstream,
//!     breaker,
//!     RetryPolicy::default(),
//!     relay_engine::resilience::DEFAULT_ATTEMPT_TIMEOUT,
//! );
//! let use_case = ProcessRequestUseCase::new(executor);
//!
//! let response = use_case.execute(&ProcessRequest::new("sample-query")).await?;
//! assert_eq!(response.status, "Processed");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Application layer - use cases and port definitions.
pub mod application;

/// Configuration loading and validation.
pub mod config;

/// Error taxonomy for the call-execution core.
pub mod error;

/// Infrastructure layer - adapters for external systems.
pub mod infrastructure;

/// Request and response documents.
pub mod models;

/// Circuit breaker, retry policy and the resilient executor.
pub mod resilience;

/// Tracing setup.
pub mod telemetry;

// Re-exports for the common wiring path
pub use application::ports::{UpstreamError, UpstreamPort};
pub use application::use_cases::ProcessRequestUseCase;
pub use config::{Config, load_config, load_config_from_string};
pub use error::{ErrorKind, ExecuteError};
pub use infrastructure::upstream::{HttpUpstreamClient, UpstreamConfig};
pub use models::{ProcessRequest, ProcessResponse};
pub use resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitState,
    ResilientCallExecutor, RetryPolicy,
};

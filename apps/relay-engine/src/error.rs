//! Error taxonomy for the resilient call-execution core.
//!
//! Every failure surfaces as a typed [`ExecuteError`]; the core never
//! swallows a failure silently. The surrounding layer decides user-visible
//! presentation.
//!
//! # Retry behavior
//!
//! | Retryable | Non-Retryable |
//! |-----------|---------------|
//! | Attempt timeout | Invalid input |
//! | Upstream error (HTTP or network) | Circuit breaker open |

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a call failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Caller-supplied defect. Not retried, not recorded on the breaker.
    InvalidInput,
    /// Attempt exceeded the per-attempt bound. Retryable.
    Timeout,
    /// Upstream returned or caused an error. Retryable.
    UpstreamError,
    /// Breaker rejected the call. Not retried, not recorded.
    CircuitOpen,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "INVALID_INPUT"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::UpstreamError => write!(f, "UPSTREAM_ERROR"),
            Self::CircuitOpen => write!(f, "CIRCUIT_OPEN"),
        }
    }
}

/// Failure produced by the resilient call executor.
#[derive(Debug, Error, Clone)]
pub enum ExecuteError {
    /// Request failed validation before any breaker or network interaction.
    #[error("Invalid request: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },

    /// An attempt exceeded the per-attempt timeout.
    #[error("Upstream call timed out after {timeout:?}")]
    Timeout {
        /// The bound the attempt exceeded.
        timeout: Duration,
    },

    /// The upstream dependency returned or caused an error.
    #[error("Upstream error: {detail}")]
    Upstream {
        /// Error details from the upstream call.
        detail: String,
    },

    /// The circuit breaker rejected the call without invoking the upstream.
    #[error("Circuit breaker is open, call rejected")]
    CircuitOpen,
}

impl ExecuteError {
    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Get the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Upstream { .. } => ErrorKind::UpstreamError,
            Self::CircuitOpen => ErrorKind::CircuitOpen,
        }
    }

    /// Whether the executor may retry after this failure.
    ///
    /// Timeouts and upstream errors count toward the attempt budget;
    /// invalid input and circuit-open rejections never enter the loop.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Upstream { .. })
    }
}

//! Upstream Port (Driven Port)
//!
//! Interface for performing the actual call to the external data service.
//! The resilience core composes timeout, retry and the circuit breaker
//! around this single capability; adapters stay free of retry logic.

use async_trait::async_trait;

/// Upstream port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// Network-level failure (connect, reset, DNS).
    #[error("Upstream network error: {message}")]
    Network {
        /// Error details.
        message: String,
    },

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body could not be read.
    #[error("Upstream body error: {message}")]
    Body {
        /// Error details.
        message: String,
    },
}

/// Port for invoking the external data service.
///
/// `invoke` performs exactly one call; bounding, retrying and gating are
/// the executor's responsibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// Perform one upstream call for the given query, returning the raw
    /// response payload.
    async fn invoke(&self, query: &str) -> Result<String, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = UpstreamError::Status {
            code: 503,
            body: "service unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("service unavailable"));
    }

    #[tokio::test]
    async fn mock_port_invokes() {
        let mut mock = MockUpstreamPort::new();
        mock.expect_invoke()
            .returning(|_| Ok("payload".to_string()));

        let result = mock.invoke("q").await;
        assert_eq!(result.unwrap(), "payload");
    }
}

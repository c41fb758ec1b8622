//! Process Request Use Case
//!
//! Validates the incoming request document, runs the resilient executor
//! against the upstream data service, and maps the payload into the
//! externally visible response. The mapping is a pure transform; all
//! resilience behavior lives in the executor.

use uuid::Uuid;

use crate::application::ports::UpstreamPort;
use crate::error::ExecuteError;
use crate::models::{ProcessRequest, ProcessResponse};
use crate::resilience::ResilientCallExecutor;

/// Use case for processing a client request end to end.
pub struct ProcessRequestUseCase<U>
where
    U: UpstreamPort,
{
    executor: ResilientCallExecutor<U>,
}

impl<U> ProcessRequestUseCase<U>
where
    U: UpstreamPort,
{
    /// Create a new ProcessRequestUseCase.
    #[must_use]
    pub fn new(executor: ResilientCallExecutor<U>) -> Self {
        Self { executor }
    }

    /// The executor this use case drives.
    #[must_use]
    pub fn executor(&self) -> &ResilientCallExecutor<U> {
        &self.executor
    }

    /// Execute the use case.
    pub async fn execute(&self, request: &ProcessRequest) -> Result<ProcessResponse, ExecuteError> {
        let request_id = request
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::info!(
            request_id = %request_id,
            data = %request.request_data,
            "Processing request"
        );

        request.validate()?;

        let payload = self
            .executor
            .execute(&request.request_data)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    request_id = %request_id,
                    error = %e,
                    "Request processing failed"
                );
            })?;

        tracing::info!(request_id = %request_id, "Request processed");
        Ok(ProcessResponse::processed(&payload))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::application::ports::{MockUpstreamPort, UpstreamError};
    use crate::error::ErrorKind;
    use crate::resilience::{CircuitBreaker, CircuitBreakerConfig, RetryPolicy};

    fn use_case(mock: MockUpstreamPort) -> ProcessRequestUseCase<MockUpstreamPort> {
        let breaker = Arc::new(CircuitBreaker::new("test", CircuitBreakerConfig::default()));
        let executor = ResilientCallExecutor::new(
            Arc::new(mock),
            breaker,
            RetryPolicy::new(3, Duration::from_millis(1)),
            Duration::from_millis(50),
        );
        ProcessRequestUseCase::new(executor)
    }

    #[tokio::test]
    async fn valid_request_maps_to_processed_response() {
        let mut mock = MockUpstreamPort::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_| Ok("42".to_string()));

        let response = use_case(mock)
            .execute(&ProcessRequest::new("sample-query"))
            .await
            .unwrap();

        assert_eq!(response.status, "Processed");
        assert!(response.response_message.contains("42"));
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_upstream() {
        let mut mock = MockUpstreamPort::new();
        mock.expect_invoke().times(0);

        let err = use_case(mock)
            .execute(&ProcessRequest::new(""))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_typed_error() {
        let mut mock = MockUpstreamPort::new();
        mock.expect_invoke().times(3).returning(|_| {
            Err(UpstreamError::Status {
                code: 500,
                body: "boom".to_string(),
            })
        });

        let err = use_case(mock)
            .execute(&ProcessRequest::new("sample-query").with_id("req-7"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamError);
        assert!(err.to_string().contains("500"));
    }
}

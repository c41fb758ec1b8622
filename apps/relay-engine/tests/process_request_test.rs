//! Process Request Integration Tests
//!
//! Drive the full use case (validation → breaker → timeout → retry →
//! response mapping) against a live HTTP stub server.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use relay_engine::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, ErrorKind, HttpUpstreamClient,
    ProcessRequest, ProcessRequestUseCase, ResilientCallExecutor, RetryPolicy, UpstreamConfig,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wire a use case against the stub server, sharing the given breaker.
fn make_use_case(
    server: &MockServer,
    breaker: Arc<CircuitBreaker>,
    retry: RetryPolicy,
    attempt_timeout: Duration,
) -> ProcessRequestUseCase<HttpUpstreamClient> {
    let upstream = HttpUpstreamClient::new(&UpstreamConfig::new(server.uri()))
        .expect("should build upstream client");
    let executor = ResilientCallExecutor::new(Arc::new(upstream), breaker, retry, attempt_timeout);
    ProcessRequestUseCase::new(executor)
}

fn default_breaker() -> Arc<CircuitBreaker> {
    Arc::new(CircuitBreaker::new("test", CircuitBreakerConfig::default()))
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

// ============================================
// Happy Path
// ============================================

#[tokio::test]
async fn processes_valid_request_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("query", "sample-query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .expect(1)
        .mount(&server)
        .await;

    let use_case = make_use_case(
        &server,
        default_breaker(),
        fast_retry(),
        Duration::from_secs(1),
    );

    let response = use_case
        .execute(&ProcessRequest::new("sample-query"))
        .await
        .expect("request should process");

    assert_eq!(response.status, "Processed");
    assert!(response.response_message.contains("42"));
}

#[tokio::test]
async fn transient_failures_are_retried_until_success() {
    let server = MockServer::start().await;
    // First two attempts hit a degraded upstream, the third succeeds
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&server)
        .await;

    let breaker = default_breaker();
    let use_case = make_use_case(
        &server,
        Arc::clone(&breaker),
        fast_retry(),
        Duration::from_secs(1),
    );

    let response = use_case
        .execute(&ProcessRequest::new("sample-query"))
        .await
        .expect("third attempt should succeed");

    assert!(response.response_message.contains("recovered"));
    // One net success recorded, despite two failed attempts
    let metrics = breaker.metrics();
    assert_eq!(metrics.total_calls, 1);
    assert_eq!(metrics.total_failures, 0);
}

// ============================================
// Failure Paths
// ============================================

#[tokio::test]
async fn exhausted_attempts_surface_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(3)
        .mount(&server)
        .await;

    let breaker = default_breaker();
    let use_case = make_use_case(
        &server,
        Arc::clone(&breaker),
        fast_retry(),
        Duration::from_secs(1),
    );

    let err = use_case
        .execute(&ProcessRequest::new("sample-query"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamError);
    assert!(err.to_string().contains("500"));
    // One net failure recorded for the whole execute call
    let metrics = breaker.metrics();
    assert_eq!(metrics.total_calls, 1);
    assert_eq!(metrics.total_failures, 1);
}

#[tokio::test]
async fn slow_upstream_times_out_each_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_millis(500)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let breaker = default_breaker();
    let use_case = make_use_case(
        &server,
        Arc::clone(&breaker),
        fast_retry(),
        Duration::from_millis(50),
    );

    let err = use_case
        .execute(&ProcessRequest::new("sample-query"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(breaker.metrics().total_failures, 1);
}

#[tokio::test]
async fn empty_request_is_rejected_without_network_traffic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let breaker = default_breaker();
    let use_case = make_use_case(
        &server,
        Arc::clone(&breaker),
        fast_retry(),
        Duration::from_secs(1),
    );

    let err = use_case
        .execute(&ProcessRequest::new(""))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    // Breaker state unchanged
    let metrics = breaker.metrics();
    assert_eq!(metrics.state, CircuitState::Closed);
    assert_eq!(metrics.total_calls, 0);
}

// ============================================
// Circuit Breaker Behavior
// ============================================

#[tokio::test]
async fn degraded_upstream_opens_circuit_and_fails_fast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let breaker = Arc::new(CircuitBreaker::new(
        "test",
        CircuitBreakerConfig {
            failure_rate_threshold: 0.5,
            sliding_window_size: 2,
            wait_duration_in_open: Duration::from_secs(60),
        },
    ));
    let use_case = make_use_case(
        &server,
        Arc::clone(&breaker),
        RetryPolicy::no_retries(),
        Duration::from_secs(1),
    );

    // Two failing calls fill the window and trip the breaker
    for _ in 0..2 {
        let err = use_case
            .execute(&ProcessRequest::new("sample-query"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamError);
    }
    assert_eq!(breaker.metrics().state, CircuitState::Open);

    // Third call is rejected before any network traffic
    let err = use_case
        .execute(&ProcessRequest::new("sample-query"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CircuitOpen);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn open_circuit_recovers_through_half_open_trial() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let breaker = Arc::new(CircuitBreaker::new(
        "test",
        CircuitBreakerConfig {
            failure_rate_threshold: 0.5,
            sliding_window_size: 2,
            wait_duration_in_open: Duration::from_millis(50),
        },
    ));
    let use_case = make_use_case(
        &server,
        Arc::clone(&breaker),
        RetryPolicy::no_retries(),
        Duration::from_secs(1),
    );

    for _ in 0..2 {
        let _ = use_case
            .execute(&ProcessRequest::new("sample-query"))
            .await;
    }
    assert_eq!(breaker.metrics().state, CircuitState::Open);

    // Upstream recovers while the circuit is open
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("back online"))
        .mount(&server)
        .await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    // The trial call succeeds and closes the circuit
    let response = use_case
        .execute(&ProcessRequest::new("sample-query"))
        .await
        .expect("trial call should succeed");

    assert!(response.response_message.contains("back online"));
    assert_eq!(breaker.metrics().state, CircuitState::Closed);
}

//! Relay Engine Binary
//!
//! One-shot runner: executes a single query through the resilient call
//! executor against the configured upstream and prints the mapped
//! response as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin relay-engine -- sample-query
//! ```
//!
//! # Environment Variables
//!
//! - `RELAY_CONFIG`: Path to a YAML config file (default: built-in defaults)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;
use relay_engine::{
    CircuitBreaker, Config, HttpUpstreamClient, ProcessRequest, ProcessRequestUseCase,
    ResilientCallExecutor, load_config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    relay_engine::telemetry::init_tracing();

    let query = std::env::args()
        .nth(1)
        .context("Usage: relay-engine <query>")?;

    let config = resolve_config()?;
    log_config(&config);

    let use_case = build_use_case(&config)?;

    let request = ProcessRequest::new(query);
    let response = use_case
        .execute(&request)
        .await
        .context("Request processing failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Load config from `RELAY_CONFIG` if set, otherwise use defaults.
fn resolve_config() -> anyhow::Result<Config> {
    match std::env::var("RELAY_CONFIG") {
        Ok(path) => load_config(Some(&path))
            .with_context(|| format!("Failed to load config from {path}")),
        Err(_) => Ok(Config::default()),
    }
}

fn log_config(config: &Config) {
    tracing::info!(
        upstream = %config.upstream.base_url,
        window = config.circuit_breaker.sliding_window_size,
        max_attempts = config.retry.max_attempts,
        attempt_timeout_secs = config.executor.attempt_timeout_secs,
        "Starting relay engine"
    );
}

/// Wire the adapter, breaker and executor into the use case.
fn build_use_case(
    config: &Config,
) -> anyhow::Result<ProcessRequestUseCase<HttpUpstreamClient>> {
    let upstream = HttpUpstreamClient::new(&config.upstream.to_upstream_config())
        .map_err(|e| anyhow::anyhow!("Failed to build upstream client: {e}"))?;

    let breaker = Arc::new(CircuitBreaker::new(
        "external-api",
        config.circuit_breaker.to_resilience_config(),
    ));

    let executor = ResilientCallExecutor::new(
        Arc::new(upstream),
        breaker,
        config.retry.to_retry_policy(),
        config.executor.attempt_timeout(),
    );

    Ok(ProcessRequestUseCase::new(executor))
}

//! Configuration module for the relay engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the upstream adapter and the resilience core.
//!
//! # Usage
//!
//! ```rust,ignore
//! use relay_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("upstream: {}", config.upstream.base_url);
//! ```

mod circuit_breaker;
mod executor;
mod retry;
mod upstream;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use circuit_breaker::CircuitBreakerSettings;
pub use executor::ExecutorSettings;
pub use retry::RetrySettings;
pub use upstream::UpstreamSettings;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream data service configuration.
    #[serde(default)]
    pub upstream: UpstreamSettings,
    /// Circuit breaker configuration.
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerSettings,
    /// Retry configuration.
    #[serde(default)]
    pub retry: RetrySettings,
    /// Executor configuration.
    #[serde(default)]
    pub executor: ExecutorSettings,
}

/// Load configuration from a YAML file.
///
/// Environment variables in the file are interpolated with
/// `${VAR}` or `${VAR:-default}` syntax before parsing.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (mainly for tests).
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Replace `${VAR}` and `${VAR:-default}` patterns with environment values.
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        // This regex pattern is compile-time constant and always valid
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate cross-field configuration invariants.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.upstream.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "upstream.base_url must not be empty".to_string(),
        ));
    }

    let threshold = config.circuit_breaker.failure_rate_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "circuit_breaker.failure_rate_threshold must be in (0.0, 1.0], got {threshold}"
        )));
    }

    if config.circuit_breaker.sliding_window_size == 0 {
        return Err(ConfigError::ValidationError(
            "circuit_breaker.sliding_window_size must be at least 1".to_string(),
        ));
    }

    if config.retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "retry.max_attempts must be at least 1".to_string(),
        ));
    }

    if config.executor.attempt_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "executor.attempt_timeout_secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}

//! Upstream adapter configuration.

use std::time::Duration;

/// Configuration for the upstream HTTP adapter.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base address of the external data service.
    pub base_url: String,
    /// Request path appended to the base address.
    pub data_path: String,
    /// TCP connect bound for the HTTP client.
    pub connect_timeout: Duration,
}

impl UpstreamConfig {
    /// Create a new configuration with the default path and connect bound.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            data_path: "/data".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Set the request path.
    #[must_use]
    pub fn with_data_path(mut self, data_path: impl Into<String>) -> Self {
        self.data_path = data_path.into();
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new("http://external-api.com")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "http://external-api.com");
        assert_eq!(config.data_path, "/data");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_setters() {
        let config = UpstreamConfig::new("http://localhost:9090")
            .with_data_path("/v2/data")
            .with_connect_timeout(Duration::from_secs(2));
        assert_eq!(config.base_url, "http://localhost:9090");
        assert_eq!(config.data_path, "/v2/data");
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }
}

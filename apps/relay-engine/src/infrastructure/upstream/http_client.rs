//! HTTP adapter for the external data service.
//!
//! Performs exactly one `GET {base_url}{data_path}?query=<value>` per
//! `invoke`. Timeout bounding, retry and circuit breaking belong to the
//! executor, never to this adapter.

use async_trait::async_trait;
use reqwest::Client;

use super::config::UpstreamConfig;
use crate::application::ports::{UpstreamError, UpstreamPort};

/// Reqwest-backed implementation of [`UpstreamPort`].
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: Client,
    base_url: String,
    data_path: String,
}

impl HttpUpstreamClient {
    /// Create a new HTTP upstream client from config.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| UpstreamError::Network {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            data_path: config.data_path.clone(),
        })
    }
}

#[async_trait]
impl UpstreamPort for HttpUpstreamClient {
    async fn invoke(&self, query: &str) -> Result<String, UpstreamError> {
        let url = format!("{}{}", self.base_url, self.data_path);

        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| UpstreamError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();

        if status.is_success() {
            return response.text().await.map_err(|e| UpstreamError::Body {
                message: e.to_string(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            code = status.as_u16(),
            body = %body,
            "Upstream returned non-success status"
        );
        Err(UpstreamError::Status {
            code: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let client =
            HttpUpstreamClient::new(&UpstreamConfig::new("http://localhost:9090/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:9090");
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_error() {
        // Reserved TEST-NET-1 address, nothing listens there
        let config = UpstreamConfig::new("http://192.0.2.1:9")
            .with_connect_timeout(std::time::Duration::from_millis(100));
        let client = HttpUpstreamClient::new(&config).unwrap();

        let err = client.invoke("sample-query").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Network { .. }));
    }
}

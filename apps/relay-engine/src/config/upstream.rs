//! Upstream data service configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::upstream::UpstreamConfig;

/// Upstream settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    /// Base address of the external data service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request path appended to the base address.
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// TCP connect bound in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_path: default_data_path(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl UpstreamSettings {
    /// Convert settings into the adapter's `UpstreamConfig`.
    #[must_use]
    pub fn to_upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig::new(self.base_url.clone())
            .with_data_path(self.data_path.clone())
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

fn default_base_url() -> String {
    "http://external-api.com".to_string()
}

fn default_data_path() -> String {
    "/data".to_string()
}

const fn default_connect_timeout() -> u64 {
    5
}

//! Endpoint constants for the device registration service.
//!
//! These are injected into the request builder rather than hardcoded, so a
//! staging service or a local stub can be targeted from configuration.

use serde::{Deserialize, Serialize};

/// Default base URL of the device registration API.
pub const DEFAULT_BASE_URL: &str = "https://device.griffon.adobe.com/device";

/// Default path segment of the registration status operation.
pub const DEFAULT_STATUS_PATH: &str = "status";

/// Default JSON key carrying the org id.
pub const DEFAULT_ORG_ID_KEY: &str = "orgId";

/// Default JSON key carrying the client id.
pub const DEFAULT_CLIENT_ID_KEY: &str = "clientId";

/// Default connect timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;

/// Default read timeout (5 seconds).
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 5000;

/// Where and how to reach the registration status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base API URL, without the operation path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path segment appended to the base URL for the status check.
    #[serde(default = "default_status_path")]
    pub status_path: String,
    /// JSON body key for the org id.
    #[serde(default = "default_org_id_key")]
    pub org_id_key: String,
    /// JSON body key for the client id.
    #[serde(default = "default_client_id_key")]
    pub client_id_key: String,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_status_path() -> String {
    DEFAULT_STATUS_PATH.to_string()
}

fn default_org_id_key() -> String {
    DEFAULT_ORG_ID_KEY.to_string()
}

fn default_client_id_key() -> String {
    DEFAULT_CLIENT_ID_KEY.to_string()
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_read_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT_MS
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_path: default_status_path(),
            org_id_key: default_org_id_key(),
            client_id_key: default_client_id_key(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl EndpointConfig {
    /// Point the config at a different base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Override both timeouts.
    pub fn with_timeouts(mut self, connect_timeout_ms: u64, read_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self.read_timeout_ms = read_timeout_ms;
        self
    }

    /// Full URL of the status operation.
    pub fn status_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.status_path.trim_start_matches('/')
        )
    }
}

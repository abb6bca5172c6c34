//! API client configuration.

use std::time::Duration;

/// Default MEGA API endpoint.
pub const DEFAULT_API_URL: &str = "https://g.api.mega.co.nz/cs";

/// Settings for [`ApiClient`](super::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Command endpoint.
    pub api_url: String,
    /// Per-attempt HTTP timeout.
    pub timeout: Duration,
    /// Attempts before a request still answered with EAGAIN fails as busy.
    pub max_attempts: u32,
    /// Optional HTTP or SOCKS proxy URL.
    pub proxy: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(20),
            max_attempts: 8,
            proxy: None,
        }
    }
}

impl ApiConfig {
    /// Route all requests through `proxy`.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

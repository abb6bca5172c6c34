//! HTTP transport for MEGA API commands.

use reqwest::Client;

use crate::error::{MegaError, Result};

const USER_AGENT: &str = concat!("megacp/", env!("CARGO_PKG_VERSION"));

/// HTTP client posting JSON command arrays.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Create a new HTTP client routed through a proxy.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| MegaError::Custom(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .proxy(proxy)
            .build()
            .map_err(|e| MegaError::Custom(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    /// POST a JSON body and return the response body.
    pub async fn post(&self, url: &str, body: &str) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MegaError::HttpError(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

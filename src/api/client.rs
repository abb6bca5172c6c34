//! MEGA API client with request/response handling.

use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;
use tokio::time::{sleep, timeout};
use tracing::{debug, trace, warn};

use super::config::ApiConfig;
use super::error::{api_error, ApiErrorCode};
use crate::error::{MegaError, Result};
use crate::http::HttpClient;

const INITIAL_BACKOFF_MS: u64 = 250;
const MAX_BACKOFF_MS: u64 = 256_000;

/// Random tag for the `i` field, letting the server drop replayed commands.
pub(crate) fn make_request_tag() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}

/// MEGA API client.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    config: ApiConfig,
    request_id: u32,
    session_id: Option<String>,
}

impl ApiClient {
    /// Create a new API client with default settings.
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
            config: ApiConfig::default(),
            request_id: rand::random(),
            session_id: None,
        }
    }

    /// Create a client from explicit settings.
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let http = match &config.proxy {
            Some(proxy) => HttpClient::with_proxy(proxy)?,
            None => HttpClient::new(),
        };
        Ok(Self {
            http,
            config,
            request_id: rand::random(),
            session_id: None,
        })
    }

    /// Create a new API client with a proxy.
    ///
    /// # Arguments
    /// * `proxy` - Proxy URL (e.g., "http://proxy:8080" or "socks5://proxy:1080")
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        Self::with_config(ApiConfig::default().with_proxy(proxy))
    }

    /// Active settings.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Set the session ID for authenticated requests.
    pub fn set_session_id(&mut self, sid: String) {
        self.session_id = Some(sid);
    }

    /// Clear the session ID.
    pub fn clear_session_id(&mut self) {
        self.session_id = None;
    }

    /// Get the current session ID, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn next_url(&mut self) -> String {
        self.request_id = self.request_id.wrapping_add(1);
        match &self.session_id {
            Some(sid) => format!("{}?id={}&sid={}", self.config.api_url, self.request_id, sid),
            None => format!("{}?id={}", self.config.api_url, self.request_id),
        }
    }

    /// POST a command array, retrying with exponential backoff while the
    /// server answers with a bare EAGAIN.
    async fn post_commands(&mut self, body: &str, action: &str) -> Result<Value> {
        let mut delay_ms = INITIAL_BACKOFF_MS;
        let mut attempts = 0;

        loop {
            // New request id on every attempt to avoid server-side dedup.
            let url = self.next_url();
            debug!("api request a={} id={}", action, self.request_id);
            trace!("api request body={}", body);

            let response_text = timeout(self.config.timeout, self.http.post(&url, body))
                .await
                .map_err(|_| MegaError::Custom("HTTP request timed out".to_string()))??;
            trace!("api response a={} body={}", action, response_text);
            attempts += 1;

            let response: Value = serde_json::from_str(&response_text)?;

            // The whole request is answered with a bare code (`-3` or `[-3]`)
            // when it couldn't be processed.
            let bare_code = response.as_i64().or_else(|| match response.as_array() {
                Some(arr) if arr.len() == 1 => arr[0].as_i64().filter(|&c| c < 0),
                _ => None,
            });

            match bare_code {
                Some(code) if ApiErrorCode::from(code) == ApiErrorCode::Again => {
                    if attempts >= self.config.max_attempts || delay_ms > MAX_BACKOFF_MS {
                        warn!("api a={} still busy after {} attempts", action, attempts);
                        return Err(MegaError::ServerBusy);
                    }
                    debug!("api a={} busy, retrying in {}ms", action, delay_ms);
                    sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms *= 2;
                }
                Some(code) if code < 0 => return Err(api_error(code)),
                _ => return Ok(response),
            }
        }
    }

    /// Make a single API request.
    ///
    /// # Returns
    /// The command's result; negative result codes become [`MegaError::ApiError`].
    pub async fn request(&mut self, request: Value) -> Result<Value> {
        let action = request
            .get("a")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        let body = serde_json::to_string(&vec![request])?;

        let response = self.post_commands(&body, &action).await?;
        let result = match response {
            Value::Array(mut arr) if !arr.is_empty() => arr.swap_remove(0),
            Value::Array(_) => return Err(MegaError::InvalidResponse),
            other => other,
        };

        match result.as_i64() {
            Some(code) if code < 0 => Err(api_error(code)),
            _ => Ok(result),
        }
    }

    /// Send several commands in one request.
    ///
    /// # Returns
    /// The JSON array of per-command results, unchecked.
    pub async fn request_batch(&mut self, requests: Vec<Value>) -> Result<Value> {
        if requests.is_empty() {
            return Ok(Value::Array(vec![]));
        }

        let body = serde_json::to_string(&requests)?;
        let response = self.post_commands(&body, "batch").await?;
        if !response.is_array() {
            return Err(MegaError::InvalidResponse);
        }
        Ok(response)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

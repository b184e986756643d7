//! Service client over reqwest
//!
//! Handles:
//! - URL building (percent-encoded path segments, absolute next links)
//! - Headers sent with every request
//! - Transport error classification (connect/IO vs. timeout)
//!
//! Status codes are not interpreted here; `decode::ResponseBuilder` decides
//! what counts as success. There is no retry: every failure goes straight
//! back to the caller.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, StringMap};
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Content type sent with every request
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Status, headers, and body of a completed exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

/// HTTP client bound to one service endpoint and subscription
pub struct ServiceClient {
    client: Client,
    config: ClientConfig,
    base_url: Url,
}

impl ServiceClient {
    /// Create a client from a config
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;
        Self::with_client(client, config)
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Result<Self> {
        let mut base_url = config.base_url()?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Subscription id, if configured
    pub fn subscription_id(&self) -> Option<&str> {
        self.config.subscription_id.as_deref()
    }

    /// API version, if configured
    pub fn api_version(&self) -> Option<&str> {
        self.config.api_version.as_deref()
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Build a URL from path segments, percent-encoding each one
    pub fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("base_url '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve a link returned by the service.
    ///
    /// Absolute links are used as-is; relative ones are joined onto the base URL.
    pub fn resolve(&self, link: &str) -> Result<Url> {
        if link.starts_with("http://") || link.starts_with("https://") {
            return Ok(Url::parse(link)?);
        }
        Ok(self.base_url.join(link.trim_start_matches('/'))?)
    }

    /// Send one request and read the whole body
    pub async fn send(&self, method: Method, url: Url, config: RequestConfig) -> Result<RawResponse> {
        let timeout = config.timeout.unwrap_or_else(|| self.config.timeout());
        let method: reqwest::Method = method.into();
        debug!("{method} {url}");

        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.config.accept_language)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .timeout(timeout);

        for (key, value) in &self.config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| classify(e, timeout))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| classify(e, timeout))?;

        debug!("{method} {url} -> {status} ({} bytes)", body.len());
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Map a reqwest failure onto the crate's error kinds
fn classify(error: reqwest::Error, timeout: Duration) -> Error {
    if error.is_timeout() {
        Error::timed_out(timeout.as_millis() as u64)
    } else {
        Error::Transport(error)
    }
}

//! Client configuration
//!
//! `ClientConfig` holds everything a service client needs that is not part of
//! an individual call: endpoint, subscription, API version, and the headers
//! sent with every request. It can be built in code, loaded from a YAML or
//! JSON file, and overridden from the environment.

use crate::error::{Error, Result, ResultExt};
use crate::types::{OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Environment variable overriding the subscription id
pub const ENV_SUBSCRIPTION_ID: &str = "PAGED_REST_SUBSCRIPTION_ID";
/// Environment variable overriding the API version
pub const ENV_API_VERSION: &str = "PAGED_REST_API_VERSION";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "PAGED_REST_BASE_URL";

/// Configuration for a service client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint that relative request paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Subscription id used in resource paths
    #[serde(default)]
    pub subscription_id: Option<String>,

    /// Value of the `api-version` query parameter
    #[serde(default = "default_api_version")]
    pub api_version: Option<String>,

    /// Value of the `accept-language` header
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_base_url() -> String {
    "https://management.azure.com".to_string()
}

fn default_api_version() -> Option<String> {
    Some("2015-12-01".to_string())
}

fn default_accept_language() -> String {
    "en-US".to_string()
}

fn default_user_agent() -> String {
    format!("paged-rest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            subscription_id: None,
            api_version: default_api_version(),
            accept_language: default_accept_language(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            headers: StringMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse the base URL
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| {
            Error::config(format!("Invalid base_url '{}': {e}", self.base_url))
        })
    }

    /// Check the config can back a client.
    ///
    /// Subscription id and API version are not checked here; operations
    /// validate them per call.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(id) = lookup(ENV_SUBSCRIPTION_ID).none_if_empty() {
            debug!("Subscription id overridden from {ENV_SUBSCRIPTION_ID}");
            self.subscription_id = Some(id);
        }
        if let Some(version) = lookup(ENV_API_VERSION).none_if_empty() {
            self.api_version = Some(version);
        }
        if let Some(url) = lookup(ENV_BASE_URL).none_if_empty() {
            self.base_url = url;
        }
        self
    }
}

/// Load a client config from a YAML (`.yaml`/`.yml`) or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ClientConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    config.validate()?;
    debug!("Loaded client config from {}", path.display());
    Ok(config)
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the subscription id
    pub fn subscription_id(mut self, id: impl Into<String>) -> Self {
        self.config.subscription_id = Some(id.into());
        self
    }

    /// Set the API version
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = Some(version.into());
        self
    }

    /// Clear the API version
    pub fn no_api_version(mut self) -> Self {
        self.config.api_version = None;
        self
    }

    /// Set the accept-language header
    pub fn accept_language(mut self, language: impl Into<String>) -> Self {
        self.config.accept_language = language.into();
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://management.azure.com");
        assert_eq!(config.api_version.as_deref(), Some("2015-12-01"));
        assert_eq!(config.accept_language, "en-US");
        assert!(config.subscription_id.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.user_agent.starts_with("paged-rest/"));
        config.validate().unwrap();
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080")
            .subscription_id("sub-1")
            .api_version("2021-07-01")
            .accept_language("de-DE")
            .user_agent("test-agent/1.0")
            .timeout(Duration::from_secs(5))
            .header("x-ms-client-request-id", "abc")
            .build();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.subscription_id.as_deref(), Some("sub-1"));
        assert_eq!(config.api_version.as_deref(), Some("2021-07-01"));
        assert_eq!(config.accept_language, "de-DE");
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.headers.get("x-ms-client-request-id"),
            Some(&"abc".to_string())
        );

        let config = ClientConfig::builder().no_api_version().build();
        assert!(config.api_version.is_none());
    }

    #[test]
    fn test_client_config_validate() {
        let config = ClientConfig::builder().base_url("not a url").build();
        assert!(config.validate().is_err());

        let config = ClientConfig::builder().base_url("mailto:ops@example.com").build();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_SUBSCRIPTION_ID, "env-sub"),
            (ENV_API_VERSION, ""),
            (ENV_BASE_URL, "http://127.0.0.1:9000"),
        ]);
        let config = ClientConfig::default()
            .with_overrides_from(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.subscription_id.as_deref(), Some("env-sub"));
        // empty values do not override
        assert_eq!(config.api_version.as_deref(), Some("2015-12-01"));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_load_config_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "base_url: http://localhost:1234\nsubscription_id: sub-yaml\ntimeout_secs: 10\nheaders:\n  x-custom: yes-please"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.subscription_id.as_deref(), Some("sub-yaml"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.api_version.as_deref(), Some("2015-12-01"));
        assert_eq!(config.headers.get("x-custom"), Some(&"yes-please".to_string()));
    }

    #[test]
    fn test_load_config_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"subscription_id": "sub-json", "api_version": null, "accept_language": "fr-FR"}}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.subscription_id.as_deref(), Some("sub-json"));
        assert!(config.api_version.is_none());
        assert_eq!(config.accept_language, "fr-FR");
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to read config file /definitely/not/here.yaml"));
    }
}

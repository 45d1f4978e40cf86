//! Client configuration
//!
//! `ClientConfig` can be written by hand, parsed from YAML/JSON, or read from
//! `MAILAPI_*` environment variables.

use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use crate::types::{LogLevel, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Prefix shared by all environment variables read by [`ClientConfig::from_env`]
pub const ENV_PREFIX: &str = "MAILAPI_";

/// Configuration for [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL (e.g. `https://api.example.com/v1`)
    pub base_url: String,

    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Override the user agent
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Default page size for list calls
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Log level used by [`crate::logging::init_from`]
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_timeout() -> u64 {
    30
}

impl ClientConfig {
    /// Create a config for the given base URL with defaults elsewhere
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: default_timeout(),
            user_agent: None,
            per_page: None,
            headers: HashMap::new(),
            log_level: LogLevel::default(),
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the default page size
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Parse a YAML (or JSON) document
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Read `MAILAPI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source.
    ///
    /// Reads `BASE_URL` (required), `API_KEY`, `TIMEOUT_SECS`, `PER_PAGE`
    /// and `LOG_LEVEL`, each prefixed with [`ENV_PREFIX`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).none_if_empty();

        let base_url = var("BASE_URL").ok_or_else(|| Error::missing_field("base_url"))?;
        let mut config = Self::new(base_url);
        config.api_key = var("API_KEY");

        if let Some(timeout) = var("TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                Error::invalid_value("timeout_secs", format!("'{timeout}' is not a number"))
            })?;
        }

        if let Some(per_page) = var("PER_PAGE") {
            let parsed: u32 = per_page.parse().map_err(|_| {
                Error::invalid_value("per_page", format!("'{per_page}' is not a number"))
            })?;
            config.per_page = Some(parsed);
        }

        if let Some(level) = var("LOG_LEVEL") {
            config.log_level = level.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the client cannot use
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }

        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "timeout_secs",
                "must be greater than zero",
            ));
        }

        if self.per_page == Some(0) {
            return Err(Error::invalid_value("per_page", "must be greater than zero"));
        }

        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Convert into the HTTP client's configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(self.timeout());

        if let Some(key) = self.api_key.clone().none_if_empty() {
            builder = builder.api_key(key);
        }

        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }

        builder.build()
    }
}

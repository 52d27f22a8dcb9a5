//! Connector configuration file
//!
//! Loaded from YAML or JSON. Every value may be left out and supplied on
//! the command line or through the environment instead.
//!
//! ```yaml
//! credentials:
//!   base_url: https://pleasanter.example.com
//!   api_key: "..."
//!   api_version: "1.1"
//! http:
//!   timeout_secs: 30
//! continue_on_fail: false
//! ```

use crate::credentials::{Credentials, DEFAULT_API_PATH_PREFIX};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::types::{ApiVersion, ErrorStrategy, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete connector configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Server credentials
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Replace failing items with an error marker instead of aborting
    #[serde(default)]
    pub continue_on_fail: bool,
}

/// Credential values as written in the file
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_version: Option<ApiVersion>,
    #[serde(default)]
    pub api_path_prefix: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("api_path_prefix", &self.api_path_prefix)
            .finish()
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl ConnectorConfig {
    /// Load from a file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply overrides (flags/environment) on top of the file values
    pub fn merge(&mut self, overrides: CredentialsConfig) {
        let creds = &mut self.credentials;
        if overrides.base_url.is_some() {
            creds.base_url = overrides.base_url;
        }
        if overrides.api_key.is_some() {
            creds.api_key = overrides.api_key;
        }
        if overrides.api_version.is_some() {
            creds.api_version = overrides.api_version;
        }
        if overrides.api_path_prefix.is_some() {
            creds.api_path_prefix = overrides.api_path_prefix;
        }
    }

    /// Validated credentials
    pub fn credentials(&self) -> Result<Credentials> {
        let c = &self.credentials;
        let base_url = c
            .base_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::missing_field("base_url"))?;
        let api_key = c
            .api_key
            .clone()
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("api_key"))?;

        let credentials = Credentials::new(base_url, api_key)
            .with_api_version(c.api_version.unwrap_or_default())
            .with_api_path_prefix(
                c.api_path_prefix
                    .clone()
                    .unwrap_or_else(|| DEFAULT_API_PATH_PREFIX.to_string()),
            );
        credentials.validate()?;
        Ok(credentials)
    }

    /// HTTP client configuration
    pub fn http_client_config(&self) -> Result<HttpClientConfig> {
        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be positive"));
        }

        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.http.timeout_secs));
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key.clone(), value.clone());
        }
        Ok(builder.build())
    }

    /// Batch failure strategy
    pub fn error_strategy(&self) -> ErrorStrategy {
        ErrorStrategy::from_continue_on_fail(self.continue_on_fail)
    }
}

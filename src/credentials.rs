//! Credential holder
//!
//! The item API authenticates through two body fields (`ApiKey`,
//! `ApiVersion`), so credentials are plain data copied into every request.

use crate::error::{Error, Result};
use crate::types::ApiVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default path prefix between the base URL and `/items/...`
pub const DEFAULT_API_PATH_PREFIX: &str = "/api";

/// Connection credentials for one server
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Server root, e.g. `https://pleasanter.example.com`
    pub base_url: String,
    /// Secret API key
    pub api_key: String,
    /// API version literal sent with every request
    #[serde(default)]
    pub api_version: ApiVersion,
    /// Path segment placed before `/items`
    #[serde(default = "default_api_path_prefix")]
    pub api_path_prefix: String,
}

fn default_api_path_prefix() -> String {
    DEFAULT_API_PATH_PREFIX.to_string()
}

impl Credentials {
    /// Create credentials with the default API version and path prefix
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_version: ApiVersion::default(),
            api_path_prefix: default_api_path_prefix(),
        }
    }

    /// Set the API version
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    /// Set the path prefix (use an empty string for none)
    #[must_use]
    pub fn with_api_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_path_prefix = prefix.into();
        self
    }

    /// Check the values before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        if self.api_key.is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        let parsed = url::Url::parse(self.base_url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Full URL for an endpoint path such as `/items/1/get`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let prefix = self.api_path_prefix.trim_end_matches('/');
        let prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };
        format!("{}{prefix}{endpoint}", self.trimmed_base_url())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("api_path_prefix", &self.api_path_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let creds = Credentials::new("https://example.com/", "key");
        assert_eq!(
            creds.endpoint_url("/items/5/get"),
            "https://example.com/api/items/5/get"
        );

        let creds = Credentials::new("https://example.com", "key");
        assert_eq!(
            creds.endpoint_url("/items/5/get"),
            "https://example.com/api/items/5/get"
        );
    }

    #[test]
    fn test_endpoint_url_prefix_variants() {
        let creds = Credentials::new("https://example.com", "key").with_api_path_prefix("");
        assert_eq!(
            creds.endpoint_url("/items/1/delete"),
            "https://example.com/items/1/delete"
        );

        let creds = Credentials::new("https://example.com", "key").with_api_path_prefix("pleasanter/api/");
        assert_eq!(
            creds.endpoint_url("/items/1/delete"),
            "https://example.com/pleasanter/api/items/1/delete"
        );
    }

    #[test]
    fn test_validate() {
        assert!(Credentials::new("https://example.com", "key").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "key").validate(),
            Err(Error::MissingConfigField { .. })
        ));
        assert!(matches!(
            Credentials::new("https://example.com", "").validate(),
            Err(Error::MissingConfigField { .. })
        ));
        assert!(matches!(
            Credentials::new("not a url", "key").validate(),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Credentials::new("ftp://example.com", "key").validate(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new("https://example.com", "super-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let creds: Credentials = serde_json::from_str(
            r#"{"base_url": "https://example.com", "api_key": "k"}"#,
        )
        .unwrap();
        assert_eq!(creds.api_version, ApiVersion::V1_1);
        assert_eq!(creds.api_path_prefix, "/api");
    }
}

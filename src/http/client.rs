//! reqwest-backed transport for the item API
//!
//! Handles:
//! - URL assembly from credentials and endpoint path
//! - Merging `ApiKey`/`ApiVersion` into the JSON body
//! - Classifying failures as transport errors
//!
//! There is no retry, backoff or rate limiting here; the first failure is
//! returned as-is.

use super::transport::{Transport, API_KEY_FIELD, API_VERSION_FIELD};
use crate::credentials::Credentials;
use crate::error::{Error, Result, TransportError};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("pleasanter-connector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP transport bound to one set of credentials
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    credentials: Credentials,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: HttpClientConfig) -> Result<Self> {
        credentials.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    /// Body with auth fields applied first; explicit body keys override them
    pub fn authenticated_body(&self, body: JsonObject) -> JsonObject {
        let mut merged = JsonObject::new();
        merged.insert(
            API_VERSION_FIELD.into(),
            JsonValue::String(self.credentials.api_version.as_str().to_string()),
        );
        merged.insert(
            API_KEY_FIELD.into(),
            JsonValue::String(self.credentials.api_key.clone()),
        );

        for (key, value) in body {
            if key == API_KEY_FIELD || key == API_VERSION_FIELD {
                debug!(field = %key, "Request body overrides credential field");
            }
            merged.insert(key, value);
        }

        merged
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, method: Method, endpoint: &str, body: JsonObject) -> Result<JsonValue> {
        let url = self.credentials.endpoint_url(endpoint);
        let body = self.authenticated_body(body);

        debug!("Sending {} {}", method, url);

        let mut req = self.client.request(method.clone(), &url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        // .json() also sets Content-Type: application/json
        let response = req.json(&body).send().await.map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), text));
        }

        let text = response.text().await.map_err(TransportError::from)?;
        let value: JsonValue = serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("response is not JSON: {e}")))?;

        if !value.is_object() {
            return Err(Error::decode("response is not a JSON object"));
        }

        debug!("Request succeeded: {} {}", method, url);
        Ok(value)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

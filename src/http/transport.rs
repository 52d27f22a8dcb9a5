//! Transport seam between orchestration and the network

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use reqwest::Method;

/// Body field carrying the API key
pub const API_KEY_FIELD: &str = "ApiKey";

/// Body field carrying the API version
pub const API_VERSION_FIELD: &str = "ApiVersion";

/// Sends one request and returns the parsed JSON body.
///
/// Implementations add authentication and report every failure to obtain a
/// JSON object as [`crate::Error::Transport`]. They never look at the
/// `StatusCode` inside the body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` to `endpoint` (a path such as `/items/1/get`)
    async fn send(&self, method: Method, endpoint: &str, body: JsonObject) -> Result<JsonValue>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, method: Method, endpoint: &str, body: JsonObject) -> Result<JsonValue> {
        (**self).send(method, endpoint, body).await
    }
}

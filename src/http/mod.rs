//! HTTP transport module
//!
//! The item API takes every call as a JSON `POST` and authenticates through
//! body fields, not headers.
//!
//! # Failure classification
//!
//! - Connection errors and timeouts: [`crate::error::TransportError::Request`]
//! - Non-2xx HTTP status: [`crate::error::TransportError::Status`]
//! - Body that is not a JSON object: [`crate::error::TransportError::Decode`]

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::{Transport, API_KEY_FIELD, API_VERSION_FIELD};

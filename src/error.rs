//! Error types for the Pleasanter connector
//!
//! Two failure kinds must stay distinguishable to callers:
//!
//! - [`Error::Transport`]: the request never produced a usable JSON envelope
//!   (connection failure, timeout, non-2xx HTTP status, malformed body).
//! - [`Error::Api`]: the server answered, but the `StatusCode` inside the
//!   envelope was not 200.
//!
//! Neither kind is ever retried by this crate.

use thiserror::Error;

/// The main error type for the connector
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Remote Call Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error: StatusCode {status_code}{}", message_suffix(.message))]
    Api {
        status_code: i64,
        message: Option<String>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Cause of a transport-level failure
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, timeout or body read failure reported by the HTTP client
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a JSON envelope
    #[error("malformed response: {message}")]
    Decode { message: String },
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(" - {m}"),
        _ => String::new(),
    }
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an application-level error from an envelope status
    pub fn api(status_code: i64, message: Option<String>) -> Self {
        Self::Api {
            status_code,
            message,
        }
    }

    /// Create a non-2xx transport error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Transport(TransportError::Status {
            status,
            body: body.into(),
        })
    }

    /// Create a malformed-response transport error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Transport(TransportError::Decode {
            message: message.into(),
        })
    }

    /// Whether this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Whether this error came from a non-200 `StatusCode` in the envelope
    pub fn is_application(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(TransportError::Request(e))
    }
}

/// Result type alias for the connector
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

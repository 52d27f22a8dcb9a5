// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

//! # Pleasanter Connector
//!
//! Maps flat, user-facing parameters onto the Pleasanter item API
//! (`/items/{id}/{get|create|update|delete}`) and turns its status-coded
//! envelopes into output items.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pleasanter_connector::{Credentials, Executor, HttpClient, ItemRequest};
//!
//! #[tokio::main]
//! async fn main() -> pleasanter_connector::Result<()> {
//!     let creds = Credentials::new("https://pleasanter.example.com", "api-key");
//!     let executor = Executor::new(HttpClient::new(creds)?);
//!
//!     let request: ItemRequest = serde_json::from_value(serde_json::json!({
//!         "operation": "get",
//!         "id": 100,
//!         "view": {"incomplete": true, "gridColumns": "Title,Status"}
//!     }))?;
//!
//!     for item in executor.run(&[request]).await? {
//!         println!("{}", item.json);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Executor (per input item)                    │
//! │  ItemRequest → body → Transport::send → StatusCode → normalize  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┼────────────────┬────────────────┐
//! │   Request   │      HTTP      │    Response    │     Config     │
//! ├─────────────┼────────────────┼────────────────┼────────────────┤
//! │ View        │ POST + auth    │ Envelope       │ YAML / JSON    │
//! │ RecordData  │ Timeout        │ Flat / Raw     │ Flags / Env    │
//! │ Hashes      │ Status/Decode  │ Narrow writes  │ Credentials    │
//! └─────────────┴────────────────┴────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Server credentials
pub mod credentials;

/// Configuration file loading
pub mod config;

/// Parameter-to-body mapping
pub mod request;

/// HTTP transport
pub mod http;

/// Envelope checking and normalization
pub mod response;

/// Per-item execution
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use credentials::Credentials;
pub use engine::{CheckResult, Executor, ItemRequest, OutputItem};
pub use http::{HttpClient, HttpClientConfig, Transport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

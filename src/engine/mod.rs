//! Per-input-record orchestration
//!
//! ```text
//! ItemRequest ─► build body ─► Transport::send ─► check StatusCode ─► normalize ─► OutputItem(s)
//! ```
//!
//! With [`crate::types::ErrorStrategy::Continue`] a failing record yields a
//! single `{"error": ...}` item and the batch goes on; otherwise the first
//! failure aborts the batch.

mod executor;
mod types;

pub use executor::Executor;
pub use types::{
    CheckResult, CreateRequest, DeleteRequest, GetRequest, ItemRequest, OutputItem, UpdateRequest,
};

#[cfg(test)]
mod tests;

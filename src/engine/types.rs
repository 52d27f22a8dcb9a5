//! Per-item request parameters and output types

use crate::request::{
    build_get_body, build_write_body, items_endpoint, ItemId, ProcessOptions, RecordData,
    ViewOptions,
};
use crate::types::{JsonObject, JsonValue, Operation, OutputMode};
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Parameters for one input record, tagged by `operation`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum ItemRequest {
    Get(GetRequest),
    Create(CreateRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
}

/// Fetch one record, or the records of a site
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequest {
    #[serde(alias = "siteIdOrRecordId")]
    pub id: ItemId,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default)]
    pub view: ViewOptions,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
}

/// Create a record in a site
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub site_id: ItemId,
    #[serde(default)]
    pub record_data: RecordData,
    #[serde(default)]
    pub process_options: ProcessOptions,
}

/// Partially update a record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub record_id: ItemId,
    #[serde(default)]
    pub record_data: RecordData,
    #[serde(default)]
    pub process_options: ProcessOptions,
}

/// Delete a record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub record_id: ItemId,
}

impl GetRequest {
    /// Get with default output mode and no view
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            output_mode: OutputMode::default(),
            view: ViewOptions::default(),
            offset: None,
            page_size: None,
        }
    }
}

impl ItemRequest {
    /// Operation this request performs
    pub fn operation(&self) -> Operation {
        match self {
            ItemRequest::Get(_) => Operation::Get,
            ItemRequest::Create(_) => Operation::Create,
            ItemRequest::Update(_) => Operation::Update,
            ItemRequest::Delete(_) => Operation::Delete,
        }
    }

    /// Site or record id placed in the path
    pub fn target(&self) -> ItemId {
        match self {
            ItemRequest::Get(r) => r.id,
            ItemRequest::Create(r) => r.site_id,
            ItemRequest::Update(r) => r.record_id,
            ItemRequest::Delete(r) => r.record_id,
        }
    }

    /// Path below the API prefix
    pub fn endpoint(&self) -> String {
        items_endpoint(self.target(), self.operation())
    }

    /// Request body without credentials
    pub fn body(&self) -> JsonObject {
        match self {
            ItemRequest::Get(r) => build_get_body(Some(&r.view), r.offset, r.page_size),
            ItemRequest::Create(r) => build_write_body(&r.record_data, &r.process_options),
            ItemRequest::Update(r) => build_write_body(&r.record_data, &r.process_options),
            ItemRequest::Delete(_) => JsonObject::new(),
        }
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// One emitted output unit, tied back to the input record that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    pub json: JsonValue,
    pub item_index: usize,
}

impl OutputItem {
    /// Wrap a normalized value
    pub fn new(json: JsonValue, item_index: usize) -> Self {
        Self { json, item_index }
    }

    /// `{"error": message}` marker for a failed record
    pub fn error(message: impl Into<String>, item_index: usize) -> Self {
        Self {
            json: serde_json::json!({ "error": message.into() }),
            item_index,
        }
    }

    /// Whether this is an error marker
    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .is_some_and(|o| o.len() == 1 && o.contains_key("error"))
    }
}

/// Result of a connection check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

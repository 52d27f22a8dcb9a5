//! Record payload and process options for create/update
//!
//! Only fields the caller explicitly set end up in the body, so an update
//! touches exactly the columns it names.

use super::fields::{format_datetime, CommaList, FieldInput, HashValue, NumericInput};
use crate::types::{JsonObject, JsonValue};
use base64::Engine as _;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Record Data
// ============================================================================

/// Sparse record payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordData {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<NumericInput>,
    pub manager: Option<NumericInput>,
    pub owner: Option<NumericInput>,
    pub comments: Option<String>,
    pub locked: Option<bool>,
    pub start_time: Option<String>,
    pub completion_time: Option<String>,
    pub work_value: Option<NumericInput>,
    pub progress_rate: Option<NumericInput>,
    pub remaining_work_value: Option<NumericInput>,
    pub class_hash: Option<FieldInput>,
    pub num_hash: Option<FieldInput>,
    pub date_hash: Option<FieldInput>,
    pub description_hash: Option<FieldInput>,
    pub check_hash: Option<FieldInput>,
    pub attachments_hash: Option<FieldInput>,
}

impl RecordData {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: i64) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    #[must_use]
    pub fn start_time(mut self, time: NaiveDateTime) -> Self {
        self.start_time = Some(format_datetime(&time));
        self
    }

    #[must_use]
    pub fn completion_time(mut self, time: NaiveDateTime) -> Self {
        self.completion_time = Some(format_datetime(&time));
        self
    }

    /// Set a `ClassHash` column
    #[must_use]
    pub fn class(self, column: impl Into<String>, value: impl Into<HashValue>) -> Self {
        self.with_hash_entry(|r| &mut r.class_hash, column, value)
    }

    /// Set a `NumHash` column
    #[must_use]
    pub fn num(self, column: impl Into<String>, value: impl Into<HashValue>) -> Self {
        self.with_hash_entry(|r| &mut r.num_hash, column, value)
    }

    /// Set a `DateHash` column
    #[must_use]
    pub fn date(self, column: impl Into<String>, value: impl Into<HashValue>) -> Self {
        self.with_hash_entry(|r| &mut r.date_hash, column, value)
    }

    /// Set a `DescriptionHash` column
    #[must_use]
    pub fn description(self, column: impl Into<String>, value: impl Into<HashValue>) -> Self {
        self.with_hash_entry(|r| &mut r.description_hash, column, value)
    }

    /// Set a `CheckHash` column
    #[must_use]
    pub fn check(self, column: impl Into<String>, value: bool) -> Self {
        self.with_hash_entry(|r| &mut r.check_hash, column, value)
    }

    /// Attach files to an attachment column, after any already attached
    #[must_use]
    pub fn attachments(mut self, column: impl Into<String>, files: Vec<Attachment>) -> Self {
        let mut object = structured_object(self.attachments_hash.take());
        let files = files.into_iter().filter_map(|f| serde_json::to_value(f).ok());
        match object.entry(column.into()) {
            serde_json::map::Entry::Occupied(mut slot) => match slot.get_mut() {
                JsonValue::Array(existing) => existing.extend(files),
                other => *other = JsonValue::Array(files.collect()),
            },
            serde_json::map::Entry::Vacant(slot) => {
                slot.insert(JsonValue::Array(files.collect()));
            }
        }
        self.attachments_hash = Some(FieldInput::Value(JsonValue::Object(object)));
        self
    }

    fn with_hash_entry(
        mut self,
        slot: impl Fn(&mut Self) -> &mut Option<FieldInput>,
        column: impl Into<String>,
        value: impl Into<HashValue>,
    ) -> Self {
        let field = slot(&mut self);
        let mut object = structured_object(field.take());
        object.insert(
            column.into(),
            serde_json::to_value(value.into()).unwrap_or(JsonValue::Null),
        );
        *field = Some(FieldInput::Value(JsonValue::Object(object)));
        self
    }

    /// Build the body fields for this payload
    pub fn to_body(&self) -> JsonObject {
        let mut body = JsonObject::new();

        put_text(&mut body, "Title", self.title.as_ref());
        put_text(&mut body, "Body", self.body.as_ref());
        put_number(&mut body, "Status", self.status.as_ref());
        put_number(&mut body, "Manager", self.manager.as_ref());
        put_number(&mut body, "Owner", self.owner.as_ref());
        put_text(&mut body, "Comments", self.comments.as_ref());
        if let Some(locked) = self.locked {
            body.insert("Locked".into(), JsonValue::Bool(locked));
        }

        // Only meaningful on tables with schedules
        put_text(&mut body, "StartTime", self.start_time.as_ref());
        put_text(&mut body, "CompletionTime", self.completion_time.as_ref());
        put_number(&mut body, "WorkValue", self.work_value.as_ref());
        put_number(&mut body, "ProgressRate", self.progress_rate.as_ref());
        put_number(
            &mut body,
            "RemainingWorkValue",
            self.remaining_work_value.as_ref(),
        );

        put_hash::<HashValue>(&mut body, "ClassHash", self.class_hash.as_ref());
        put_hash::<HashValue>(&mut body, "NumHash", self.num_hash.as_ref());
        put_hash::<HashValue>(&mut body, "DateHash", self.date_hash.as_ref());
        put_hash::<HashValue>(
            &mut body,
            "DescriptionHash",
            self.description_hash.as_ref(),
        );
        put_hash::<HashValue>(&mut body, "CheckHash", self.check_hash.as_ref());
        put_hash::<Vec<Attachment>>(
            &mut body,
            "AttachmentsHash",
            self.attachments_hash.as_ref(),
        );

        body
    }
}

fn structured_object(input: Option<FieldInput>) -> JsonObject {
    match input {
        Some(FieldInput::Value(JsonValue::Object(map))) => map,
        Some(FieldInput::Json(text)) => match serde_json::from_str(&text) {
            Ok(JsonValue::Object(map)) => map,
            _ => JsonObject::new(),
        },
        _ => JsonObject::new(),
    }
}

// ============================================================================
// Attachments
// ============================================================================

/// File descriptor inside `AttachmentsHash`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

impl Attachment {
    /// Upload descriptor for raw file bytes
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self {
            guid: None,
            name: Some(name.into()),
            size: Some(bytes.len() as u64),
            content_type: Some(content_type.into()),
            base64: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        }
    }
}

// ============================================================================
// Process Options
// ============================================================================

/// Workflow trigger metadata for create/update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessOptions {
    pub process_id: Option<NumericInput>,
    pub process_ids: Option<CommaList>,
    /// Grants such as `Dept,1,31`
    pub record_permissions: Option<CommaList>,
}

impl ProcessOptions {
    /// Build the body fields for these options
    pub fn to_body(&self) -> JsonObject {
        let mut body = JsonObject::new();

        put_number(&mut body, "ProcessId", self.process_id.as_ref());

        if let Some(list) = &self.process_ids {
            let ids = list.ids("ProcessIds");
            if !ids.is_empty() {
                body.insert("ProcessIds".into(), JsonValue::from(ids));
            }
        }

        put_list(&mut body, "RecordPermissions", self.record_permissions.as_ref());

        body
    }
}

// ============================================================================
// Body helpers
// ============================================================================

pub(crate) fn put_text(body: &mut JsonObject, key: &str, value: Option<&String>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        body.insert(key.into(), JsonValue::String(v.clone()));
    }
}

pub(crate) fn put_number(body: &mut JsonObject, key: &str, value: Option<&NumericInput>) {
    if let Some(n) = value.and_then(|v| v.coerce(key)) {
        body.insert(key.into(), JsonValue::Number(n));
    }
}

pub(crate) fn put_hash<V>(body: &mut JsonObject, key: &str, value: Option<&FieldInput>)
where
    V: Serialize + serde::de::DeserializeOwned,
{
    let Some(map) = value.and_then(|v| v.resolve::<V>(key)) else {
        return;
    };
    if let Ok(value) = serde_json::to_value(map) {
        body.insert(key.into(), value);
    }
}

pub(crate) fn put_list(body: &mut JsonObject, key: &str, value: Option<&CommaList>) {
    if let Some(list) = value {
        let items = list.values();
        if !items.is_empty() {
            body.insert(key.into(), JsonValue::from(items));
        }
    }
}

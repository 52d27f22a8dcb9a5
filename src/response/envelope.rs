//! Typed view over the JSON envelope every item API call returns

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// Top-level response object
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status_code: i64,
    pub limit_per_date: Option<i64>,
    pub limit_remaining: Option<i64>,
    pub message: Option<String>,
    /// Set by create/update/delete
    pub id: Option<i64>,
    pub response: Option<PageResponse>,
}

/// Paginated payload of a get
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResponse {
    pub offset: Option<i64>,
    pub page_size: Option<i64>,
    pub total_count: Option<i64>,
    pub data: Option<Vec<JsonValue>>,
}

impl Envelope {
    /// Read the envelope out of a raw response body.
    ///
    /// A body without a numeric `StatusCode` is a malformed response and
    /// reported as a transport error.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::decode("response is not a JSON object"))?;

        if !object.get("StatusCode").is_some_and(JsonValue::is_i64) {
            return Err(Error::decode("response has no numeric StatusCode"));
        }

        Ok(Self {
            status_code: object["StatusCode"].as_i64().unwrap_or_default(),
            limit_per_date: object.get("LimitPerDate").and_then(JsonValue::as_i64),
            limit_remaining: object.get("LimitRemaining").and_then(JsonValue::as_i64),
            message: object
                .get("Message")
                .and_then(JsonValue::as_str)
                .map(String::from),
            id: object.get("Id").and_then(JsonValue::as_i64),
            response: object
                .get("Response")
                .and_then(JsonValue::as_object)
                .map(PageResponse::from_object),
        })
    }

    /// Rate-limit and status fields shared by every flattened record
    pub fn metadata(&self) -> JsonObject {
        let mut meta = JsonObject::new();
        meta.insert("StatusCode".into(), self.status_code.into());
        insert_opt(&mut meta, "LimitPerDate", self.limit_per_date);
        insert_opt(&mut meta, "LimitRemaining", self.limit_remaining);
        meta
    }
}

impl PageResponse {
    fn from_object(object: &JsonObject) -> Self {
        Self {
            offset: object.get("Offset").and_then(JsonValue::as_i64),
            page_size: object.get("PageSize").and_then(JsonValue::as_i64),
            total_count: object.get("TotalCount").and_then(JsonValue::as_i64),
            data: object
                .get("Data")
                .and_then(JsonValue::as_array)
                .cloned(),
        }
    }

    /// Pagination fields shared by every flattened record
    pub fn metadata(&self) -> JsonObject {
        let mut meta = JsonObject::new();
        insert_opt(&mut meta, "Offset", self.offset);
        insert_opt(&mut meta, "PageSize", self.page_size);
        insert_opt(&mut meta, "TotalCount", self.total_count);
        meta
    }
}

fn insert_opt(object: &mut JsonObject, key: &str, value: Option<i64>) {
    if let Some(v) = value {
        object.insert(key.into(), v.into());
    }
}

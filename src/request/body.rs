//! Endpoint paths and per-operation body builders

use super::record::{ProcessOptions, RecordData};
use super::view::ViewOptions;
use crate::types::{JsonObject, JsonValue, Operation};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Site or record identifier used in the item path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| format!("'{s}' is not a valid site or record id"))
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::Number(n) => n
                .as_u64()
                .map(Self)
                .ok_or_else(|| de::Error::custom(format!("{n} is not a valid id"))),
            JsonValue::String(s) => s.parse().map_err(de::Error::custom),
            other => Err(de::Error::custom(format!("expected an id, got {other}"))),
        }
    }
}

/// Path below the API prefix, e.g. `/items/42/update`
pub fn items_endpoint(id: ItemId, operation: Operation) -> String {
    format!("/items/{id}/{}", operation.action())
}

/// Body for a get request
///
/// `Offset` and `PageSize` sit at the top level, beside `View`.
pub fn build_get_body(
    view: Option<&ViewOptions>,
    offset: Option<u64>,
    page_size: Option<u64>,
) -> JsonObject {
    let mut body = JsonObject::new();

    if let Some(offset) = offset {
        body.insert("Offset".into(), JsonValue::from(offset));
    }
    if let Some(page_size) = page_size {
        body.insert("PageSize".into(), JsonValue::from(page_size));
    }
    if let Some(view) = view.and_then(ViewOptions::to_view) {
        body.insert("View".into(), JsonValue::Object(view));
    }

    body
}

/// Body for create/update: record fields, then process options
pub fn build_write_body(record: &RecordData, process: &ProcessOptions) -> JsonObject {
    let mut body = record.to_body();
    body.extend(process.to_body());
    body
}

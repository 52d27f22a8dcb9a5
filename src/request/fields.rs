//! Input normalization shared by every request field
//!
//! Callers hand over loosely shaped values (JSON strings, comma lists,
//! numbers typed as text). Everything here degrades to "field absent"
//! instead of failing: a value that cannot be normalized is dropped with a
//! warning and never reaches the outgoing body.

use crate::types::JsonValue;
use chrono::NaiveDateTime;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

/// Wire format for date values built from [`NaiveDateTime`]
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ============================================================================
// Hash fields
// ============================================================================

/// Open-ended column map (`ClassHash`, `ColumnFilterHash`, ...)
pub type ColumnHash<V> = BTreeMap<String, V>;

/// A hash field as supplied by the caller: structured, or a JSON string
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// JSON text still to be parsed
    Json(String),
    /// Already structured value
    Value(JsonValue),
}

impl FieldInput {
    /// Wrap a caller-built map
    pub fn from_map<V: Serialize>(map: ColumnHash<V>) -> Self {
        // a value that fails to serialize resolves to absent, like bad JSON text
        Self::Value(serde_json::to_value(map).unwrap_or(JsonValue::Null))
    }

    /// Resolve into a column map.
    ///
    /// Returns `None` when the text does not parse, the value is not an
    /// object, or no usable entry remains. Entries with a blank key or a
    /// value that does not convert are dropped one by one.
    pub fn resolve<V: DeserializeOwned>(&self, field: &str) -> Option<ColumnHash<V>> {
        let value = match self {
            FieldInput::Json(text) => {
                if text.trim().is_empty() {
                    return None;
                }
                match serde_json::from_str::<JsonValue>(text) {
                    Ok(v) => v,
                    Err(e) => {
                        warn!(field, error = %e, "Ignoring unparseable JSON");
                        return None;
                    }
                }
            }
            FieldInput::Value(v) => v.clone(),
        };

        let JsonValue::Object(object) = value else {
            warn!(field, "Ignoring value that is not a JSON object");
            return None;
        };

        let map: ColumnHash<V> = object
            .into_iter()
            .filter(|(key, _)| !key.trim().is_empty())
            .filter_map(|(key, entry)| match serde_json::from_value::<V>(entry) {
                Ok(v) => Some((key, v)),
                Err(e) => {
                    warn!(field, column = %key, error = %e, "Dropping column with unexpected value");
                    None
                }
            })
            .collect();

        if map.is_empty() {
            None
        } else {
            Some(map)
        }
    }
}

impl<'de> Deserialize<'de> for FieldInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::String(s) => Ok(Self::Json(s)),
            other => Ok(Self::Value(other)),
        }
    }
}

impl From<&str> for FieldInput {
    fn from(s: &str) -> Self {
        Self::Json(s.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(s: String) -> Self {
        Self::Json(s)
    }
}

impl From<JsonValue> for FieldInput {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::String(s) => Self::Json(s),
            other => Self::Value(other),
        }
    }
}

/// Value stored under a caller-chosen column key
#[derive(Debug, Clone, PartialEq)]
pub enum HashValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Date(NaiveDateTime),
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HashValue::Text(s) => serializer.serialize_str(s),
            HashValue::Number(n) => n.serialize(serializer),
            HashValue::Bool(b) => serializer.serialize_bool(*b),
            HashValue::Date(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
        }
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::String(s) => Ok(Self::Text(s)),
            JsonValue::Number(n) => Ok(Self::Number(n)),
            JsonValue::Bool(b) => Ok(Self::Bool(b)),
            other => Err(de::Error::custom(format!(
                "hash values must be strings, numbers or booleans, got {other}"
            ))),
        }
    }
}

impl From<&str> for HashValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for HashValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for HashValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for HashValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDateTime> for HashValue {
    fn from(d: NaiveDateTime) -> Self {
        Self::Date(d)
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// Numeric field that may arrive as a JSON number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    /// Coerce to a JSON number; blank or non-numeric text yields `None`
    pub fn coerce(&self, field: &str) -> Option<serde_json::Number> {
        match self {
            NumericInput::Number(n) => Some(n.clone()),
            NumericInput::Text(text) => {
                let parsed = parse_number(text);
                if parsed.is_none() && !text.trim().is_empty() {
                    warn!(field, value = %text, "Ignoring non-numeric value");
                }
                parsed
            }
        }
    }
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or_else(|| Self::Text(n.to_string()), Self::Number)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Parse text as an integer first, then as a finite float
pub fn parse_number(text: &str) -> Option<serde_json::Number> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(i.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}

// ============================================================================
// Comma lists
// ============================================================================

/// List field given either as `"a, b, c"` or as a JSON array of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommaList {
    Items(Vec<String>),
    Text(String),
}

impl CommaList {
    /// Trimmed, non-empty elements in input order
    pub fn values(&self) -> Vec<String> {
        match self {
            CommaList::Text(text) => split_comma_list(text),
            CommaList::Items(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Elements parsed as integer ids; `"2.0"` counts as 2, anything else
    /// that is not a whole number is dropped
    pub fn ids(&self, field: &str) -> Vec<i64> {
        self.values()
            .into_iter()
            .filter_map(|s| match parse_number(&s).as_ref().and_then(whole_number) {
                Some(id) => Some(id),
                None => {
                    warn!(field, value = %s, "Dropping non-numeric id");
                    None
                }
            })
            .collect()
    }
}

#[allow(clippy::float_cmp)]
fn whole_number(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl From<&str> for CommaList {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for CommaList {
    fn from(items: Vec<String>) -> Self {
        Self::Items(items)
    }
}

/// Split on `,`, trim each element and drop empty ones
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Format a timestamp the way the item API expects
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}

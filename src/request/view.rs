//! View (filter/sort/display) options for get requests

use super::fields::{CommaList, FieldInput, HashValue};
use super::record::{put_hash, put_list, put_text};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// How a column filter value is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchType {
    PartialMatch,
    ExactMatch,
    ForwardMatch,
    PartialMatchMultiple,
    ExactMatchMultiple,
    ForwardMatchMultiple,
}

/// Sort direction for `ColumnSorterHash`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Shape of the returned data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiDataType {
    #[default]
    Default,
    KeyValues,
}

/// Whether response keys are column names or labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyDisplayType {
    #[default]
    ColumnName,
    LabelText,
}

/// Whether response values are display strings or raw values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueDisplayType {
    #[default]
    DisplayValue,
    Value,
    Text,
}

/// Per-column display override inside `ApiColumnHash`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiColumnDisplay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_display_type: Option<KeyDisplayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_display_type: Option<ValueDisplayType>,
}

/// Optional view for get requests; every field is omitted when unset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOptions {
    pub incomplete: Option<bool>,
    pub own: Option<bool>,
    pub near_completion_time: Option<bool>,
    pub delay: Option<bool>,
    pub overdue: Option<bool>,
    pub search: Option<String>,
    pub column_filter_hash: Option<FieldInput>,
    pub column_filter_search_types: Option<FieldInput>,
    pub column_filter_negatives: Option<CommaList>,
    pub column_sorter_hash: Option<FieldInput>,
    pub grid_columns: Option<CommaList>,
    pub api_data_type: Option<ApiDataType>,
    pub api_column_key_display_type: Option<KeyDisplayType>,
    pub api_column_value_display_type: Option<ValueDisplayType>,
    pub api_column_hash: Option<FieldInput>,
    pub merge_session_view_filters: Option<bool>,
    pub merge_session_view_sorters: Option<bool>,
}

impl ViewOptions {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn incomplete(mut self, value: bool) -> Self {
        self.incomplete = Some(value);
        self
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    #[must_use]
    pub fn grid_columns(mut self, columns: impl Into<CommaList>) -> Self {
        self.grid_columns = Some(columns.into());
        self
    }

    /// Build the `View` object, or `None` when nothing ended up set
    pub fn to_view(&self) -> Option<JsonObject> {
        let mut view = JsonObject::new();

        let flags = [
            ("Incomplete", self.incomplete),
            ("Own", self.own),
            ("NearCompletionTime", self.near_completion_time),
            ("Delay", self.delay),
            ("Overdue", self.overdue),
        ];
        for (key, flag) in flags {
            if let Some(b) = flag {
                view.insert(key.into(), JsonValue::Bool(b));
            }
        }

        put_text(&mut view, "Search", self.search.as_ref());

        put_hash::<HashValue>(&mut view, "ColumnFilterHash", self.column_filter_hash.as_ref());
        put_hash::<SearchType>(
            &mut view,
            "ColumnFilterSearchTypes",
            self.column_filter_search_types.as_ref(),
        );
        put_list(
            &mut view,
            "ColumnFilterNegatives",
            self.column_filter_negatives.as_ref(),
        );
        put_hash::<SortDirection>(&mut view, "ColumnSorterHash", self.column_sorter_hash.as_ref());
        put_list(&mut view, "GridColumns", self.grid_columns.as_ref());

        // Server defaults are left implicit
        put_non_default(&mut view, "ApiDataType", self.api_data_type);
        put_non_default(
            &mut view,
            "ApiColumnKeyDisplayType",
            self.api_column_key_display_type,
        );
        put_non_default(
            &mut view,
            "ApiColumnValueDisplayType",
            self.api_column_value_display_type,
        );
        put_hash::<ApiColumnDisplay>(&mut view, "ApiColumnHash", self.api_column_hash.as_ref());

        if let Some(b) = self.merge_session_view_filters {
            view.insert("MergeSessionViewFilters".into(), JsonValue::Bool(b));
        }
        if let Some(b) = self.merge_session_view_sorters {
            view.insert("MergeSessionViewSorters".into(), JsonValue::Bool(b));
        }

        if view.is_empty() {
            None
        } else {
            Some(view)
        }
    }
}

fn put_non_default<T>(view: &mut JsonObject, key: &str, value: Option<T>)
where
    T: Serialize + Default + PartialEq,
{
    if let Some(v) = value.filter(|v| *v != T::default()) {
        if let Ok(json) = serde_json::to_value(v) {
            view.insert(key.into(), json);
        }
    }
}

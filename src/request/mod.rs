//! Request builder module
//!
//! Turns sparse, loosely typed caller input into item API bodies.
//!
//! # Omission rules
//!
//! - Strings are sent only when non-empty
//! - Numbers are coerced with a numeric parse; non-numeric input is dropped
//! - Booleans are sent whenever set, including `false`
//! - Hash fields accept a map or a JSON string; bad JSON or an empty map is dropped
//! - Comma lists are trimmed, empty elements removed, and an empty list is dropped
//! - An empty `View` is never sent

mod body;
mod fields;
mod record;
mod view;

pub use body::{build_get_body, build_write_body, items_endpoint, ItemId};
pub use fields::{
    format_datetime, parse_number, split_comma_list, ColumnHash, CommaList, FieldInput,
    HashValue, NumericInput, DATE_FORMAT,
};
pub use record::{Attachment, ProcessOptions, RecordData};
pub use view::{
    ApiColumnDisplay, ApiDataType, KeyDisplayType, SearchType, SortDirection, ValueDisplayType,
    ViewOptions,
};

//! Status check and output shaping

use super::envelope::Envelope;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, OutputMode};
use tracing::debug;

/// The only `StatusCode` that means success
pub const SUCCESS_STATUS: i64 = 200;

/// Fail unless the envelope reports `StatusCode` 200
pub fn check_status(envelope: &Envelope) -> Result<()> {
    if envelope.status_code == SUCCESS_STATUS {
        Ok(())
    } else {
        Err(Error::api(envelope.status_code, envelope.message.clone()))
    }
}

/// Parse and check a raw response body
pub fn checked_envelope(raw: &JsonValue) -> Result<Envelope> {
    let envelope = Envelope::from_value(raw)?;
    check_status(&envelope)?;
    Ok(envelope)
}

/// Output items for a get
///
/// Raw mode returns the body untouched. Flat mode emits one item per
/// `Response.Data` element (metadata first, record fields win on collision);
/// without `Response.Data` the whole body is emitted once.
pub fn normalize_get(raw: JsonValue, mode: OutputMode) -> Result<Vec<JsonValue>> {
    let envelope = checked_envelope(&raw)?;

    if mode == OutputMode::Raw {
        return Ok(vec![raw]);
    }

    let Some(page) = envelope.response.as_ref() else {
        return Ok(vec![raw]);
    };
    let Some(data) = page.data.as_ref() else {
        return Ok(vec![raw]);
    };

    let mut shared = envelope.metadata();
    shared.extend(page.metadata());

    debug!(records = data.len(), "Flattening get response");

    Ok(data
        .iter()
        .map(|record| JsonValue::Object(flatten_record(&shared, record)))
        .collect())
}

fn flatten_record(shared: &JsonObject, record: &JsonValue) -> JsonObject {
    let mut item = shared.clone();
    match record {
        JsonValue::Object(fields) => {
            for (key, value) in fields {
                item.insert(key.clone(), value.clone());
            }
        }
        other => {
            item.insert("Data".into(), other.clone());
        }
    }
    item
}

/// Output item for create/update/delete: status, limits, id and message only
pub fn normalize_mutation(raw: &JsonValue) -> Result<JsonValue> {
    let envelope = checked_envelope(raw)?;

    let mut item = envelope.metadata();
    if let Some(id) = envelope.id {
        item.insert("Id".into(), id.into());
    }
    if let Some(message) = envelope.message {
        item.insert("Message".into(), message.into());
    }

    Ok(JsonValue::Object(item))
}

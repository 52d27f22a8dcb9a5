//! Tests for the response normalizer

use super::*;
use crate::error::Error;
use crate::types::OutputMode;
use pretty_assertions::assert_eq;
use serde_json::json;

fn page_envelope() -> serde_json::Value {
    json!({
        "StatusCode": 200,
        "LimitRemaining": 9,
        "Response": {
            "Offset": 0,
            "PageSize": 2,
            "TotalCount": 5,
            "Data": [{"ResultId": 1}, {"ResultId": 2}]
        }
    })
}

// ============================================================================
// Envelope
// ============================================================================

#[test]
fn test_envelope_from_value() {
    let envelope = Envelope::from_value(&json!({
        "StatusCode": 200,
        "LimitPerDate": 10000,
        "LimitRemaining": 9999,
        "Message": "ok",
        "Id": 15
    }))
    .unwrap();

    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.limit_per_date, Some(10000));
    assert_eq!(envelope.limit_remaining, Some(9999));
    assert_eq!(envelope.message.as_deref(), Some("ok"));
    assert_eq!(envelope.id, Some(15));
    assert!(envelope.response.is_none());
}

#[test]
fn test_envelope_without_status_code_is_malformed() {
    let err = Envelope::from_value(&json!({"Message": "?"})).unwrap_err();
    assert!(err.is_transport());

    let err = Envelope::from_value(&json!({"StatusCode": "200"})).unwrap_err();
    assert!(err.is_transport());

    let err = Envelope::from_value(&json!("text")).unwrap_err();
    assert!(err.is_transport());
}

// ============================================================================
// Status check
// ============================================================================

#[test]
fn test_check_status_success() {
    assert!(checked_envelope(&json!({"StatusCode": 200})).is_ok());
}

#[test]
fn test_check_status_failure_message() {
    let err = checked_envelope(&json!({"StatusCode": 403, "Message": "Forbidden"})).unwrap_err();

    assert!(err.is_application());
    let message = err.to_string();
    assert!(message.contains("403"));
    assert!(message.contains("Forbidden"));
}

#[test]
fn test_check_status_other_codes_fail() {
    for code in [0, 201, 400, 429, 500] {
        let err = checked_envelope(&json!({"StatusCode": code})).unwrap_err();
        match err {
            Error::Api {
                status_code,
                message,
            } => {
                assert_eq!(status_code, code);
                assert!(message.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

// ============================================================================
// Get
// ============================================================================

#[test]
fn test_flat_get_emits_one_item_per_record() {
    let items = normalize_get(page_envelope(), OutputMode::Flat).unwrap();

    assert_eq!(
        items,
        vec![
            json!({
                "StatusCode": 200,
                "LimitRemaining": 9,
                "Offset": 0,
                "PageSize": 2,
                "TotalCount": 5,
                "ResultId": 1
            }),
            json!({
                "StatusCode": 200,
                "LimitRemaining": 9,
                "Offset": 0,
                "PageSize": 2,
                "TotalCount": 5,
                "ResultId": 2
            }),
        ]
    );
}

#[test]
fn test_flat_get_record_fields_win() {
    let raw = json!({
        "StatusCode": 200,
        "Response": {"TotalCount": 1, "Data": [{"TotalCount": "own", "Title": "t"}]}
    });
    let items = normalize_get(raw, OutputMode::Flat).unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["TotalCount"], "own");
    assert_eq!(items[0]["Title"], "t");
    assert!(items[0].get("LimitPerDate").is_none());
}

#[test]
fn test_flat_get_preserves_order() {
    let data: Vec<_> = (1..=20).rev().map(|i| json!({"ResultId": i})).collect();
    let raw = json!({"StatusCode": 200, "Response": {"Data": data}});

    let ids: Vec<i64> = normalize_get(raw, OutputMode::Flat)
        .unwrap()
        .iter()
        .map(|item| item["ResultId"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, (1..=20).rev().collect::<Vec<i64>>());
}

#[test]
fn test_flat_get_single_element_data() {
    let raw = json!({
        "StatusCode": 200,
        "Response": {"Offset": 0, "PageSize": 200, "TotalCount": 1, "Data": [{"IssueId": 42}]}
    });
    let items = normalize_get(raw, OutputMode::Flat).unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["IssueId"], 42);
    assert_eq!(items[0]["TotalCount"], 1);
}

#[test]
fn test_flat_get_empty_data_emits_nothing() {
    let raw = json!({"StatusCode": 200, "Response": {"TotalCount": 0, "Data": []}});
    assert!(normalize_get(raw, OutputMode::Flat).unwrap().is_empty());
}

#[test]
fn test_flat_get_without_data_emits_envelope() {
    let raw = json!({"StatusCode": 200, "LimitRemaining": 3});
    let items = normalize_get(raw.clone(), OutputMode::Flat).unwrap();
    assert_eq!(items, vec![raw]);

    let raw = json!({"StatusCode": 200, "Response": {"TotalCount": 0}});
    let items = normalize_get(raw.clone(), OutputMode::Flat).unwrap();
    assert_eq!(items, vec![raw]);
}

#[test]
fn test_raw_get_returns_envelope_unchanged() {
    let raw = page_envelope();
    let items = normalize_get(raw.clone(), OutputMode::Raw).unwrap();
    assert_eq!(items, vec![raw]);
}

#[test]
fn test_get_failure_status() {
    let raw = json!({"StatusCode": 404, "Message": "Not found"});
    let err = normalize_get(raw.clone(), OutputMode::Raw).unwrap_err();
    assert!(err.is_application());
    assert!(normalize_get(raw, OutputMode::Flat).is_err());
}

// ============================================================================
// Mutations
// ============================================================================

#[test]
fn test_mutation_output_is_narrow() {
    let raw = json!({
        "Id": 1234,
        "StatusCode": 200,
        "LimitPerDate": 10000,
        "LimitRemaining": 9990,
        "Message": "Created",
        "Title": "should not be echoed",
        "Response": {"Data": [{"ResultId": 1}]}
    });

    assert_eq!(
        normalize_mutation(&raw).unwrap(),
        json!({
            "StatusCode": 200,
            "LimitPerDate": 10000,
            "LimitRemaining": 9990,
            "Id": 1234,
            "Message": "Created"
        })
    );
}

#[test]
fn test_mutation_output_omits_absent_fields() {
    assert_eq!(
        normalize_mutation(&json!({"StatusCode": 200})).unwrap(),
        json!({"StatusCode": 200})
    );
}

#[test]
fn test_mutation_failure_status() {
    let err = normalize_mutation(&json!({"StatusCode": 500, "Message": "Error"})).unwrap_err();
    assert_eq!(err.to_string(), "API error: StatusCode 500 - Error");
}

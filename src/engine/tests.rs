//! Tests for the executor

use super::*;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::request::{ItemId, RecordData, ViewOptions};
use crate::types::{ErrorStrategy, JsonObject, JsonValue, Operation, OutputMode};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Transport that replays canned results and records what was sent
#[derive(Debug, Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<JsonValue>>>,
    sent: Mutex<Vec<(String, JsonObject)>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<JsonValue>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, JsonObject)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: Method, endpoint: &str, body: JsonObject) -> Result<JsonValue> {
        assert_eq!(method, Method::POST);
        self.sent.lock().unwrap().push((endpoint.to_string(), body));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no scripted response".into())))
    }
}

fn created(id: i64) -> Result<JsonValue> {
    Ok(json!({"StatusCode": 200, "Id": id, "Message": "Created", "LimitRemaining": 50}))
}

fn create_request(site: u64, title: &str) -> ItemRequest {
    ItemRequest::Create(CreateRequest {
        site_id: ItemId(site),
        record_data: RecordData::new().title(title),
        process_options: Default::default(),
    })
}

// ============================================================================
// Request mapping
// ============================================================================

#[test]
fn test_item_request_from_parameters() {
    let request: ItemRequest = serde_json::from_value(json!({
        "operation": "update",
        "recordId": "55",
        "recordData": {"title": "New", "locked": false},
        "processOptions": {"processIds": "1,2"}
    }))
    .unwrap();

    assert_eq!(request.operation(), Operation::Update);
    assert_eq!(request.endpoint(), "/items/55/update");
    assert_eq!(
        JsonValue::Object(request.body()),
        json!({"Title": "New", "Locked": false, "ProcessIds": [1, 2]})
    );
}

#[test]
fn test_get_request_defaults() {
    let request: ItemRequest =
        serde_json::from_value(json!({"operation": "get", "siteIdOrRecordId": 10})).unwrap();

    match &request {
        ItemRequest::Get(get) => {
            assert_eq!(get.id, ItemId(10));
            assert_eq!(get.output_mode, OutputMode::Flat);
        }
        other => panic!("unexpected request: {other:?}"),
    }
    assert!(request.body().is_empty());
}

#[test]
fn test_delete_request_has_empty_body() {
    let request = ItemRequest::Delete(DeleteRequest {
        record_id: ItemId(8),
    });
    assert_eq!(request.endpoint(), "/items/8/delete");
    assert!(request.body().is_empty());
}

#[test]
fn test_output_item_error_marker() {
    let item = OutputItem::error("boom", 2);
    assert_eq!(item.json, json!({"error": "boom"}));
    assert_eq!(item.item_index, 2);
    assert!(item.is_error());
    assert!(!OutputItem::new(json!({"error": "x", "Id": 1}), 0).is_error());
}

// ============================================================================
// Execution
// ============================================================================

#[tokio::test]
async fn test_execute_get_flat() {
    let transport = ScriptedTransport::new(vec![Ok(json!({
        "StatusCode": 200,
        "LimitRemaining": 9,
        "Response": {"Offset": 0, "PageSize": 2, "TotalCount": 5,
                     "Data": [{"ResultId": 1}, {"ResultId": 2}]}
    }))]);
    let executor = Executor::new(&transport);

    let mut get = GetRequest::new(ItemId(100));
    get.view = ViewOptions::new().search("abc");
    get.offset = Some(2);
    let outputs = executor.run(&[ItemRequest::Get(get)]).await.unwrap();

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].json["ResultId"], 1);
    assert_eq!(outputs[1].json["ResultId"], 2);
    assert!(outputs.iter().all(|o| o.item_index == 0));
    assert!(outputs.iter().all(|o| o.json["LimitRemaining"] == 9));
    assert!(outputs.iter().all(|o| o.json["TotalCount"] == 5));

    let sent = transport.sent();
    assert_eq!(sent[0].0, "/items/100/get");
    assert_eq!(
        JsonValue::Object(sent[0].1.clone()),
        json!({"Offset": 2, "View": {"Search": "abc"}})
    );
}

#[tokio::test]
async fn test_execute_mutation_is_narrow() {
    let transport = ScriptedTransport::new(vec![Ok(json!({
        "StatusCode": 200, "Id": 9, "Message": "Updated", "Title": "echo"
    }))]);
    let executor = Executor::new(&transport);

    let values = executor
        .execute(&ItemRequest::Update(UpdateRequest {
            record_id: ItemId(9),
            record_data: RecordData::new().status(200),
            process_options: Default::default(),
        }))
        .await
        .unwrap();

    assert_eq!(
        values,
        vec![json!({"StatusCode": 200, "Id": 9, "Message": "Updated"})]
    );
}

#[tokio::test]
async fn test_continue_on_failure_keeps_order() {
    let transport = ScriptedTransport::new(vec![
        created(1),
        Ok(json!({"StatusCode": 400, "Message": "Bad Request"})),
        created(3),
    ]);
    let executor = Executor::new(&transport).with_strategy(ErrorStrategy::Continue);

    let outputs = executor
        .run(&[
            create_request(10, "a"),
            create_request(10, "b"),
            create_request(10, "c"),
        ])
        .await
        .unwrap();

    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0].json["Id"], 1);
    assert_eq!(
        outputs[1].json,
        json!({"error": "API error: StatusCode 400 - Bad Request"})
    );
    assert_eq!(outputs[2].json["Id"], 3);
    assert_eq!(
        outputs.iter().map(|o| o.item_index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[tokio::test]
async fn test_fail_strategy_aborts_batch() {
    let transport = ScriptedTransport::new(vec![
        created(1),
        Err(Error::http_status(503, "unavailable")),
        created(3),
    ]);
    let executor = Executor::new(&transport);

    let err = executor
        .run(&[
            create_request(10, "a"),
            create_request(10, "b"),
            create_request(10, "c"),
        ])
        .await
        .unwrap_err();

    assert!(err.is_transport());
    // third record never sent
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn test_transport_error_under_continue() {
    let transport = ScriptedTransport::new(vec![Err(Error::decode("bad body"))]);
    let executor = Executor::new(&transport).with_strategy(ErrorStrategy::Continue);

    let outputs = executor.run(&[create_request(1, "x")]).await.unwrap();

    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].is_error());
    assert!(outputs[0].json["error"]
        .as_str()
        .unwrap()
        .contains("bad body"));
}

#[tokio::test]
async fn test_run_json_isolates_bad_parameters() {
    let transport = ScriptedTransport::new(vec![created(1), created(2)]);
    let executor = Executor::new(&transport).with_strategy(ErrorStrategy::Continue);

    let outputs = executor
        .run_json(&[
            json!({"operation": "create", "siteId": 5, "recordData": {"title": "a"}}),
            json!({"operation": "archive", "recordId": 5}),
            json!({"operation": "delete", "recordId": 6}),
        ])
        .await
        .unwrap();

    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0].json["Id"], 1);
    assert!(outputs[1].is_error());
    assert_eq!(outputs[2].json["Id"], 2);

    let endpoints: Vec<String> = transport.sent().into_iter().map(|(e, _)| e).collect();
    assert_eq!(endpoints, vec!["/items/5/create", "/items/6/delete"]);
}

#[tokio::test]
async fn test_run_json_bad_parameters_abort_by_default() {
    let transport = ScriptedTransport::new(vec![]);
    let executor = Executor::new(&transport);

    let err = executor
        .run_json(&[json!({"operation": "get"})])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidConfigValue { .. }));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_check_success_and_failure() {
    let transport = ScriptedTransport::new(vec![
        Ok(json!({"StatusCode": 200})),
        Ok(json!({"StatusCode": 401, "Message": "Unauthorized"})),
    ]);
    let executor = Executor::new(&transport);

    let ok = executor.check().await;
    assert!(ok.success);

    let failed = executor.check().await;
    assert!(!failed.success);
    assert!(failed.message.unwrap().contains("401"));

    let sent = transport.sent();
    assert_eq!(sent[0].0, "/items/1/get");
    assert!(sent[0].1.is_empty());
}

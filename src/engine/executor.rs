//! Sequential executor
//!
//! Input records are processed one at a time, in order. Each one runs
//! build → send → check status → normalize independently; the next request
//! is only issued once the previous record's output or error is settled.

use super::types::{CheckResult, ItemRequest, OutputItem};
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::request::{items_endpoint, ItemId};
use crate::response::{checked_envelope, normalize_get, normalize_mutation};
use crate::types::{ErrorStrategy, JsonObject, JsonValue, Operation};
use reqwest::Method;
use tracing::{debug, info, warn};

/// Record used by the connection check
const CHECK_TARGET: ItemId = ItemId(1);

/// Runs item requests against a transport
#[derive(Debug)]
pub struct Executor<T> {
    transport: T,
    strategy: ErrorStrategy,
}

impl<T: Transport> Executor<T> {
    /// Create an executor that aborts on the first failure
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            strategy: ErrorStrategy::default(),
        }
    }

    /// Set the batch failure strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: ErrorStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Execute a single request and return its normalized output values
    pub async fn execute(&self, request: &ItemRequest) -> Result<Vec<JsonValue>> {
        let endpoint = request.endpoint();
        let body = request.body();
        debug!(operation = %request.operation(), endpoint = %endpoint, "Executing item request");

        let raw = self.transport.send(Method::POST, &endpoint, body).await?;

        match request {
            ItemRequest::Get(get) => normalize_get(raw, get.output_mode),
            _ => Ok(vec![normalize_mutation(&raw)?]),
        }
    }

    /// Run a batch of typed requests
    pub async fn run(&self, requests: &[ItemRequest]) -> Result<Vec<OutputItem>> {
        let mut outputs = Vec::new();
        for (index, request) in requests.iter().enumerate() {
            let result = self.execute(request).await;
            self.collect(index, result, &mut outputs)?;
        }
        self.log_summary(requests.len(), &outputs);
        Ok(outputs)
    }

    /// Run a batch of raw parameter objects.
    ///
    /// A record whose parameters do not parse fails like any other record,
    /// so continue-on-failure covers it too.
    pub async fn run_json(&self, items: &[JsonValue]) -> Result<Vec<OutputItem>> {
        let mut outputs = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let result = match serde_json::from_value::<ItemRequest>(item.clone()) {
                Ok(request) => self.execute(&request).await,
                Err(e) => Err(Error::invalid_value(
                    format!("item {index}"),
                    e.to_string(),
                )),
            };
            self.collect(index, result, &mut outputs)?;
        }
        self.log_summary(items.len(), &outputs);
        Ok(outputs)
    }

    fn collect(
        &self,
        index: usize,
        result: Result<Vec<JsonValue>>,
        outputs: &mut Vec<OutputItem>,
    ) -> Result<()> {
        match result {
            Ok(values) => {
                outputs.extend(values.into_iter().map(|v| OutputItem::new(v, index)));
                Ok(())
            }
            Err(e) if self.strategy == ErrorStrategy::Continue => {
                warn!(item = index, error = %e, "Item failed, continuing");
                outputs.push(OutputItem::error(e.to_string(), index));
                Ok(())
            }
            Err(e) => {
                warn!(item = index, error = %e, "Item failed, aborting batch");
                Err(e)
            }
        }
    }

    fn log_summary(&self, inputs: usize, outputs: &[OutputItem]) {
        let failed = outputs.iter().filter(|o| o.is_error()).count();
        info!(
            inputs,
            outputs = outputs.len(),
            failed,
            "Batch finished"
        );
    }

    /// Verify credentials by fetching a record with only the auth fields
    pub async fn check(&self) -> CheckResult {
        let endpoint = items_endpoint(CHECK_TARGET, Operation::Get);
        let outcome = match self
            .transport
            .send(Method::POST, &endpoint, JsonObject::new())
            .await
        {
            Ok(raw) => checked_envelope(&raw).map(|_| ()),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => CheckResult::success(),
            Err(e) => CheckResult::failure(e.to_string()),
        }
    }
}

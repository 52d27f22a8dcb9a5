//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, WriteArgs};
use crate::config::{ConnectorConfig, CredentialsConfig};
use crate::engine::{
    CreateRequest, DeleteRequest, Executor, GetRequest, ItemRequest, OutputItem, UpdateRequest,
};
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::request::{Attachment, ProcessOptions, RecordData, ViewOptions};
use crate::types::{ErrorStrategy, JsonValue, OutputMode};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let executor = self.build_executor()?;

        match &self.cli.command {
            Commands::Check => self.check(&executor).await,
            Commands::Run { input } => {
                let items = load_items(input.as_deref())?;
                info!(items = items.len(), "Running batch");
                let outputs = executor.run_json(&items).await?;
                self.print(&outputs)
            }
            command => {
                let request = self.single_request(command)?;
                let outputs = executor.run(&[request]).await?;
                self.print(&outputs)
            }
        }
    }

    /// Load the config file and apply flag/environment overrides
    fn load_config(&self) -> Result<ConnectorConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ConnectorConfig::from_file(path)?,
            None => ConnectorConfig::default(),
        };

        config.merge(CredentialsConfig {
            base_url: self.cli.base_url.clone(),
            api_key: self.cli.api_key.clone(),
            api_version: self.cli.api_version,
            api_path_prefix: self.cli.api_path_prefix.clone(),
        });

        if self.cli.continue_on_fail {
            config.continue_on_fail = true;
        }

        Ok(config)
    }

    fn build_executor(&self) -> Result<Executor<HttpClient>> {
        let config = self.load_config()?;
        let client = HttpClient::with_config(config.credentials()?, config.http_client_config()?)?;
        let strategy: ErrorStrategy = config.error_strategy();
        Ok(Executor::new(client).with_strategy(strategy))
    }

    /// Build the request for a single-item subcommand
    fn single_request(&self, command: &Commands) -> Result<ItemRequest> {
        let request = match command {
            Commands::Get {
                id,
                raw,
                view_json,
                offset,
                page_size,
            } => {
                let mut get = GetRequest::new(*id);
                if *raw {
                    get.output_mode = OutputMode::Raw;
                }
                if let Some(json) = view_json {
                    get.view = parse_json_arg::<ViewOptions>("view-json", json)?;
                }
                get.offset = *offset;
                get.page_size = *page_size;
                ItemRequest::Get(get)
            }
            Commands::Create { site_id, write } => {
                let (record_data, process_options) = write_payload(write)?;
                ItemRequest::Create(CreateRequest {
                    site_id: *site_id,
                    record_data,
                    process_options,
                })
            }
            Commands::Update { record_id, write } => {
                let (record_data, process_options) = write_payload(write)?;
                ItemRequest::Update(UpdateRequest {
                    record_id: *record_id,
                    record_data,
                    process_options,
                })
            }
            Commands::Delete { record_id } => ItemRequest::Delete(DeleteRequest {
                record_id: *record_id,
            }),
            Commands::Check | Commands::Run { .. } => {
                return Err(Error::Other("not a single-item command".into()))
            }
        };
        Ok(request)
    }

    /// Check connection
    async fn check(&self, executor: &Executor<HttpClient>) -> Result<()> {
        let result = executor.check().await;
        self.write_values(&[serde_json::to_value(&result)?])?;

        if result.success {
            Ok(())
        } else {
            Err(Error::Other(
                result
                    .message
                    .unwrap_or_else(|| "connection check failed".to_string()),
            ))
        }
    }

    fn print(&self, outputs: &[OutputItem]) -> Result<()> {
        let values: Vec<JsonValue> = outputs.iter().map(|o| o.json.clone()).collect();
        self.write_values(&values)
    }

    fn write_values(&self, values: &[JsonValue]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for value in values {
            let line = match self.cli.format {
                OutputFormat::Json => serde_json::to_string(value)?,
                OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            };
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

fn parse_json_arg<T: DeserializeOwned>(name: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::invalid_value(name, e.to_string()))
}

fn write_payload(args: &WriteArgs) -> Result<(RecordData, ProcessOptions)> {
    let mut record = match &args.data_json {
        Some(json) => parse_json_arg::<RecordData>("data-json", json)?,
        None => RecordData::default(),
    };
    let process = match &args.process_json {
        Some(json) => parse_json_arg::<ProcessOptions>("process-json", json)?,
        None => ProcessOptions::default(),
    };

    for entry in &args.attachments {
        let (column, path) = entry
            .split_once('=')
            .filter(|(c, p)| !c.trim().is_empty() && !p.trim().is_empty())
            .ok_or_else(|| Error::invalid_value("attach", format!("expected COLUMN=PATH, got '{entry}'")))?;
        let attachment = read_attachment(Path::new(path.trim()))?;
        record = record.attachments(column.trim(), vec![attachment]);
    }

    Ok((record, process))
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Attachment::from_bytes(name, content_type_for(path), &bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Read batch input as a JSON array, a single object, or JSON lines
fn load_items(input: Option<&Path>) -> Result<Vec<JsonValue>> {
    let content = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read input file: {e}")))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_items(&content)
}

pub(crate) fn parse_items(content: &str) -> Result<Vec<JsonValue>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let value: JsonValue = serde_json::from_str(content)?;
        return match value {
            JsonValue::Array(items) => Ok(items),
            _ => Err(Error::config("input must be a JSON array")),
        };
    }

    let mut items = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: JsonValue = serde_json::from_str(line).map_err(|e| {
            Error::invalid_value(format!("input line {}", line_num + 1), e.to_string())
        })?;
        items.push(value);
    }
    Ok(items)
}

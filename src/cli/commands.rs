//! CLI commands and argument parsing

use crate::request::ItemId;
use crate::types::ApiVersion;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pleasanter item API command-line client
#[derive(Parser, Debug)]
#[command(name = "pleasanter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL
    #[arg(long, global = true, env = "PLEASANTER_BASE_URL")]
    pub base_url: Option<String>,

    /// API key
    #[arg(long, global = true, env = "PLEASANTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API version (1.0 or 1.1)
    #[arg(long, global = true, env = "PLEASANTER_API_VERSION")]
    pub api_version: Option<ApiVersion>,

    /// Path between the base URL and /items (default /api)
    #[arg(long, global = true)]
    pub api_path_prefix: Option<String>,

    /// Emit {"error": ...} for failing items instead of aborting
    #[arg(long, global = true)]
    pub continue_on_fail: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test the credentials against the server
    Check,

    /// Get a record, or the records of a site
    Get {
        /// Site id or record id
        id: ItemId,

        /// Print the response envelope unchanged
        #[arg(long)]
        raw: bool,

        /// View options as JSON (e.g. '{"incomplete": true, "gridColumns": "Title,Status"}')
        #[arg(long)]
        view_json: Option<String>,

        /// Pagination offset
        #[arg(long)]
        offset: Option<u64>,

        /// Page size
        #[arg(long)]
        page_size: Option<u64>,
    },

    /// Create a record in a site
    Create {
        /// Site id
        site_id: ItemId,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Update a record
    Update {
        /// Record id
        record_id: ItemId,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Delete a record
    Delete {
        /// Record id
        record_id: ItemId,
    },

    /// Run a batch of item requests (JSON array or JSON lines)
    Run {
        /// Input file; stdin when omitted or "-"
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Payload arguments shared by create and update
#[derive(clap::Args, Debug, Clone, Default)]
pub struct WriteArgs {
    /// Record data as JSON (e.g. '{"title": "x", "classHash": {"ClassA": "a"}}')
    #[arg(long)]
    pub data_json: Option<String>,

    /// Process options as JSON (e.g. '{"processIds": "1,2"}')
    #[arg(long)]
    pub process_json: Option<String>,

    /// Attach a file to an attachment column (COLUMN=PATH, repeatable)
    #[arg(long = "attach", value_name = "COLUMN=PATH")]
    pub attachments: Vec<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Indented JSON
    Pretty,
}

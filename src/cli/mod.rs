//! CLI module
//!
//! Command-line interface for the item API.
//!
//! # Commands
//!
//! - `check` - Test the credentials
//! - `get` / `create` / `update` / `delete` - One item request
//! - `run` - A batch of item requests from a file or stdin

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, WriteArgs};
pub use runner::Runner;

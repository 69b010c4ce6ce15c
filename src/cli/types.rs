//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::config::ConfigCommands;
use super::commands::request::RequestArgs;

/// Top-level arguments
#[derive(Parser, Debug)]
#[command(name = "api-factory", version, about = "Issue requests through configured API clients")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .api-factory/config.yaml and local.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Send one request through the factory and print the decoded response
    Request(RequestArgs),
}

/// Parse a `key=value` argument
pub fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

//! Implementation of the `api-factory config` commands.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

/// `api-factory config` subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration after merging files and environment
    Show,
}

/// Output of `config show`
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    /// Effective configuration
    #[serde(flatten)]
    pub config: Config,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config).unwrap_or_default()
    }
}

/// Run a `config` subcommand
pub fn execute(command: &ConfigCommands, config: Config, json_mode: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            output(&ConfigOutput { config }, json_mode);
            Ok(())
        }
    }
}

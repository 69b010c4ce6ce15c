//! api-factory CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use api_factory::cli::{commands, Cli, Commands};
use api_factory::infrastructure::config::ConfigLoader;
use api_factory::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config.as_deref(), cli.json).await {
        api_factory::cli::handle_error(err, cli.json);
    }
}

async fn run(command: Commands, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _guard = LoggerImpl::init(&config.logging)?;

    match command {
        Commands::Config(command) => commands::config::execute(&command, config, json_mode),
        Commands::Request(args) => commands::request::execute(args, config, json_mode).await,
    }
}

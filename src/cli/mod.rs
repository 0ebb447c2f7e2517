//! Command-line front end
//!
//! Stands in for the interactive table editor: parses arguments, opens the file-backed
//! store and runs a single command per invocation.

pub mod commands;
pub mod render;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{self, Config};
use crate::session::Session;
use crate::store::{DocumentStore, FileBackend};

pub use commands::{execute, Command};

#[derive(Debug, Parser)]
#[command(name = "license-tracker")]
#[command(about = "Track software licenses grouped by manufacturer")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub args: config::Args,

    /// Shared admin password; enables admin mode for this invocation
    #[arg(long, global = true, help = "Admin password")]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Parse arguments, open the store and execute the requested command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_args(cli.args.clone())?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    if let Some(path) = &config.config_path {
        log::debug!("Using config file {}", path.display());
    }

    let output = run_with(&config, cli.password.as_deref(), cli.command)?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Execute one command against the store described by `config`
pub fn run_with(config: &Config, password: Option<&str>, command: Command) -> Result<String> {
    let session = match password {
        Some(password) => Session::login(password, config)?,
        None => Session::viewer(),
    };

    let store = DocumentStore::new(FileBackend::new(&config.data_dir))
        .with_key(config.storage_key.as_str());

    execute(&store, &session, command)
        .with_context(|| format!("using data in {}", config.data_dir.display()))
}

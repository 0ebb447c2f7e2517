//! Configuration management for the license tracker.
//!
//! Handles:
//! - Global command-line options
//! - The optional TOML config file
//! - Data directory defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_STORAGE_KEY;

/// Shared secret used when no config file overrides it
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Global command-line options
#[derive(Debug, Clone, clap::Args)]
pub struct Args {
    /// Directory holding the stored document
    #[arg(long, global = true, help = "Directory holding the license data")]
    pub data_dir: Option<PathBuf>,

    /// Explicit config file
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of `config.toml`
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub admin_password: Option<String>,
    pub storage_key: Option<String>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the file backend writes into
    pub data_dir: PathBuf,
    /// Shared secret that unlocks admin mode
    pub admin_password: String,
    /// Key the document is stored under
    pub storage_key: String,
    /// Log level
    pub log_level: String,
    /// Config file that was read, if any
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: "info".to_string(),
            config_path: None,
        }
    }
}

impl Config {
    /// Create configuration from parsed arguments.
    ///
    /// Command-line values win over the config file, which wins over defaults. An
    /// explicit `--config` path must exist; the per-user default file is optional.
    pub fn from_args(args: Args) -> Result<Self> {
        let (file, config_path) = match args.config {
            Some(path) => (ConfigFile::load(&path)?, Some(path)),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => (ConfigFile::load(&path)?, Some(path)),
                None => (ConfigFile::default(), None),
            },
        };

        let defaults = Config::default();
        Ok(Config {
            data_dir: args
                .data_dir
                .or(file.data_dir)
                .unwrap_or(defaults.data_dir),
            admin_password: file.admin_password.unwrap_or(defaults.admin_password),
            storage_key: file.storage_key.unwrap_or(defaults.storage_key),
            log_level: args.log_level,
            config_path,
        })
    }
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// `<config_dir>/license-tracker/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("license-tracker").join("config.toml"))
}

/// `<data_dir>/license-tracker`, or `./.license-tracker` without a platform data dir
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("license-tracker"))
        .unwrap_or_else(|| PathBuf::from(".license-tracker"))
}

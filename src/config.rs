//! Configuration management for the model structure checker.
//!
//! Handles:
//! - Command-line argument parsing
//! - Configuration file discovery and loading
//!
//! Rule settings come from the first file found among: `--config`, a
//! `.model-structure.toml` in the working directory or any ancestor, and
//! `<user config dir>/model-structure/config.toml`. Keys missing from the
//! file keep their built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::rule::{RuleConfig, RuleSettings};

pub const PROJECT_CONFIG_FILE: &str = ".model-structure.toml";

/// Output format of the command-line checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Command-line arguments shared by the checker and the language server
#[derive(Debug, Parser)]
#[command(name = "model-structure")]
#[command(about = "Checks declaration order and section comments of Rails models")]
#[command(version)]
pub struct Args {
    /// Ruby files or directories to check (defaults to the working directory)
    pub paths: Vec<PathBuf>,

    /// Explicit configuration file
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Log level
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Accepted for language clients that pass it; stdio is the only transport
    #[arg(long, hide = true)]
    pub stdio: bool,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub log_level: String,
    /// File the rule settings were read from, if any
    pub config_file: Option<PathBuf>,
    pub rule: RuleConfig,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_file = match args.config {
            Some(path) => Some(path),
            None => {
                let cwd = std::env::current_dir().context("Could not determine working directory")?;
                find_project_config(&cwd).or_else(user_config_file)
            }
        };

        let rule = match &config_file {
            Some(path) => {
                log::info!("Loading model structure settings from {}", path.display());
                load_rule_config(path)?
            }
            None => {
                log::info!("No configuration file found, using built-in defaults");
                RuleConfig::default()
            }
        };

        let paths = if args.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            args.paths
        };

        Ok(Config {
            paths,
            format: args.format,
            log_level: args.log_level,
            config_file,
            rule,
        })
    }
}

/// Log level as a filter, falling back to `warn` on unknown names
pub fn parse_log_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Warn)
}

/// Nearest `.model-structure.toml` in `start` or its ancestors
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Per-user configuration file, when present
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("model-structure").join("config.toml"))
        .filter(|candidate| candidate.is_file())
}

/// Read and validate a configuration file
pub fn load_rule_config(path: &Path) -> Result<RuleConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
    let settings = parse_settings(&content)
        .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

    RuleConfig::from_settings(&settings)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

pub fn parse_settings(content: &str) -> Result<RuleSettings, toml::de::Error> {
    toml::from_str(content)
}

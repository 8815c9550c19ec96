//! Configuration handling
//!
//! Configuration is stored in `~/.config/todotxt/config.toml` (or the
//! platform equivalent). A different file can be named with `--config` or
//! `TODOTXT_CONFIG`.
//!
//! ```toml
//! todo_file = "/home/me/Dropbox/todo/todo.txt"
//! default_format = "json"
//! case_sensitive = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Todo file used when neither flag, environment nor config names one
pub const DEFAULT_TODO_FILE: &str = "todo.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Path of the todo.txt file; relative paths are taken from the config directory
    pub todo_file: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Match search terms case-sensitively
    pub case_sensitive: bool,
}

impl Config {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "todotxt", "todotxt").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from an explicit path or the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a file. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")?;

        if let (Some(todo_file), Some(dir)) = (&config.todo_file, path.parent()) {
            if todo_file.is_relative() {
                config.todo_file = Some(dir.join(todo_file));
            }
        }

        Ok(config)
    }

    /// Picks the todo file: explicit path first, then config, then `./todo.txt`
    pub fn resolve_todo_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.todo_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TODO_FILE))
    }
}

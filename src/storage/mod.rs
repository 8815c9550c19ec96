//! # Storage Layer
//!
//! Persistence for todo.txt lists and user configuration.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | todo.txt, one task per line | `--file`, `TODO_FILE`, config, or `./todo.txt` |
//! | Config | TOML | `~/.config/todotxt/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`TodoFile`] locks the file (`fs2`) while reading and writing
//! - Writes are atomic (temp file + rename)

mod config;
mod todo_file;

pub use config::{Config, ConfigError, OutputFormat, DEFAULT_TODO_FILE};
pub use todo_file::TodoFile;

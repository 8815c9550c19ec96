//! # Command-Line Interface
//!
//! The `todo` binary: verbs in the style of todo.sh on top of [`TodoList`](crate::TodoList).
//!
//! | Verb | Purpose |
//! |------|---------|
//! | `add`, `replace`, `append`, `prepend` | Write task text |
//! | `do`, `pri`, `depri`, `rm`, `dedup` | Change or remove tasks |
//! | `list`, `listall`, `projects`, `contexts` | Query tasks |
//! | `report` | Statistics |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logging, or set `RUST_LOG`:
//! ```bash
//! todo --verbose list +garden
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod commands;
mod output;

pub use app::{run, Cli, Commands, ListArgs};
pub use output::{Output, OutputFormat};

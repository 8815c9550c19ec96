//! Output formatting for CLI commands

use serde::Serialize;

use crate::domain::TodoItem;
pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers print their own text; this is a pretty-printed fallback
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints a task with its id, or the task object in JSON mode
    pub fn task(&self, item: &TodoItem) {
        match self.format {
            OutputFormat::Text => println!("{}", item.to_line(true)),
            OutputFormat::Json => self.data(item),
        }
    }

    /// Prints a list of tasks followed by a `--` footer with counts
    pub fn tasks(&self, items: &[&TodoItem], total: usize, source: &str) {
        match self.format {
            OutputFormat::Text => {
                for item in items {
                    println!("{}", item.to_line(true));
                }
                println!("--");
                println!("TODO: {} of {} tasks shown ({})", items.len(), total, source);
            }
            OutputFormat::Json => self.data(&items),
        }
    }

    /// Prints plain values one per line, or a JSON array
    pub fn names(&self, names: &[&str]) {
        match self.format {
            OutputFormat::Text => {
                for name in names {
                    println!("{}", name);
                }
            }
            OutputFormat::Json => self.data(&names),
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

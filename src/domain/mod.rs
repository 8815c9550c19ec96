//! Domain models for todo.txt
//!
//! Contains the line grammar and the indexed task list, without any I/O concerns.

mod date;
mod filter;
mod item;
mod list;
mod priority;
mod report;

pub use date::TaskDate;
pub use filter::{FilterError, PriorityFilter, Query, Term};
pub use item::TodoItem;
pub use list::{TodoList, IN_MEMORY_SOURCE};
pub use priority::{Priority, PriorityError};
pub use report::Report;

//! todotxt - parse and manage todo.txt task lists
//!
//! A todo.txt list is plain text with one task per line:
//!
//! ```text
//! (A) 2013-01-20 Call mum +family @phone due:2013-01-21
//! x 2013-01-22 2013-01-20 Pay rent +home
//! ```
//!
//! [`TodoItem`] parses and renders single lines, [`TodoList`] keeps an
//! ordered, indexed collection of them.
//!
//! ```
//! use todotxt::{Query, TodoList};
//!
//! let mut list = TodoList::from_text("(A) Call mum @phone\nBuy milk +shopping");
//! list.complete(2);
//!
//! let open = list.list(&Query::new());
//! assert_eq!(open.len(), 1);
//! assert_eq!(list.contexts(), vec!["phone"]);
//! ```

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    FilterError, Priority, PriorityFilter, Query, Report, TaskDate, Term, TodoItem, TodoList,
};

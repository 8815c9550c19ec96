//! List statistics

use serde::Serialize;
use std::collections::BTreeMap;

use super::list::TodoList;

/// Aggregate counts over a task list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub source: String,
    pub total: usize,
    pub open: usize,
    pub completed: usize,

    /// Open tasks per priority letter
    pub by_priority: BTreeMap<String, usize>,

    /// Open tasks per project
    pub by_project: BTreeMap<String, usize>,

    /// Open tasks per context
    pub by_context: BTreeMap<String, usize>,
}

impl Report {
    pub fn from_list(list: &TodoList) -> Self {
        let mut report = Report {
            source: list.source().to_string(),
            total: list.len(),
            ..Default::default()
        };

        for item in list {
            if item.is_completed() {
                report.completed += 1;
                continue;
            }

            report.open += 1;
            if let Some(priority) = item.priority {
                *report.by_priority.entry(priority.to_string()).or_default() += 1;
            }
            for project in &item.projects {
                *report.by_project.entry(project.clone()).or_default() += 1;
            }
            for context in &item.contexts {
                *report.by_context.entry(context.clone()).or_default() += 1;
            }
        }

        report
    }
}

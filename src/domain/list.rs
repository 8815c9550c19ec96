//! Task list with derived indexes
//!
//! [`TodoList`] owns its items in sort order and keeps three lookup
//! structures in step with them:
//!
//! | Index | Maps | Maintained by |
//! |-------|------|---------------|
//! | id | task id -> position in `items` | add, remove, sort |
//! | project | `+project` -> ids tagged with it | add, remove, replace |
//! | context | `@context` -> ids tagged with it | add, remove, replace |
//!
//! A project or context key exists only while at least one task uses it.
//! Ids come from a counter owned by the list and are never handed out twice.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use super::filter::{Query, Term};
use super::item::TodoItem;
use super::priority::Priority;

/// Source name reported for lists that were not read from a file
pub const IN_MEMORY_SOURCE: &str = "memory";

#[derive(Debug, Clone, Default, PartialEq)]
struct Indexes {
    id: HashMap<u32, usize>,
    project: BTreeMap<String, Vec<u32>>,
    context: BTreeMap<String, Vec<u32>>,
}

impl Indexes {
    /// Records the item's id and tags. Already-present entries are left alone.
    fn index(&mut self, item: &TodoItem, position: usize) {
        if let Some(id) = item.id {
            self.id.entry(id).or_insert(position);
            self.index_tags(item);
        }
    }

    fn index_tags(&mut self, item: &TodoItem) {
        let Some(id) = item.id else { return };

        for project in &item.projects {
            add_to_bucket(&mut self.project, project, id);
        }
        for context in &item.contexts {
            add_to_bucket(&mut self.context, context, id);
        }
    }

    /// Drops the item's id and tag entries
    fn deindex(&mut self, item: &TodoItem) {
        if let Some(id) = item.id {
            self.id.remove(&id);
            self.deindex_tags(item);
        }
    }

    fn deindex_tags(&mut self, item: &TodoItem) {
        let Some(id) = item.id else { return };

        for project in &item.projects {
            remove_from_bucket(&mut self.project, project, id);
        }
        for context in &item.contexts {
            remove_from_bucket(&mut self.context, context, id);
        }
    }
}

fn add_to_bucket(index: &mut BTreeMap<String, Vec<u32>>, key: &str, id: u32) {
    let bucket = index.entry(key.to_string()).or_default();
    if !bucket.contains(&id) {
        bucket.push(id);
    }
}

fn remove_from_bucket(index: &mut BTreeMap<String, Vec<u32>>, key: &str, id: u32) {
    if let Some(bucket) = index.get_mut(key) {
        bucket.retain(|&i| i != id);
        if bucket.is_empty() {
            index.remove(key);
        }
    }
}

fn sort_key(item: &TodoItem) -> String {
    item.to_string().to_lowercase()
}

/// An ordered, indexed list of tasks
#[derive(Debug, Clone)]
pub struct TodoList {
    items: Vec<TodoItem>,
    indexes: Indexes,
    next_id: u32,
    filename: Option<String>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            indexes: Indexes::default(),
            next_id: 1,
            filename: None,
        }
    }
}

impl TodoList {
    /// Creates an empty in-memory list
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from newline-separated task lines
    pub fn from_text(src: &str) -> Self {
        let mut list = Self::new();
        list.parse(src);
        list
    }

    /// Adds every line of `src`. Blank lines are dropped.
    pub fn parse(&mut self, src: &str) -> &mut Self {
        let src = src.replacen('\r', "", 1);
        for line in src.split('\n') {
            self.add(line);
        }
        self
    }

    /// Adds a task, assigning it the next id.
    ///
    /// Returns `None` (and leaves the list untouched) when the task has no text.
    /// Any id the item already carried is overwritten.
    pub fn add(&mut self, item: impl Into<TodoItem>) -> Option<&TodoItem> {
        let mut item = item.into();
        if !item.has_text() {
            debug!("Rejected task without text");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        item.id = Some(id);

        self.items.push(item);
        let position = self.items.len() - 1;
        self.indexes.index(&self.items[position], position);
        debug!(id, "Added task");

        self.sort();
        self.find_by_id(id)
    }

    /// Detaches a task from the list, clearing its id
    pub fn remove(&mut self, id: u32) -> Option<TodoItem> {
        let position = *self.indexes.id.get(&id)?;

        let mut item = self.items.remove(position);
        self.reindex();
        self.indexes.deindex(&item);
        item.id = None;

        debug!(id, "Removed task");
        Some(item)
    }

    /// Looks up a task by id
    pub fn find_by_id(&self, id: u32) -> Option<&TodoItem> {
        self.indexes.id.get(&id).and_then(|&pos| self.items.get(pos))
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut TodoItem> {
        let position = *self.indexes.id.get(&id)?;
        self.items.get_mut(position)
    }

    /// Completes a task. Unknown ids are ignored so calls can be chained.
    pub fn complete(&mut self, id: u32) -> &mut Self {
        if let Some(item) = self.find_by_id_mut(id) {
            item.complete();
            debug!(id, "Completed task");
        }
        self
    }

    /// Completes several tasks at once
    pub fn complete_all(&mut self, ids: &[u32]) -> &mut Self {
        for &id in ids {
            self.complete(id);
        }
        self
    }

    pub fn append(&mut self, id: u32, text: &str) -> Option<&TodoItem> {
        let item = self.find_by_id_mut(id)?;
        Some(&*item.append(text))
    }

    pub fn prepend(&mut self, id: u32, text: &str) -> Option<&TodoItem> {
        let item = self.find_by_id_mut(id)?;
        Some(&*item.prepend(text))
    }

    pub fn prioritise(&mut self, id: u32, priority: Priority) -> Option<&TodoItem> {
        let item = self.find_by_id_mut(id)?;
        Some(&*item.prioritise(priority))
    }

    pub fn deprioritise(&mut self, id: u32) -> Option<&TodoItem> {
        let item = self.find_by_id_mut(id)?;
        Some(&*item.deprioritise())
    }

    /// Re-parses a task from a new line, keeping its id.
    ///
    /// The task's project and context entries are refreshed to match the new
    /// text. Returns `None` if the id is unknown or the line is blank; a
    /// blank line leaves the task untouched.
    pub fn replace(&mut self, id: u32, line: &str) -> Option<&TodoItem> {
        let replacement = TodoItem::parse_line(line);
        if !replacement.has_text() {
            return None;
        }

        let position = *self.indexes.id.get(&id)?;
        self.indexes.deindex_tags(&self.items[position]);

        let item = &mut self.items[position];
        *item = replacement;
        item.id = Some(id);

        self.indexes.index_tags(&self.items[position]);
        debug!(id, "Replaced task");
        self.items.get(position)
    }

    /// Lists matching tasks in sort order without touching the list itself
    pub fn list(&self, query: &Query) -> Vec<&TodoItem> {
        let mut found: Vec<&TodoItem> = self.items.iter().filter(|i| query.matches(i)).collect();
        Self::sort_items(&mut found);
        found
    }

    /// Lists matching tasks, completed ones included
    pub fn list_all(&self, query: &Query) -> Vec<&TodoItem> {
        self.list(&query.clone().include_completed(true))
    }

    /// Checks a single term (or OR-set of terms) against a task
    pub fn check_term(term: &Term, item: &TodoItem, case_sensitive: bool) -> bool {
        term.matches(item, case_sensitive)
    }

    /// Sorts the list by its rendered lines, case-folded. The sort is stable.
    pub fn sort(&mut self) -> &mut Self {
        self.items.sort_by_cached_key(sort_key);
        self.reindex();
        self
    }

    /// Sorts an arbitrary selection of tasks the same way as [`sort`](Self::sort)
    pub fn sort_items(items: &mut [&TodoItem]) {
        items.sort_by_cached_key(|item| sort_key(item));
    }

    /// Removes tasks whose text matches an earlier task's, ignoring case.
    ///
    /// The first task of each group (in list order) survives. Returns the
    /// number of tasks removed.
    pub fn deduplicate(&mut self) -> usize {
        let mut seen = HashSet::new();
        let duplicates: Vec<u32> = self
            .items
            .iter()
            .filter(|item| !seen.insert(item.text().to_lowercase()))
            .filter_map(|item| item.id)
            .collect();

        for &id in &duplicates {
            self.remove(id);
        }

        if !duplicates.is_empty() {
            debug!(removed = duplicates.len(), "Deduplicated list");
        }
        duplicates.len()
    }

    /// Rebuilds the id -> position index from scratch
    fn reindex(&mut self) {
        self.indexes.id = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(pos, item)| item.id.map(|id| (id, pos)))
            .collect();
    }

    /// Projects currently used by at least one task
    pub fn projects(&self) -> Vec<&str> {
        self.indexes.project.keys().map(String::as_str).collect()
    }

    /// Contexts currently used by at least one task
    pub fn contexts(&self) -> Vec<&str> {
        self.indexes.context.keys().map(String::as_str).collect()
    }

    /// Ids of tasks tagged with a project
    pub fn project_ids(&self, project: &str) -> Option<&[u32]> {
        self.indexes.project.get(project).map(Vec::as_slice)
    }

    /// Ids of tasks tagged with a context
    pub fn context_ids(&self, context: &str) -> Option<&[u32]> {
        self.indexes.context.get(context).map(Vec::as_slice)
    }

    /// Current position of a task in [`items`](Self::items)
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.indexes.id.get(&id).copied()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    /// The backing file name, or `"memory"`
    pub fn source(&self) -> &str {
        self.filename.as_deref().unwrap_or(IN_MEMORY_SOURCE)
    }

    /// Renders every task on its own line, as written to a todo.txt file.
    ///
    /// Lines come out in id order rather than sort order, so a file that is
    /// read and written back keeps its line numbers.
    pub fn to_text(&self) -> String {
        let mut by_id: Vec<&TodoItem> = self.items.iter().collect();
        by_id.sort_by_key(|item| item.id);

        by_id.iter().map(|item| format!("{}\n", item)).collect()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

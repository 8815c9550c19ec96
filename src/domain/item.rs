//! Task item model and line grammar
//!
//! A todo.txt line is decomposed left to right:
//!
//! ```text
//! [x YYYY-MM-DD | (P)] [YYYY-MM-DD] text with +projects @contexts key:value
//! ```
//!
//! The completion marker and the priority marker share the leading slot, so
//! a completed line never carries a priority. Inline tags are extracted
//! from the remaining text but left in it verbatim.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::date::TaskDate;
use super::priority::Priority;

/// Leading structured fields: completion or priority, then creation date, then text
static CORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:x ([12][0-9]{3}-[01][0-9]-[0-3][0-9])\s|\(([A-Z])\)\s)?(?:([12][0-9]{3}-[01][0-9]-[0-3][0-9])\s)?(.+)",
    )
    .expect("core task pattern is valid")
});

static PROJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+(\S+[_A-Za-z0-9])(?:\s|$)").expect("project pattern is valid")
});

static CONTEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(\S+[_A-Za-z0-9])(?:\s|$)").expect("context pattern is valid")
});

static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+[_A-Za-z0-9]):(\S+)(?:\s|$)").expect("metadata pattern is valid")
});

/// A single todo.txt task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoItem {
    /// Position-independent id, assigned by the list that owns the item
    pub id: Option<u32>,

    /// Free text after the leading fields, inline tags included
    pub text: Option<String>,

    pub priority: Option<Priority>,

    /// Creation date; today unless the line carried one
    pub created_at: TaskDate,

    /// Completion date (if done)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<TaskDate>,

    /// `@context` tags in first-seen order
    pub contexts: Vec<String>,

    /// `+project` tags in first-seen order
    pub projects: Vec<String>,

    /// `key:value` annotations, later keys overwrite earlier ones
    pub metadata: BTreeMap<String, String>,
}

impl Default for TodoItem {
    fn default() -> Self {
        Self {
            id: None,
            text: None,
            priority: None,
            created_at: TaskDate::today(),
            completed_at: None,
            contexts: Vec::new(),
            projects: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

impl TodoItem {
    /// Creates an empty item
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an item from a task line
    pub fn parse_line(line: &str) -> Self {
        let mut item = Self::new();
        item.parse(line);
        item
    }

    /// Re-parses this item from a task line, discarding all previous state
    pub fn parse(&mut self, line: &str) -> &mut Self {
        *self = Self::default();

        let line = line.trim();
        if line.is_empty() {
            return self;
        }

        let text = match CORE_RE.captures(line) {
            Some(caps) => {
                if let Some(done) = caps.get(1) {
                    self.completed_at = Some(TaskDate::from_ymd_str(done.as_str()));
                }
                if let Some(letter) = caps.get(2) {
                    self.priority = letter.as_str().parse().ok();
                }
                if let Some(created) = caps.get(3) {
                    self.created_at = TaskDate::from_ymd_str(created.as_str());
                }
                caps.get(4).map_or(line, |m| m.as_str()).trim()
            }
            None => line,
        };

        for caps in PROJECT_RE.captures_iter(text) {
            push_unique(&mut self.projects, &caps[1]);
        }
        for caps in CONTEXT_RE.captures_iter(text) {
            push_unique(&mut self.contexts, &caps[1]);
        }
        for caps in METADATA_RE.captures_iter(text) {
            self.metadata.insert(caps[1].to_string(), caps[2].to_string());
        }

        self.text = Some(text.to_string());
        self
    }

    /// Marks the task done today
    pub fn complete(&mut self) -> &mut Self {
        self.completed_at = Some(TaskDate::today());
        self
    }

    /// True if any completion date is set, even one that is not a real day
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Appends text after a single space. Inline tags are not re-scanned.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.text = Some(match self.text.take() {
            Some(existing) => format!("{} {}", existing, text),
            None => text.to_string(),
        });
        self
    }

    /// Prepends text before a single space. Inline tags are not re-scanned.
    pub fn prepend(&mut self, text: &str) -> &mut Self {
        self.text = Some(match self.text.take() {
            Some(existing) => format!("{} {}", text, existing),
            None => text.to_string(),
        });
        self
    }

    pub fn prioritise(&mut self, priority: Priority) -> &mut Self {
        self.priority = Some(priority);
        self
    }

    pub fn deprioritise(&mut self) -> &mut Self {
        self.priority = None;
        self
    }

    /// True if the item has non-empty text and may be added to a list
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The item's free text, or an empty string for a blank item
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Renders the canonical task line, optionally prefixed with `id: `
    pub fn to_line(&self, with_id: bool) -> String {
        let mut line = String::new();

        if with_id {
            if let Some(id) = self.id {
                line.push_str(&format!("{}: ", id));
            }
        }
        if let Some(done) = &self.completed_at {
            line.push_str(&format!("x {} ", done));
        }
        if let Some(priority) = self.priority {
            line.push_str(&format!("({}) ", priority));
        }
        line.push_str(&format!("{} ", self.created_at));
        line.push_str(self.text());

        line
    }
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

impl fmt::Display for TodoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line(false))
    }
}

impl FromStr for TodoItem {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_line(s))
    }
}

impl From<&str> for TodoItem {
    fn from(line: &str) -> Self {
        Self::parse_line(line)
    }
}

impl From<String> for TodoItem {
    fn from(line: String) -> Self {
        Self::parse_line(&line)
    }
}

//! Search predicates for listing tasks
//!
//! Terms follow the todo.sh conventions:
//! - a plain word must appear in the task text;
//! - a word prefixed with `-` must NOT appear;
//! - terms passed together are AND-combined;
//! - a [`Term::AnyOf`] set is OR-combined, so `["python", "@tests"]`
//!   matches tasks mentioning python or tagged `@tests`.

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;

use super::item::TodoItem;
use super::priority::Priority;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Invalid priority filter '{0}': expected a letter, a list like A,C or a range like A-D")]
    InvalidPriority(String),
}

/// A search term, or a set of alternatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Word(String),
    AnyOf(Vec<Term>),
}

impl Term {
    pub fn word(word: impl Into<String>) -> Self {
        Term::Word(word.into())
    }

    pub fn any_of<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Term::AnyOf(words.into_iter().map(|w| Term::Word(w.into())).collect())
    }

    /// Checks the term against an item's text
    pub fn matches(&self, item: &TodoItem, case_sensitive: bool) -> bool {
        match self {
            Term::AnyOf(terms) => terms.iter().any(|t| t.matches(item, case_sensitive)),
            Term::Word(word) => {
                let word = word.trim();
                let (negate, needle) = match word.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, word),
                };

                if needle.is_empty() {
                    return true;
                }

                let found = if case_sensitive {
                    item.text().contains(needle)
                } else {
                    item.text()
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
                };

                found != negate
            }
        }
    }
}

impl From<&str> for Term {
    fn from(word: &str) -> Self {
        Term::Word(word.to_string())
    }
}

impl From<String> for Term {
    fn from(word: String) -> Self {
        Term::Word(word)
    }
}

impl From<Vec<&str>> for Term {
    fn from(words: Vec<&str>) -> Self {
        Term::any_of(words)
    }
}

/// The set of priorities a listed task must have one of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityFilter(BTreeSet<Priority>);

impl PriorityFilter {
    /// Accepts any of the given letters; each must be a single letter
    pub fn from_letters<I, S>(letters: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        letters
            .into_iter()
            .map(|l| {
                let l = l.as_ref();
                l.parse::<Priority>()
                    .map_err(|_| FilterError::InvalidPriority(l.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Accepts the inclusive range between two letters, in either order
    pub fn range(from: Priority, to: Priority) -> Self {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        Self(
            (start.letter()..=end.letter())
                .filter_map(|c| Priority::new(c).ok())
                .collect(),
        )
    }

    pub fn contains(&self, priority: Option<Priority>) -> bool {
        priority.is_some_and(|p| self.0.contains(&p))
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(Priority::letter)
    }
}

impl FromStr for PriorityFilter {
    type Err = FilterError;

    /// Parses `A`, `A,C,F` or `A-D`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || FilterError::InvalidPriority(s.to_string());

        if s.contains(',') {
            return Self::from_letters(s.split(',').map(str::trim)).map_err(|_| invalid());
        }

        if let Some((from, to)) = s.split_once('-') {
            let from: Priority = from.parse().map_err(|_| invalid())?;
            let to: Priority = to.parse().map_err(|_| invalid())?;
            return Ok(Self::range(from, to));
        }

        Self::from_letters([s]).map_err(|_| invalid())
    }
}

/// Arguments to [`TodoList::list`](super::TodoList::list)
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Every term must match
    pub terms: Vec<Term>,
    pub priority: Option<PriorityFilter>,
    pub case_sensitive: bool,
    pub include_completed: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<Term>) -> Self {
        self.terms.push(term.into());
        self
    }

    pub fn priority(mut self, filter: PriorityFilter) -> Self {
        self.priority = Some(filter);
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn include_completed(mut self, yes: bool) -> Self {
        self.include_completed = yes;
        self
    }

    /// True if the item passes completion, term and priority checks
    pub fn matches(&self, item: &TodoItem) -> bool {
        if item.is_completed() && !self.include_completed {
            return false;
        }

        if !self
            .terms
            .iter()
            .all(|t| t.matches(item, self.case_sensitive))
        {
            return false;
        }

        match &self.priority {
            Some(filter) => filter.contains(item.priority),
            None => true,
        }
    }
}

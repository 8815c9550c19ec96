//! Task priority
//!
//! A priority is a single uppercase letter, `A` being the most urgent.
//! On the wire it appears as `(A)` at the very start of a task line.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriorityError {
    #[error("Invalid priority: expected a single letter A-Z, got '{0}'")]
    Invalid(String),
}

/// Priority letter `A`..=`Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(char);

impl Priority {
    /// Creates a priority from a letter, upper-casing it
    pub fn new(letter: char) -> Result<Self, PriorityError> {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Ok(Self(upper))
        } else {
            Err(PriorityError::Invalid(letter.to_string()))
        }
    }

    /// Returns the priority letter
    pub fn letter(&self) -> char {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(PriorityError::Invalid(s.to_string())),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

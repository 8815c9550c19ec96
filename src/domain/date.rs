//! Day-granularity task dates
//!
//! The line grammar only checks the *shape* of a date (`YYYY-MM-DD` with a
//! year starting in 1 or 2). Shape-valid text that is not a real calendar
//! day, such as `2013-13-40`, is kept as [`TaskDate::Invalid`] so the line
//! still round-trips.

use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskDate {
    /// A real calendar day
    Valid(NaiveDate),
    /// Date-shaped text that chrono rejected
    Invalid(String),
}

impl TaskDate {
    /// Today's date in the local timezone
    pub fn today() -> Self {
        TaskDate::Valid(Local::now().date_naive())
    }

    /// Builds a date from `YYYY-MM-DD` text, falling back to the invalid sentinel
    pub fn from_ymd_str(raw: &str) -> Self {
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => TaskDate::Valid(date),
            Err(_) => TaskDate::Invalid(raw.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TaskDate::Valid(_))
    }

    /// Returns the calendar date, if valid
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            TaskDate::Valid(date) => Some(*date),
            TaskDate::Invalid(_) => None,
        }
    }
}

impl Default for TaskDate {
    fn default() -> Self {
        Self::today()
    }
}

impl From<NaiveDate> for TaskDate {
    fn from(date: NaiveDate) -> Self {
        TaskDate::Valid(date)
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskDate::Valid(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            TaskDate::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for TaskDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

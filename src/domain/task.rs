//! Task domain model
//!
//! A [`TaskRecord`] is one parsed task block: the properties written in its
//! front matter plus the notes that follow it. Records are immutable once
//! parsed; inherited values live on the tree nodes built from them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::id::TaskId;
use crate::diagnostic::Location;

/// Spelling of the "no value, do not inherit" sentinel
pub const NONE_SENTINEL: &str = "none";

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Canonical spelling used in task files
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN-PROGRESS",
            TaskStatus::Blocked => "BLOCKED",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TODO" => Ok(TaskStatus::Todo),
            "IN-PROGRESS" => Ok(TaskStatus::InProgress),
            "BLOCKED" => Ok(TaskStatus::Blocked),
            "DONE" => Ok(TaskStatus::Done),
            _ => Err("expected one of DONE, IN-PROGRESS, BLOCKED, TODO".to_string()),
        }
    }
}

/// Priority in the range 1..=5 (1 is most urgent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .parse()
            .map_err(|_| "must be an integer".to_string())?;
        u8::try_from(value)
            .ok()
            .and_then(Priority::new)
            .ok_or_else(|| format!("not in range {}..{}", Self::MIN, Self::MAX))
    }
}

/// An inheritable property as written in a task block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Declared<T> {
    /// Not written; inherit from the parent
    #[default]
    Unset,
    /// Written as `none`; resolves to absent and stops inheritance
    Cleared,
    /// Written with a concrete value
    Value(T),
}

impl<T: Copy> Declared<T> {
    /// Effective value given the parent's already-resolved value
    pub fn resolve(&self, inherited: Option<T>) -> Option<T> {
        match self {
            Declared::Unset => inherited,
            Declared::Cleared => None,
            Declared::Value(v) => Some(*v),
        }
    }
}

impl<T: FromStr> Declared<T> {
    /// Parses a front-matter value, honouring the `none` sentinel
    pub fn parse(s: &str) -> Result<Self, T::Err> {
        if s.eq_ignore_ascii_case(NONE_SENTINEL) {
            return Ok(Declared::Cleared);
        }
        s.parse().map(Declared::Value)
    }
}

/// Parses a deadline in `YYYY-MM-DD` form
fn parse_deadline(s: &str) -> Result<NaiveDate, String> {
    let well_formed = s.len() == 10
        && s.bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err("not in format YYYY-MM-DD".to_string());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())
}

/// Wrapper so `Declared<Deadline>` can use the generic sentinel parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(pub NaiveDate);

impl FromStr for Deadline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_deadline(s).map(Deadline)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One parsed task block
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: TaskId,
    pub label: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Declared<Priority>,
    pub deadline: Declared<Deadline>,
    pub depends: BTreeSet<TaskId>,
    /// Raw text between the closing delimiter and the next block
    pub notes: String,
    /// Line of the opening delimiter
    pub location: Location,
}

impl TaskRecord {
    /// Creates a record with only an identifier declared
    pub fn new(id: TaskId, location: Location) -> Self {
        Self {
            id,
            label: None,
            status: None,
            priority: Declared::Unset,
            deadline: Declared::Unset,
            depends: BTreeSet::new(),
            notes: String::new(),
            location,
        }
    }
}

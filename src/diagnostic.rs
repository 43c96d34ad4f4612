//! Error taxonomy and the diagnostic collector
//!
//! Every stage of the pipeline reports problems into a shared [`Diagnostics`]
//! value instead of returning at the first failure, so one run can show the
//! user every broken reference or duplicate identifier at once. Only
//! structural damage (an unterminated block) stops a stage early.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{IdError, TaskId};

/// Position within a source text (`origin:line`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// File path or `<stdin>`
    pub origin: String,
    /// 1-based line number
    pub line: usize,
}

impl Location {
    pub fn new(origin: impl Into<String>, line: usize) -> Self {
        Self {
            origin: origin.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    #[error("{0}")]
    Syntax(String),

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error(transparent)]
    InvalidIdentifier(#[from] IdError),

    #[error("Duplicate task identifier {id}{}", first_declared(.first))]
    DuplicateIdentifier { id: TaskId, first: Option<Location> },

    #[error("Invalid {property} value '{value}': {reason}")]
    InvalidValue {
        property: &'static str,
        value: String,
        reason: String,
    },

    #[error("Task {task} depends on {dependency}, which does not exist")]
    MissingDependency { task: TaskId, dependency: TaskId },

    #[error("Cannot include {}: {reason}", .path.display())]
    MissingInclude { path: PathBuf, reason: String },

    #[error("Include cycle: {} is already being expanded", .path.display())]
    CyclicInclude { path: PathBuf },

    #[error("Dependency cycle: {}", join_ids(.cycle))]
    DependencyCycle { cycle: Vec<TaskId> },

    #[error("{0}")]
    Ignored(String),
}

fn first_declared(first: &Option<Location>) -> String {
    match first {
        Some(loc) => format!(" (first declared at {})", loc),
        None => String::new(),
    }
}

fn join_ids(ids: &[TaskId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl TaskError {
    /// Stable short name of the error class, used in rendered diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            TaskError::Syntax(_) => "syntax",
            TaskError::UnknownProperty(_) => "unknown-property",
            TaskError::InvalidIdentifier(_) | TaskError::DuplicateIdentifier { .. } => {
                "invalid-identifier"
            }
            TaskError::InvalidValue { .. } => "invalid-value",
            TaskError::MissingDependency { .. } | TaskError::MissingInclude { .. } => {
                "missing-reference"
            }
            TaskError::CyclicInclude { .. } => "cyclic-include",
            TaskError::DependencyCycle { .. } => "dependency-cycle",
            TaskError::Ignored(_) => "ignored",
        }
    }

    pub(crate) fn invalid_value(
        property: &'static str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        TaskError::InvalidValue {
            property,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single reported problem
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Option<Location>,
    pub error: TaskError,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{}: ", loc)?;
        }
        write!(f, "{}[{}]: {}", self.severity, self.kind(), self.error)
    }
}

/// Collector threaded through the pipeline stages
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error
    pub fn error(&mut self, location: Option<Location>, error: impl Into<TaskError>) {
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            location,
            error: error.into(),
        });
    }

    /// Records a warning
    pub fn warn(&mut self, location: Option<Location>, error: impl Into<TaskError>) {
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            location,
            error: error.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_error()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

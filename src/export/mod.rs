//! # Exporters
//!
//! Read-only views over a resolved task tree.
//!
//! | Exporter | Sections | Options |
//! |----------|----------|---------|
//! | `calendar` | agenda of unfinished tasks, then listing | `summary` |
//! | `simple` | table of contents, then listing | `summary`, `fold` |
//! | `full` | table of contents, agenda, then listing | `summary`, `fold` |
//! | `plain` | canonical task file | none |

mod options;
mod toc;
mod calendar;
mod listing;
mod plain;

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::domain::{DependencyGraph, TaskNode, TaskStatus, TaskTree};

pub use options::{ExportConfig, OptionError};
pub use toc::{is_foldable, write_toc};
pub use calendar::{write_calendar, Agenda};
pub use listing::write_listing;
pub use plain::write_plain;

/// Available report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Exporter {
    Calendar,
    Simple,
    Full,
    Plain,
}

impl Exporter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exporter::Calendar => "calendar",
            Exporter::Simple => "simple",
            Exporter::Full => "full",
            Exporter::Plain => "plain",
        }
    }

    /// Returns true if `summary`/`fold` affect this exporter
    pub fn takes_options(&self) -> bool {
        !matches!(self, Exporter::Plain)
    }

    /// Renders the report
    pub fn render(&self, tree: &TaskTree, graph: &DependencyGraph, config: &ExportConfig) -> String {
        let mut out = String::new();
        // fmt::Write for String never fails
        let _ = self.write(&mut out, tree, graph, config);
        out
    }

    fn write<W: Write>(
        &self,
        out: &mut W,
        tree: &TaskTree,
        graph: &DependencyGraph,
        config: &ExportConfig,
    ) -> fmt::Result {
        if *self == Exporter::Plain {
            return write_plain(out, tree);
        }

        if matches!(self, Exporter::Simple | Exporter::Full) {
            write_toc(out, tree, graph, config.fold)?;
            writeln!(out)?;
        }
        if matches!(self, Exporter::Calendar | Exporter::Full) {
            write_calendar(out, tree)?;
        }
        if config.summary {
            write_listing(out, tree)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Exporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual marker for a status in list views
pub(crate) fn marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Blocked => "[!]",
        TaskStatus::Done => "[x]",
    }
}

/// `{id} {label}`, or just the identifier for unlabeled tasks
pub(crate) fn heading(node: &TaskNode) -> String {
    match node.label() {
        Some(label) => format!("{} {}", node.id(), label),
        None => node.id().to_string(),
    }
}

//! Task Burrito - Markdown task files into structured reports
//!
//! A task file is a sequence of front-matter blocks, each declaring a task
//! by a dotted identifier (`1.2.3`) followed by free-form notes. The library
//! parses those blocks (expanding `include` blocks), builds the task tree,
//! resolves inherited priority and deadline, validates dependencies, and
//! renders one of four reports.
//!
//! ```
//! use task_burrito::{render, ExportConfig, Exporter, MemoryLoader, Source};
//!
//! let text = "---\ntask 1\nlabel Ship it\ndeadline 2020-02-01\n---\n";
//! let report = render(
//!     &Source::from_stdin(text),
//!     &MemoryLoader::new(),
//!     Exporter::Calendar,
//!     &ExportConfig { summary: false, fold: false },
//! );
//! assert!(report.is_success());
//! assert!(report.text.contains("### 2020-02-01 Saturday"));
//! ```

pub mod diagnostic;
pub mod domain;
pub mod document;
pub mod export;
pub mod config;
pub mod pipeline;
pub mod cli;

pub use diagnostic::{Diagnostic, Diagnostics, Location, Severity, TaskError};
pub use document::{FsLoader, MemoryLoader, Source, SourceLoader};
pub use domain::{TaskId, TaskNode, TaskStatus, TaskTree};
pub use export::{ExportConfig, Exporter};
pub use pipeline::{load, render, Document, Report};

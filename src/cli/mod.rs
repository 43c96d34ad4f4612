//! # Command-Line Interface
//!
//! ```bash
//! burrito tasks.md simple fold=1
//! burrito - plain < tasks.md > tasks.sorted.md
//! burrito --format json tasks.md calendar summary=0
//! ```
//!
//! The report is written to stdout. Diagnostics go to stderr, and any error
//! makes the process exit non-zero without printing a report.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for per-stage debug logging, or set `RUST_LOG`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the run.

mod app;
mod output;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};

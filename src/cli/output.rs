//! Output formatting for the CLI
//!
//! Reports go to stdout untouched; diagnostics go to stderr either as one
//! human-readable line each or as one JSON object per line.

use crate::diagnostic::{Diagnostic, Severity};

/// Diagnostic output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints the rendered report
    pub fn report(&self, text: &str) {
        print!("{}", text);
    }

    /// Prints a diagnostic from the pipeline
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        match self.format {
            OutputFormat::Text => eprintln!("{}", diagnostic),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "severity": diagnostic.severity,
                        "kind": diagnostic.kind(),
                        "location": diagnostic.location,
                        "message": diagnostic.error.to_string(),
                    })
                );
            }
        }
    }

    /// Prints a warning that did not come from the pipeline
    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("{}: {}", Severity::Warning, message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "severity": Severity::Warning,
                        "message": message,
                    })
                );
            }
        }
    }

    /// Prints the closing error count of a failed run (text only)
    pub fn failure_summary(&self, errors: usize) {
        if self.format == OutputFormat::Text {
            let plural = if errors == 1 { "" } else { "s" };
            eprintln!("Failed with {} error{}", errors, plural);
        }
    }
}

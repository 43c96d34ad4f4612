//! The batch pipeline
//!
//! parse → expand includes → build tree → resolve properties → validate
//! references → export. Each stage completes before the next starts, and
//! the whole run is a pure function of its inputs: nothing global is read
//! besides what the [`SourceLoader`] serves.

use tracing::debug;

use crate::diagnostic::{Diagnostic, Diagnostics, TaskError};
use crate::document::{expand_includes, parse_blocks, Source, SourceLoader};
use crate::domain::{resolve_properties, validate_references, DependencyGraph, TaskTree};
use crate::export::{ExportConfig, Exporter};

/// A fully resolved and validated document
#[derive(Debug)]
pub struct Document {
    pub tree: TaskTree,
    pub graph: DependencyGraph,
}

/// Outcome of one run
#[derive(Debug)]
pub struct Report {
    /// Rendered output; empty when the run failed
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Returns true if no error diagnostics were produced
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

/// Parses, builds, resolves and validates a document
///
/// Returns None if any stage recorded an error. Records that survived a
/// parse or include error are still built into a tree so duplicate
/// identifiers are reported in the same run, but dependency references are
/// only checked against a complete record set.
pub fn load(source: &Source, loader: &dyn SourceLoader, diagnostics: &mut Diagnostics) -> Option<Document> {
    let origin = source.origin();
    let blocks = parse_blocks(&source.text, &origin, diagnostics);
    let records = expand_includes(
        blocks,
        loader,
        &source.base_dir(),
        source.path.as_deref(),
        diagnostics,
    );
    let incomplete = diagnostics.has_errors();
    if records.is_empty() && !incomplete {
        diagnostics.error(
            None,
            TaskError::Syntax(format!("{} contains no tasks", origin)),
        );
        return None;
    }

    let mut tree = TaskTree::build(records, diagnostics);
    if incomplete {
        // a dropped record would show up as a false missing reference
        return None;
    }

    resolve_properties(&mut tree);
    let graph = validate_references(&tree, diagnostics);
    if diagnostics.has_errors() {
        return None;
    }

    debug!(tasks = tree.len(), linked = graph.len(), "loaded document");
    Some(Document { tree, graph })
}

/// Runs the whole pipeline: (source, exporter, options) → (report, diagnostics)
pub fn render(
    source: &Source,
    loader: &dyn SourceLoader,
    exporter: Exporter,
    config: &ExportConfig,
) -> Report {
    let mut diagnostics = Diagnostics::new();
    let text = match load(source, loader, &mut diagnostics) {
        Some(doc) => exporter.render(&doc.tree, &doc.graph, config),
        None => String::new(),
    };

    debug!(
        exporter = %exporter,
        bytes = text.len(),
        errors = diagnostics.error_count(),
        "rendered report"
    );
    Report {
        text,
        diagnostics: diagnostics.into_vec(),
    }
}

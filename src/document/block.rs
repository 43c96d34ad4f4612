//! Block parser
//!
//! A task file is a sequence of blocks. Each block opens with a line that is
//! exactly `---`, lists `key value` front-matter lines, closes with another
//! `---`, and owns every following line (its notes) up to the next opening
//! delimiter or the end of the text.

use std::collections::BTreeSet;

use tracing::debug;

use crate::diagnostic::{Diagnostics, Location, TaskError};
use crate::domain::{Deadline, Declared, Priority, TaskId, TaskRecord, TaskStatus};

const DELIMITER: &str = "---";

const TASK_KEYS: &[&str] = &["task", "label", "status", "priority", "deadline", "depends"];
const INCLUDE_KEY: &str = "include";

/// One parsed block, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Task(TaskRecord),
    Include(IncludeBlock),
}

/// A block whose only key is `include`
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeBlock {
    /// Paths exactly as written, in declaration order
    pub paths: Vec<String>,
    pub location: Location,
}

/// A `key value` front-matter line
#[derive(Debug)]
struct Entry<'a> {
    key: &'a str,
    value: &'a str,
    location: Location,
}

/// A block waiting for the rest of its notes
struct Pending {
    block: Option<Block>,
    notes: String,
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == DELIMITER
}

/// Splits `text` into blocks
///
/// Recoverable problems are recorded and the offending block is dropped; an
/// unterminated front matter stops parsing at that point.
pub fn parse_blocks(text: &str, origin: &str, diagnostics: &mut Diagnostics) -> Vec<Block> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut blocks = Vec::new();
    let mut pending: Option<Pending> = None;
    let mut warned_preamble = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let line_no = i + 1;

        if !is_delimiter(line) {
            match pending.as_mut() {
                Some(p) => p.notes.push_str(line),
                None if !warned_preamble && !line.trim().is_empty() => {
                    diagnostics.warn(
                        Some(Location::new(origin, line_no)),
                        TaskError::Ignored(
                            "Ignoring content that does not belong to a task".to_string(),
                        ),
                    );
                    warned_preamble = true;
                }
                None => {}
            }
            i += 1;
            continue;
        }

        if let Some(p) = pending.take() {
            flush(p, &mut blocks, diagnostics);
        }

        let opening = Location::new(origin, line_no);
        let start = i + 1;
        let Some(offset) = lines[start..].iter().position(|l| is_delimiter(l)) else {
            diagnostics.error(
                Some(opening),
                TaskError::Syntax("Unterminated front matter: no closing --- before end of input".to_string()),
            );
            return blocks;
        };
        let end = start + offset;

        let entries = tokenize(&lines[start..end], start + 1, origin, diagnostics);
        pending = Some(Pending {
            block: build_block(entries, opening, diagnostics),
            notes: String::new(),
        });
        i = end + 1;
    }

    if let Some(p) = pending.take() {
        flush(p, &mut blocks, diagnostics);
    }

    debug!(origin, blocks = blocks.len(), "parsed blocks");
    blocks
}

fn flush(pending: Pending, blocks: &mut Vec<Block>, diagnostics: &mut Diagnostics) {
    match pending.block {
        Some(Block::Task(mut record)) => {
            record.notes = pending.notes;
            blocks.push(Block::Task(record));
        }
        Some(Block::Include(include)) => {
            if !pending.notes.trim().is_empty() {
                diagnostics.warn(
                    Some(include.location.clone()),
                    TaskError::Ignored("Text after an include block is ignored".to_string()),
                );
            }
            blocks.push(Block::Include(include));
        }
        None => {}
    }
}

/// Splits front-matter lines into `key value` entries
fn tokenize<'a>(
    lines: &[&'a str],
    first_line_no: usize,
    origin: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<Entry<'a>> {
    let mut entries = Vec::new();
    for (offset, raw) in lines.iter().enumerate() {
        let location = Location::new(origin, first_line_no + offset);
        let line = raw.trim();
        if line.is_empty() {
            diagnostics.warn(
                Some(location),
                TaskError::Ignored("Blank lines are not recommended within task blocks".to_string()),
            );
            continue;
        }

        let (key, value) = match line.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (line, ""),
        };
        entries.push(Entry {
            key,
            value,
            location,
        });
    }
    entries
}

/// Classifies a block and validates its properties
fn build_block(entries: Vec<Entry<'_>>, opening: Location, diagnostics: &mut Diagnostics) -> Option<Block> {
    let mut ok = true;
    for entry in &entries {
        if entry.key != INCLUDE_KEY && !TASK_KEYS.contains(&entry.key) {
            diagnostics.error(
                Some(entry.location.clone()),
                TaskError::UnknownProperty(entry.key.to_string()),
            );
            ok = false;
        }
    }

    let has_include = entries.iter().any(|e| e.key == INCLUDE_KEY);
    let has_task_keys = entries.iter().any(|e| TASK_KEYS.contains(&e.key));

    if has_include {
        if has_task_keys {
            diagnostics.error(
                Some(opening),
                TaskError::Syntax("Include blocks cannot declare task properties".to_string()),
            );
            return None;
        }
        let include = build_include(&entries, opening, diagnostics);
        return if ok { include.map(Block::Include) } else { None };
    }

    let record = build_task(&entries, opening, diagnostics);
    if ok {
        record.map(Block::Task)
    } else {
        None
    }
}

fn build_include(
    entries: &[Entry<'_>],
    location: Location,
    diagnostics: &mut Diagnostics,
) -> Option<IncludeBlock> {
    let mut paths = Vec::new();
    let mut ok = true;
    for entry in entries.iter().filter(|e| e.key == INCLUDE_KEY) {
        if entry.value.is_empty() {
            diagnostics.error(
                Some(entry.location.clone()),
                TaskError::invalid_value("include", entry.value, "path cannot be empty"),
            );
            ok = false;
            continue;
        }
        paths.push(entry.value.to_string());
    }
    ok.then_some(IncludeBlock { paths, location })
}

/// Property values seen so far in one task block
#[derive(Default)]
struct TaskFields {
    id: Option<TaskId>,
    label: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Declared<Priority>>,
    deadline: Option<Declared<Deadline>>,
    depends: BTreeSet<TaskId>,
}

fn build_task(entries: &[Entry<'_>], opening: Location, diagnostics: &mut Diagnostics) -> Option<TaskRecord> {
    let mut fields = TaskFields::default();
    let mut seen: Vec<&str> = Vec::new();
    let mut ok = true;

    for entry in entries.iter().filter(|e| TASK_KEYS.contains(&e.key)) {
        if entry.key != "depends" {
            if seen.contains(&entry.key) {
                diagnostics.error(
                    Some(entry.location.clone()),
                    TaskError::Syntax(format!(
                        "Duplicate property '{}' not allowed in task block",
                        entry.key
                    )),
                );
                ok = false;
                continue;
            }
            seen.push(entry.key);
        }

        if let Err(err) = apply(&mut fields, entry) {
            diagnostics.error(Some(entry.location.clone()), err);
            ok = false;
        }
    }

    let Some(id) = fields.id else {
        if !seen.contains(&"task") {
            diagnostics.error(
                Some(opening),
                TaskError::Syntax("Task block must have a 'task' property".to_string()),
            );
        }
        return None;
    };

    if !ok {
        return None;
    }

    let mut record = TaskRecord::new(id, opening);
    record.label = fields.label;
    record.status = fields.status;
    record.priority = fields.priority.unwrap_or_default();
    record.deadline = fields.deadline.unwrap_or_default();
    record.depends = fields.depends;
    Some(record)
}

fn apply(fields: &mut TaskFields, entry: &Entry<'_>) -> Result<(), TaskError> {
    let value = entry.value;
    match entry.key {
        "task" => fields.id = Some(value.parse()?),
        "label" => {
            if value.is_empty() {
                return Err(TaskError::invalid_value("label", value, "label cannot be empty"));
            }
            fields.label = Some(value.to_string());
        }
        "status" => {
            let status = value
                .parse()
                .map_err(|reason: String| TaskError::invalid_value("status", value, reason))?;
            fields.status = Some(status);
        }
        "priority" => {
            let priority = Declared::parse(value)
                .map_err(|reason| TaskError::invalid_value("priority", value, reason))?;
            fields.priority = Some(priority);
        }
        "deadline" => {
            let deadline = Declared::parse(value)
                .map_err(|reason| TaskError::invalid_value("deadline", value, reason))?;
            fields.deadline = Some(deadline);
        }
        "depends" => {
            if value.is_empty() {
                return Err(TaskError::invalid_value(
                    "depends",
                    value,
                    "leave out depends when there are no dependencies",
                ));
            }
            for dep in value.split_whitespace() {
                fields.depends.insert(dep.parse()?);
            }
        }
        other => return Err(TaskError::UnknownProperty(other.to_string())),
    }
    Ok(())
}

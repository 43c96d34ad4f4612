//! Canonical re-serialization
//!
//! Emits every declared task in identifier order with only the properties
//! written in its block. Inherited values are never written out, and an
//! explicit `none` stays `none`, so feeding the output back in yields the
//! same tree and the same output.

use std::fmt::{self, Write};

use crate::domain::{Declared, TaskRecord, TaskTree, NONE_SENTINEL};

pub fn write_plain<W: Write>(out: &mut W, tree: &TaskTree) -> fmt::Result {
    for record in tree.iter().filter_map(|node| node.record()) {
        write_record(out, record)?;
    }
    Ok(())
}

fn write_record<W: Write>(out: &mut W, record: &TaskRecord) -> fmt::Result {
    writeln!(out, "---")?;
    writeln!(out, "task {}", record.id)?;
    if let Some(label) = &record.label {
        writeln!(out, "label {}", label)?;
    }
    if let Some(status) = record.status {
        writeln!(out, "status {}", status)?;
    }
    write_declared(out, "priority", &record.priority)?;
    write_declared(out, "deadline", &record.deadline)?;
    if !record.depends.is_empty() {
        let deps: Vec<_> = record.depends.iter().map(|d| d.to_string()).collect();
        writeln!(out, "depends {}", deps.join(" "))?;
    }
    writeln!(out, "---")?;

    out.write_str(&record.notes)?;
    if !record.notes.is_empty() && !record.notes.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn write_declared<W: Write, T: fmt::Display>(
    out: &mut W,
    key: &str,
    value: &Declared<T>,
) -> fmt::Result {
    match value {
        Declared::Unset => Ok(()),
        Declared::Cleared => writeln!(out, "{} {}", key, NONE_SENTINEL),
        Declared::Value(v) => writeln!(out, "{} {}", key, v),
    }
}
